use chrono::Utc;
use fleet_monitor::{FleetController, ScanTask};
use fleet_sim::{FleetSynthesizer, SynthConfig};
use proptest::prelude::*;
use risk_classifier::RiskThresholds;
use std::collections::HashSet;
use std::time::Duration;

fn seeded_controller(seed: u64, fleet_size: usize, hot_ratio: f64) -> FleetController {
    let config = SynthConfig {
        fleet_size,
        seed: Some(seed),
        hot_ratio,
        ..Default::default()
    };
    let thresholds = RiskThresholds::default();
    let mut synthesizer = FleetSynthesizer::new(config, thresholds.clone()).unwrap();
    FleetController::from_synthesizer(&mut synthesizer, thresholds, Utc::now()).unwrap()
}

#[test]
fn test_incidents_match_flagged_vehicles() {
    let mut controller = seeded_controller(99, 300, 0.2);
    let report = controller.scan();

    let flagged: HashSet<_> = controller
        .vehicles()
        .iter()
        .filter(|v| v.requires_emergency_response())
        .map(|v| v.id.clone())
        .collect();
    let with_incident: HashSet<_> = controller
        .incidents()
        .incidents()
        .iter()
        .map(|i| i.vehicle_id.clone())
        .collect();

    assert_eq!(report.emergencies, flagged.len());
    assert_eq!(flagged, with_incident);
    assert_eq!(controller.stats().incidents.pending, flagged.len());
}

#[tokio::test(start_paused = true)]
async fn test_task_over_synthesized_fleet() {
    let controller = seeded_controller(7, 100, 0.3).into_shared();
    let task = ScanTask::start(controller.clone(), Duration::from_secs(30));

    tokio::time::sleep(Duration::from_secs(300)).await;
    task.cancel().await.unwrap();

    let controller = controller.read().await;
    let stats = controller.stats();
    assert_eq!(stats.incidents.total(), stats.emergency_vehicles);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_repeated_scans_never_duplicate(seed in any::<u64>(), passes in 2usize..6) {
        let mut controller = seeded_controller(seed, 60, 0.25);
        let first = controller.scan();
        for _ in 1..passes {
            prop_assert!(controller.scan().opened.is_empty());
        }
        prop_assert_eq!(controller.incidents().len(), first.opened.len());

        let mut seen = HashSet::new();
        for incident in controller.incidents().open_incidents() {
            prop_assert!(seen.insert(incident.vehicle_id.clone()));
        }
    }
}
