mod common;

use common::{small_config, scratch_dir, FailingLedger, Request};
use paynet::ledger::LedgerNode;
use simulator::config::{Config, SeedConfig, SweepConfig};
use simulator::names::{NameList, NumberedNames};
use simulator::simulation::{Phase, SimulationError};
use simulator::{run_simple_simulation, run_sweep_alpha_simulation, simulate};

#[tokio::test]
async fn test_samples_follow_the_interval() {
    let config = small_config(3);
    let (results, _ledger) = simulate(&config, LedgerNode::new(), &mut NumberedNames)
        .await
        .expect("simulation succeeds");

    assert_eq!(results.success_samples.len(), 10);
    assert_eq!(results.transactions_sent, 1000);

    let mut previous = 0;
    for (k, sample) in results.success_samples.iter().enumerate() {
        assert_eq!(sample.attempt_index, 100 * (k as u64 + 1));
        assert!((0.0..=1.0).contains(&sample.ratio));
        assert!(sample.successes >= previous);
        assert!(sample.successes <= sample.attempt_index);
        previous = sample.successes;
    }
}

#[tokio::test]
async fn test_transfers_use_distinct_participants() {
    let config = small_config(5);
    let (_results, ledger) = simulate(&config, LedgerNode::new(), &mut NumberedNames)
        .await
        .expect("simulation succeeds");

    assert_eq!(ledger.payments().len(), 1000);
    for payment in ledger.payments() {
        assert_ne!(payment.sender, payment.receiver);
        assert!(payment.sender < 30 && payment.receiver < 30);
        assert_eq!(payment.amount, 1);
    }
}

#[tokio::test]
async fn test_topology_is_ported_to_the_ledger() {
    let config = small_config(8);
    let (results, ledger) = simulate(&config, LedgerNode::new(), &mut NumberedNames)
        .await
        .expect("simulation succeeds");

    assert_eq!(ledger.user_count(), 30);
    assert_eq!(results.users_registered, 30);
    assert_eq!(ledger.channel_count(), results.channels);
    assert_eq!(results.channels_created as usize, results.channels);
    // achieved degrees may exceed their targets
    assert!(2 * results.channels >= results.degree_sum);
    assert_eq!(ledger.display_name(7), Some("user-7"));
}

#[tokio::test]
async fn test_reference_config_runs_for_many_seeds() {
    for seed in 100..110 {
        let mut config = Config::default();
        config.seed_config = SeedConfig { distribution_seed: Some(seed), edge_seed: Some(seed + 500) };
        config.transaction_config.transaction_count = 200;

        let (results, ledger) = simulate(&config, LedgerNode::new(), &mut NumberedNames)
            .await
            .unwrap_or_else(|e| panic!("seed {} failed: {}", seed, e));
        assert_eq!(ledger.user_count(), 100);
        assert_eq!(ledger.channel_count(), results.channels);
        assert_eq!(results.success_samples.len(), 2);
    }
}

#[tokio::test]
async fn test_display_names_are_forwarded() {
    let config = small_config(8);
    let mut names = NameList::new(["alice", "bob"]);
    let (_results, ledger) = simulate(&config, LedgerNode::new(), &mut names)
        .await
        .expect("simulation succeeds");

    assert_eq!(ledger.display_name(0), Some("alice"));
    assert_eq!(ledger.display_name(1), Some("bob"));
    assert_eq!(ledger.display_name(2), Some("user-2"));
}

#[tokio::test]
async fn test_same_seeds_replay_identically() {
    let config = small_config(11);
    let (first, first_ledger) = simulate(&config, LedgerNode::new(), &mut NumberedNames).await.expect("first run");
    let (second, second_ledger) = simulate(&config, LedgerNode::new(), &mut NumberedNames).await.expect("second run");

    assert_eq!(first.success_samples, second.success_samples);
    assert_eq!(first.degree_histogram, second.degree_histogram);
    assert_eq!(first.total_capacity, second.total_capacity);
    assert_eq!(first_ledger.payments(), second_ledger.payments());
}

#[tokio::test]
async fn test_ledger_failure_aborts_with_phase() {
    let cases = [
        (Request::Register, 4, Phase::Registration),
        (Request::Channel, 1, Phase::ChannelCreation),
        (Request::Payment, 250, Phase::Replay),
    ];
    for (request, nth, expected) in cases {
        let config = small_config(2);
        let result = simulate(&config, FailingLedger::new(request, nth), &mut NumberedNames).await;
        match result {
            Err(SimulationError::Ledger { phase, .. }) => assert_eq!(phase, expected),
            other => panic!("expected a ledger failure during {}, got {:?}", expected, other.map(|(r, _)| r)),
        }
    }
}

#[tokio::test]
async fn test_simple_scenario_saves_results() {
    let root = scratch_dir("simple");
    let results = run_simple_simulation(&small_config(4), &root).await.expect("simulation succeeds");

    let data = root.join("sim_simple").join("data");
    for file in [
        "simulation_stats.json",
        "success_samples.json",
        "degree_distribution.json",
        "sender_selection.json",
        "receiver_selection.json",
    ] {
        assert!(data.join(file).is_file(), "{} missing", file);
    }

    let stats: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(data.join("simulation_stats.json")).expect("readable"))
            .expect("valid json");
    assert_eq!(stats["parameters"]["participants"], 30);
    assert_eq!(stats["results"]["total_transactions"], 1000);
    assert_eq!(stats["results"]["final_success_ratio"], serde_json::json!(results.final_ratio()));

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn test_alpha_sweep_runs_every_exponent() {
    let root = scratch_dir("sweep");
    let mut config = small_config(6);
    config.transaction_config.transaction_count = 200;
    config.sweep_config = Some(SweepConfig { num_simulations: 3, alpha_step: 0.5 });

    let runs = run_sweep_alpha_simulation(&config, &root).await.expect("sweep succeeds");
    let alphas: Vec<f64> = runs.iter().map(|(alpha, _)| *alpha).collect();
    assert_eq!(alphas, vec![2.5, 3.0, 3.5]);
    assert!(runs.iter().all(|(_, results)| results.success_samples.len() == 2));

    let path = root.join("sim_sweep_alpha").join("data").join("sweep_results.json");
    let combined: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).expect("readable")).expect("valid json");
    assert_eq!(combined["num_simulations"], 3);
    assert_eq!(combined["simulation_results"][1]["alpha"], 3.0);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn test_sweep_without_section_is_rejected() {
    let root = scratch_dir("no-sweep");
    let result = run_sweep_alpha_simulation(&small_config(1), &root).await;
    assert!(matches!(result, Err(SimulationError::Config(_))));
}
