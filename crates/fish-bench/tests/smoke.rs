use std::fs;

use fish_bench::config::ReplayConfig;
use fish_bench::replay::{ReplayRunner, RunSummary};
use fish_core::game::serialization::BeliefSnapshot;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path, hand: Option<&str>) -> ReplayConfig {
    let hand_line = hand.map(|cards| format!("hand: {cards}")).unwrap_or_default();
    let yaml = format!(
        r#"
run_id: "test_smoke"
seed: 4242
players: ["agent", "ann", "bo", "cy", "di", "ed"]
{hand_line}
moves:
  - {{ kind: call, sender: ann, target: bo, card: QS, result: hit }}
  - {{ kind: advise, result: miss }}
  - {{ kind: call, sender: cy, target: di, card: KD, result: miss }}
  - {{ kind: call, sender: bo, target: ann, card: 3C, result: hit }}
  - {{ kind: call, sender: bo, target: cy, card: 4C, result: hit }}
  - {{ kind: call, sender: bo, target: ann, card: 5C, result: hit }}
  - {{ kind: declare, sender: ed, group: high-hearts, result: miss, counts: [1, 2, 1, 1, 1, 0] }}
  - {{ kind: advise, result: hit }}
outputs:
  jsonl: "{jsonl}"
  snapshot: "{snapshot}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("events.jsonl").display(),
        snapshot = output_dir.join("belief.json").display(),
    );

    let mut cfg: ReplayConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run(output_dir: &std::path::Path) -> (RunSummary, Vec<serde_json::Value>) {
    let config = load_config(
        output_dir,
        Some(r#"["2C", "9C", "2D", "9D", "2H", "9H", "2S", "9S", "8C"]"#),
    );
    let outputs = config.resolved_outputs();
    let runner = ReplayRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("replay completes");
    let rows = fs::read_to_string(&summary.jsonl_path)
        .expect("jsonl readable")
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    (summary, rows)
}

#[test]
fn replay_smoke_test_writes_one_row_per_event() {
    let dir = tempdir().expect("temp dir");
    let (summary, rows) = run(dir.path());

    assert_eq!(summary.events_processed, 8);
    assert_eq!(summary.advice_given, 2);
    assert_eq!(summary.observed_declarations, 1);
    assert_eq!(summary.automatic_declarations, 1);
    assert_eq!(summary.reconciliation_requests, 1);
    assert_eq!(rows.len(), 8);

    assert_eq!(rows[0]["line"], "ann;bo;QS;hit");
    assert_eq!(rows[1]["kind"], "advise");
    assert_eq!(rows[1]["strategy"], "probability");
    assert_eq!(rows[1]["line"], "agent;ann;QS;miss");
    assert_eq!(rows[5]["automatic_declarations"][0], "low-clubs");
    assert_eq!(rows[6]["record"]["kind"], "suit");
    assert_eq!(rows[6]["line"], "ed;Red;high-hearts;miss");
    assert!(rows[7]["strategy"].is_string());

    let snapshot_path = summary.snapshot_path.expect("snapshot written");
    let snapshot =
        BeliefSnapshot::from_json(&fs::read_to_string(snapshot_path).expect("snapshot readable"))
            .expect("snapshot decodes");
    assert_eq!(snapshot.probabilities.len(), 6);
    assert!(!snapshot.hand.iter().any(|card| card == "2C" || card == "9H"));
}

#[test]
fn replay_is_deterministic_for_a_seed() {
    let first = tempdir().expect("temp dir");
    let second = tempdir().expect("temp dir");
    let (_, rows_a) = run(first.path());
    let (_, rows_b) = run(second.path());
    assert_eq!(rows_a, rows_b);
}

#[test]
fn missing_hand_is_dealt_from_the_seed() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), None);
    let outputs = config.resolved_outputs();
    let runner = ReplayRunner::new(config.clone(), outputs.clone()).expect("runner created");
    let again = ReplayRunner::new(config, outputs).expect("runner created");
    assert_eq!(runner.hand().len(), 9);
    assert_eq!(runner.hand(), again.hand());
}
