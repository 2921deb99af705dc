use std::fs;

use briscola_bench::config::MatchConfig;
use briscola_bench::runner::MatchRunner;
use tempfile::tempdir;

fn load_config(output_dir: &std::path::Path) -> MatchConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
games:
  seed: 4242
  count: 3
players:
  - name: "rng_a"
    kind: "random"
  - name: "rng_b"
    kind: "random"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        jsonl = output_dir.join("games.jsonl").display(),
        summary = output_dir.join("summary.md").display()
    );

    let mut cfg: MatchConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

fn run_into(dir: &std::path::Path) -> (usize, String, String) {
    let config = load_config(dir);
    let outputs = config.resolved_outputs();
    let runner = MatchRunner::new(config, outputs);
    let summary = runner.run().expect("match completes");

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let md = fs::read_to_string(&summary.summary_path).expect("summary readable");
    (summary.rows_written, jsonl, md)
}

#[test]
fn smoke_run_produces_consistent_rows_and_summary() {
    let dir = tempdir().expect("temp dir");
    let (rows, jsonl, md) = run_into(dir.path());

    assert_eq!(rows, 3);
    let lines: Vec<&str> = jsonl.lines().collect();
    assert_eq!(lines.len(), 3);

    for line in &lines {
        let row: serde_json::Value = serde_json::from_str(line).expect("row decodes");
        let scores = row["scores"].as_array().expect("scores array");
        let north = scores[0].as_u64().unwrap();
        let south = scores[1].as_u64().unwrap();
        assert!(north + south <= 120, "point mass exceeded: {line}");

        match row["winner"].as_str() {
            Some("North") => assert!(north > south, "{line}"),
            Some("South") => assert!(south > north, "{line}"),
            None => assert_eq!(north, south, "{line}"),
            other => panic!("unexpected winner value {other:?}"),
        }

        let turns = row["turns"].as_u64().unwrap();
        assert!(turns >= 1 && turns <= 20, "{line}");
    }

    assert!(md.contains("test_smoke"));
    assert!(md.contains("| rng_a | North |"));
    assert!(md.contains("| rng_b | South |"));
}

#[test]
fn identical_seeds_reproduce_identical_outputs() {
    let dir_a = tempdir().expect("temp dir");
    let dir_b = tempdir().expect("temp dir");
    let (_, jsonl_a, _) = run_into(dir_a.path());
    let (_, jsonl_b, _) = run_into(dir_b.path());
    assert_eq!(jsonl_a, jsonl_b);
}
