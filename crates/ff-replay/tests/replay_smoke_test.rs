//! Smoke tests for the replay host using scenario and config files on disk

use ff_replay::{load_config, load_scenario, run_scenario};
use std::fs;

const SCENARIO: &str = r#"
# T-side molotov lands on two teammates
{"type":"player_hurt","event":{"attacker":{"steam_id":11,"team":2,"name":"Nader"},"victim":{"steam_id":12,"team":2,"name":"Mate"},"dmg_health":60}}
{"type":"take_damage","victim":{"designer_name":"player","controller":{"steam_id":12,"team":2,"name":"Mate"}},"info":{"attacker":{"designer_name":"player","controller":{"steam_id":11,"team":2,"name":"Nader"}},"inflictor":{"designer_name":"inferno"},"damage":80}}
{"type":"take_damage","victim":{"designer_name":"player","controller":{"steam_id":13,"team":2,"name":"Other"}},"info":{"attacker":{"designer_name":"player","controller":{"steam_id":11,"team":2,"name":"Nader"}},"inflictor":{"designer_name":"inferno"},"damage":80}}

# enemy rifle damage is ignored
{"type":"take_damage","victim":{"designer_name":"player","controller":{"steam_id":21,"team":3,"name":"Enemy"}},"info":{"attacker":{"designer_name":"player","controller":{"steam_id":11,"team":2,"name":"Nader"}},"inflictor":{"designer_name":"weapon_ak47"},"damage":27}}
{"type":"player_hurt"}
"#;

#[test]
fn test_replay_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let scenario_path = dir.path().join("match.jsonl");
    let config_path = dir.path().join("advanced_friendlyfire.json");
    fs::write(&scenario_path, SCENARIO).unwrap();
    fs::write(
        &config_path,
        r#"{"Warning #1 Punishment": "css_slay {Player}"}"#,
    )
    .unwrap();

    let config = load_config(Some(&config_path)).unwrap();
    let steps = load_scenario(&scenario_path).unwrap();
    assert_eq!(steps.len(), 5);

    let report = run_scenario(config, &steps, true).unwrap();

    assert_eq!(report.hits_counted, 2);
    assert_eq!(report.hits_rejected, 1);
    assert_eq!(report.punishments.len(), 1);
    assert_eq!(report.punishments[0].total_damage, 120.0);

    let commands = report.commands();
    assert_eq!(commands.len(), 6);
    assert_eq!(commands[0], "mp_friendlyfire 1");
    assert_eq!(commands[5], "css_slay Nader");

    assert_eq!(report.standings.len(), 1);
    assert_eq!(report.standings[0].total_damage, 120.0);
}

#[test]
fn test_missing_scenario_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_scenario(dir.path().join("nope.jsonl")).unwrap_err();
    assert!(err.to_string().contains("Failed to read scenario"));
}

#[test]
fn test_report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let scenario_path = dir.path().join("match.jsonl");
    fs::write(&scenario_path, SCENARIO).unwrap();

    let steps = load_scenario(&scenario_path).unwrap();
    let report = run_scenario(load_config(None).unwrap(), &steps, false).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["hits_counted"], 2);
    assert_eq!(json["punishments"][0]["step"], "first");
    assert_eq!(json["transcript"][0]["kind"], "center_alert");
}
