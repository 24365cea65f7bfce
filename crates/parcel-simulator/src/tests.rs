//! Unit tests for configuration layering and sink-path derivation.

use std::io::Write;
use std::path::{Path, PathBuf};

use toml::Value;

use parcel_core::SimConfig;

use crate::settings::{apply_overrides, load_with, merge};
use crate::worker_path;

fn parse(text: &str) -> Value {
    text.parse().unwrap()
}

fn write_config(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    path
}

// ── Merge ─────────────────────────────────────────────────────────────────────

#[test]
fn later_value_replaces_scalar() {
    let mut base = parse("seed = 1\nsimulator_id = \"a\"");
    merge(&mut base, parse("seed = 2"));

    assert_eq!(base["seed"].as_integer(), Some(2));
    assert_eq!(base["simulator_id"].as_str(), Some("a"));
}

#[test]
fn nested_tables_merge_key_by_key() {
    let mut base = parse(
        "[physics]\npickup_speed_mps = 10.0\nhub_dwell_secs = 14400",
    );
    merge(&mut base, parse("[physics]\nhub_dwell_secs = 60"));

    let physics = base["physics"].as_table().unwrap();
    assert_eq!(physics["pickup_speed_mps"].as_float(), Some(10.0));
    assert_eq!(physics["hub_dwell_secs"].as_integer(), Some(60));
}

#[test]
fn overlay_introduces_new_keys() {
    let mut base = parse("seed = 1");
    merge(&mut base, parse("num_workers = 4"));
    assert_eq!(base["num_workers"].as_integer(), Some(4));
}

// ── Overrides ─────────────────────────────────────────────────────────────────

#[test]
fn flag_wins_over_env_and_file() {
    let mut config = SimConfig { simulator_id: "from-file".into(), ..SimConfig::default() };
    apply_overrides(&mut config, Some("from-flag"), Some("from-env"), None).unwrap();
    assert_eq!(config.simulator_id, "from-flag");
}

#[test]
fn env_wins_over_file_when_no_flag() {
    let mut config = SimConfig { simulator_id: "from-file".into(), ..SimConfig::default() };
    apply_overrides(&mut config, None, Some("from-env"), None).unwrap();
    assert_eq!(config.simulator_id, "from-env");
}

#[test]
fn metrics_port_env_is_parsed() {
    let mut config = SimConfig::default();
    apply_overrides(&mut config, None, None, Some("9464")).unwrap();
    assert_eq!(config.metrics_port, Some(9464));
}

#[test]
fn bad_metrics_port_is_rejected() {
    let mut config = SimConfig::default();
    assert!(apply_overrides(&mut config, None, None, Some("not-a-port")).is_err());
}

// ── End-to-end loading ────────────────────────────────────────────────────────

#[test]
fn files_merge_in_order_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_config(
        dir.path(),
        "base.toml",
        "simulator_id = \"sim-1\"\nseed = 7\n\n[physics]\nhub_dwell_secs = 14400\n",
    );
    let overlay = write_config(
        dir.path(),
        "local.toml",
        "seed = 99\n\n[physics]\nhub_dwell_secs = 60\n",
    );

    let config = load_with(&[base, overlay], None, None, None).unwrap();
    assert_eq!(config.simulator_id, "sim-1");
    assert_eq!(config.seed, 99);
    assert_eq!(config.physics.hub_dwell_secs, 60);
    // Untouched knobs keep their defaults.
    assert_eq!(config.physics.initial_stagger_secs, 3_600);
}

#[test]
fn missing_simulator_id_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let base = write_config(dir.path(), "base.toml", "seed = 7\n");
    assert!(load_with(&[base], None, None, None).is_err());
}

#[test]
fn no_files_plus_id_flag_is_enough() {
    let config = load_with(&[], Some("sim-cli"), None, None).unwrap();
    assert_eq!(config.simulator_id, "sim-cli");
    assert_eq!(config.seed, 42);
}

// ── Sink paths ────────────────────────────────────────────────────────────────

#[test]
fn worker_path_inserts_worker_index() {
    assert_eq!(
        worker_path(Path::new("out/events.csv"), 3),
        PathBuf::from("out/events-3.csv"),
    );
    assert_eq!(worker_path(Path::new("events"), 0), PathBuf::from("events-0"));
}
