//! Run reports: produce → write directory → read directory → verify.

use orbit_harness::report_dir::{read_report_dir, write_report_dir, ReportDirReadError};
use orbit_harness::runner::{run_world, HeuristicKind, RunConfig, RunReport};
use orbit_harness::worlds::{Detour, Disconnected, Gripper};
use orbit_search::SearchPolicy;

fn gripper_report() -> RunReport {
    run_world(&Gripper::new(2), &RunConfig::default().with_symmetry()).unwrap()
}

#[test]
fn roundtrip_produces_equal_report() {
    lock_tests::init_logging();
    let report = gripper_report();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();

    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded, report);

    let stored = std::fs::read_to_string(dir.path().join("report_digest.txt")).unwrap();
    assert_eq!(stored, report.digest().unwrap().as_str());
    assert!(stored.starts_with("sha256:"));
}

#[test]
fn failed_runs_persist_too() {
    lock_tests::init_logging();
    let report = run_world(&Disconnected, &RunConfig::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();
    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded.status, "failed");
    assert_eq!(loaded.plan_cost, None);
}

#[test]
fn overwrite_replaces_previous_report() {
    lock_tests::init_logging();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&gripper_report(), dir.path()).unwrap();

    let policy = SearchPolicy {
        reopen_closed_nodes: true,
        ..SearchPolicy::default()
    };
    let detour =
        run_world(&Detour, &RunConfig::astar(HeuristicKind::GoalCount).with_policy(policy)).unwrap();
    write_report_dir(&detour, dir.path()).unwrap();
    let loaded = read_report_dir(dir.path()).unwrap();
    assert_eq!(loaded.world_id, "detour");
    assert_eq!(loaded.plan_cost, Some(22));
    assert_eq!(loaded.statistics["reopened_states"], 1);
}

#[test]
fn edited_statistics_fail_verification() {
    lock_tests::init_logging();
    let report = gripper_report();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&report, dir.path()).unwrap();

    let path = dir.path().join("report.json");
    let mut value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    value["statistics"]["expanded_states"] = serde_json::json!(1);
    std::fs::write(&path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();

    match read_report_dir(dir.path()) {
        Err(ReportDirReadError::DigestMismatch { stored, recomputed }) => {
            assert_eq!(stored, report.digest().unwrap().as_str());
            assert_ne!(stored, recomputed);
        }
        other => panic!("expected DigestMismatch, got {other:?}"),
    }
}

#[test]
fn missing_report_file_is_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    match read_report_dir(dir.path()) {
        Err(ReportDirReadError::MissingFile { filename }) => assert_eq!(filename, "report.json"),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn truncated_report_is_malformed() {
    lock_tests::init_logging();
    let dir = tempfile::tempdir().unwrap();
    write_report_dir(&gripper_report(), dir.path()).unwrap();
    std::fs::write(dir.path().join("report.json"), b"{\"world_id\":").unwrap();
    assert!(matches!(
        read_report_dir(dir.path()),
        Err(ReportDirReadError::Malformed { .. })
    ));
}
