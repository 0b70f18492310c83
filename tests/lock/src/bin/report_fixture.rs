//! Binary that runs a fixed set of worlds and prints deterministic
//! `key=value` lines for cross-process verification.
//!
//! Usage: `report_fixture`
//!
//! Logging (via `RUST_LOG`) goes to stderr; stdout carries only the report
//! lines.

use orbit_harness::contract::PlanningWorld;
use orbit_harness::runner::{run_world, HeuristicKind, RunConfig, Strategy};
use orbit_harness::worlds::{Detour, Gripper, TwinSwitches};

fn emit(label: &str, world: &dyn PlanningWorld, config: &RunConfig) {
    let report = run_world(world, config).expect("run failed");
    let digest = report.digest().expect("digest failed");
    println!("{label}.status={}", report.status);
    println!("{label}.plan={}", report.plan.join(","));
    println!("{label}.registered_states={}", report.registered_states);
    println!("{label}.digest={digest}");
}

fn main() {
    env_logger::init();
    emit(
        "twin_switches_sym",
        &TwinSwitches,
        &RunConfig::default().with_symmetry(),
    );
    emit("detour", &Detour, &RunConfig::astar(HeuristicKind::GoalCount));
    emit(
        "detour_preferred",
        &Detour,
        &RunConfig::astar(HeuristicKind::GoalCount).with_strategy(Strategy::GreedyPreferred),
    );
    emit(
        "gripper_3_sym",
        &Gripper::new(3),
        &RunConfig::default().with_symmetry(),
    );
}
