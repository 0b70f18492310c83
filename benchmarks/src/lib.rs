//! Shared helpers for orbit benchmark suites.

use orbit_harness::contract::PlanningWorld;
use orbit_harness::runner::{build_components, HeuristicKind, RunConfig};
use orbit_harness::worlds::{Detour, Gripper};
use orbit_kernel::symmetry::group::GeneratorGroup;
use orbit_kernel::task::model::Task;
use orbit_kernel::task::successor::SuccessorGenerator;
use orbit_search::{EagerSearch, PlanningContext, SearchPolicy, SearchStatus};

/// A named world plus the configuration it is benchmarked under.
pub struct Regime {
    pub name: &'static str,
    pub world: Box<dyn PlanningWorld>,
    pub config: RunConfig,
}

/// The macro benchmark regimes: gripper with and without symmetry, and the
/// reopening-heavy detour.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let reopen = SearchPolicy {
        reopen_closed_nodes: true,
        ..SearchPolicy::default()
    };
    vec![
        Regime {
            name: "gripper_4/plain",
            world: Box::new(Gripper::new(4)),
            config: RunConfig::default(),
        },
        Regime {
            name: "gripper_4/symmetry",
            world: Box::new(Gripper::new(4)),
            config: RunConfig::default().with_symmetry(),
        },
        Regime {
            name: "gripper_6/symmetry",
            world: Box::new(Gripper::new(6)),
            config: RunConfig::default().with_symmetry(),
        },
        Regime {
            name: "detour/reopen",
            world: Box::new(Detour),
            config: RunConfig::astar(HeuristicKind::GoalCount).with_policy(reopen),
        },
    ]
}

/// Task, successor generator and symmetry group built once per regime, so
/// benchmarks can time only the search loop.
pub struct SearchSetup {
    pub task: Task,
    pub successors: SuccessorGenerator,
    pub group: Option<GeneratorGroup>,
}

/// # Panics
///
/// Panics if the world's task or symmetry generators are invalid. Benchmark
/// setup failures are fatal.
#[must_use]
pub fn prepare_search_setup(regime: &Regime) -> SearchSetup {
    let task = regime.world.task().expect("world task");
    let successors = SuccessorGenerator::new(&task);
    let group = regime.config.use_symmetry.then(|| {
        GeneratorGroup::new(&task, regime.world.symmetry_generators(&task))
            .expect("symmetry generators")
    });
    SearchSetup {
        task,
        successors,
        group,
    }
}

/// Run the engine alone (no plan validation, no report).
///
/// # Panics
///
/// Panics on a search error.
#[must_use]
pub fn run_search_only(setup: &SearchSetup, config: &RunConfig) -> SearchStatus {
    let mut context = PlanningContext::new(&setup.task, &setup.successors);
    if let Some(group) = &setup.group {
        context = context.with_symmetry(group);
    }
    let mut search = EagerSearch::new(
        context,
        config.policy,
        build_components(&setup.task, config),
    )
    .expect("valid policy");
    search.run().expect("search run")
}
