//! Search counters and f-bound checkpoints.

use log::info;
use serde_json::{json, Value};

/// Emitted whenever the f bound at expansion strictly increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub g: i64,
    pub f: i64,
    pub expanded: u64,
    pub evaluated: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    pub expanded_states: u64,
    /// States whose evaluation context was created.
    pub evaluated_states: u64,
    /// Individual evaluator computations.
    pub evaluations: u64,
    pub generated_states: u64,
    pub reopened_states: u64,
    pub dead_end_states: u64,
    pub generated_ops: u64,
    pub checkpoints: Vec<Checkpoint>,
    last_f: Option<i64>,
}

impl SearchStatistics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The f bound of the most recent checkpoint (or the initial f).
    #[must_use]
    pub fn f_bound(&self) -> Option<i64> {
        self.last_f
    }

    /// Record the initial state's f value without a checkpoint.
    pub fn report_initial_f_value(&mut self, f: i64) {
        self.last_f = Some(f);
        info!("f = {f} [{} evaluated, {} expanded]", self.evaluated_states, self.expanded_states);
    }

    /// Record the f value of an expanded state. Returns `true` and appends a
    /// checkpoint if it raises the bound.
    pub fn report_f_value_progress(&mut self, g: i64, f: i64) -> bool {
        if self.last_f.is_some_and(|last| f <= last) {
            return false;
        }
        self.last_f = Some(f);
        self.checkpoints.push(Checkpoint {
            g,
            f,
            expanded: self.expanded_states,
            evaluated: self.evaluated_states,
        });
        info!(
            "f = {f} [g={g}, {} evaluated, {} expanded]",
            self.evaluated_states, self.expanded_states
        );
        true
    }

    pub fn print_basic_statistics(&self) {
        info!("Expanded {} state(s).", self.expanded_states);
        info!("Reopened {} state(s).", self.reopened_states);
        info!("Evaluated {} state(s).", self.evaluated_states);
        info!("Evaluations: {}", self.evaluations);
        info!("Generated {} state(s).", self.generated_states);
        info!("Dead ends: {} state(s).", self.dead_end_states);
    }

    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let checkpoints: Vec<Value> = self
            .checkpoints
            .iter()
            .map(|c| {
                json!({
                    "g": c.g,
                    "f": c.f,
                    "expanded": c.expanded,
                    "evaluated": c.evaluated,
                })
            })
            .collect();
        json!({
            "expanded_states": self.expanded_states,
            "evaluated_states": self.evaluated_states,
            "evaluations": self.evaluations,
            "generated_states": self.generated_states,
            "generated_ops": self.generated_ops,
            "reopened_states": self.reopened_states,
            "dead_end_states": self.dead_end_states,
            "checkpoints": checkpoints,
        })
    }
}
