//! Planning worlds used by tests and benchmarks.

pub mod detour;
pub mod gripper;
pub mod scenarios;
pub mod twin_switches;

pub use detour::Detour;
pub use gripper::Gripper;
pub use scenarios::{AlreadySolved, Disconnected, SingleSwitch};
pub use twin_switches::TwinSwitches;
