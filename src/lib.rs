pub mod core;
pub mod policy;
pub mod sim;

pub use crate::core::{
    advance, ConfigError, CoreState, HistorySegment, ProcStatus, Process, SchedEvent, SimState,
    Timeline,
};
pub use policy::{Policy, PolicyParams};
pub use sim::{Metrics, Pacer, ProcessSpec, Simulation};
