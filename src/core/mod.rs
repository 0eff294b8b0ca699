pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod state;
pub mod timeline;

pub use engine::advance;
pub use error::ConfigError;
pub use event::SchedEvent;
pub use observer::Observer;
pub use state::{CoreId, CoreState, ProcId, ProcStatus, Process, SimState, Tick};
pub use timeline::{HistorySegment, Timeline};
