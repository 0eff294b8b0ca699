use thiserror::Error;

use crate::core::state::Tick;

/// Rejections at the configuration boundary. Once configuration passes
/// here, `advance` is total and never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("core count must be at least 1")]
    CoreCount,

    #[error("time quantum must be at least 1 tick")]
    Quantum,

    #[error("aging interval must be at least 1 tick")]
    AgingInterval,

    #[error("MLFQ lane quantum must be at least 1 tick")]
    MlfqQuantum,

    #[error("MLFQ boost interval must be at least 1 tick")]
    BoostInterval,

    #[error("burst time must be at least 1 tick")]
    Burst,

    #[error("priority must be at least 1")]
    Priority,

    #[error("arrival time {arrival} precedes current tick {now}")]
    ArrivalInPast { arrival: Tick, now: Tick },

    #[error("speed multiplier must be positive and finite, got {0}")]
    Speed(f64),

    #[error("core count can only change before the simulation starts")]
    SimulationStarted,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
