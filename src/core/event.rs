use crate::core::state::{CoreId, ProcId, Tick};

/// Scheduling decisions surfaced by one `advance` call, in the order they
/// were taken. Consumed by the driver's event log and by tests; never fed
/// back into scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedEvent {
    Arrived {
        proc: ProcId,
    },
    /// Priority aging lowered the process's priority number.
    Aged {
        proc: ProcId,
        priority: u32,
    },
    /// MLFQ starvation boost pulled the process back to lane 0.
    Boosted {
        proc: ProcId,
    },
    Dispatched {
        core: CoreId,
        proc: ProcId,
    },
    /// Round-Robin slice ran out; process returned to the ready queue.
    QuantumExpired {
        core: CoreId,
        proc: ProcId,
    },
    /// MLFQ slice ran out; process dropped one lane.
    Demoted {
        core: CoreId,
        proc: ProcId,
        lane: u8,
    },
    /// A ready process beat the incumbent under the active policy.
    Preempted {
        core: CoreId,
        proc: ProcId,
        by: ProcId,
    },
    Completed {
        proc: ProcId,
        at: Tick,
    },
    // Core idle even after dispatch
    CoreIdle {
        core: CoreId,
    },
}
