use std::fmt;

use crate::core::error::{ConfigError, Result};
use crate::core::state::{ProcId, Process, Tick};

/// Default Round-Robin quantum, in ticks.
pub const DEFAULT_QUANTUM: Tick = 3;

/// The six scheduling policies. A closed enum so that the selection and
/// preemption steps are exhaustive matches: adding a policy is a
/// compiler-checked exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin,
    Priority,
    Mlfq,
}

impl Policy {
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::RoundRobin,
        Policy::Priority,
        Policy::Mlfq,
    ];

    /// Policies that meter a time slice during execution.
    pub fn uses_quantum(self) -> bool {
        matches!(self, Policy::RoundRobin | Policy::Mlfq)
    }

    /// Policies that may evict a running process for a ready contender.
    pub fn preemptive(self) -> bool {
        matches!(self, Policy::Srtf | Policy::Priority | Policy::Mlfq)
    }

    /// Pick the next process for a vacant core out of the ready, eligible
    /// set. Returns None when no process is dispatchable at `tick`.
    ///
    /// FCFS/RR order by `ready_since`, which equals arrival order for
    /// processes that never left the queue and puts requeued processes at
    /// the back. MLFQ scans lanes 0..2 and applies the same order within
    /// the first occupied lane. Every key ends on the admission index, so
    /// full ties resolve to admission order.
    pub fn select(self, procs: &[Process], tick: Tick) -> Option<ProcId> {
        let ready = procs.iter().filter(|p| p.is_eligible(tick));
        match self {
            Policy::Fcfs | Policy::RoundRobin => {
                ready.min_by_key(|p| (p.ready_since, p.index))
            }
            Policy::Sjf | Policy::Srtf => {
                ready.min_by_key(|p| (p.remaining, p.arrival, p.index))
            }
            Policy::Priority => ready.min_by_key(|p| (p.priority, p.arrival, p.index)),
            Policy::Mlfq => ready.min_by_key(|p| (p.lane, p.ready_since, p.index)),
        }
        .map(|p| p.id)
    }

    /// Whether `challenger` evicts `incumbent` under this policy. Ties
    /// never preempt; the incumbent keeps the core.
    pub fn preempts(self, incumbent: &Process, challenger: &Process) -> bool {
        match self {
            Policy::Fcfs | Policy::Sjf | Policy::RoundRobin => false,
            Policy::Srtf => challenger.remaining < incumbent.remaining,
            Policy::Priority => challenger.priority < incumbent.priority,
            // Lane priority is absolute: remaining and priority are ignored.
            Policy::Mlfq => challenger.lane < incumbent.lane,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Srtf => "SRTF",
            Policy::RoundRobin => "RR",
            Policy::Priority => "Priority",
            Policy::Mlfq => "MLFQ",
        };
        f.write_str(name)
    }
}

/// Policy-specific numeric configuration. One bundle covers all six
/// policies; each policy reads only its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyParams {
    /// Round-Robin slice.
    pub time_quantum: Tick,
    pub aging_enabled: bool,
    /// Ticks of waiting per one priority-number decrement.
    pub aging_interval: Tick,
    pub mlfq_q0_quantum: Tick,
    pub mlfq_q1_quantum: Tick,
    pub mlfq_boost_interval: Tick,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            time_quantum: DEFAULT_QUANTUM,
            aging_enabled: true,
            aging_interval: 10,
            mlfq_q0_quantum: 2,
            mlfq_q1_quantum: 4,
            mlfq_boost_interval: 20,
        }
    }
}

impl PolicyParams {
    /// Boundary validation. `advance` assumes params that passed here for
    /// the policy they are used with.
    pub fn validate(&self, policy: Policy) -> Result<()> {
        match policy {
            Policy::Fcfs | Policy::Sjf | Policy::Srtf => Ok(()),
            Policy::RoundRobin => {
                if self.time_quantum == 0 {
                    return Err(ConfigError::Quantum);
                }
                Ok(())
            }
            Policy::Priority => {
                if self.aging_enabled && self.aging_interval == 0 {
                    return Err(ConfigError::AgingInterval);
                }
                Ok(())
            }
            Policy::Mlfq => {
                if self.mlfq_q0_quantum == 0 || self.mlfq_q1_quantum == 0 {
                    return Err(ConfigError::MlfqQuantum);
                }
                if self.mlfq_boost_interval == 0 {
                    return Err(ConfigError::BoostInterval);
                }
                Ok(())
            }
        }
    }

    /// Slice for an MLFQ lane. The bottom lane is not metered.
    pub fn mlfq_slice(&self, lane: u8) -> Option<Tick> {
        match lane {
            0 => Some(self.mlfq_q0_quantum),
            1 => Some(self.mlfq_q1_quantum),
            _ => None,
        }
    }
}
