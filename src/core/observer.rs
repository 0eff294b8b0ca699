use crate::core::state::{ProcStatus, SimState};

/// Post-tick consistency audit. Violations are programmer errors, not
/// recoverable conditions: a silently repaired inconsistency would
/// corrupt the turnaround/wait numbers downstream, so the audit fails
/// fast instead.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn audit(&mut self, state: &SimState) {
        self.step += 1;

        let mut referenced = Vec::new();
        for core in &state.cores {
            if let Some(id) = core.current {
                assert!(
                    id < state.procs.len(),
                    "core {} references unknown process {id}",
                    core.id
                );
                assert!(
                    !referenced.contains(&id),
                    "process {id} claimed by more than one core"
                );
                referenced.push(id);
                debug_assert_eq!(
                    state.procs[id].status,
                    ProcStatus::Running,
                    "core {} occupant {id} is not running",
                    core.id
                );
            }
        }

        for proc in &state.procs {
            debug_assert!(
                proc.remaining <= proc.burst,
                "process {} gained service",
                proc.id
            );
            match proc.status {
                ProcStatus::Pending => debug_assert!(
                    proc.arrival >= state.tick,
                    "process {} pending past its arrival",
                    proc.id
                ),
                ProcStatus::Ready => debug_assert!(
                    proc.arrival < state.tick,
                    "process {} ready before its arrival",
                    proc.id
                ),
                ProcStatus::Running => {
                    debug_assert!(
                        proc.arrival < state.tick,
                        "process {} running before its arrival",
                        proc.id
                    );
                    assert!(
                        referenced.contains(&proc.id),
                        "running process {} not referenced by any core",
                        proc.id
                    );
                }
                ProcStatus::Completed => {
                    debug_assert_eq!(
                        proc.remaining, 0,
                        "process {} completed with service left",
                        proc.id
                    );
                    let completion = proc
                        .completion_time
                        .expect("completed process must carry a completion time");
                    debug_assert_eq!(
                        proc.turnaround,
                        Some(completion - proc.arrival),
                        "process {} turnaround inconsistent",
                        proc.id
                    );
                    debug_assert_eq!(
                        proc.wait,
                        proc.turnaround.map(|t| t - proc.burst),
                        "process {} wait inconsistent",
                        proc.id
                    );
                }
            }
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }
}
