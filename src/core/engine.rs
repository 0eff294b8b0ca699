use tracing::{debug, trace};

use crate::core::event::SchedEvent;
use crate::core::state::{ProcStatus, SimState, Tick, LAST_LANE};
use crate::policy::{Policy, PolicyParams};

/// Advance the simulation by exactly one tick.
///
/// Pure over its arguments: no hidden state, so two calls with identical
/// state, policy and params produce identical state and events. One call
/// processes `state.tick` through a fixed step order (arrivals, aging,
/// MLFQ boost, execution, preemption, dispatch) and leaves `state.tick`
/// incremented by one. The step order is load-bearing: a process seated
/// by dispatch occupies the core for the current tick, and the decrement
/// in the execution step closes out the previous tick's occupancy.
pub fn advance(state: &mut SimState, policy: Policy, params: &PolicyParams) -> Vec<SchedEvent> {
    let tick = state.tick;
    let mut events = Vec::new();

    admit_arrivals(state, tick, &mut events);
    if policy == Policy::Priority && params.aging_enabled {
        age_ready(state, tick, params.aging_interval, &mut events);
    }
    if policy == Policy::Mlfq && tick > 0 && tick % params.mlfq_boost_interval == 0 {
        boost_lanes(state, &mut events);
    }
    run_occupants(state, tick, policy, params, &mut events);
    check_preemptions(state, tick, policy, &mut events);
    dispatch_vacant(state, tick, policy, &mut events);

    state.tick = tick + 1;
    events
}

fn admit_arrivals(state: &mut SimState, tick: Tick, events: &mut Vec<SchedEvent>) {
    for id in 0..state.procs.len() {
        let proc = &state.procs[id];
        if proc.arrival == tick && proc.status == ProcStatus::Pending {
            state.mark_ready(id, tick);
            events.push(SchedEvent::Arrived { proc: id });
        }
    }
}

/// One priority-number decrement per process per qualifying anniversary
/// of its arrival, floored at 1.
fn age_ready(state: &mut SimState, tick: Tick, interval: Tick, events: &mut Vec<SchedEvent>) {
    for proc in &mut state.procs {
        if proc.status != ProcStatus::Ready || proc.arrival > tick || proc.priority <= 1 {
            continue;
        }
        let waited = tick - proc.arrival;
        if waited > 0 && waited % interval == 0 {
            proc.priority -= 1;
            events.push(SchedEvent::Aged {
                proc: proc.id,
                priority: proc.priority,
            });
        }
    }
}

/// Starvation countermeasure: every non-completed process returns to the
/// top lane, running occupants included.
fn boost_lanes(state: &mut SimState, events: &mut Vec<SchedEvent>) {
    for proc in &mut state.procs {
        if proc.status != ProcStatus::Completed && proc.lane != 0 {
            proc.lane = 0;
            events.push(SchedEvent::Boosted { proc: proc.id });
        }
    }
}

/// Burn one tick of service on every occupied core, then settle
/// completion, RR quantum expiry and MLFQ demotion, in that order.
fn run_occupants(
    state: &mut SimState,
    tick: Tick,
    policy: Policy,
    params: &PolicyParams,
    events: &mut Vec<SchedEvent>,
) {
    for core in 0..state.cores.len() {
        let Some(id) = state.cores[core].current else {
            continue;
        };

        let (remaining, quantum_used, lane) = {
            let proc = &mut state.procs[id];
            debug_assert_eq!(
                proc.status,
                ProcStatus::Running,
                "core {core} references process {id} that is not running"
            );
            proc.remaining = proc.remaining.saturating_sub(1);
            if policy.uses_quantum() {
                proc.quantum_used += 1;
            }
            (proc.remaining, proc.quantum_used, proc.lane)
        };

        if remaining == 0 {
            state.vacate(core);
            state.mark_completed(id, tick);
            debug!(proc = id, core, at = tick, "process completed");
            events.push(SchedEvent::Completed { proc: id, at: tick });
            continue;
        }

        match policy {
            Policy::RoundRobin if quantum_used >= params.time_quantum => {
                // quantum_used is deliberately left as-is here; it is
                // zeroed at the next dispatch only.
                state.vacate(core);
                state.mark_ready(id, tick);
                events.push(SchedEvent::QuantumExpired { core, proc: id });
            }
            Policy::Mlfq => {
                if params.mlfq_slice(lane).is_some_and(|slice| quantum_used >= slice) {
                    state.vacate(core);
                    state.mark_ready(id, tick);
                    let proc = &mut state.procs[id];
                    proc.quantum_used = 0;
                    proc.lane = (proc.lane + 1).min(LAST_LANE);
                    events.push(SchedEvent::Demoted {
                        core,
                        proc: id,
                        lane: proc.lane,
                    });
                }
            }
            _ => {}
        }
    }
}

/// Evict incumbents that a ready contender strictly beats: by remaining
/// time under SRTF, by priority number under Priority, by lane under
/// MLFQ. The ready set is re-read per core, so a process evicted from an
/// earlier core is a contender for later ones.
fn check_preemptions(state: &mut SimState, tick: Tick, policy: Policy, events: &mut Vec<SchedEvent>) {
    if !policy.preemptive() {
        return;
    }
    for core in 0..state.cores.len() {
        let Some(id) = state.cores[core].current else {
            continue;
        };
        let Some(challenger) = policy.select(&state.procs, tick) else {
            continue;
        };
        if policy.preempts(&state.procs[id], &state.procs[challenger]) {
            state.vacate(core);
            state.mark_ready(id, tick);
            state.procs[id].quantum_used = 0;
            debug!(proc = id, core, by = challenger, at = tick, "preempted");
            events.push(SchedEvent::Preempted {
                core,
                proc: id,
                by: challenger,
            });
        }
    }
}

/// Fill every vacant core in core order. A process seated here turns
/// Running immediately, so later cores cannot claim it again, and no core
/// stays idle while an eligible ready process exists.
fn dispatch_vacant(state: &mut SimState, tick: Tick, policy: Policy, events: &mut Vec<SchedEvent>) {
    for core in 0..state.cores.len() {
        if state.cores[core].current.is_some() {
            continue;
        }
        match policy.select(&state.procs, tick) {
            Some(id) => {
                state.seat(core, id, tick);
                trace!(proc = id, core, at = tick, "dispatched");
                events.push(SchedEvent::Dispatched { core, proc: id });
            }
            None => events.push(SchedEvent::CoreIdle { core }),
        }
    }
}
