use average::Estimate;
use tracing::debug;

use crate::core::engine::advance;
use crate::core::error::{ConfigError, Result};
use crate::core::event::SchedEvent;
use crate::core::observer::Observer;
use crate::core::state::{CoreState, ProcId, ProcStatus, Process, SimState, Tick};
use crate::core::timeline::{HistorySegment, Timeline};
use crate::policy::{Policy, PolicyParams};
use crate::sim::spec::ProcessSpec;

/// Caller-facing driver. Owns every piece of mutable simulation state
/// (the engine itself holds none) and is the single writer between
/// ticks, so a display loop reading snapshots never races a mutation.
#[derive(Debug)]
pub struct Simulation {
    state: SimState,
    policy: Policy,
    params: PolicyParams,
    timeline: Timeline,
    observer: Observer,
    last_events: Vec<SchedEvent>,
}

impl Simulation {
    pub fn new(policy: Policy, params: PolicyParams, num_cores: usize) -> Result<Self> {
        if num_cores == 0 {
            return Err(ConfigError::CoreCount);
        }
        params.validate(policy)?;
        Ok(Self {
            state: SimState::new(num_cores),
            policy,
            params,
            timeline: Timeline::new(),
            observer: Observer::new(),
            last_events: Vec::new(),
        })
    }

    /// Admit a process; it becomes schedulable from its arrival tick.
    pub fn add_process(&mut self, spec: ProcessSpec) -> Result<ProcId> {
        if spec.burst == 0 {
            return Err(ConfigError::Burst);
        }
        if spec.priority == 0 {
            return Err(ConfigError::Priority);
        }
        if spec.arrival < self.state.tick {
            return Err(ConfigError::ArrivalInPast {
                arrival: spec.arrival,
                now: self.state.tick,
            });
        }
        Ok(self.state.admit(spec.burst, spec.priority, spec.arrival))
    }

    /// Switch the scheduling algorithm between ticks. The current
    /// parameter bundle must be valid for the new policy.
    pub fn set_policy(&mut self, policy: Policy) -> Result<()> {
        self.params.validate(policy)?;
        self.policy = policy;
        Ok(())
    }

    /// Replace the parameter bundle between ticks.
    pub fn set_params(&mut self, params: PolicyParams) -> Result<()> {
        params.validate(self.policy)?;
        self.params = params;
        Ok(())
    }

    /// Resize the core fleet. Only allowed before the first tick (or
    /// after a reset); a live resize would orphan running occupants.
    pub fn set_core_count(&mut self, num_cores: usize) -> Result<()> {
        if num_cores == 0 {
            return Err(ConfigError::CoreCount);
        }
        if self.state.tick > 0 {
            return Err(ConfigError::SimulationStarted);
        }
        self.state.cores = (0..num_cores)
            .map(|id| CoreState { id, current: None })
            .collect();
        Ok(())
    }

    /// Advance one tick: engine, then invariant audit, then timeline.
    /// Safe to call at arbitrary pacing; each call is atomic.
    pub fn step(&mut self) -> &[SchedEvent] {
        let tick = self.state.tick;
        self.last_events = advance(&mut self.state, self.policy, &self.params);
        self.observer.audit(&self.state);
        self.timeline.record(tick, &self.state.cores, &self.state.procs);
        &self.last_events
    }

    /// Step until every process completes, up to `limit` ticks. Returns
    /// false when the limit was hit first.
    pub fn run_to_completion(&mut self, limit: Tick) -> bool {
        while !self.all_completed() {
            if self.state.tick >= limit {
                debug!(limit, "tick limit reached before completion");
                return false;
            }
            self.step();
        }
        true
    }

    /// Back to the seeded-empty state: tick counter, process list, core
    /// occupancy and history log together, never a partial clear.
    pub fn reset(&mut self) {
        let num_cores = self.state.cores.len();
        self.state = SimState::new(num_cores);
        self.timeline = Timeline::new();
        self.observer = Observer::new();
        self.last_events.clear();
    }

    pub fn tick(&self) -> Tick {
        self.state.tick
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn params(&self) -> &PolicyParams {
        &self.params
    }

    pub fn processes(&self) -> &[Process] {
        &self.state.procs
    }

    pub fn cores(&self) -> &[CoreState] {
        &self.state.cores
    }

    pub fn timeline(&self) -> &[HistorySegment] {
        self.timeline.segments()
    }

    pub fn all_completed(&self) -> bool {
        self.state.all_completed()
    }

    /// Cloned, render-ready snapshot of processes and cores.
    pub fn snapshot(&self) -> (Vec<Process>, Vec<CoreState>) {
        (self.state.procs.clone(), self.state.cores.clone())
    }

    /// Aggregate metrics over the work done so far.
    pub fn metrics(&self) -> Metrics {
        Metrics::collect(&self.state.procs)
    }
}

/// Mean scheduling metrics. Wait and turnaround cover completed
/// processes; response covers every process that has been dispatched at
/// least once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub completed: usize,
    pub avg_wait: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
}

impl Metrics {
    fn collect(procs: &[Process]) -> Self {
        let wait: average::Mean = procs.iter().filter_map(|p| p.wait).map(|w| w as f64).collect();
        let turnaround: average::Mean = procs
            .iter()
            .filter_map(|p| p.turnaround)
            .map(|t| t as f64)
            .collect();
        let response: average::Mean = procs
            .iter()
            .filter_map(|p| p.start_time.map(|s| (s - p.arrival) as f64))
            .collect();
        Self {
            completed: procs
                .iter()
                .filter(|p| p.status == ProcStatus::Completed)
                .count(),
            avg_wait: wait.estimate(),
            avg_turnaround: turnaround.estimate(),
            avg_response: response.estimate(),
        }
    }
}
