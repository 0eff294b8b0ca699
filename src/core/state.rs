// Index into the canonical process Vec
pub type ProcId = usize;
pub type CoreId = usize;
pub type Tick = u64;

/// Number of MLFQ lanes; lane 0 is the highest scheduling priority.
pub const MLFQ_LANES: u8 = 3;
/// Bottom MLFQ lane; demotion stops here.
pub const LAST_LANE: u8 = MLFQ_LANES - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcStatus {
    /// Created but not yet arrived.
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub id: ProcId,
    /// Admission ordinal, used by renderers for deterministic colors.
    pub index: usize,
    /// Lower number = more urgent. Always >= 1; aging stops at 1.
    pub priority: u32,
    /// Total service requirement, fixed at creation.
    pub burst: Tick,
    pub remaining: Tick,
    pub arrival: Tick,
    pub start_time: Option<Tick>,
    pub completion_time: Option<Tick>,
    pub turnaround: Option<Tick>,
    pub wait: Option<Tick>,
    pub status: ProcStatus,
    /// MLFQ lane, 0..MLFQ_LANES. Unused by the other policies.
    pub lane: u8,
    /// Ticks consumed in the current dispatch. Zeroed on every dispatch.
    pub quantum_used: Tick,
    /// Tick of the most recent transition into Ready. FCFS/RR/MLFQ order
    /// their queues by this, so a requeued process lands at the back.
    pub ready_since: Tick,
}

impl Process {
    /// Ready and past its arrival tick, i.e. dispatchable.
    pub fn is_eligible(&self, tick: Tick) -> bool {
        self.status == ProcStatus::Ready && self.arrival <= tick
    }
}

/// One execution unit. Holds an id reference into the process Vec, never
/// ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreState {
    pub id: CoreId,
    pub current: Option<ProcId>,
}

/// The whole mutable simulation state. Owned by the driver; the engine
/// only ever sees it as an argument.
#[derive(Debug, Clone)]
pub struct SimState {
    pub tick: Tick,
    pub cores: Vec<CoreState>,
    pub procs: Vec<Process>,
}

impl SimState {
    pub fn new(num_cores: usize) -> Self {
        assert!(num_cores >= 1, "simulation requires at least one core");
        Self {
            tick: 0,
            cores: (0..num_cores)
                .map(|id| CoreState { id, current: None })
                .collect(),
            procs: Vec::new(),
        }
    }

    /// Create a process in Pending state. Validation happens at the
    /// driver boundary; this only derives id/index from admission order.
    pub fn admit(&mut self, burst: Tick, priority: u32, arrival: Tick) -> ProcId {
        let id = self.procs.len();
        self.procs.push(Process {
            id,
            index: id,
            priority,
            burst,
            remaining: burst,
            arrival,
            start_time: None,
            completion_time: None,
            turnaround: None,
            wait: None,
            status: ProcStatus::Pending,
            lane: 0,
            quantum_used: 0,
            ready_since: arrival,
        });
        id
    }

    pub fn proc(&self, id: ProcId) -> &Process {
        &self.procs[id]
    }

    pub fn proc_mut(&mut self, id: ProcId) -> &mut Process {
        &mut self.procs[id]
    }

    pub fn core_is_idle(&self, core: CoreId) -> bool {
        self.cores[core].current.is_none()
    }

    pub fn mark_ready(&mut self, id: ProcId, tick: Tick) {
        let proc = &mut self.procs[id];
        debug_assert_ne!(
            proc.status,
            ProcStatus::Completed,
            "completed process {id} cannot become ready"
        );
        proc.status = ProcStatus::Ready;
        proc.ready_since = tick;
    }

    /// Terminal transition: stamps completion_time and derives
    /// turnaround/wait. No field of the process may change afterwards.
    pub fn mark_completed(&mut self, id: ProcId, at: Tick) {
        let proc = &mut self.procs[id];
        debug_assert_eq!(
            proc.status,
            ProcStatus::Running,
            "process {id} must be running to complete"
        );
        debug_assert_eq!(proc.remaining, 0, "process {id} completed with service left");
        debug_assert!(
            at >= proc.arrival + proc.burst,
            "process {id} completed at {at} before receiving {} ticks of service",
            proc.burst
        );
        proc.status = ProcStatus::Completed;
        proc.completion_time = Some(at);
        let turnaround = at - proc.arrival;
        proc.turnaround = Some(turnaround);
        proc.wait = Some(turnaround - proc.burst);
    }

    /// Dispatch `id` onto `core`. First dispatch stamps start_time; every
    /// dispatch zeroes the quantum counter.
    pub fn seat(&mut self, core: CoreId, id: ProcId, tick: Tick) {
        assert!(
            self.cores[core].current.is_none(),
            "core {core} already running a process"
        );
        let proc = &mut self.procs[id];
        debug_assert_eq!(
            proc.status,
            ProcStatus::Ready,
            "process {id} must be ready to dispatch"
        );
        debug_assert!(proc.arrival <= tick, "process {id} dispatched before arrival");
        proc.status = ProcStatus::Running;
        proc.quantum_used = 0;
        if proc.start_time.is_none() {
            proc.start_time = Some(tick);
        }
        self.cores[core].current = Some(id);
    }

    pub fn vacate(&mut self, core: CoreId) {
        self.cores[core].current = None;
    }

    pub fn all_completed(&self) -> bool {
        self.procs.iter().all(|p| p.status == ProcStatus::Completed)
    }
}
