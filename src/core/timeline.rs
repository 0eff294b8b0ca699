use rustc_hash::FxHashMap;

use crate::core::state::{CoreId, CoreState, ProcId, Process, Tick};

/// One contiguous stretch of a core held by the same occupant, or idle
/// when `proc` is None.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySegment {
    pub id: u64,
    pub core: CoreId,
    pub proc: Option<ProcId>,
    /// Color ordinal of the occupant, carried redundantly for renderers.
    pub proc_index: Option<usize>,
    pub start: Tick,
    /// Extended in place while the occupant persists.
    pub duration: Tick,
}

/// Append-only occupancy log. The most recent segment per core is grown
/// in place while its occupant stays put; segments are never reordered or
/// deleted, so the log is a faithful replay of dispatch history.
#[derive(Debug, Default)]
pub struct Timeline {
    segments: Vec<HistorySegment>,
    latest: FxHashMap<CoreId, usize>,
    next_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every core's occupant for `tick`, called after the engine
    /// has dispatched for that tick. Purely observational: reads cores
    /// and processes, never feeds back into scheduling.
    pub fn record(&mut self, tick: Tick, cores: &[CoreState], procs: &[Process]) {
        for core in cores {
            let occupant = core.current;
            if let Some(&idx) = self.latest.get(&core.id) {
                if self.segments[idx].proc == occupant {
                    self.segments[idx].duration += 1;
                    continue;
                }
            }
            let id = self.next_id;
            self.next_id += 1;
            self.latest.insert(core.id, self.segments.len());
            self.segments.push(HistorySegment {
                id,
                core: core.id,
                proc: occupant,
                proc_index: occupant.map(|p| procs[p].index),
                start: tick,
                duration: 1,
            });
        }
    }

    pub fn segments(&self) -> &[HistorySegment] {
        &self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::SimState;

    fn occupy(state: &mut SimState, core: CoreId, id: ProcId, tick: Tick) {
        state.mark_ready(id, tick);
        state.seat(core, id, tick);
    }

    #[test]
    fn same_occupant_extends_in_place() {
        let mut state = SimState::new(1);
        let id = state.admit(5, 1, 0);
        occupy(&mut state, 0, id, 0);

        let mut timeline = Timeline::new();
        for tick in 0..3 {
            timeline.record(tick, &state.cores, &state.procs);
        }

        let segments = timeline.segments();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, 0);
        assert_eq!(segments[0].duration, 3);
        assert_eq!(segments[0].proc, Some(id));
        assert_eq!(segments[0].proc_index, Some(0));
    }

    #[test]
    fn occupant_change_appends_a_segment() {
        let mut state = SimState::new(1);
        let a = state.admit(5, 1, 0);
        let b = state.admit(5, 1, 0);
        let mut timeline = Timeline::new();

        occupy(&mut state, 0, a, 0);
        timeline.record(0, &state.cores, &state.procs);

        state.vacate(0);
        state.mark_ready(a, 1);
        occupy(&mut state, 0, b, 1);
        timeline.record(1, &state.cores, &state.procs);

        state.vacate(0);
        timeline.record(2, &state.cores, &state.procs);
        timeline.record(3, &state.cores, &state.procs);

        let segments = timeline.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!((segments[0].proc, segments[0].duration), (Some(a), 1));
        assert_eq!((segments[1].proc, segments[1].duration), (Some(b), 1));
        // Idle interval compacts the same way occupied ones do.
        assert_eq!((segments[2].proc, segments[2].duration), (None, 2));
        assert_eq!(segments[2].start, 2);
        assert_eq!(segments[2].proc_index, None);
    }

    #[test]
    fn cores_are_tracked_independently() {
        let mut state = SimState::new(2);
        let a = state.admit(5, 1, 0);
        occupy(&mut state, 1, a, 0);

        let mut timeline = Timeline::new();
        timeline.record(0, &state.cores, &state.procs);
        timeline.record(1, &state.cores, &state.procs);

        let core0: Vec<_> = timeline.segments().iter().filter(|s| s.core == 0).collect();
        let core1: Vec<_> = timeline.segments().iter().filter(|s| s.core == 1).collect();
        assert_eq!(core0.len(), 1);
        assert_eq!(core0[0].proc, None);
        assert_eq!(core1.len(), 1);
        assert_eq!(core1[0].proc, Some(a));
        assert_eq!(core1[0].duration, 2);
    }
}
