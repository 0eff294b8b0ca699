//! Invariant properties over random workloads, policies and core counts.

use proptest::prelude::*;
use schedlab::{Policy, PolicyParams, ProcStatus, ProcessSpec, Simulation};

const TICK_GUARD: u64 = 10_000;

fn arb_policy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        Just(Policy::Fcfs),
        Just(Policy::Sjf),
        Just(Policy::Srtf),
        Just(Policy::RoundRobin),
        Just(Policy::Priority),
        Just(Policy::Mlfq),
    ]
}

fn arb_specs() -> impl Strategy<Value = Vec<(u64, u32, u64)>> {
    prop::collection::vec((1u64..=12, 1u32..=5, 0u64..=25), 1..12)
}

fn tight_params() -> PolicyParams {
    // Small quanta and intervals so expiry, demotion, boost and aging all
    // fire inside short runs.
    PolicyParams {
        time_quantum: 2,
        aging_enabled: true,
        aging_interval: 3,
        mlfq_q0_quantum: 2,
        mlfq_q1_quantum: 4,
        mlfq_boost_interval: 7,
    }
}

fn build(policy: Policy, cores: usize, specs: &[(u64, u32, u64)]) -> Simulation {
    let mut sim = Simulation::new(policy, tight_params(), cores).unwrap();
    for &(burst, priority, arrival) in specs {
        sim.add_process(ProcessSpec {
            burst,
            priority,
            arrival,
        })
        .unwrap();
    }
    sim
}

fn remaining_sum(sim: &Simulation) -> u64 {
    sim.processes()
        .iter()
        .filter(|p| p.status != ProcStatus::Completed)
        .map(|p| p.remaining)
        .sum()
}

proptest! {
    #[test]
    fn conservation_and_single_occupancy(
        specs in arb_specs(),
        policy in arb_policy(),
        cores in 1usize..=4,
    ) {
        let mut sim = build(policy, cores, &specs);

        while !sim.all_completed() {
            prop_assert!(sim.tick() < TICK_GUARD, "simulation failed to converge");

            let occupied = sim.cores().iter().filter(|c| c.current.is_some()).count() as u64;
            let before = remaining_sum(&sim);
            sim.step();
            let after = remaining_sum(&sim);

            // Each occupied core burns exactly one tick of service.
            prop_assert_eq!(before - after, occupied);

            let mut referenced = Vec::new();
            for core in sim.cores() {
                if let Some(id) = core.current {
                    prop_assert!(!referenced.contains(&id), "process on two cores");
                    referenced.push(id);
                }
            }
            for proc in sim.processes() {
                prop_assert_eq!(
                    proc.status == ProcStatus::Running,
                    referenced.contains(&proc.id),
                    "running iff referenced by exactly one core"
                );
            }

            // Non-idling: no core sits empty while eligible work waits.
            let any_idle = sim.cores().iter().any(|c| c.current.is_none());
            let any_ready = sim
                .processes()
                .iter()
                .any(|p| p.is_eligible(sim.tick() - 1));
            prop_assert!(!(any_idle && any_ready));
        }

        for proc in sim.processes() {
            let completion = proc.completion_time.unwrap();
            prop_assert!(completion >= proc.arrival + proc.burst);
            prop_assert_eq!(proc.turnaround.unwrap(), completion - proc.arrival);
            prop_assert_eq!(proc.wait.unwrap(), proc.turnaround.unwrap() - proc.burst);
            prop_assert_eq!(proc.remaining, 0);
            prop_assert!(proc.start_time.unwrap() >= proc.arrival);
        }
    }

    #[test]
    fn timeline_replays_every_tick_contiguously(
        specs in arb_specs(),
        policy in arb_policy(),
        cores in 1usize..=4,
    ) {
        let mut sim = build(policy, cores, &specs);
        prop_assert!(sim.run_to_completion(TICK_GUARD));
        let elapsed = sim.tick();

        for core in 0..cores {
            let segments: Vec<_> = sim
                .timeline()
                .iter()
                .filter(|s| s.core == core)
                .collect();
            prop_assert!(!segments.is_empty());
            prop_assert_eq!(segments[0].start, 0);
            for pair in segments.windows(2) {
                prop_assert_eq!(pair[1].start, pair[0].start + pair[0].duration);
                // Compaction never splits one occupant across adjacent
                // segments.
                prop_assert_ne!(&pair[0].proc, &pair[1].proc);
            }
            let total: u64 = segments.iter().map(|s| s.duration).sum();
            prop_assert_eq!(total, elapsed);
        }

        // Segment ids are append-ordered and never reused.
        let ids: Vec<_> = sim.timeline().iter().map(|s| s.id).collect();
        for pair in ids.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn advance_is_deterministic(
        specs in arb_specs(),
        policy in arb_policy(),
        cores in 1usize..=4,
    ) {
        let mut a = build(policy, cores, &specs);
        let mut b = build(policy, cores, &specs);
        prop_assert!(a.run_to_completion(TICK_GUARD));
        prop_assert!(b.run_to_completion(TICK_GUARD));
        prop_assert_eq!(a.snapshot(), b.snapshot());
        prop_assert_eq!(a.timeline(), b.timeline());
    }
}
