use rand::prelude::*;
use schedlab::{Policy, PolicyParams, ProcessSpec, SchedEvent, Simulation};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let specs = bernoulli_specs(120, 0.35, 0.4, 2, 9, 0);
    let num_cores = 2;
    println!(
        "{} processes on {num_cores} cores, default parameters\n",
        specs.len()
    );

    for policy in Policy::ALL {
        let mut sim = Simulation::new(policy, PolicyParams::default(), num_cores)
            .expect("default parameters are valid for every policy");
        for spec in &specs {
            sim.add_process(spec.clone()).expect("generated spec is valid");
        }

        let mut current_idle = vec![0u64; num_cores];
        let mut max_idle = 0u64;

        while !sim.all_completed() {
            let mut got_idle = vec![false; num_cores];
            for event in sim.step() {
                if let SchedEvent::CoreIdle { core } = event {
                    got_idle[*core] = true;
                }
            }

            for core in 0..num_cores {
                if got_idle[core] {
                    current_idle[core] += 1;
                    max_idle = max_idle.max(current_idle[core]);
                } else {
                    current_idle[core] = 0;
                }
            }
        }

        let metrics = sim.metrics();
        println!("{policy}: {} processes done at t={}", metrics.completed, sim.tick());
        println!("  avg wait:            {:.2} ticks", metrics.avg_wait);
        println!("  avg turnaround:      {:.2} ticks", metrics.avg_turnaround);
        println!("  avg response:        {:.2} ticks", metrics.avg_response);
        println!("  longest idle streak: {max_idle} ticks");
    }
}

fn bernoulli_specs(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_burst: u64,
    long_burst: u64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_burst
            } else {
                long_burst
            };

            specs.push(ProcessSpec {
                burst,
                priority: rng.random_range(1..=5),
                arrival: t,
            });
        }
    }

    specs
}
