//! Headless convergence run for all three strategies.
//!
//! Drives each simulation for a fixed number of ticks and prints the
//! running estimate at checkpoints, the way the web front end would after
//! each 50ms tick.

use mcsim::prelude::*;

fn run(label: &str, strategy: Box<dyn Strategy>, ticks: u64) {
    let config = SimConfig::builder().seed(42).batch_size(50).build();
    let mut engine = SimEngine::new(strategy, &config);
    engine.start();

    println!("== {label} ==");
    for checkpoint in [10, 100, 1000, ticks] {
        while engine.state().total_steps() < checkpoint * u64::from(engine.batch_size()) {
            engine.tick();
        }
        let steps = engine.state().total_steps();
        match engine.estimate() {
            Estimate::Pi { value } => println!("  {steps:>8} samples: pi ~= {value:.6}"),
            Estimate::Undefined => println!("  {steps:>8} samples: no estimate yet"),
            Estimate::Importance { shares } => {
                print!("  {steps:>8} steps:");
                for (node, share) in &shares {
                    print!(" {node}={:.3}", share);
                }
                println!();
            }
        }
    }
    engine
        .state()
        .audit()
        .expect("running counters must match a full recount");
    println!();
}

fn main() {
    run("pi by point sampling", Box::new(PointStrategy::new()), 2000);
    run(
        "pi by Buffon's needle",
        Box::new(NeedleStrategy::new(NeedleGeometry::default())),
        2000,
    );
    run(
        "pagerank random walk",
        Box::new(WalkStrategy::new(Graph::sample())),
        2000,
    );
}
