// demos/breakpoints.rs
// Run with:
//   cargo run --example breakpoints

use bullseye::systems::stats;
use bullseye::{BatchConfig, run_batch_with};

fn main() {
    let cfg = BatchConfig::with_samples(20_000);

    let batch = match run_batch_with(&cfg) {
        Ok(batch) => batch,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("== Bullseye: rules as stated ==");
    println!("best  -> {}", batch.best_case);
    println!("worst -> {}", batch.worst_case);
    if let Some(mean) = stats::mean(&batch) {
        println!("mean  -> {mean:.2} over {} runs", batch.sample_count());
    }
    for bp in stats::breakpoints(&batch) {
        println!("{:>5.1} % of runs finish within {} bullets", bp.percent(), bp.total);
    }
}
