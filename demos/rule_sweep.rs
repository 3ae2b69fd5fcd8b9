// demos/rule_sweep.rs
// Run with:
//   cargo run --example rule_sweep

use bullseye::report::BatchReport;
use bullseye::sweep::run_sweep;
use bullseye::BatchConfig;

fn main() {
    // Small batches; the point is the spread between variants.
    let cfg = BatchConfig {
        stage_sample_limit: 200,
        ..BatchConfig::with_samples(5_000)
    };

    let outcomes = match run_sweep(&cfg) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("sweep failed: {e}");
            std::process::exit(1);
        }
    };

    for out in &outcomes {
        let report = BatchReport::from_batch(&out.batch);
        println!("== {} ==", report.rules);
        print!("{}", report.summary_text());
        print!("{}", report.families_text());
        println!();
    }
}
