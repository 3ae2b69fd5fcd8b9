//! Driver: argument parsing, logger setup, printed statistics and chart-data
//! artifacts. Only consistency failures abort; a missing recorded run or a
//! failed artifact is reported as a warning and the rest still runs.

use std::any::Any;
use std::fs;
use std::num::NonZeroU64;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use log::{info, warn};
use serde::Serialize;

use crate::error::{ArtifactError, Result};
use crate::mechanics::rules::RuleAlterations;
use crate::reference::{RecordedRun, load_recorded_run};
use crate::report::{self, BatchReport};
use crate::sweep::{VariantOutcome, run_sweep, run_variants};
use crate::systems::batch::BatchConfig;
use crate::systems::stage::{RunMode, StageSimulator};

#[derive(Parser, Debug)]
#[command(version, about = "Bullets needed to reach stage 100 of the bullseye loot event", long_about = None)]
pub struct Args {
    /// Logging level (overrides RUST_LOG). One of: trace, debug, info, warn, error
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sample many runs and print bounds, mean and breakpoints
    Batch(BatchArgs),
    /// Play a single run and print its per-stage breakdown
    Run(RunArgs),
}

#[derive(ClapArgs, Debug, Clone, Copy, Default)]
pub struct RuleArgs {
    /// Missed minor prizes stay on the board and can be hit again
    #[arg(long)]
    pub keep_hit_targets: bool,

    /// The major prize weight never increases after misses
    #[arg(long)]
    pub no_weight_increase: bool,
}

impl From<RuleArgs> for RuleAlterations {
    fn from(r: RuleArgs) -> Self {
        Self {
            keep_hit_targets: r.keep_hit_targets,
            no_weight_increase: r.no_weight_increase,
        }
    }
}

/// Arguments for the batch command
#[derive(ClapArgs, Debug)]
pub struct BatchArgs {
    /// Number of sampled runs
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub runs: usize,

    /// Seed of the first sample; sample i uses seed + i
    #[arg(long, default_value = "1000")]
    pub seed: NonZeroU64,

    #[command(flatten)]
    pub rules: RuleArgs,

    /// Run every rule-alteration variant (rule flags are ignored)
    #[arg(long)]
    pub sweep: bool,

    /// Histogram bins (default: one per attainable total)
    #[arg(long)]
    pub bins: Option<usize>,

    /// Recorded run CSV to compare stage families against
    #[arg(long, value_name = "CSV")]
    pub recorded: Option<PathBuf>,

    /// Directory for JSON chart data; nothing is written without it
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Samples whose per-stage breakdown is kept for the family summary
    #[arg(long, default_value_t = 1000)]
    pub stage_samples: usize,

    /// Sample on the current thread only
    #[arg(long)]
    pub sequential: bool,
}

impl BatchArgs {
    pub fn config(&self) -> BatchConfig {
        BatchConfig {
            sample_count: self.runs,
            base_seed: self.seed,
            rules: self.rules.into(),
            stage_sample_limit: self.stage_samples,
            parallel: !self.sequential,
            ..BatchConfig::default()
        }
    }
}

/// Arguments for the run command
#[derive(ClapArgs, Debug)]
pub struct RunArgs {
    #[arg(long, value_enum, default_value_t = RunMode::Normal)]
    pub mode: RunMode,

    /// Seed of the run; 0 picks one from the clock
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    #[command(flatten)]
    pub rules: RuleArgs,
}

pub fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.format_timestamp(None);
    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}

pub fn run_main(args: Args) -> Result<()> {
    init_logging(args.log_level.as_deref());
    match args.command {
        Commands::Batch(batch_args) => execute_batch(&batch_args),
        Commands::Run(run_args) => {
            execute_run(&run_args);
            Ok(())
        }
    }
}

pub fn execute_batch(args: &BatchArgs) -> Result<()> {
    let cfg = args.config();
    let outcomes = if args.sweep {
        run_sweep(&cfg)?
    } else {
        run_variants(&cfg, &[cfg.rules])?
    };

    let recorded = args.recorded.as_deref().and_then(|path| {
        info!("now loading {}", path.display());
        load_recorded_run(path)
            .inspect_err(|e| warn!("failed to load recorded run data: {e}"))
            .ok()
    });

    for out in &outcomes {
        println!("{}", BatchReport::from_batch(&out.batch).to_text());
        if let Some(dir) = &args.out_dir {
            write_artifacts(dir, out, args.bins, recorded.as_ref());
        }
        println!("=====================================");
    }
    Ok(())
}

pub fn execute_run(args: &RunArgs) {
    let result = StageSimulator::with_rules(args.mode, args.rules.into()).run(args.seed);
    if args.mode.is_boundary() {
        println!("mode: {:?}", args.mode);
    } else {
        println!("mode: {:?}, seed: {}", args.mode, result.seed);
    }
    println!("total: {} bullets", result.total);
    for (row, chunk) in result.stages.chunks(10).enumerate() {
        let cells: Vec<String> = chunk.iter().map(|v| format!("{v:>3}")).collect();
        println!("stages {:>3}-{:>3}: {}", row * 10 + 1, row * 10 + chunk.len(), cells.join(" "));
    }
}

/// Write every chart payload of one variant; each failure is a warning only.
pub fn write_artifacts(
    dir: &Path,
    out: &VariantOutcome,
    bins: Option<usize>,
    recorded: Option<&RecordedRun>,
) {
    if let Err(e) = fs::create_dir_all(dir) {
        warn!("failed to create {}: {e}", dir.display());
        return;
    }
    let batch = &out.batch;

    let path = dir.join(format!("histo{}.json", out.suffix));
    report_artifact(&path, write_artifact(&path, || report::histogram_chart(batch, bins)));

    let path = dir.join(format!("probability{}.json", out.suffix));
    report_artifact(&path, write_artifact(&path, || report::probability_chart(batch)));

    if let Some(recorded) = recorded {
        let path = dir.join(format!("run_comparison{}.json", out.suffix));
        report_artifact(
            &path,
            write_artifact(&path, || report::run_comparison_chart(batch, recorded)),
        );
    }
}

fn report_artifact(path: &Path, res: std::result::Result<(), ArtifactError>) {
    if let Err(e) = res {
        warn!("failed to generate {}: {e}", path.display());
    }
}

/// Build a payload and write it as pretty JSON. A panic while building is
/// caught and returned as [`ArtifactError::Panicked`].
pub fn write_artifact<T, F>(path: &Path, build: F) -> std::result::Result<(), ArtifactError>
where
    T: Serialize,
    F: FnOnce() -> T,
{
    info!("now generating {}", path.display());
    let payload = panic::catch_unwind(AssertUnwindSafe(build))
        .map_err(|p| ArtifactError::Panicked(panic_message(&*p)))?;
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, json)?;
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
