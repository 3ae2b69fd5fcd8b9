//! Batch report: the numbers a driver prints, plus the chart payloads it
//! hands to a renderer. Everything here is plain data built from a batch.

use std::fmt::Write as _;

use serde::Serialize;

use crate::reference::{OverlayPoint, RecordedRun};
use crate::systems::batch::SimulationBatch;
use crate::systems::stats::{self, Breakpoint, FamilySummary, Histogram, ProbabilityCurve};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchReport {
    pub rules: String,
    pub sample_count: usize,
    pub best_case: u32,
    pub worst_case: u32,
    pub mean: Option<f64>,
    pub breakpoints: Vec<Breakpoint>,
    pub families: Vec<FamilySummary>,
}

impl BatchReport {
    pub fn from_batch(batch: &SimulationBatch) -> Self {
        Self {
            rules: batch.rules.describe(),
            sample_count: batch.sample_count(),
            best_case: batch.best_case,
            worst_case: batch.worst_case,
            mean: stats::mean(batch),
            breakpoints: stats::breakpoints(batch),
            families: stats::family_summaries(batch),
        }
    }

    /// Bounds and mean, one fact per line.
    pub fn summary_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "best case: {} bullets", self.best_case);
        let _ = writeln!(out, "worst case: {} bullets", self.worst_case);
        if let Some(mean) = self.mean {
            let _ = writeln!(
                out,
                "average bullet count over {} simulations: {mean} bullets",
                self.sample_count
            );
        }
        out
    }

    pub fn breakpoints_text(&self) -> String {
        let mut out = String::new();
        for bp in &self.breakpoints {
            let _ = writeln!(
                out,
                "chance of {:.1} % exceeded with {} bullets",
                bp.percent(),
                bp.total
            );
        }
        out
    }

    pub fn families_text(&self) -> String {
        let mut out = String::new();
        for f in &self.families {
            match f.summary {
                Some(s) => {
                    let _ = writeln!(
                        out,
                        "stage family {} (hard limit {}): min {} | q1 {:.2} | median {:.2} | q3 {:.2} | max {} | mean {:.3} over {} stages",
                        f.family, f.hard_limit, s.min, s.q1, s.median, s.q3, s.max, s.mean, s.count
                    );
                }
                None => {
                    let _ = writeln!(out, "stage family {} (hard limit {}): no data", f.family, f.hard_limit);
                }
            }
        }
        out
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}{}{}",
            self.rules,
            self.summary_text(),
            self.breakpoints_text(),
            self.families_text()
        )
    }
}

/// Payload of the histogram chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramChart {
    pub rules: String,
    pub best_case: u32,
    pub worst_case: u32,
    pub histogram: Histogram,
}

pub fn histogram_chart(batch: &SimulationBatch, bin_count: Option<usize>) -> HistogramChart {
    let bins = bin_count.unwrap_or_else(|| stats::default_bin_count(batch));
    HistogramChart {
        rules: batch.rules.describe(),
        best_case: batch.best_case,
        worst_case: batch.worst_case,
        histogram: stats::histogram(batch, bins),
    }
}

/// Payload of the chance / accumulated-chance chart.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbabilityChart {
    pub rules: String,
    pub curve: ProbabilityCurve,
    pub breakpoints: Vec<Breakpoint>,
}

pub fn probability_chart(batch: &SimulationBatch) -> ProbabilityChart {
    ProbabilityChart {
        rules: batch.rules.describe(),
        curve: stats::probability_curve(batch),
        breakpoints: stats::breakpoints(batch),
    }
}

/// Payload of the simulated-vs-recorded box chart per stage family.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunComparisonChart {
    pub rules: String,
    pub families: Vec<FamilySummary>,
    pub recorded_total: u32,
    pub recorded: Vec<OverlayPoint>,
}

pub fn run_comparison_chart(batch: &SimulationBatch, recorded: &RecordedRun) -> RunComparisonChart {
    RunComparisonChart {
        rules: batch.rules.describe(),
        families: stats::family_summaries(batch),
        recorded_total: recorded.total(),
        recorded: recorded.overlay_points(),
    }
}
