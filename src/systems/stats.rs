//! Descriptive statistics over a [`SimulationBatch`]. Pure functions, no I/O.
//!
//! Every table here is indexed by total bullets from `best_case` to
//! `worst_case` inclusive; a valid batch has no sample outside that span.

use serde::Serialize;

use crate::mechanics::board::{FAMILY_COUNT, HARD_LIMITS, stage_family};
use crate::systems::batch::SimulationBatch;

/// Mean total; `None` for an empty batch.
pub fn mean(batch: &SimulationBatch) -> Option<f64> {
    if batch.is_empty() {
        return None;
    }
    let sum: u64 = batch.simulations.iter().map(|&v| u64::from(v)).sum();
    Some(sum as f64 / batch.sample_count() as f64)
}

/// Attainable totals: one histogram bin per integer.
pub fn default_bin_count(batch: &SimulationBatch) -> usize {
    span(batch) as usize
}

fn span(batch: &SimulationBatch) -> u32 {
    batch.worst_case.saturating_sub(batch.best_case) + 1
}

/// Sample count per total, index 0 is `best_case`.
pub fn frequencies(batch: &SimulationBatch) -> Vec<usize> {
    let mut counts = vec![0usize; span(batch) as usize];
    for &v in &batch.simulations {
        let idx = v.saturating_sub(batch.best_case) as usize;
        if let Some(c) = counts.get_mut(idx) {
            *c += 1;
        }
    }
    counts
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge (the last bin also holds `worst_case`).
    pub upper: f64,
    pub count: usize,
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn total_percent(&self) -> f64 {
        self.bins.iter().map(|b| b.percent).sum()
    }
}

/// `bin_count` equal-width bins over `[best_case, worst_case + 1)`.
/// A `bin_count` of zero is treated as one bin.
pub fn histogram(batch: &SimulationBatch, bin_count: usize) -> Histogram {
    let bin_count = bin_count.max(1);
    let lo = f64::from(batch.best_case);
    let width = f64::from(span(batch)) / bin_count as f64;

    let mut counts = vec![0usize; bin_count];
    for &v in &batch.simulations {
        let idx = ((f64::from(v) - lo) / width).max(0.0) as usize;
        counts[idx.min(bin_count - 1)] += 1;
    }

    let scale = percent_scale(batch.sample_count());
    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: lo + width * i as f64,
            upper: lo + width * (i + 1) as f64,
            count,
            percent: count as f64 * scale,
        })
        .collect();
    Histogram { bins }
}

fn percent_scale(n: usize) -> f64 {
    if n > 0 { 100.0 / n as f64 } else { 0.0 }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CurvePoint {
    pub total: u32,
    /// Percent of samples with exactly this total.
    pub chance: f64,
    /// Percent of samples with this total or less.
    pub accumulated: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProbabilityCurve {
    pub points: Vec<CurvePoint>,
}

pub fn probability_curve(batch: &SimulationBatch) -> ProbabilityCurve {
    let scale = percent_scale(batch.sample_count());
    let mut acc = 0.0;
    let points = frequencies(batch)
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let chance = count as f64 * scale;
            acc += chance;
            CurvePoint {
                total: batch.best_case + i as u32,
                chance,
                accumulated: acc,
            }
        })
        .collect();
    ProbabilityCurve { points }
}

/// First threshold, in per-mille.
pub const FIRST_THRESHOLD_PERMILLE: u32 = 100;
/// Thresholds stop below this.
pub const THRESHOLD_END_PERMILLE: u32 = 1000;

/// 10-point steps up to 90 %, 1-point steps up to 99 %, then 0.1-point steps.
#[inline]
pub fn next_threshold(permille: u32) -> u32 {
    if permille < 900 {
        permille + 100
    } else if permille < 990 {
        permille + 10
    } else {
        permille + 1
    }
}

/// All thresholds in ascending order.
pub fn thresholds() -> impl Iterator<Item = u32> {
    std::iter::successors(Some(FIRST_THRESHOLD_PERMILLE), |&t| Some(next_threshold(t)))
        .take_while(|&t| t < THRESHOLD_END_PERMILLE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Breakpoint {
    pub threshold_permille: u32,
    /// Smallest total whose cumulative share exceeds the threshold.
    pub total: u32,
}

impl Breakpoint {
    pub fn percent(&self) -> f64 {
        f64::from(self.threshold_permille) / 10.0
    }
}

/// Crossing of each threshold by the cumulative curve, each emitted once and
/// in ascending order. Comparison is done on counts so no rounding can shift
/// a crossing: `cum / n > t / 1000` as `cum * 1000 > t * n`.
pub fn breakpoints(batch: &SimulationBatch) -> Vec<Breakpoint> {
    let n = batch.sample_count() as u64;
    let mut out = Vec::new();
    if n == 0 {
        return out;
    }

    let mut pending = thresholds().peekable();
    let mut cum = 0u64;
    for (i, count) in frequencies(batch).into_iter().enumerate() {
        cum += count as u64;
        while let Some(&t) = pending.peek() {
            if cum * 1000 <= u64::from(t) * n {
                break;
            }
            out.push(Breakpoint {
                threshold_permille: t,
                total: batch.best_case + i as u32,
            });
            pending.next();
        }
    }
    out
}

/// Five-number summary plus mean of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// Quantile `q` in `[0, 1]` of sorted data, linear between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn box_summary(values: &[u32]) -> Option<BoxSummary> {
    let mut sorted: Vec<f64> = values.iter().map(|&v| f64::from(v)).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let count = sorted.len();
    Some(BoxSummary {
        count,
        min: *sorted.first()?,
        q1: quantile(&sorted, 0.25)?,
        median: quantile(&sorted, 0.5)?,
        q3: quantile(&sorted, 0.75)?,
        max: *sorted.last()?,
        mean: sorted.iter().sum::<f64>() / count as f64,
    })
}

/// Retained per-stage bullets grouped by stage family (`stage mod 5`).
pub fn family_values(batch: &SimulationBatch) -> Vec<Vec<u32>> {
    let mut out = vec![Vec::new(); FAMILY_COUNT];
    for stages in &batch.stage_breakdowns {
        for (stage, &v) in stages.iter().enumerate() {
            out[stage_family(stage)].push(v);
        }
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FamilySummary {
    pub family: usize,
    pub hard_limit: u32,
    /// `None` when no breakdown was retained.
    pub summary: Option<BoxSummary>,
}

pub fn family_summaries(batch: &SimulationBatch) -> Vec<FamilySummary> {
    family_values(batch)
        .iter()
        .enumerate()
        .map(|(family, values)| FamilySummary {
            family,
            hard_limit: HARD_LIMITS[family],
            summary: box_summary(values),
        })
        .collect()
}

/// Mean bullets per stage over the retained breakdowns; empty if none.
pub fn stage_means(batch: &SimulationBatch) -> Vec<f64> {
    let Some(first) = batch.stage_breakdowns.first() else {
        return Vec::new();
    };
    let mut sums = vec![0u64; first.len()];
    for stages in &batch.stage_breakdowns {
        for (s, &v) in sums.iter_mut().zip(stages) {
            *s += u64::from(v);
        }
    }
    let n = batch.stage_breakdowns.len() as f64;
    sums.into_iter().map(|s| s as f64 / n).collect()
}
