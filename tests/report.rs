// tests/report.rs
use bullseye::reference::RecordedRun;
use bullseye::report::{self, BatchReport};
use bullseye::sweep::{run_sweep, run_variants};
use bullseye::{BatchConfig, RuleAlterations, SimulationBatch};
use pretty_assertions::assert_eq;

fn small(samples: usize) -> BatchConfig {
    BatchConfig { stage_sample_limit: 20, ..BatchConfig::with_samples(samples) }
}

fn fixture() -> SimulationBatch {
    SimulationBatch {
        rules: RuleAlterations::default(),
        best_case: 100,
        worst_case: 110,
        simulations: (100..=109).collect(),
        stage_breakdowns: Vec::new(),
    }
}

/* ──────────────────────────────────────────────────────────────────────────
1) Rule alterations
────────────────────────────────────────────────────────────────────────── */

#[test]
fn variants_run_weight_toggle_outermost() {
    let v = RuleAlterations::all_variants();
    assert_eq!(v[0], RuleAlterations::as_stated());
    assert_eq!(v[1], RuleAlterations { keep_hit_targets: true, no_weight_increase: false });
    assert_eq!(v[2], RuleAlterations { keep_hit_targets: false, no_weight_increase: true });
    assert_eq!(v[3], RuleAlterations { keep_hit_targets: true, no_weight_increase: true });
    assert!(!v[0].is_altered());
    assert!(v[1..].iter().all(RuleAlterations::is_altered));
}

#[test]
fn file_suffixes() {
    let suffixes: Vec<String> =
        RuleAlterations::all_variants().iter().map(|r| r.file_suffix()).collect();
    assert_eq!(
        suffixes,
        vec![
            String::new(),
            "_targets_not_removed".to_string(),
            "_weight_not_increased_as_promised".to_string(),
            "_targets_not_removed_and_weight_not_increased_as_promised".to_string(),
        ]
    );
}

#[test]
fn descriptions() {
    assert_eq!(RuleAlterations::as_stated().describe(), "following the rules as stated");
    let both = RuleAlterations { keep_hit_targets: true, no_weight_increase: true };
    assert!(both.describe().starts_with("alterations included in the ruleset: "));
    assert!(both.describe().contains("can be hit again"));
    assert!(both.describe().contains("not honored"));
}

/* ──────────────────────────────────────────────────────────────────────────
2) Sweep
────────────────────────────────────────────────────────────────────────── */

#[test]
fn sweep_runs_every_variant_with_same_seeds() {
    let outs = run_sweep(&small(100)).expect("sweep");
    assert_eq!(outs.len(), 4);
    for (out, rules) in outs.iter().zip(RuleAlterations::all_variants()) {
        assert_eq!(out.rules, rules);
        assert_eq!(out.batch.rules, rules);
        assert_eq!(out.suffix, rules.file_suffix());
        assert_eq!(out.batch.sample_count(), 100);
        assert_eq!((out.batch.best_case, out.batch.worst_case), (100, 780));
    }
}

#[test]
fn single_variant_ignores_base_rules() {
    let base = small(30).with_rules(RuleAlterations { keep_hit_targets: true, ..Default::default() });
    let outs = run_variants(&base, &[RuleAlterations::as_stated()]).expect("variant");
    assert_eq!(outs.len(), 1);
    assert_eq!(outs[0].batch, bullseye::run_batch_with(&small(30)).expect("batch"));
}

/* ──────────────────────────────────────────────────────────────────────────
3) Report text and chart payloads
────────────────────────────────────────────────────────────────────────── */

#[test]
fn summary_lines() {
    let r = BatchReport::from_batch(&fixture());
    assert_eq!(
        r.summary_text(),
        "best case: 100 bullets\nworst case: 110 bullets\n\
         average bullet count over 10 simulations: 104.5 bullets\n"
    );
}

#[test]
fn breakpoint_lines() {
    let r = BatchReport::from_batch(&fixture());
    let text = r.breakpoints_text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 27);
    assert_eq!(lines[0], "chance of 10.0 % exceeded with 101 bullets");
    assert_eq!(lines[26], "chance of 99.9 % exceeded with 109 bullets");
}

#[test]
fn empty_batch_report_has_bounds_only() {
    let batch = SimulationBatch { simulations: Vec::new(), ..fixture() };
    let r = BatchReport::from_batch(&batch);
    assert_eq!(r.mean, None);
    assert!(r.breakpoints.is_empty());
    assert_eq!(r.summary_text(), "best case: 100 bullets\nworst case: 110 bullets\n");
    assert!(r.families_text().contains("no data"));
}

#[test]
fn full_text_starts_with_rules() {
    let batch = bullseye::run_batch_with(&small(200)).expect("batch");
    let text = BatchReport::from_batch(&batch).to_text();
    assert!(text.starts_with("following the rules as stated\n"));
    assert!(text.contains("stage family 4 (hard limit 10)"));
}

#[test]
fn histogram_chart_uses_default_bins_unless_given() {
    let b = fixture();
    assert_eq!(report::histogram_chart(&b, None).histogram.bins.len(), 11);
    assert_eq!(report::histogram_chart(&b, Some(3)).histogram.bins.len(), 3);
}

#[test]
fn run_comparison_carries_recorded_points() {
    let batch = bullseye::run_batch_with(&small(50)).expect("batch");
    let recorded = RecordedRun::from_stages(vec![4; 100]).expect("run");
    let chart = report::run_comparison_chart(&batch, &recorded);
    assert_eq!(chart.recorded_total, 400);
    assert_eq!(chart.recorded.len(), 100);
    assert_eq!(chart.families.len(), 5);
    assert!(chart.families.iter().all(|f| f.summary.is_some()));
}

#[test]
fn probability_chart_serializes() {
    let chart = report::probability_chart(&fixture());
    let json = serde_json::to_value(&chart).expect("json");
    assert_eq!(json["breakpoints"].as_array().map(Vec::len), Some(27));
    assert_eq!(json["curve"]["points"].as_array().map(Vec::len), Some(11));
}
