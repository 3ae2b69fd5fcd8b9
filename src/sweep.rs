//! Rule sweep: one batch per rule-alteration variant.
//!
//! Each variant is a full, independent batch with the same seeds, so the
//! variants differ only by the rules they play under. The first consistency
//! failure aborts the whole sweep.

use log::info;

use crate::error::Result;
use crate::mechanics::rules::RuleAlterations;
use crate::systems::batch::{BatchConfig, SimulationBatch, run_batch_with};

#[derive(Clone, Debug, PartialEq)]
pub struct VariantOutcome {
    pub rules: RuleAlterations,
    /// Artifact file-name suffix of this variant.
    pub suffix: String,
    pub batch: SimulationBatch,
}

/// Run `base` under every variant of [`RuleAlterations::all_variants`].
/// `base.rules` is ignored.
pub fn run_sweep(base: &BatchConfig) -> Result<Vec<VariantOutcome>> {
    run_variants(base, &RuleAlterations::all_variants())
}

pub fn run_variants(base: &BatchConfig, variants: &[RuleAlterations]) -> Result<Vec<VariantOutcome>> {
    let mut outs = Vec::with_capacity(variants.len());
    for &rules in variants {
        let batch = run_batch_with(&base.with_rules(rules))?;
        outs.push(VariantOutcome { rules, suffix: rules.file_suffix(), batch });
    }
    info!("sweep finished: {} variants", outs.len());
    Ok(outs)
}
