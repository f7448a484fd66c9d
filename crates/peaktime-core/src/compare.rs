//! Comparative evaluation of selection strategies.
//!
//! Runs the stability-weighted and random baselines against the same
//! activity table and reports how much coverage the production schedule
//! gains over each.

use serde::{Deserialize, Serialize};

use crate::activity::{ActivityEvent, ActivityTable};
use crate::baseline::RandomBaseline;
use crate::coverage::{CoverageEvaluator, CoverageReport};
use crate::error::Result;
use crate::schedule::PeakSchedule;
use crate::selector::{SelectorPolicy, StabilityWeightedSelector};
use crate::stability::StabilityScorer;

/// Coverage of all three strategies plus the two deltas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The production (spacing-aware) schedule
    pub ours: CoverageReport,
    /// The activity x stability baseline
    pub stability_weighted: CoverageReport,
    /// The uniform random baseline
    pub random: CoverageReport,
    /// Overall coverage delta: ours minus stability-weighted
    pub improvement_over_stability: f64,
    /// Overall coverage delta: ours minus random
    pub improvement_over_random: f64,
}

/// Runs the baselines and scores all three schedules.
#[derive(Debug, Clone, Default)]
pub struct ComparisonReporter {
    policy: SelectorPolicy,
    seed: Option<u64>,
}

impl ComparisonReporter {
    /// Create a reporter with the default policy and entropy-seeded
    /// random baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reporter with a custom policy.
    pub fn with_policy(policy: SelectorPolicy) -> Self {
        Self { policy, seed: None }
    }

    /// Fix the random baseline's seed for reproducible comparisons.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Compare the given production schedule against both baselines.
    ///
    /// Stability scores for the weighted baseline are computed over the full
    /// raw event set.
    pub fn compare(
        &self,
        table: &ActivityTable,
        events: &[ActivityEvent],
        our_schedule: &PeakSchedule,
    ) -> Result<ComparisonResult> {
        let stability = StabilityScorer::new().compute(events);
        let weighted_schedule =
            StabilityWeightedSelector::with_policy(self.policy.clone()).select(table, &stability)?;

        let mut baseline = RandomBaseline::with_policy(self.policy.clone());
        if let Some(seed) = self.seed {
            baseline = baseline.with_seed(seed);
        }
        let random_schedule = baseline.generate()?;

        let evaluator = CoverageEvaluator::new();
        let ours = evaluator.evaluate(table, our_schedule)?;
        let stability_weighted = evaluator.evaluate(table, &weighted_schedule)?;
        let random = evaluator.evaluate(table, &random_schedule)?;

        let improvement_over_stability =
            ours.overall_coverage_pct - stability_weighted.overall_coverage_pct;
        let improvement_over_random = ours.overall_coverage_pct - random.overall_coverage_pct;

        Ok(ComparisonResult {
            ours,
            stability_weighted,
            random,
            improvement_over_stability,
            improvement_over_random,
        })
    }
}
