//! Shared test utilities for `densa-core`.

use densa_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::distance::{DistanceError, Metric, euclidean_distance};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `DENSA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Euclidean [`Metric`] that records how often it is called.
///
/// Optionally fails once a call budget is spent, which lets tests drive the
/// engine's error paths mid-run.
#[derive(Clone, Debug)]
pub(crate) struct CountingMetric {
    calls: Arc<AtomicUsize>,
    fail_after: Option<usize>,
}

impl CountingMetric {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            fail_after: None,
        }
    }

    /// Succeeds for the first `budget` calls, then reports a dimension
    /// mismatch.
    #[must_use]
    pub(crate) fn failing_after(budget: usize) -> Self {
        Self {
            fail_after: Some(budget),
            ..Self::new()
        }
    }

    #[must_use]
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Metric for CountingMetric {
    fn name(&self) -> &str {
        "counting"
    }

    fn distance(&self, left: &[f64], right: &[f64]) -> Result<f64, DistanceError> {
        let previous = self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_after.is_some_and(|budget| previous >= budget) {
            return Err(DistanceError::DimensionMismatch {
                left: left.len(),
                right: right.len().saturating_add(1),
            });
        }
        euclidean_distance(left, right)
    }

    fn axis_bounded(&self) -> bool {
        true
    }
}
