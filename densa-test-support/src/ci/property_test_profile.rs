//! Environment overrides for property-test suites.
//!
//! CI raises the case count on scheduled runs and forks cases into
//! subprocesses when a suite needs crash isolation; local runs fall back to
//! each suite's defaults.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable toggling proptest process forking.
pub const DENSA_PBT_FORK_ENV_KEY: &str = "DENSA_PBT_FORK";

/// Case count and fork mode shared by the property suites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Reads the overrides, keeping the defaults for unset or invalid values.
    ///
    /// Invalid values are reported with `tracing::warn!` rather than failing
    /// the suite.
    ///
    /// # Examples
    ///
    /// ```
    /// use densa_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(32, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(DENSA_PBT_FORK_ENV_KEY, default_fork, parse_flag),
        }
    }

    /// Cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether each case runs in a forked subprocess.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn override_or<T: Copy>(
    key: &'static str,
    default: T,
    parse: impl Fn(&str) -> Result<T, &'static str>,
) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(raw.trim()).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason,
            "ignoring invalid property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, &'static str> {
    match raw.parse::<u32>() {
        Ok(0) => Err("cases must be positive"),
        Ok(cases) => Ok(cases),
        Err(_) => Err("cases must be an unsigned integer"),
    }
}

fn parse_flag(raw: &str) -> Result<bool, &'static str> {
    const TRUE: [&str; 4] = ["1", "true", "yes", "on"];
    const FALSE: [&str; 4] = ["0", "false", "no", "off"];
    let lowered = raw.to_ascii_lowercase();
    if TRUE.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSE.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err("expected true/false, 1/0, yes/no or on/off")
    }
}
