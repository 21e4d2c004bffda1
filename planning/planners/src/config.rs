use env_param::EnvParam;
use std::time::Duration;

/// Maximal number of variables accepted by the SAT solver.
/// Loaded from the environment variable `SATPLAN_MAX_VARIABLES`.
pub static MAX_VARIABLES: EnvParam<u32> = EnvParam::new("SATPLAN_MAX_VARIABLES", "1000000");

/// Number of clauses for which the solver preallocates space.
/// Loaded from the environment variable `SATPLAN_EXPECTED_CLAUSES`.
pub static EXPECTED_CLAUSES: EnvParam<usize> = EnvParam::new("SATPLAN_EXPECTED_CLAUSES", "500000");

/// Time (in seconds) after which the planner stops waiting for the SAT solver. 0 means no limit.
/// Loaded from the environment variable `SATPLAN_TIMEOUT_SECS`.
pub static TIMEOUT_SECS: EnvParam<u64> = EnvParam::new("SATPLAN_TIMEOUT_SECS", "0");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SatPlanConfig {
    /// Problems with more fluents and actions than this are rejected before reaching the solver.
    pub max_variables: u32,
    pub expected_clauses: usize,
    pub timeout: Option<Duration>,
}

impl SatPlanConfig {
    /// Configuration built from the `SATPLAN_*` environment parameters.
    pub fn from_env() -> Self {
        let timeout = match TIMEOUT_SECS.get() {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        SatPlanConfig {
            max_variables: MAX_VARIABLES.get(),
            expected_clauses: EXPECTED_CLAUSES.get(),
            timeout,
        }
    }

    pub fn with_max_variables(mut self, max_variables: u32) -> Self {
        self.max_variables = max_variables;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for SatPlanConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_from_environment() {
        std::env::set_var("SATPLAN_TIMEOUT_SECS", "5");
        std::env::set_var("SATPLAN_MAX_VARIABLES", "not-a-number");
        let config = SatPlanConfig::from_env();
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        // invalid values fall back to the defaults
        assert_eq!(config.max_variables, 1_000_000);
        assert_eq!(config.expected_clauses, 500_000);

        let config = config.with_max_variables(10).with_timeout(None);
        assert_eq!(config.max_variables, 10);
        assert_eq!(config.timeout, None);
    }
}
