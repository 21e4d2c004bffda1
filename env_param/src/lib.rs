//! Global tuning parameters that can be overridden from environment variables.
//!
//! An [`EnvParam`] holds the name of an environment variable and a textual default value.
//! It is meant for internal parameters of the planner (solver capacity, timeouts, ...)
//! that are rarely changed and do not deserve a dedicated command line option.
//!
//! ```
//! use env_param::EnvParam;
//! static MAX_VARS: EnvParam<u32> = EnvParam::new("DOC_MAX_VARS", "1000");
//!
//! // environment variable not set: the default value is used
//! assert_eq!(MAX_VARS.get(), 1000);
//! ```
//!
//! The value is read once, on first access. Later changes to the environment are ignored.
//! [`EnvParam::try_set`] forces the value, provided the parameter was not read before.
//!
//! ```
//! use env_param::EnvParam;
//! static TIMEOUT: EnvParam<u64> = EnvParam::new("DOC_TIMEOUT", "0");
//!
//! std::env::set_var("DOC_TIMEOUT", "30");
//! assert_eq!(TIMEOUT.get(), 30);
//! std::env::set_var("DOC_TIMEOUT", "60"); // ignored, already initialized
//! assert_eq!(TIMEOUT.get(), 30);
//! assert!(TIMEOUT.try_set(10).is_err());
//! ```

use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvParamError {
    #[error("Parameter {0} is already initialized (it was previously read or set)")]
    AlreadyInitialized(&'static str),
    #[error("Parameter {name}: could not parse \"{value}\"")]
    Unparsable { name: &'static str, value: String },
}

pub struct EnvParam<T> {
    value: once_cell::sync::OnceCell<T>,
    env: &'static str,
    default: &'static str,
}

impl<T> EnvParam<T> {
    /// Creates a parameter initialized from the environment variable `env`, or from `default`
    /// if the variable is absent or invalid.
    pub const fn new(env: &'static str, default: &'static str) -> EnvParam<T> {
        EnvParam {
            value: once_cell::sync::OnceCell::new(),
            env,
            default,
        }
    }

    /// Name of the environment variable backing this parameter.
    pub fn name(&self) -> &'static str {
        self.env
    }

    pub fn default_value(&self) -> &'static str {
        self.default
    }

    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }
}

impl<T: FromStr> EnvParam<T> {
    fn parse(&self, value: &str) -> Result<T, EnvParamError> {
        T::from_str(value).map_err(|_| EnvParamError::Unparsable {
            name: self.env,
            value: value.to_string(),
        })
    }

    fn read(&self) -> Result<T, EnvParamError> {
        match std::env::var(self.env) {
            Ok(value) => match self.parse(&value) {
                Ok(v) => {
                    tracing::debug!("{} = {} (from environment)", self.env, value);
                    Ok(v)
                }
                Err(e) => {
                    tracing::warn!("{e}, using default \"{}\"", self.default);
                    self.parse(self.default)
                }
            },
            Err(std::env::VarError::NotPresent) => self.parse(self.default),
            Err(e) => {
                tracing::warn!("{}: {}, using default \"{}\"", self.env, e, self.default);
                self.parse(self.default)
            }
        }
    }

    /// Returns the value of the parameter, reading the environment on first access.
    ///
    /// Fails only if the default value cannot be parsed, which is a programming error.
    pub fn try_get(&self) -> Result<&T, EnvParamError> {
        self.value.get_or_try_init(|| self.read())
    }

    /// Returns the value of the parameter.
    ///
    /// # Panic
    /// Panics if the default value cannot be parsed.
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.get_ref()
    }

    /// Same as [`EnvParam::get`] for types that are not `Copy`.
    pub fn get_ref(&self) -> &T {
        match self.try_get() {
            Ok(v) => v,
            Err(e) => panic!("[env_param] invalid default value: {e}"),
        }
    }

    /// Forces the value of the parameter. Fails if it was already read or set.
    pub fn try_set(&self, value: T) -> Result<(), EnvParamError> {
        self.value
            .set(value)
            .map_err(|_| EnvParamError::AlreadyInitialized(self.env))
    }
}
