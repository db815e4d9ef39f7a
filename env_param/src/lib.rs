//! Global parameters read from environment variables.
//!
//! The `EnvParam` structure associates the name of an environment variable with a
//! string holding its default value. It is meant for internal tunables that do not
//! deserve a place in a public API but are occasionally needed to alter the
//! behavior of the synthesis engine.
//!
//! ```
//! use env_param::EnvParam;
//! static MAX_DEPTH: EnvParam<u32> = EnvParam::new("LACUNA_DEFAULT_MAX_DEPTH", "3");
//!
//! fn main() {
//!   // environment variable not set, the default "3" applies
//!   assert_eq!(MAX_DEPTH.get(), 3);
//! }
//! ```
//!
//! The parameter is initialized once, on first access. If the environment variable
//! is set (in the shell or programmatically) before that first access, its value is
//! used instead of the default. Later changes to the environment are ignored.
//!
//! `EnvParam::set` forces the value from code and panics if the parameter was
//! already initialized, so that a forced value can never be silently discarded.
//! ```
//! use env_param::EnvParam;
//! static LOG_ACTIONS: EnvParam<bool> = EnvParam::new("LACUNA_LOG_ACTIONS", "false");
//!
//! fn main() {
//!   LOG_ACTIONS.set(true);
//!   assert_eq!(LOG_ACTIONS.get(), true);
//! }
//! ```

use std::str::FromStr;

pub struct EnvParam<T> {
    value: once_cell::sync::OnceCell<T>,
    env: &'static str,
    default: &'static str,
}

impl<T> EnvParam<T> {
    /// Declares a parameter backed by the environment variable `env`, falling back
    /// to `default` when the variable is absent.
    pub const fn new(env: &'static str, default: &'static str) -> EnvParam<T> {
        EnvParam {
            value: once_cell::sync::OnceCell::new(),
            env,
            default,
        }
    }
}

impl<T: FromStr> EnvParam<T> {
    fn parse_default(&self) -> T {
        match T::from_str(self.default) {
            Ok(value) => value,
            Err(_) => panic!(
                "[env_param] {}: unparseable default value \"{}\".",
                self.env, self.default
            ),
        }
    }

    /// Returns the value of the parameter, initializing it from the environment on
    /// the first call.
    ///
    /// # Panic
    /// Panics if the default value cannot be parsed as a `T`. A warning is printed
    /// if the environment variable is set but unparseable.
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.get_ref()
    }

    /// Reference-returning variant of [`EnvParam::get`].
    pub fn get_ref(&self) -> &T {
        self.value.get_or_init(|| match std::env::var(self.env) {
            Ok(raw) => match T::from_str(&raw) {
                Ok(value) => value,
                Err(_) => {
                    eprintln!(
                        "[env_param] WARNING {}: unparseable value \"{}\", using default \"{}\".",
                        self.env, raw, self.default
                    );
                    self.parse_default()
                }
            },
            Err(std::env::VarError::NotPresent) => self.parse_default(),
            Err(err) => {
                eprintln!(
                    "[env_param] WARNING {}: {}, using default \"{}\".",
                    self.env, err, self.default
                );
                self.parse_default()
            }
        })
    }

    /// Forces the parameter to the given value.
    ///
    /// # Panic
    /// Panics if the parameter is already initialized, which typically means it was
    /// previously read.
    pub fn set(&self, value: T) {
        if self.value.set(value).is_err() {
            panic!("Parameter {} is already initialized.", self.env);
        }
    }
}
