use std::{fmt, num::ParseIntError};

/// Failure reported by an injected callable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallError(pub String);

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CallError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Parse {
        input: String,
        source: ParseIntError,
    },
    Call(CallError),
}

impl From<CallError> for Error {
    fn from(err: CallError) -> Self {
        Self::Call(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse { input, source } => {
                write!(f, "Cannot parse {:?} as integer: {}", input, source)
            }
            Error::Call(err) => write!(f, "Call failed: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse { source, .. } => Some(source),
            Error::Call(err) => Some(err),
        }
    }
}

pub type Result<T = Outcome> = std::result::Result<T, Error>;

pub type AddFn = Box<dyn Fn(i64, i64) -> std::result::Result<i64, CallError>>;
pub type FactorialFn = Box<dyn Fn(i64) -> std::result::Result<i64, CallError>>;
pub type MainFn = Box<dyn Fn() -> std::result::Result<(), CallError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Discard the failure without a trace
    Suppress,
    /// Log the failure, then discard it
    Log,
    /// Hand the failure back to the caller
    Propagate,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self::Suppress
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `add` or `factorial` returned a value to print.
    Value(i64),
    /// `main` ran.
    Ran,
    /// Nothing applicable was supplied.
    Skipped,
    /// The call failed and the failure was discarded.
    Failed,
}

/// Optional callables, tried in the order `add`, `factorial`, `main`.
#[derive(Default)]
pub struct Callables {
    pub add: Option<AddFn>,
    pub factorial: Option<FactorialFn>,
    pub main: Option<MainFn>,
}

/// `true` when every `_` sits between two digits, as in `1_000`.
fn well_placed_underscores(digits: &str) -> bool {
    let body = digits.strip_prefix(&['+', '-'][..]).unwrap_or(digits);
    body.split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()))
}

/// Parses an input as `i64`, ignoring surrounding whitespace and accepting
/// `_` digit separators. Values outside the `i64` range are rejected.
fn parse_input(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let parsed = if trimmed.contains('_') && well_placed_underscores(trimmed) {
        trimmed.replace('_', "").parse::<i64>()
    } else {
        trimmed.parse::<i64>()
    };

    parsed.map_err(|source| Error::Parse {
        input: input.to_string(),
        source,
    })
}

/// Reports a discarded failure. Without an installed logger the failure is
/// echoed to stderr instead; returns whether that happened.
fn log_failure(err: &Error) -> bool {
    if log::log_enabled!(target: "tree_sum::dispatch", log::Level::Warn) {
        log::warn!(target: "tree_sum::dispatch", "Dispatch failed: {}", err);
        false
    } else {
        eprintln!("{}", err);
        true
    }
}

impl Callables {
    #[allow(dead_code)]
    pub fn with_add(
        mut self,
        add: impl Fn(i64, i64) -> std::result::Result<i64, CallError> + 'static,
    ) -> Self {
        self.add = Some(Box::new(add));
        self
    }

    #[allow(dead_code)]
    pub fn with_factorial(
        mut self,
        factorial: impl Fn(i64) -> std::result::Result<i64, CallError> + 'static,
    ) -> Self {
        self.factorial = Some(Box::new(factorial));
        self
    }

    #[allow(dead_code)]
    pub fn with_main(
        mut self,
        main: impl Fn() -> std::result::Result<(), CallError> + 'static,
    ) -> Self {
        self.main = Some(Box::new(main));
        self
    }

    pub fn dispatch<S: AsRef<str>>(&self, inputs: &[S]) -> Result {
        match (&self.add, &self.factorial, &self.main) {
            (Some(add), _, _) if inputs.len() >= 2 => {
                log::trace!(target: "tree_sum::dispatch", "Calling add");
                let a = parse_input(inputs[0].as_ref())?;
                let b = parse_input(inputs[1].as_ref())?;
                Ok(Outcome::Value(add(a, b)?))
            }
            (_, Some(factorial), _) if !inputs.is_empty() => {
                log::trace!(target: "tree_sum::dispatch", "Calling factorial");
                let n = parse_input(inputs[0].as_ref())?;
                Ok(Outcome::Value(factorial(n)?))
            }
            (_, _, Some(main)) => {
                log::trace!(target: "tree_sum::dispatch", "Calling main");
                main()?;
                Ok(Outcome::Ran)
            }
            _ => {
                log::trace!(target: "tree_sum::dispatch", "No callable to dispatch");
                Ok(Outcome::Skipped)
            }
        }
    }

    pub fn run<S: AsRef<str>>(&self, inputs: &[S], policy: FailurePolicy) -> Result {
        match (self.dispatch(inputs), policy) {
            (Ok(outcome), _) => Ok(outcome),
            (Err(err), FailurePolicy::Propagate) => Err(err),
            (Err(err), FailurePolicy::Log) => {
                log_failure(&err);
                Ok(Outcome::Failed)
            }
            (Err(_), FailurePolicy::Suppress) => Ok(Outcome::Failed),
        }
    }
}
