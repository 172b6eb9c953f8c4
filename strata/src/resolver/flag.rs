//! Resolve configuration from command-line flags parsed by `clap`.

use std::collections::HashMap;
use std::ffi::OsString;

use clap::parser::ValueSource;
use clap::{ArgMatches, Command};
use serde_json::Value;

use super::Resolver;
use crate::nested::ConfigMap;
use crate::{StrataError, StrataResult, StrataResultExt};

/// Separator placed between key segments when forming a flag id.
pub const DEFAULT_FLAG_SEPARATOR: &str = "-";

/// Looks up `log.level` as the flag with id `log-level`.
///
/// Only flags that were actually supplied on the command line are visible.
/// A flag left at its `clap` default is reported as absent so that lower
/// levels can supply the value instead.
///
/// ```
/// use clap::{Arg, Command};
/// use strata::resolver::{FlagResolver, Resolver};
///
/// let command = Command::new("app")
///     .arg(Arg::new("log-level").long("log-level").default_value("warn"));
/// let flags = FlagResolver::parse_from(command, ["--log-level", "info"])?;
/// assert_eq!(
///     flags.resolve(&["log", "level"], &Default::default()),
///     Some(serde_json::json!("info")),
/// );
/// # Ok::<(), std::sync::Arc<strata::StrataError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct FlagResolver {
    supplied: HashMap<String, String>,
    separator: String,
}

impl FlagResolver {
    /// Capture the flags supplied in `matches`.
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mut supplied = HashMap::new();
        for id in matches.ids() {
            let name = id.as_str();
            if matches.value_source(name) != Some(ValueSource::CommandLine) {
                continue;
            }
            if let Some(value) = last_raw_value(matches, name) {
                supplied.insert(name.to_owned(), value);
            }
        }
        tracing::debug!(target: "strata::flag", supplied = supplied.len(), "captured command-line flags");
        Self {
            supplied,
            separator: DEFAULT_FLAG_SEPARATOR.to_owned(),
        }
    }

    /// Parse `args` (excluding the binary name) against `command`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::CliParsing`] when the arguments are rejected.
    pub fn parse_from<I, T>(command: Command, args: I) -> StrataResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let bin = OsString::from(command.get_name());
        let argv = std::iter::once(bin).chain(args.into_iter().map(Into::into));
        let matches = command
            .try_get_matches_from(argv)
            .map_err(|err| StrataError::CliParsing(Box::new(err)))
            .into_strata()?;
        Ok(Self::from_matches(&matches))
    }

    /// Parse the process arguments against `command`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::CliParsing`] when the arguments are rejected.
    pub fn from_env(command: Command) -> StrataResult<Self> {
        let matches = command
            .try_get_matches()
            .map_err(|err| StrataError::CliParsing(Box::new(err)))
            .into_strata()?;
        Ok(Self::from_matches(&matches))
    }

    /// Set the separator placed between segments.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Flag id consulted for `path`.
    #[must_use]
    pub fn flag_name(&self, path: &[&str]) -> String {
        path.join(&self.separator)
    }

    /// Number of flags that were supplied on the command line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.supplied.len()
    }

    /// Whether no flags were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supplied.is_empty()
    }
}

fn last_raw_value(matches: &ArgMatches, id: &str) -> Option<String> {
    let raw = matches.try_get_raw(id).ok().flatten()?;
    raw.last().map(|value| value.to_string_lossy().into_owned())
}

impl Resolver for FlagResolver {
    fn resolve(&self, path: &[&str], _level: &ConfigMap) -> Option<Value> {
        self.supplied
            .get(&self.flag_name(path))
            .cloned()
            .map(Value::String)
    }
}
