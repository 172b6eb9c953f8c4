//! Priority levels at which configuration values are stored.

use std::fmt;

/// Integer priority tier for configuration values.
///
/// Larger numbers win. The built-in levels leave gaps so applications can
/// slot custom levels between them:
///
/// ```
/// use strata::ConfigLevel;
///
/// let remote = ConfigLevel::new(15);
/// assert!(remote > ConfigLevel::FILE);
/// assert!(remote < ConfigLevel::ENVIRONMENT);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigLevel(i32);

impl ConfigLevel {
    /// Values compiled into the application.
    pub const DEFAULT: Self = Self(0);
    /// Values loaded from configuration files.
    pub const FILE: Self = Self(10);
    /// Values resolved from environment variables.
    pub const ENVIRONMENT: Self = Self(20);
    /// Values supplied as command-line flags.
    pub const FLAG: Self = Self(30);
    /// Explicit overrides; always wins over the built-in levels.
    pub const OVERRIDE: Self = Self(99);

    /// Create a level with an arbitrary priority.
    #[must_use]
    pub const fn new(priority: i32) -> Self {
        Self(priority)
    }

    /// Numeric priority of the level.
    #[must_use]
    pub const fn priority(self) -> i32 {
        self.0
    }
}

impl From<i32> for ConfigLevel {
    fn from(priority: i32) -> Self {
        Self(priority)
    }
}

impl fmt::Display for ConfigLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
