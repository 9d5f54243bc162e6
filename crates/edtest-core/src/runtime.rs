//! Scripting runtime flavors.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Scripting runtime the editor compiles tests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Runtime {
    /// Current .NET 4.x equivalent runtime.
    #[default]
    Latest,
    /// Legacy .NET 3.5 equivalent runtime.
    Legacy,
}

impl Runtime {
    /// Every supported runtime.
    pub const ALL: [Runtime; 2] = [Runtime::Latest, Runtime::Legacy];

    /// Value passed to `-scriptingRuntimeVersion`.
    pub fn name(self) -> &'static str {
        match self {
            Runtime::Latest => "latest",
            Runtime::Legacy => "legacy",
        }
    }

    /// Iterator over all accepted runtime names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|r| r.name())
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Runtime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Runtime::Latest),
            "legacy" => Ok(Runtime::Legacy),
            _ => Err(CoreError::UnknownRuntime {
                name: s.to_string(),
            }),
        }
    }
}
