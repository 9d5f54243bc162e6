//! Test platforms and the flags derived from them.
//!
//! The platform names double as command-line values, editor build targets and
//! artifact file prefixes, so they are kept in the editor's own spelling
//! (`StandaloneOSX`, `iOS`) rather than normalized.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A platform the editor can run tests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    /// Play mode tests inside the editor itself.
    Editor,
    StandaloneWindows,
    StandaloneWindows64,
    StandaloneOSX,
    StandaloneLinux64,
    IOS,
    Android,
}

impl Platform {
    /// Every supported platform, in the order they are listed to users.
    pub const ALL: [Platform; 7] = [
        Platform::Editor,
        Platform::StandaloneWindows,
        Platform::StandaloneWindows64,
        Platform::StandaloneOSX,
        Platform::StandaloneLinux64,
        Platform::IOS,
        Platform::Android,
    ];

    /// Name as accepted on the command line and passed to the editor.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Editor => "Editor",
            Platform::StandaloneWindows => "StandaloneWindows",
            Platform::StandaloneWindows64 => "StandaloneWindows64",
            Platform::StandaloneOSX => "StandaloneOSX",
            Platform::StandaloneLinux64 => "StandaloneLinux64",
            Platform::IOS => "iOS",
            Platform::Android => "Android",
        }
    }

    /// Iterator over all accepted platform names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(|p| p.name())
    }

    /// Whether the platform needs the standalone player support component.
    ///
    /// Decided by substring match on the name, which is how the download
    /// component has always been selected.
    pub fn needs_standalone_support(self) -> bool {
        self.name().contains("Standalone")
    }

    /// Value for the editor's `-testPlatform` flag.
    pub fn test_platform(self) -> &'static str {
        match self {
            Platform::Editor => "playmode",
            other => other.name(),
        }
    }

    /// Value for the editor's `-buildTarget` flag.
    pub fn build_target(self) -> &'static str {
        match self {
            Platform::Editor => "Standalone",
            other => other.name(),
        }
    }

    /// File name of the test result file for this platform.
    pub fn results_file_name(self) -> String {
        format!("{}_TestResults.txt", self.name())
    }

    /// File name of the editor log file for this platform.
    pub fn log_file_name(self) -> String {
        format!("{}_EditorLog.txt", self.name())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| CoreError::UnknownPlatform {
                name: s.to_string(),
                expected: Self::names().collect::<Vec<_>>().join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_runs_playmode_against_standalone() {
        assert_eq!(Platform::Editor.test_platform(), "playmode");
        assert_eq!(Platform::Editor.build_target(), "Standalone");
    }

    #[test]
    fn players_use_their_own_name_for_both_flags() {
        for platform in Platform::ALL.into_iter().filter(|p| *p != Platform::Editor) {
            assert_eq!(platform.test_platform(), platform.name());
            assert_eq!(platform.build_target(), platform.name());
        }
    }

    #[test]
    fn parse_accepts_exact_names_only() {
        for platform in Platform::ALL {
            assert_eq!(platform.name().parse::<Platform>().unwrap(), platform);
        }
        assert!("ios".parse::<Platform>().is_err());
        assert!("PS4".parse::<Platform>().is_err());
    }

    #[test]
    fn unknown_platform_lists_alternatives() {
        let err = "Switch".parse::<Platform>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'Switch'"));
        assert!(msg.contains("StandaloneLinux64"));
    }

    #[test]
    fn standalone_support_follows_name() {
        assert!(Platform::StandaloneOSX.needs_standalone_support());
        assert!(Platform::StandaloneWindows64.needs_standalone_support());
        assert!(!Platform::Editor.needs_standalone_support());
        assert!(!Platform::Android.needs_standalone_support());
        assert!(!Platform::IOS.needs_standalone_support());
    }

    #[test]
    fn artifact_names_derive_from_platform() {
        assert_eq!(Platform::IOS.results_file_name(), "iOS_TestResults.txt");
        assert_eq!(Platform::Editor.log_file_name(), "Editor_EditorLog.txt");
    }
}
