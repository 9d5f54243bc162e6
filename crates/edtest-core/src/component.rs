//! Download components requested from the package downloader.

use std::collections::BTreeSet;
use std::fmt;

use crate::platform::Platform;

/// A named installable piece of the editor distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// The editor itself.
    Editor,
    /// Player support for the desktop standalone targets.
    StandaloneSupport,
}

impl Component {
    /// Name understood by the downloader's `-c` flag.
    pub fn name(self) -> &'static str {
        match self {
            Component::Editor => "Editor",
            Component::StandaloneSupport => "StandaloneSupport",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Components needed to test `platforms`.
///
/// The editor is always included. Standalone support is added when any
/// platform name contains "Standalone".
pub fn derive_components(platforms: &[Platform]) -> BTreeSet<Component> {
    let mut components = BTreeSet::from([Component::Editor]);
    if platforms.iter().any(|p| p.needs_standalone_support()) {
        components.insert(Component::StandaloneSupport);
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_still_downloads_editor() {
        let components = derive_components(&[]);
        assert_eq!(components, BTreeSet::from([Component::Editor]));
    }

    #[test]
    fn editor_and_mobile_skip_standalone_support() {
        let components = derive_components(&[Platform::Editor, Platform::Android, Platform::IOS]);
        assert_eq!(components, BTreeSet::from([Component::Editor]));
    }

    #[test]
    fn standalone_platform_adds_support_once() {
        let components = derive_components(&[
            Platform::StandaloneWindows,
            Platform::Editor,
            Platform::StandaloneLinux64,
        ]);
        assert_eq!(
            components,
            BTreeSet::from([Component::Editor, Component::StandaloneSupport])
        );
    }

    #[test]
    fn support_present_iff_some_name_contains_standalone() {
        // Every subset of the platform table.
        for mask in 0u32..(1 << Platform::ALL.len()) {
            let subset: Vec<Platform> = Platform::ALL
                .into_iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, p)| p)
                .collect();
            let components = derive_components(&subset);
            assert!(components.contains(&Component::Editor));
            assert_eq!(
                components.contains(&Component::StandaloneSupport),
                subset.iter().any(|p| p.name().contains("Standalone")),
            );
        }
    }
}
