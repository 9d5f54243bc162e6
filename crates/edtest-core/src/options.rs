//! Per-platform editor flags and the directory layout they point into.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::command::CommandSpec;
use crate::platform::Platform;
use crate::runtime::Runtime;

/// Flags that put the editor into non-interactive test mode.
pub const BATCH_MODE_FLAGS: [&str; 2] = ["-batchmode", "-runTests"];

/// Directory the downloader installs the editor into.
pub const EDITOR_INSTALL_DIR: &str = ".Editor";

/// Paths shared by every editor invocation in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Project passed to `-projectPath`.
    pub project_dir: PathBuf,
    /// Directory receiving result and log files.
    pub artifacts_dir: PathBuf,
    /// Editor binary to launch.
    pub editor: PathBuf,
}

impl Layout {
    /// Layout rooted at `root`: project is `root`, artifacts under
    /// `root/artifacts`, editor at its host-default install location.
    pub fn rooted_at(root: &Path) -> Self {
        Self {
            project_dir: root.to_path_buf(),
            artifacts_dir: root.join("artifacts"),
            editor: root.join(default_editor_path()),
        }
    }

    /// Result file for `platform`.
    pub fn results_path(&self, platform: Platform) -> PathBuf {
        self.artifacts_dir.join(platform.results_file_name())
    }

    /// Editor log file for `platform`.
    pub fn log_path(&self, platform: Platform) -> PathBuf {
        self.artifacts_dir.join(platform.log_file_name())
    }
}

/// Editor binary location inside the install directory for the host OS.
pub fn default_editor_path() -> PathBuf {
    let dir = Path::new(EDITOR_INSTALL_DIR);
    if cfg!(target_os = "macos") {
        dir.join("Unity.app/Contents/MacOS/Unity")
    } else if cfg!(windows) {
        dir.join("Unity.exe")
    } else {
        dir.join("Unity")
    }
}

/// Flag name to value map for one editor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    flags: BTreeMap<&'static str, OsString>,
}

impl RunOptions {
    /// Build the flags for testing `platform`.
    pub fn for_platform(platform: Platform, runtime: Runtime, layout: &Layout) -> Self {
        let mut flags = BTreeMap::new();
        flags.insert("-projectPath", layout.project_dir.clone().into_os_string());
        flags.insert(
            "-testResults",
            layout.results_path(platform).into_os_string(),
        );
        flags.insert("-logFile", layout.log_path(platform).into_os_string());
        flags.insert("-scriptingRuntimeVersion", runtime.name().into());
        flags.insert("-testPlatform", platform.test_platform().into());
        flags.insert("-buildTarget", platform.build_target().into());
        Self { flags }
    }

    /// Value of a flag, if set.
    pub fn get(&self, flag: &str) -> Option<&OsString> {
        self.flags.get(flag)
    }

    /// Override or add a flag.
    pub fn set(&mut self, flag: &'static str, value: impl Into<OsString>) {
        self.flags.insert(flag, value.into());
    }

    /// Iterate flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &OsString)> {
        self.flags.iter().map(|(k, v)| (*k, v))
    }

    /// Compose the full editor command: batch-mode flags, then each flag
    /// followed by its value.
    pub fn to_command(&self, editor: &Path) -> CommandSpec {
        let mut cmd = CommandSpec::new(editor.as_os_str()).args(BATCH_MODE_FLAGS);
        for (flag, value) in self.iter() {
            cmd = cmd.arg(flag).arg(value.clone());
        }
        cmd
    }
}
