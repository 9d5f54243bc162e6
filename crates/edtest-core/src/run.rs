//! The sequential download-then-test run.
//!
//! A run is planned up front as a flat list of steps (install the
//! downloader, download the editor, one test invocation per platform) and
//! then executed strictly in order. The first failing step aborts the run.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::command::CommandSpec;
use crate::component::derive_components;
use crate::error::{CoreError, Result};
use crate::options::{Layout, RunOptions};
use crate::platform::Platform;
use crate::process::Executor;
use crate::revision::Revision;
use crate::runtime::Runtime;

/// How the package downloader is installed and invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderConfig {
    /// Package installer program.
    pub installer: String,
    /// Package name of the downloader.
    pub package: String,
    /// Extra package index to install from.
    pub index_url: Option<String>,
    /// Downloader executable, available once installed.
    pub program: String,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            installer: "pip".to_string(),
            package: "unity-downloader-cli".to_string(),
            index_url: None,
            program: "unity-downloader-cli".to_string(),
        }
    }
}

impl DownloaderConfig {
    /// Command that installs the downloader package.
    pub fn install_command(&self) -> CommandSpec {
        let cmd = CommandSpec::new(&self.installer).args(["install", self.package.as_str()]);
        match &self.index_url {
            Some(url) => cmd.args(["--extra-index-url", url.as_str()]),
            None => cmd,
        }
    }

    /// Command that downloads `revision` with the components `platforms` need.
    pub fn download_command(&self, revision: &Revision, platforms: &[Platform]) -> CommandSpec {
        let mut cmd = CommandSpec::new(&self.program).args(["-u", revision.id]);
        for component in derive_components(platforms) {
            cmd = cmd.args(["-c", component.name()]);
        }
        cmd.arg("--wait")
    }
}

/// What a planned step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Install the package downloader.
    InstallDownloader,
    /// Download the pinned editor revision.
    DownloadEditor,
    /// Run the editor tests for one platform.
    Test(Platform),
}

/// One command in a run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    /// What the step is for.
    pub kind: StepKind,
    /// Command to execute.
    pub command: CommandSpec,
}

/// Outcome for one tested platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformReport {
    /// The platform that was tested.
    pub platform: Platform,
    /// Where the editor was asked to write results.
    pub results_path: PathBuf,
    /// Where the editor was asked to write its log.
    pub log_path: PathBuf,
    /// Whether the result file existed after the editor exited.
    pub results_written: bool,
}

/// Everything that happened in a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Per-platform reports, in the order the platforms were tested.
    pub platforms: Vec<PlatformReport>,
}

/// A fully resolved test run.
#[derive(Debug, Clone)]
pub struct TestRun {
    /// Platforms to test, in order. May be empty.
    pub platforms: Vec<Platform>,
    /// Editor revision to download and test with.
    pub revision: &'static Revision,
    /// Scripting runtime flavor.
    pub runtime: Runtime,
    /// Project, artifact and editor paths.
    pub layout: Layout,
    /// Downloader installation and invocation settings.
    pub downloader: DownloaderConfig,
}

impl TestRun {
    /// The ordered steps this run will execute.
    pub fn plan(&self) -> Vec<PlannedStep> {
        let mut steps = vec![
            PlannedStep {
                kind: StepKind::InstallDownloader,
                command: self.downloader.install_command(),
            },
            PlannedStep {
                kind: StepKind::DownloadEditor,
                command: self
                    .downloader
                    .download_command(self.revision, &self.platforms),
            },
        ];
        steps.extend(self.platforms.iter().map(|&platform| PlannedStep {
            kind: StepKind::Test(platform),
            command: RunOptions::for_platform(platform, self.runtime, &self.layout)
                .to_command(&self.layout.editor),
        }));
        steps
    }

    /// Create the artifact directory, then execute every planned step in
    /// order, stopping at the first failure.
    pub fn execute(&self, executor: &mut dyn Executor, out: &mut dyn Write) -> Result<RunSummary> {
        let artifacts = &self.layout.artifacts_dir;
        fs::create_dir_all(artifacts).map_err(|source| CoreError::ArtifactDir {
            path: artifacts.clone(),
            source,
        })?;

        let mut summary = RunSummary::default();
        for step in self.plan() {
            match step.kind {
                StepKind::InstallDownloader => {
                    tracing::info!(package = %self.downloader.package, "installing downloader");
                }
                StepKind::DownloadEditor => {
                    tracing::info!(
                        version = self.revision.key,
                        revision = self.revision.id,
                        "downloading editor"
                    );
                }
                StepKind::Test(platform) => {
                    tracing::info!(%platform, runtime = %self.runtime, "running tests");
                }
            }

            executor.execute(&step.command, out)?;

            if let StepKind::Test(platform) = step.kind {
                let report = self.report_for(platform);
                if !report.results_written {
                    tracing::warn!(
                        %platform,
                        path = %report.results_path.display(),
                        "editor exited successfully but wrote no result file"
                    );
                }
                summary.platforms.push(report);
            }
        }

        Ok(summary)
    }

    fn report_for(&self, platform: Platform) -> PlatformReport {
        let results_path = self.layout.results_path(platform);
        PlatformReport {
            platform,
            results_written: results_path.is_file(),
            log_path: self.layout.log_path(platform),
            results_path,
        }
    }
}
