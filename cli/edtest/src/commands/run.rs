//! `edtest [PLATFORM]... --version <KEY>` — download the editor and run tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use edtest_core::{
    default_editor_path, DownloaderConfig, DryRunExecutor, Executor, Layout, Platform, Revision,
    RunSummary, Runtime, SystemExecutor, TestRun,
};

use crate::config::LoadedConfig;

/// Default artifact directory name, relative to the working directory.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Everything the command line contributes to a run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub platforms: Vec<Platform>,
    pub revision: &'static Revision,
    pub runtime: Runtime,
    pub project: Option<PathBuf>,
    pub artifacts: Option<PathBuf>,
    pub editor: Option<PathBuf>,
    pub dry_run: bool,
}

/// Pick each path from the command line, then the config file, then the
/// built-in default. Command-line paths are relative to `cwd`, config paths
/// to the config file's directory.
pub fn resolve_layout(cwd: &Path, config: Option<&LoadedConfig>, request: &RunRequest) -> Layout {
    let pick = |flag: Option<&PathBuf>,
                from_config: Option<&PathBuf>,
                default: PathBuf|
     -> PathBuf {
        match (flag, config.zip(from_config)) {
            (Some(path), _) => cwd.join(path),
            (None, Some((loaded, path))) => loaded.resolve(path),
            (None, None) => default,
        }
    };

    let section = config.map(|c| &c.config);
    Layout {
        project_dir: pick(
            request.project.as_ref(),
            section.and_then(|c| c.project.path.as_ref()),
            cwd.to_path_buf(),
        ),
        artifacts_dir: pick(
            request.artifacts.as_ref(),
            section.and_then(|c| c.project.artifacts.as_ref()),
            cwd.join(DEFAULT_ARTIFACTS_DIR),
        ),
        editor: pick(
            request.editor.as_ref(),
            section.and_then(|c| c.editor.path.as_ref()),
            cwd.join(default_editor_path()),
        ),
    }
}

/// Build the run from the request and optional configuration.
pub fn build(cwd: &Path, config: Option<&LoadedConfig>, request: &RunRequest) -> TestRun {
    let downloader = config
        .map(|c| c.config.downloader())
        .unwrap_or_else(DownloaderConfig::default);
    TestRun {
        platforms: request.platforms.clone(),
        revision: request.revision,
        runtime: request.runtime,
        layout: resolve_layout(cwd, config, request),
        downloader,
    }
}

/// Execute the run, or print its commands when `dry_run` is set.
pub fn run(
    cwd: &Path,
    config: Option<&LoadedConfig>,
    request: &RunRequest,
    out: &mut dyn Write,
) -> Result<Option<RunSummary>> {
    let test_run = build(cwd, config, request);
    tracing::debug!(?test_run.layout, "resolved layout");

    if request.dry_run {
        writeln!(
            out,
            "[dry-run] mkdir -p {}",
            test_run.layout.artifacts_dir.display()
        )?;
        let mut executor = DryRunExecutor;
        for step in test_run.plan() {
            executor.execute(&step.command, out)?;
        }
        return Ok(None);
    }

    let summary = test_run
        .execute(&mut SystemExecutor, out)
        .with_context(|| format!("editor {} test run aborted", request.revision.key))?;

    print_summary(&summary, &test_run.layout, out)?;
    Ok(Some(summary))
}

fn print_summary(summary: &RunSummary, layout: &Layout, out: &mut dyn Write) -> Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Tested {} platform(s); artifacts in {}",
        summary.platforms.len(),
        layout.artifacts_dir.display()
    )?;
    for report in &summary.platforms {
        let status = if report.results_written {
            "results written"
        } else {
            "no results file"
        };
        writeln!(out, "  {:<22} {status}", report.platform.name())?;
    }
    Ok(())
}
