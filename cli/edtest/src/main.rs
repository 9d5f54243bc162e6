//! edtest CLI — download a pinned editor revision and run its batch-mode
//! tests for each requested platform.

mod commands;
mod config;
mod logging;

use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{ArgAction, Parser};
use edtest_core::{revision, Platform, Revision, Runtime};

use commands::run::RunRequest;
use config::{EdtestConfig, LoadedConfig};

#[derive(Parser, Debug)]
#[command(
    name = "edtest",
    about = "Download a pinned editor and run its tests per platform",
    disable_version_flag = true
)]
struct Cli {
    /// Platforms to test, in order
    #[arg(value_parser = platform_parser())]
    platforms: Vec<Platform>,

    /// Editor version to download and test with
    #[arg(long, value_parser = version_parser(), required_unless_present = "list")]
    version: Option<&'static Revision>,

    /// Scripting runtime to test against
    #[arg(long, default_value = "latest", value_parser = runtime_parser())]
    runtime: Runtime,

    /// Project directory passed to the editor (default: current directory)
    #[arg(long)]
    project: Option<PathBuf>,

    /// Directory for result and log files (default: ./artifacts)
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Editor binary to launch instead of the downloaded one
    #[arg(long)]
    editor: Option<PathBuf>,

    /// Configuration file (default: nearest edtest.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// List supported platforms, versions and runtimes, then exit
    #[arg(long)]
    list: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn platform_parser() -> impl TypedValueParser<Value = Platform> {
    PossibleValuesParser::new(Platform::names()).try_map(|name| name.parse::<Platform>())
}

fn version_parser() -> impl TypedValueParser<Value = &'static Revision> {
    PossibleValuesParser::new(revision::keys()).try_map(|key| revision::resolve(&key))
}

fn runtime_parser() -> impl TypedValueParser<Value = Runtime> {
    PossibleValuesParser::new(Runtime::names()).try_map(|name| name.parse::<Runtime>())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    if cli.list {
        return commands::list::run(&mut stdout);
    }

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    if let Some(loaded) = &config {
        tracing::debug!(dir = %loaded.dir.display(), "using configuration");
    }

    let Some(revision) = cli.version else {
        anyhow::bail!("--version is required");
    };
    let request = RunRequest {
        platforms: cli.platforms,
        revision,
        runtime: cli.runtime,
        project: cli.project,
        artifacts: cli.artifacts,
        editor: cli.editor,
        dry_run: cli.dry_run,
    };

    commands::run::run(&cwd, config.as_ref(), &request, &mut stdout)?;
    Ok(())
}

/// Load the explicit config file, or search upward from `cwd` for one.
fn load_config(cwd: &Path, explicit: Option<&Path>) -> anyhow::Result<Option<LoadedConfig>> {
    match explicit {
        Some(path) => EdtestConfig::load_file(&cwd.join(path)).map(Some),
        None => EdtestConfig::find_and_load(cwd),
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_platforms_in_order() {
        let cli = Cli::try_parse_from([
            "edtest",
            "StandaloneOSX",
            "Editor",
            "iOS",
            "--version",
            "2018.2",
            "--runtime",
            "legacy",
        ])
        .unwrap();
        assert_eq!(
            cli.platforms,
            vec![Platform::StandaloneOSX, Platform::Editor, Platform::IOS]
        );
        assert_eq!(cli.version.unwrap().key, "2018.2");
        assert_eq!(cli.runtime, Runtime::Legacy);
    }

    #[test]
    fn runtime_defaults_to_latest_and_platforms_may_be_empty() {
        let cli = Cli::try_parse_from(["edtest", "--version", "2018.2"]).unwrap();
        assert!(cli.platforms.is_empty());
        assert_eq!(cli.runtime, Runtime::Latest);
    }

    #[test]
    fn rejects_unknown_platform() {
        let err = Cli::try_parse_from(["edtest", "PS4", "--version", "2018.2"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn rejects_unknown_version() {
        let err = Cli::try_parse_from(["edtest", "Editor", "--version", "2017.4"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn rejects_unknown_runtime() {
        let err = Cli::try_parse_from(["edtest", "--version", "2018.2", "--runtime", "net20"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn version_is_required_unless_listing() {
        let err = Cli::try_parse_from(["edtest", "Editor"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(Cli::try_parse_from(["edtest", "--list"]).is_ok());
    }

    /// Config file → dry run → printed plan, end to end.
    #[test]
    fn config_and_dry_run_workflow() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("edtest.toml"),
            "[project]\nartifacts = \"ci-artifacts\"\n\n[downloader]\nindex_url = \"https://pypi.example.com/simple\"\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "edtest",
            "Editor",
            "StandaloneLinux64",
            "--version",
            "2018.2",
            "--dry-run",
        ])
        .unwrap();

        let config = load_config(dir.path(), cli.config.as_deref()).unwrap();
        assert!(config.is_some());

        let request = RunRequest {
            platforms: cli.platforms,
            revision: cli.version.unwrap(),
            runtime: cli.runtime,
            project: cli.project,
            artifacts: cli.artifacts,
            editor: cli.editor,
            dry_run: cli.dry_run,
        };
        let mut out: Vec<u8> = Vec::new();
        commands::run::run(dir.path(), config.as_ref(), &request, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ci-artifacts"));
        assert!(text.contains("--extra-index-url https://pypi.example.com/simple"));
        assert!(text.contains("-c Editor -c StandaloneSupport --wait"));
        assert!(text.contains("StandaloneLinux64_TestResults.txt"));
        assert!(text.contains("Editor_EditorLog.txt"));
        assert_eq!(text.matches("-batchmode").count(), 2);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path(), Some(Path::new("missing.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("missing.toml"));
    }
}
