//! Core of the edtest driver: download a pinned editor revision and run its
//! batch-mode tests for a list of platforms.
//!
//! The static tables (platforms, revisions, runtimes, download components)
//! live in their own modules. [`run::TestRun`] turns resolved inputs into an
//! ordered list of commands and executes them through a [`process::Executor`],
//! aborting on the first failure.

pub mod command;
pub mod component;
pub mod error;
pub mod options;
pub mod platform;
pub mod process;
pub mod revision;
pub mod run;
pub mod runtime;

// Re-exports for convenience.
pub use command::CommandSpec;
pub use component::{derive_components, Component};
pub use error::{CoreError, Result};
pub use options::{default_editor_path, Layout, RunOptions};
pub use platform::Platform;
pub use process::{DryRunExecutor, Executor, SystemExecutor};
pub use revision::{Revision, REVISIONS};
pub use run::{DownloaderConfig, PlannedStep, PlatformReport, RunSummary, StepKind, TestRun};
pub use runtime::Runtime;
