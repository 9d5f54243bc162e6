//! `edtest --list` — print the platform, version and runtime tables.

use std::io::Write;

use anyhow::Result;
use edtest_core::{revision, Platform, Runtime};

/// Write every accepted platform, version key and runtime to `out`.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Platforms:")?;
    for platform in Platform::ALL {
        writeln!(
            out,
            "  {:<22} test={:<20} target={}",
            platform.name(),
            platform.test_platform(),
            platform.build_target()
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Versions:")?;
    for rev in revision::REVISIONS {
        writeln!(out, "  {:<22} {}", rev.key, rev.id)?;
    }
    writeln!(out)?;

    writeln!(out, "Runtimes:")?;
    for runtime in Runtime::ALL {
        let marker = if runtime == Runtime::default() { " (default)" } else { "" };
        writeln!(out, "  {runtime}{marker}")?;
    }
    Ok(())
}
