use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::platform::PlatformProbe;

/// The two resolved facts written to the output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformReport {
    pub os_identity: String,
    pub screen_resolution: String,
}

impl PlatformReport {
    /// Resolve both values, identity first
    ///
    /// Never fails: unresolvable values are already `"Unknown"`.
    pub fn collect<P: PlatformProbe>(probe: &P) -> Self {
        Self {
            os_identity: probe.resolve_os_identity(),
            screen_resolution: probe.resolve_screen_resolution(),
        }
    }

    /// Render the report as two newline-terminated lines
    pub fn render(&self) -> String {
        format!("{}\n{}\n", self.os_identity, self.screen_resolution)
    }

    /// Write the rendered report to `path`
    ///
    /// The target itself is opened for writing (created or truncated), so a
    /// read-only file is an error and a symlink is written through. Missing
    /// parent directories are not created.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)
            .with_context(|| format!("Error opening file {}", path.display()))?;

        file.write_all(self.render().as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;

        file.sync_all().context("Failed to sync file to disk")?;

        tracing::debug!("Report written to {}", path.display());

        Ok(())
    }
}
