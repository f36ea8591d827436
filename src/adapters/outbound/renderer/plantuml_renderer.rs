use crate::ports::outbound::DiagramRenderer;
use crate::shared::Result;
use anyhow::{bail, Context};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Executable looked up on PATH by default
const DEFAULT_EXECUTABLE: &str = "plantuml";

/// PlantUmlRenderer adapter turning the report's diagram block into an SVG
///
/// PlantUML extracts the `@startuml <name>` block from the Markdown report
/// and writes `<name>.svg` next to it. The executable is probed once with
/// `-version`; when it cannot be spawned the renderer reports itself as
/// unavailable and the caller skips rendering.
pub struct PlantUmlRenderer {
    executable: String,
    available: OnceCell<bool>,
}

impl PlantUmlRenderer {
    pub fn new() -> Self {
        Self::with_executable(DEFAULT_EXECUTABLE)
    }

    /// Creates a renderer that invokes the given executable instead of `plantuml`
    pub fn with_executable(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
            available: OnceCell::new(),
        }
    }
}

impl Default for PlantUmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramRenderer for PlantUmlRenderer {
    fn is_available(&self) -> bool {
        *self.available.get_or_init(|| {
            let probe = Command::new(&self.executable)
                .arg("-version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            tracing::debug!(executable = %self.executable, available = probe.is_ok(), "probed diagram renderer");
            probe.is_ok()
        })
    }

    fn render(&self, report_path: &Path) -> Result<PathBuf> {
        let status = Command::new(&self.executable)
            .arg("-tsvg")
            .arg(report_path)
            .stdout(Stdio::null())
            .status()
            .with_context(|| format!("Failed to execute {}", self.executable))?;

        if !status.success() {
            bail!(
                "{} exited with {} while rendering {}",
                self.executable,
                status,
                report_path.display()
            );
        }

        let image = report_path.with_extension("svg");
        tracing::info!(image = %image.display(), "diagram rendered");
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_is_unavailable() {
        let renderer = PlantUmlRenderer::with_executable("tmac-no-such-plantuml-binary");
        assert!(!renderer.is_available());
        // Cached on second call
        assert!(!renderer.is_available());
    }

    #[test]
    fn test_render_with_missing_executable_fails() {
        let renderer = PlantUmlRenderer::with_executable("tmac-no-such-plantuml-binary");
        let err = renderer
            .render(Path::new("report-2024-05-01.md"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to execute"));
    }
}
