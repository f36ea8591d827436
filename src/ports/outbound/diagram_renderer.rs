use crate::shared::Result;
use std::path::{Path, PathBuf};

/// DiagramRenderer port for turning diagram-as-code into an image
///
/// Rendering is optional: an unavailable renderer is not an error.
pub trait DiagramRenderer {
    /// Returns true if the renderer can be used on this machine
    fn is_available(&self) -> bool;

    /// Renders every diagram embedded in the given report file
    ///
    /// # Arguments
    /// * `report_path` - The written Markdown report
    ///
    /// # Returns
    /// Path of the produced image
    ///
    /// # Errors
    /// Returns an error if the renderer ran and failed
    fn render(&self, report_path: &Path) -> Result<PathBuf>;
}
