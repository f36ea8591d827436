/// Diagram renderer adapters backed by external executables
mod plantuml_renderer;

pub use plantuml_renderer::PlantUmlRenderer;
