use crate::application::read_models::{DiagramView, NodeView};
use crate::threat_model::domain::ResourceCategory;
use std::fmt::Write;

const C4_CONTAINER_INCLUDE: &str =
    "https://raw.githubusercontent.com/plantuml-stdlib/C4-PlantUML/master/C4_Container.puml";

const STRIDE_INCLUDE: &str =
    "https://raw.githubusercontent.com/geret1/plantuml-schemas/main/stride.puml";

/// Characters that cannot appear in a PlantUML element alias
const ALIAS_UNSAFE: &[char] = &['/', '-', '.', '{', '}', ' '];

/// Emits the C4-PlantUML data-flow diagram for a report
///
/// Each declared network becomes a `Boundary` holding its members, users as
/// `Person`, databases as `SystemDb`, systems as `System` and containers as
/// `Container`. Resources attached to an undeclared network are drawn
/// outside any boundary. Every relationship edge becomes a `BiRel`.
pub struct PlantUmlDiagram;

impl PlantUmlDiagram {
    /// Renders the diagram source, from `@startuml` to `@enduml` inclusive
    pub fn render(name: &str, diagram: &DiagramView) -> String {
        let mut output = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(output, "@startuml {}", name);
        let _ = writeln!(output, "!include {}", C4_CONTAINER_INCLUDE);
        let _ = writeln!(output, "!include {}", STRIDE_INCLUDE);
        output.push('\n');

        for boundary in &diagram.boundaries {
            let _ = writeln!(
                output,
                "Boundary(b{}, \"{}\") {{",
                Self::alias(&boundary.network),
                Self::label(&boundary.network)
            );
            for member in &boundary.members {
                let _ = writeln!(output, "\t{}", Self::element(member));
            }
            output.push_str("}\n");
        }

        for node in &diagram.unbounded {
            let _ = writeln!(output, "{}", Self::element(node));
        }

        for edge in &diagram.relationships {
            let _ = writeln!(
                output,
                "BiRel({}, {}, \"{}\")",
                Self::alias(&edge.source),
                Self::alias(&edge.destination),
                Self::label(&edge.description)
            );
        }

        output.push_str("@enduml\n");
        output
    }

    /// Sanitizes a resource name into a PlantUML alias
    pub fn alias(name: &str) -> String {
        name.replace(ALIAS_UNSAFE, "_")
    }

    fn label(text: &str) -> String {
        text.replace('"', "'").replace('\n', " ")
    }

    fn element(node: &NodeView) -> String {
        let macro_name = match node.category {
            ResourceCategory::User => "Person",
            ResourceCategory::Database => "SystemDb",
            ResourceCategory::System => "System",
            ResourceCategory::Container => "Container",
            ResourceCategory::Network => "Boundary",
        };
        format!(
            "{}({}, \"{}\", \"{}\")",
            macro_name,
            Self::alias(&node.name),
            Self::label(&node.name),
            Self::label(&node.description)
        )
    }
}
