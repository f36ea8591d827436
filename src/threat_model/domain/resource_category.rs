use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of resource kinds a threat model is built from.
///
/// The declaration order is the canonical order used everywhere a category
/// list is walked: snapshot output, diagram emission and catalog iteration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ResourceCategory {
    #[serde(rename = "networks")]
    Network,
    #[serde(rename = "users")]
    User,
    #[serde(rename = "databases")]
    Database,
    #[serde(rename = "systems")]
    System,
    #[serde(rename = "containers")]
    Container,
}

impl ResourceCategory {
    pub const ALL: [ResourceCategory; 5] = [
        ResourceCategory::Network,
        ResourceCategory::User,
        ResourceCategory::Database,
        ResourceCategory::System,
        ResourceCategory::Container,
    ];

    /// The document key for this category (`networks`, `users`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            ResourceCategory::Network => "networks",
            ResourceCategory::User => "users",
            ResourceCategory::Database => "databases",
            ResourceCategory::System => "systems",
            ResourceCategory::Container => "containers",
        }
    }

    /// Whether instances of this category must name the network they live in
    pub fn requires_network(&self) -> bool {
        !matches!(self, ResourceCategory::Network)
    }

    /// Whether the category block must be present in resources and defaults documents.
    /// Containers may be absent entirely.
    pub fn is_required_block(&self) -> bool {
        !matches!(self, ResourceCategory::Container)
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for ResourceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "networks" | "network" => Ok(ResourceCategory::Network),
            "users" | "user" => Ok(ResourceCategory::User),
            "databases" | "database" => Ok(ResourceCategory::Database),
            "systems" | "system" => Ok(ResourceCategory::System),
            "containers" | "container" => Ok(ResourceCategory::Container),
            _ => Err(format!(
                "Invalid resource category: {}. Expected one of networks, users, databases, systems, containers",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_plural_and_singular() {
        assert_eq!(
            ResourceCategory::from_str("users").unwrap(),
            ResourceCategory::User
        );
        assert_eq!(
            ResourceCategory::from_str("Container").unwrap(),
            ResourceCategory::Container
        );
        assert_eq!(
            ResourceCategory::from_str(" SYSTEMS ").unwrap(),
            ResourceCategory::System
        );
    }

    #[test]
    fn test_from_str_invalid() {
        let err = ResourceCategory::from_str("queues").unwrap_err();
        assert!(err.contains("Invalid resource category"));
        assert!(err.contains("queues"));
    }

    #[test]
    fn test_display_matches_document_key() {
        for category in ResourceCategory::ALL {
            assert_eq!(category.to_string(), category.key());
        }
    }

    #[test]
    fn test_requires_network() {
        assert!(!ResourceCategory::Network.requires_network());
        assert!(ResourceCategory::User.requires_network());
        assert!(ResourceCategory::Container.requires_network());
    }

    #[test]
    fn test_only_containers_are_optional() {
        let optional: Vec<_> = ResourceCategory::ALL
            .iter()
            .filter(|c| !c.is_required_block())
            .collect();
        assert_eq!(optional, vec![&ResourceCategory::Container]);
    }

    #[test]
    fn test_serde_uses_plural_keys() {
        let json = serde_json::to_string(&ResourceCategory::Database).unwrap();
        assert_eq!(json, "\"databases\"");
        let parsed: ResourceCategory = serde_json::from_str("\"systems\"").unwrap();
        assert_eq!(parsed, ResourceCategory::System);
    }
}
