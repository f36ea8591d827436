/// Serialization format for the snapshot artefact
///
/// Both the CLI (inbound adapter) and the snapshot formatter (outbound
/// adapter) need to understand it, so it lives in the application layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotFormat {
    /// YAML (default)
    #[default]
    Yaml,
    /// JSON
    Json,
}

impl SnapshotFormat {
    /// File extension used for the snapshot file
    pub fn extension(&self) -> &'static str {
        match self {
            SnapshotFormat::Yaml => "yaml",
            SnapshotFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yaml" | "yml" => Ok(SnapshotFormat::Yaml),
            "json" => Ok(SnapshotFormat::Json),
            _ => Err(format!(
                "Invalid snapshot format: {}. Please specify 'yaml' or 'json'",
                s
            )),
        }
    }
}

impl std::fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotFormat::Yaml => write!(f, "yaml"),
            SnapshotFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_snapshot_format_from_str() {
        assert_eq!(SnapshotFormat::from_str("yaml").unwrap(), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_str("YML").unwrap(), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_str("Json").unwrap(), SnapshotFormat::Json);
    }

    #[test]
    fn test_snapshot_format_from_str_invalid() {
        let result = SnapshotFormat::from_str("xml");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid snapshot format"));
    }

    #[test]
    fn test_snapshot_format_default_and_extension() {
        assert_eq!(SnapshotFormat::default(), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::Yaml.extension(), "yaml");
        assert_eq!(SnapshotFormat::Json.extension(), "json");
        assert_eq!(SnapshotFormat::Json.to_string(), "json");
    }
}
