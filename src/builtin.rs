//! Documents compiled into the binary.
//!
//! The demo model backs `--demo`; its security checks double as the default
//! rule set when no checks file is given.

use crate::ports::outbound::InputSource;

/// The built-in security checks
pub fn security_checks() -> InputSource {
    InputSource::Embedded {
        name: "security_checks.yaml",
        content: include_str!("../docs/security_checks.yaml"),
    }
}

pub fn demo_config() -> InputSource {
    InputSource::Embedded {
        name: "config.yaml",
        content: include_str!("../docs/config.yaml"),
    }
}

pub fn demo_resources() -> InputSource {
    InputSource::Embedded {
        name: "resources.yaml",
        content: include_str!("../docs/resources.yaml"),
    }
}

pub fn demo_defaults() -> InputSource {
    InputSource::Embedded {
        name: "defaults.yaml",
        content: include_str!("../docs/defaults.yaml"),
    }
}

pub fn demo_swagger() -> InputSource {
    InputSource::Embedded {
        name: "swagger.json",
        content: include_str!("../docs/swagger.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::filesystem::FileSystemReader;
    use crate::ports::outbound::ThreatModelReader;

    #[test]
    fn test_builtin_documents_load() {
        let reader = FileSystemReader::new();

        let model = reader.read_model_description(&demo_config()).unwrap();
        assert!(model.endpoint_import.is_some());
        assert!(!reader.read_catalog(&demo_resources()).unwrap().is_empty());
        reader.read_defaults(&demo_defaults()).unwrap();
        assert!(!reader.read_security_rules(&security_checks()).unwrap().is_empty());
        assert!(reader.read_endpoint_document(&demo_swagger()).unwrap()["paths"].is_object());
    }
}
