//! Conversion of parsed input documents into domain values
//!
//! Every document is first parsed into a generic `serde_json::Value`
//! whatever its on-disk format, then checked and converted here. Structural
//! problems become `ConfigStructure` errors naming the document and the
//! offending entry.

use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::domain::{
    AttributeMap, AttributeValue, EndpointImportSettings, ModelDescription, RelationshipEdge,
    ResourceCatalog, ResourceCategory, ResourceDefaults, ResourceInstance, SecurityRule, Severity,
};
use serde::Deserialize;
use serde_json::{Map, Value};

const RELATIONSHIPS_KEY: &str = "res_links";

/// On-disk format of an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Picks the format from a file name; anything unrecognised is read as YAML
    pub fn from_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower.ends_with(".json") {
            DocumentFormat::Json
        } else if lower.ends_with(".toml") {
            DocumentFormat::Toml
        } else {
            DocumentFormat::Yaml
        }
    }

    pub fn parse(&self, content: &str) -> std::result::Result<Value, String> {
        match self {
            DocumentFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// A field that may be written as a single value or as a list
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    title: Option<String>,
    description: Option<OneOrMany>,
    swagger_resource_type: Option<String>,
    swagger_default_network: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    name: Option<String>,
    network: Option<String>,
    description: Option<String>,
    config: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct RawRelationship {
    source: Option<String>,
    destination: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSecurityCheck {
    name: Option<String>,
    description: Option<String>,
    remediation: Option<String>,
    severity: Option<i64>,
    resource_scope: Option<OneOrMany>,
    check_query: Option<OneOrMany>,
}

fn structure_error(document: &str, reason: impl Into<String>) -> anyhow::Error {
    TmacError::ConfigStructure {
        document: document.to_string(),
        reason: reason.into(),
    }
    .into()
}

fn as_object<'a>(value: &'a Value, document: &str, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| structure_error(document, format!("{} must be a mapping", what)))
}

/// Converts a scalar document value into an attribute value.
/// Numbers are kept as text; nested structures are rejected.
fn attribute_value(value: &Value) -> std::result::Result<AttributeValue, String> {
    match value {
        Value::Bool(b) => Ok(AttributeValue::Bool(*b)),
        Value::String(s) => Ok(AttributeValue::Text(s.clone())),
        Value::Number(n) => Ok(AttributeValue::Text(n.to_string())),
        Value::Null => Err("null is not a valid attribute value".to_string()),
        Value::Array(_) | Value::Object(_) => {
            Err("attribute values must be booleans or strings".to_string())
        }
    }
}

fn attribute_map(
    entries: &Map<String, Value>,
    document: &str,
    owner: &str,
) -> Result<AttributeMap> {
    entries
        .iter()
        .map(|(key, value)| {
            attribute_value(value)
                .map(|v| (key.clone(), v))
                .map_err(|reason| structure_error(document, format!("{} '{}': {}", owner, key, reason)))
        })
        .collect()
}

/// Project config: title, description and endpoint import settings
pub fn model_description(value: &Value) -> Result<ModelDescription> {
    const DOC: &str = "config";
    as_object(value, DOC, "the document")?;

    let raw: RawConfig =
        serde_json::from_value(value.clone()).map_err(|e| structure_error(DOC, e.to_string()))?;

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| structure_error(DOC, "'title' is required"))?;

    let description = raw
        .description
        .map(OneOrMany::into_vec)
        .ok_or_else(|| structure_error(DOC, "'description' is required"))?;

    let mut model = ModelDescription::new(title, description);

    match (raw.swagger_resource_type, raw.swagger_default_network) {
        (Some(category), Some(network)) => {
            let target_category = category
                .parse::<ResourceCategory>()
                .map_err(|e| structure_error(DOC, format!("swagger_resource_type: {}", e)))?;
            model = model.with_endpoint_import(EndpointImportSettings {
                target_category,
                default_network: network,
            });
        }
        (None, None) => {}
        (Some(_), None) => {
            return Err(structure_error(
                DOC,
                "'swagger_default_network' is required when 'swagger_resource_type' is set",
            ))
        }
        (None, Some(_)) => {
            return Err(structure_error(
                DOC,
                "'swagger_resource_type' is required when 'swagger_default_network' is set",
            ))
        }
    }

    Ok(model)
}

/// Resources document: the `resources:` block with one list per category
pub fn catalog(value: &Value) -> Result<ResourceCatalog> {
    const DOC: &str = "resources";
    let root = as_object(value, DOC, "the document")?;
    let block = root
        .get("resources")
        .ok_or_else(|| structure_error(DOC, "top-level 'resources' block is missing"))?;
    let block = as_object(block, DOC, "'resources'")?;

    let mut catalog = ResourceCatalog::new();

    for category in ResourceCategory::ALL {
        let entries = match block.get(category.key()) {
            None if category.is_required_block() => {
                return Err(structure_error(
                    DOC,
                    format!("'{}' block is missing (it may be empty)", category),
                ))
            }
            None | Some(Value::Null) => continue,
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(structure_error(DOC, format!("'{}' must be a list", category)))
            }
        };

        for (index, entry) in entries.iter().enumerate() {
            catalog.add_resource(resource(entry, category, index)?);
        }
    }

    match block.get(RELATIONSHIPS_KEY) {
        None | Some(Value::Null) => {}
        Some(Value::Array(edges)) => {
            for (index, edge) in edges.iter().enumerate() {
                catalog.add_relationship(relationship(edge, index)?);
            }
        }
        Some(_) => {
            return Err(structure_error(
                DOC,
                format!("'{}' must be a list", RELATIONSHIPS_KEY),
            ))
        }
    }

    Ok(catalog)
}

fn resource(entry: &Value, category: ResourceCategory, index: usize) -> Result<ResourceInstance> {
    const DOC: &str = "resources";
    let position = format!("{} entry #{}", category, index + 1);

    let raw: RawResource = serde_json::from_value(entry.clone())
        .map_err(|e| structure_error(DOC, format!("{}: {}", position, e)))?;

    let name = raw
        .name
        .ok_or_else(|| structure_error(DOC, format!("{} has no 'name'", position)))?;

    let description = match raw.description {
        Some(description) => description,
        None if category.requires_network() => {
            return Err(structure_error(
                DOC,
                format!("{} resource '{}' has no 'description'", category, name),
            ))
        }
        None => String::new(),
    };

    let overrides = match &raw.config {
        Some(config) => attribute_map(config, DOC, &format!("config of '{}'", name))?,
        None => AttributeMap::new(),
    };

    ResourceInstance::new(name, category, raw.network, description)
        .map(|instance| instance.with_overrides(overrides))
        .map_err(|e| structure_error(DOC, e.to_string()))
}

fn relationship(edge: &Value, index: usize) -> Result<RelationshipEdge> {
    const DOC: &str = "resources";
    let raw: RawRelationship = serde_json::from_value(edge.clone()).map_err(|e| {
        structure_error(DOC, format!("{} entry #{}: {}", RELATIONSHIPS_KEY, index + 1, e))
    })?;

    match (raw.source, raw.destination, raw.description) {
        (Some(source), Some(destination), Some(description)) => {
            Ok(RelationshipEdge::new(source, destination, description))
        }
        _ => Err(structure_error(
            DOC,
            format!(
                "{} entry #{} needs 'source', 'destination' and 'description'",
                RELATIONSHIPS_KEY,
                index + 1
            ),
        )),
    }
}

/// Defaults document: one attribute mapping per category
pub fn defaults(value: &Value) -> Result<ResourceDefaults> {
    const DOC: &str = "defaults";
    let root = as_object(value, DOC, "the document")?;

    for key in root.keys() {
        key.parse::<ResourceCategory>()
            .map_err(|_| structure_error(DOC, format!("unknown category '{}'", key)))?;
    }

    let mut defaults = ResourceDefaults::new();
    for category in ResourceCategory::ALL {
        match root.get(category.key()) {
            None if category.is_required_block() => {
                return Err(structure_error(
                    DOC,
                    format!("'{}' block is missing", category),
                ))
            }
            None => {}
            Some(Value::Null) => defaults.insert(category, AttributeMap::new()),
            Some(Value::Object(entries)) => {
                defaults.insert(category, attribute_map(entries, DOC, category.key())?)
            }
            Some(_) => {
                return Err(structure_error(
                    DOC,
                    format!("'{}' must be a mapping of attributes", category),
                ))
            }
        }
    }

    Ok(defaults)
}

/// Security checks document: rule id to check definition, in document order
pub fn security_rules(value: &Value) -> Result<Vec<SecurityRule>> {
    const DOC: &str = "security checks";
    let root = as_object(value, DOC, "the document")?;

    root.iter()
        .map(|(id, check)| security_rule(id, check))
        .collect()
}

fn security_rule(id: &str, check: &Value) -> Result<SecurityRule> {
    let invalid = |reason: String| -> anyhow::Error {
        TmacError::RuleDefinition {
            rule: id.to_string(),
            reason,
        }
        .into()
    };

    let raw: RawSecurityCheck =
        serde_json::from_value(check.clone()).map_err(|e| invalid(e.to_string()))?;

    let required = |field: Option<String>, key: &str| {
        field.ok_or_else(|| invalid(format!("'{}' is required", key)))
    };

    let name = required(raw.name, "name")?;
    let description = required(raw.description, "description")?;
    let remediation = required(raw.remediation, "remediation")?;

    let severity = raw
        .severity
        .ok_or_else(|| invalid("'severity' is required".to_string()))
        .and_then(|level| Severity::new(level).map_err(|e| invalid(e.to_string())))?;

    let scope = raw
        .resource_scope
        .ok_or_else(|| invalid("'resource_scope' is required".to_string()))?
        .into_vec()
        .iter()
        .map(|category| category.parse::<ResourceCategory>().map_err(invalid))
        .collect::<Result<Vec<_>>>()?;

    let query_parts = raw
        .check_query
        .ok_or_else(|| invalid("'check_query' is required".to_string()))?
        .into_vec();

    SecurityRule::new(
        id.to_string(),
        name,
        description,
        remediation,
        severity,
        scope,
        &query_parts.join(" "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yaml(content: &str) -> Value {
        DocumentFormat::Yaml.parse(content).unwrap()
    }

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(DocumentFormat::from_file_name("a/config.yml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_file_name("swagger.JSON"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_file_name("defaults.toml"), DocumentFormat::Toml);
        assert_eq!(DocumentFormat::from_file_name("no_extension"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_model_description_with_list_description() {
        let model = model_description(&yaml(
            "title: Shop\ndescription:\n  - one\n  - two\nswagger_resource_type: containers\nswagger_default_network: cloud\n",
        ))
        .unwrap();

        assert_eq!(model.title, "Shop");
        assert_eq!(model.description, vec!["one", "two"]);
        let settings = model.endpoint_import.unwrap();
        assert_eq!(settings.target_category, ResourceCategory::Container);
        assert_eq!(settings.default_network, "cloud");
    }

    #[test]
    fn test_model_description_string_description_and_no_import() {
        let model = model_description(&json!({"title": "T", "description": "only line"})).unwrap();
        assert_eq!(model.description, vec!["only line"]);
        assert!(model.endpoint_import.is_none());
    }

    #[test]
    fn test_model_description_requires_title() {
        let err = model_description(&json!({"description": "x"})).unwrap_err();
        assert!(err.to_string().contains("'title' is required"));
    }

    #[test]
    fn test_model_description_half_import_settings() {
        let err = model_description(&json!({
            "title": "T", "description": "d", "swagger_resource_type": "containers"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("swagger_default_network"));
    }

    #[test]
    fn test_catalog_normalizes_null_and_missing_blocks() {
        let catalog = catalog(&yaml(
            r#"
resources:
  networks:
    - name: office
  users:
  databases: []
  systems:
    - name: web
      network: office
      description: Web
      config:
        is_hardened: false
        tier: 3
"#,
        ))
        .unwrap();

        assert_eq!(catalog.resources(ResourceCategory::Network).len(), 1);
        assert!(catalog.resources(ResourceCategory::User).is_empty());
        assert!(catalog.resources(ResourceCategory::Container).is_empty());
        assert!(catalog.relationships().is_empty());

        let web = &catalog.resources(ResourceCategory::System)[0];
        assert_eq!(
            web.overrides().get("is_hardened"),
            Some(&AttributeValue::Bool(false))
        );
        assert_eq!(
            web.overrides().get("tier"),
            Some(&AttributeValue::Text("3".to_string()))
        );
    }

    #[test]
    fn test_catalog_missing_required_block() {
        let err = catalog(&yaml("resources:\n  networks: []\n  users: []\n  systems: []\n"))
            .unwrap_err();
        assert!(err.to_string().contains("'databases' block is missing"));
    }

    #[test]
    fn test_catalog_resource_without_network() {
        let err = catalog(&yaml(
            "resources:\n  networks: []\n  users:\n    - name: alice\n      description: A\n  databases: []\n  systems: []\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("must name the network"));
    }

    #[test]
    fn test_catalog_resource_without_description() {
        let err = catalog(&yaml(
            "resources:\n  networks: []\n  users: []\n  databases:\n    - name: db\n      network: n\n  systems: []\n",
        ))
        .unwrap_err();
        assert!(err.to_string().contains("has no 'description'"));
    }

    #[test]
    fn test_catalog_relationships() {
        let catalog = catalog(&json!({
            "resources": {
                "networks": [], "users": [], "databases": [], "systems": [],
                "res_links": [{"source": "a", "destination": "b", "description": "HTTPS"}]
            }
        }))
        .unwrap();
        assert_eq!(catalog.relationships()[0].destination, "b");

        let err = super::catalog(&json!({
            "resources": {
                "networks": [], "users": [], "databases": [], "systems": [],
                "res_links": [{"source": "a"}]
            }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("res_links entry #1"));
    }

    #[test]
    fn test_defaults_required_and_optional_blocks() {
        let defaults = defaults(&yaml(
            "networks:\n  has_wifi: false\nusers:\n  company_user: true\ndatabases:\nsystems:\n  is_hardened: true\n",
        ))
        .unwrap();

        assert!(defaults.get(ResourceCategory::Database).unwrap().is_empty());
        assert!(!defaults.contains(ResourceCategory::Container));

        let err = super::defaults(&yaml("networks: {}\nusers: {}\nsystems: {}\n")).unwrap_err();
        assert!(err.to_string().contains("'databases' block is missing"));
    }

    #[test]
    fn test_defaults_unknown_category() {
        let err = defaults(&json!({
            "networks": {}, "users": {}, "databases": {}, "systems": {}, "servers": {}
        }))
        .unwrap_err();
        assert!(err.to_string().contains("unknown category 'servers'"));
    }

    #[test]
    fn test_security_rules_keep_document_order_and_join_queries() {
        let rules = security_rules(&yaml(
            r#"
zeta_check:
  name: Zeta
  description: d
  remediation: r
  severity: 2
  resource_scope: systems
  check_query: not is_hardened
alpha_check:
  name: Alpha
  description: d
  remediation: r
  severity: 1
  resource_scope: [users, systems]
  check_query:
    - company_user
    - and not company_device
"#,
        ))
        .unwrap();

        assert_eq!(rules[0].id(), "zeta_check");
        assert_eq!(rules[1].id(), "alpha_check");
        assert_eq!(
            rules[1].resource_scope(),
            &[ResourceCategory::User, ResourceCategory::System]
        );
        assert_eq!(
            rules[1].predicate_text(),
            "company_user and not company_device"
        );
    }

    #[test]
    fn test_security_rule_invalid_severity_and_scope() {
        let base = |severity: i64, scope: &str| {
            json!({ "broken": {
                "name": "n", "description": "d", "remediation": "r",
                "severity": severity, "resource_scope": scope, "check_query": "a"
            }})
        };

        let err = security_rules(&base(7, "systems")).unwrap_err();
        assert!(err.to_string().contains("Invalid severity 7"));

        let err = security_rules(&base(1, "servers")).unwrap_err();
        assert!(err.to_string().contains("Invalid resource category"));
    }

    #[test]
    fn test_security_rule_missing_query() {
        let err = security_rules(&json!({ "broken": {
            "name": "n", "description": "d", "remediation": "r",
            "severity": 1, "resource_scope": "systems"
        }}))
        .unwrap_err();
        let display = err.to_string();
        assert!(display.contains("'broken'"));
        assert!(display.contains("'check_query' is required"));
    }
}
