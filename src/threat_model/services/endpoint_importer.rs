use crate::shared::error::TmacError;
use crate::shared::Result;
use crate::threat_model::domain::{
    EndpointImportSettings, ResourceCatalog, ResourceCategory, ResourceInstance,
};
use serde_json::Value;

/// Operation keys of an OpenAPI path item; other keys (`parameters`,
/// `summary`, `$ref`, ...) are not operations.
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Maximum number of paths accepted from one endpoint document
const MAX_IMPORTED_PATHS: usize = 10_000;

/// EndpointImporter service for turning an interface description into
/// synthetic resources
///
/// Each entry of the document's `paths` mapping becomes one resource named
/// after the path, joined to the configured default network and described by
/// its first operation's `description`. Conversion is all-or-nothing: any
/// malformed path rejects the whole document.
pub struct EndpointImporter;

impl EndpointImporter {
    /// Converts the document's paths into resource instances
    ///
    /// # Arguments
    /// * `document` - Parsed OpenAPI / Swagger document
    /// * `source_name` - Name of the document, used in error messages
    /// * `settings` - Target category and default network
    ///
    /// # Errors
    /// Returns [`TmacError::Import`] if `paths` is missing or empty, a path has
    /// no operation, the first operation lacks a description, or the target
    /// category is `networks`
    pub fn import(
        document: &Value,
        source_name: &str,
        settings: &EndpointImportSettings,
    ) -> Result<Vec<ResourceInstance>> {
        let import_error = |reason: String| TmacError::Import {
            source_name: source_name.to_string(),
            reason,
        };

        if settings.target_category == ResourceCategory::Network {
            return Err(import_error(
                "endpoints cannot be imported as networks; set swagger_resource_type to users, databases, systems or containers".to_string(),
            )
            .into());
        }

        let paths = document
            .get("paths")
            .and_then(Value::as_object)
            .ok_or_else(|| import_error("document has no 'paths' mapping".to_string()))?;

        if paths.is_empty() {
            return Err(import_error("'paths' mapping is empty".to_string()).into());
        }

        if paths.len() > MAX_IMPORTED_PATHS {
            return Err(import_error(format!(
                "too many paths ({}). Maximum allowed: {}",
                paths.len(),
                MAX_IMPORTED_PATHS
            ))
            .into());
        }

        let mut resources = Vec::with_capacity(paths.len());
        for (path, item) in paths {
            let description = Self::first_operation_description(item)
                .map_err(|reason| import_error(format!("path '{}': {}", path, reason)))?;

            let resource = ResourceInstance::new(
                path.clone(),
                settings.target_category,
                Some(settings.default_network.clone()),
                description,
            )
            .map_err(|e| import_error(format!("path '{}': {}", path, e)))?;

            resources.push(resource);
        }

        tracing::debug!(
            source = source_name,
            category = settings.target_category.key(),
            endpoints = resources.len(),
            "imported endpoints"
        );

        Ok(resources)
    }

    /// Appends imported resources to the target category. An empty category
    /// becomes exactly the imported list.
    pub fn apply(
        catalog: &mut ResourceCatalog,
        settings: &EndpointImportSettings,
        resources: Vec<ResourceInstance>,
    ) {
        catalog.extend_category(settings.target_category, resources);
    }

    fn first_operation_description(item: &Value) -> std::result::Result<String, String> {
        let operations = item
            .as_object()
            .ok_or_else(|| "path item is not a mapping".to_string())?;

        let (method, operation) = operations
            .iter()
            .find(|(key, _)| HTTP_METHODS.contains(&key.to_ascii_lowercase().as_str()))
            .ok_or_else(|| "no operation declared".to_string())?;

        operation
            .get("description")
            .and_then(Value::as_str)
            .map(|d| d.trim().to_string())
            .ok_or_else(|| format!("operation '{}' has no description", method))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(category: ResourceCategory) -> EndpointImportSettings {
        EndpointImportSettings {
            target_category: category,
            default_network: "cloud".to_string(),
        }
    }

    fn two_paths() -> Value {
        json!({
            "swagger": "2.0",
            "paths": {
                "/api/user": {
                    "get": { "description": "Get a user" },
                    "post": { "description": "Create a user" }
                },
                "/api/user/add": {
                    "parameters": [],
                    "post": { "description": "Add a user" }
                }
            }
        })
    }

    #[test]
    fn test_import_uses_first_operation_description() {
        let resources = EndpointImporter::import(
            &two_paths(),
            "swagger.json",
            &settings(ResourceCategory::Container),
        )
        .unwrap();

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].name(), "/api/user");
        assert_eq!(resources[0].description(), "Get a user");
        assert_eq!(resources[0].network(), Some("cloud"));
        assert_eq!(resources[0].category(), ResourceCategory::Container);
        assert!(resources[0].overrides().is_empty());
        assert_eq!(resources[1].description(), "Add a user");
    }

    #[test]
    fn test_apply_into_empty_and_non_empty_category() {
        let target = settings(ResourceCategory::System);
        let imported =
            EndpointImporter::import(&two_paths(), "swagger.json", &target).unwrap();

        let mut catalog = ResourceCatalog::new();
        catalog.add_resource(
            ResourceInstance::new(
                "web".to_string(),
                ResourceCategory::System,
                Some("cloud".to_string()),
                "Web".to_string(),
            )
            .unwrap(),
        );
        EndpointImporter::apply(&mut catalog, &target, imported.clone());

        let names: Vec<_> = catalog
            .resources(ResourceCategory::System)
            .iter()
            .map(|r| r.name())
            .collect();
        assert_eq!(names, vec!["web", "/api/user", "/api/user/add"]);

        let mut empty = ResourceCatalog::new();
        let containers = settings(ResourceCategory::Container);
        EndpointImporter::apply(&mut empty, &containers, imported);
        assert_eq!(empty.resources(ResourceCategory::Container).len(), 2);
    }

    #[test]
    fn test_missing_paths_is_import_error() {
        let err = EndpointImporter::import(
            &json!({"swagger": "2.0"}),
            "swagger.json",
            &settings(ResourceCategory::Container),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TmacError>(),
            Some(TmacError::Import { .. })
        ));
    }

    #[test]
    fn test_empty_paths_is_import_error() {
        let err = EndpointImporter::import(
            &json!({"paths": {}}),
            "swagger.json",
            &settings(ResourceCategory::Container),
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_operation_without_description_is_import_error() {
        let document = json!({
            "paths": {
                "/ok": { "get": { "description": "fine" } },
                "/broken": { "get": { "summary": "no description" } }
            }
        });
        let err = EndpointImporter::import(
            &document,
            "swagger.json",
            &settings(ResourceCategory::Container),
        )
        .unwrap_err();
        let display = err.to_string();
        assert!(display.contains("/broken"));
        assert!(display.contains("no description"));
    }

    #[test]
    fn test_path_without_operation_is_import_error() {
        let document = json!({ "paths": { "/empty": { "parameters": [] } } });
        let err = EndpointImporter::import(
            &document,
            "swagger.json",
            &settings(ResourceCategory::Container),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no operation declared"));
    }

    #[test]
    fn test_network_target_is_rejected() {
        let err = EndpointImporter::import(
            &two_paths(),
            "swagger.json",
            &settings(ResourceCategory::Network),
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot be imported as networks"));
    }
}
