use std::cell::RefCell;
use tmac::prelude::*;

/// Mock ThreatModelReader serving in-memory documents
///
/// Records which documents were requested so tests can check that loading
/// stops at the first failure.
pub struct MockThreatModelReader {
    model: ModelDescription,
    catalog: ResourceCatalog,
    defaults: ResourceDefaults,
    rules: Vec<SecurityRule>,
    endpoints: Option<serde_json::Value>,
    fail_on: Option<&'static str>,
    pub requested: RefCell<Vec<&'static str>>,
}

impl MockThreatModelReader {
    pub fn new(
        model: ModelDescription,
        catalog: ResourceCatalog,
        defaults: ResourceDefaults,
        rules: Vec<SecurityRule>,
    ) -> Self {
        Self {
            model,
            catalog,
            defaults,
            rules,
            endpoints: None,
            fail_on: None,
            requested: RefCell::new(Vec::new()),
        }
    }

    pub fn with_endpoints(mut self, document: serde_json::Value) -> Self {
        self.endpoints = Some(document);
        self
    }

    /// Makes reading the named document fail
    /// ("config", "resources", "defaults", "security_checks" or "endpoints")
    pub fn failing_on(mut self, document: &'static str) -> Self {
        self.fail_on = Some(document);
        self
    }

    fn request(&self, document: &'static str) -> Result<()> {
        self.requested.borrow_mut().push(document);
        if self.fail_on == Some(document) {
            anyhow::bail!("mock read failure: {}", document);
        }
        Ok(())
    }
}

impl ThreatModelReader for MockThreatModelReader {
    fn read_model_description(&self, _source: &InputSource) -> Result<ModelDescription> {
        self.request("config")?;
        Ok(self.model.clone())
    }

    fn read_catalog(&self, _source: &InputSource) -> Result<ResourceCatalog> {
        self.request("resources")?;
        Ok(self.catalog.clone())
    }

    fn read_defaults(&self, _source: &InputSource) -> Result<ResourceDefaults> {
        self.request("defaults")?;
        Ok(self.defaults.clone())
    }

    fn read_security_rules(&self, _source: &InputSource) -> Result<Vec<SecurityRule>> {
        self.request("security_checks")?;
        Ok(self.rules.clone())
    }

    fn read_endpoint_document(&self, _source: &InputSource) -> Result<serde_json::Value> {
        self.request("endpoints")?;
        self.endpoints
            .clone()
            .ok_or_else(|| anyhow::anyhow!("no endpoint document configured"))
    }
}
