use crate::{
    domain::TemplateSource,
    errors::CatalogError,
    models::{CatalogRecord, FileExtension, Template},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing;

pub const DEFAULT_CATALOG_URL: &str = "https://api.memegen.link/templates";

const OPRAH_ID: &str = "oprah";
const OPRAH_DISPLAY_NAME: &str = "Oprah You Get A...";

/// Catalog service client for the memegen template listing.
#[derive(Debug, Clone)]
pub struct MemegenCatalog {
    client: Client,
    catalog_url: String,
}

impl MemegenCatalog {
    pub fn new(catalog_url: String, timeout: Duration) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;
        tracing::info!(%catalog_url, "Initializing MemegenCatalog");
        Ok(Self { client, catalog_url })
    }
}

#[async_trait]
impl TemplateSource for MemegenCatalog {
    async fn fetch_templates(&self) -> Result<Vec<Template>, CatalogError> {
        tracing::debug!(url = %self.catalog_url, "Catalog: Fetching templates");

        let response = self
            .client
            .get(&self.catalog_url)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable {
                message: format!("HTTP request failed: {}", e),
                status: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.catalog_url, %status, "Catalog: Non-success response");
            return Err(CatalogError::Unavailable {
                message: format!("Catalog service responded with {}", status),
                status: Some(status.as_u16()),
            });
        }

        let records: Vec<CatalogRecord> = response.json().await.map_err(|e| CatalogError::Unavailable {
            message: format!("Failed to parse catalog response: {}", e),
            status: Some(status.as_u16()),
        })?;

        let received = records.len();
        let templates = normalize_templates(records);
        tracing::info!(received, kept = templates.len(), "Catalog: Loaded two-line templates");
        Ok(templates)
    }
}

/// Keeps two-line records, derives extensions, applies the display-name
/// override and sorts by display name.
pub fn normalize_templates(records: Vec<CatalogRecord>) -> Vec<Template> {
    let mut templates: Vec<Template> = records
        .into_iter()
        .filter(|record| record.lines == 2)
        .map(|record| {
            let file_extension = if record.styles.iter().any(|style| style == "animated") {
                FileExtension::Gif
            } else {
                FileExtension::Jpg
            };
            let display_name = if record.id == OPRAH_ID {
                OPRAH_DISPLAY_NAME.to_string()
            } else {
                record.name
            };
            Template::new(record.id, display_name, file_extension)
        })
        .collect();
    // Stable, so equal names keep catalog order.
    templates.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    templates
}

/// Read-only snapshot of the templates, shared by every interaction.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Expects templates already sorted by display name, as `TemplateSource` returns them.
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn find(&self, selector_value: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.selector_value == selector_value)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
