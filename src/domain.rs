use crate::errors::CatalogError;
use crate::models::Template;
use async_trait::async_trait;

/// Source of the two-line templates the bot offers.
#[async_trait]
pub trait TemplateSource: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Fetches the current template list, filtered and sorted by display name.
    /// Fails as a whole; never returns a partial catalog.
    async fn fetch_templates(&self) -> Result<Vec<Template>, CatalogError>;
}
