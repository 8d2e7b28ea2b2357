use crate::{
    AppState,
    bot::Bot,
    catalog::{MemegenCatalog, TemplateCatalog},
    commands::{CommandRegistry, EXIT_KEYWORD, MAKE_MEME_CALLBACK},
    config::Config,
    domain::TemplateSource,
    errors::AppError,
    url_builder::ArtifactUrlBuilder,
    workflow::Workflow,
};
use backoff::{ExponentialBackoff, future::retry};
use std::{sync::Arc, time::Duration};
use tracing;

/// Fetches the catalog once, retrying transient failures until `max_elapsed` runs out.
pub async fn load_catalog(source: &dyn TemplateSource, max_elapsed: Duration) -> Result<TemplateCatalog, AppError> {
    let policy = ExponentialBackoff {
        max_elapsed_time: Some(max_elapsed),
        ..ExponentialBackoff::default()
    };
    load_catalog_with(source, policy).await
}

async fn load_catalog_with(source: &dyn TemplateSource, policy: ExponentialBackoff) -> Result<TemplateCatalog, AppError> {
    tracing::info!("Startup: Loading template catalog...");
    let templates = retry(policy, move || async move {
        source.fetch_templates().await.map_err(|e| {
            if e.is_retryable() {
                tracing::warn!(error = %e, "Startup: Catalog fetch failed, will retry");
                backoff::Error::transient(e)
            } else {
                backoff::Error::permanent(e)
            }
        })
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Startup: Giving up on template catalog");
        AppError::from(e)
    })?;

    if templates.is_empty() {
        tracing::warn!("Startup: Catalog has no two-line templates, the form will offer no choices");
    }
    tracing::info!(templates = templates.len(), "Startup: Template catalog ready.");
    Ok(TemplateCatalog::new(templates))
}

/// Wires the catalog, workflow and command registry into the shared state.
pub async fn init_state(config: &Config) -> Result<Arc<AppState>, AppError> {
    let source = MemegenCatalog::new(config.catalog_url.clone(), config.http_timeout)?;
    let catalog = Arc::new(load_catalog(&source, config.catalog_max_retry).await?);

    let workflow = Workflow::new(
        catalog,
        ArtifactUrlBuilder::new(&config.renderer_url),
        MAKE_MEME_CALLBACK,
        EXIT_KEYWORD,
        &config.templates_page_url,
    );

    Ok(Arc::new(AppState {
        bot: Bot::new(CommandRegistry::default(), workflow),
        app_version: config.app_version.clone(),
    }))
}
