use anyhow::Context;

use shopfront_storefront::{
    CatalogQuery, CatalogSource, DiscoveryController, InMemoryCatalog, StorefrontConfig, ViewState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("invalid storefront configuration")?;
    shopfront_observability::tracing::init(config.log_format);

    let query = std::env::args()
        .nth(1)
        .map(CatalogQuery::search)
        .unwrap_or_default();

    let source = catalog_source(&config)?;
    let mut controller =
        DiscoveryController::from_config(&config).context("invalid page size")?;
    controller.load(source.as_ref(), query).await;

    let rendered = controller.render();
    println!("{}", serde_json::to_string_pretty(&rendered)?);

    if let ViewState::Error(message) = controller.state() {
        anyhow::bail!("catalog fetch failed: {message}");
    }
    Ok(())
}

fn catalog_source(config: &StorefrontConfig) -> anyhow::Result<Box<dyn CatalogSource>> {
    #[cfg(feature = "http")]
    {
        if let Some(catalog) = shopfront_storefront::HttpCatalog::from_config(config) {
            tracing::info!(base_url = catalog.base_url(), "using REST catalog");
            return Ok(Box::new(catalog));
        }
    }

    if config.api_url.is_some() {
        tracing::warn!("SHOPFRONT_API_URL is set but the `http` feature is disabled; using demo catalog");
    } else {
        tracing::info!("SHOPFRONT_API_URL not set; using demo catalog");
    }
    let demo = InMemoryCatalog::demo().context("bundled demo catalog is malformed")?;
    Ok(Box::new(demo))
}
