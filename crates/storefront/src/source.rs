//! Catalog sources: where the discovery pipeline gets its unfiltered product list.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shopfront_catalog::{Category, ProductRecord};
use shopfront_core::CategoryId;

/// What a listing page asks the source for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CatalogQuery {
    /// Every product (home/shop-all page).
    #[default]
    All,
    /// Free-text search page.
    Search(String),
    /// Category listing page.
    Category(CategoryId),
}

impl CatalogQuery {
    /// Search query, with blank input collapsing to [`CatalogQuery::All`].
    pub fn search(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            CatalogQuery::All
        } else {
            CatalogQuery::Search(text.trim().to_string())
        }
    }
}

impl core::fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CatalogQuery::All => f.write_str("all"),
            CatalogQuery::Search(q) => write!(f, "search:{q}"),
            CatalogQuery::Category(id) => write!(f, "category:{id}"),
        }
    }
}

/// A catalog fetch that did not produce a product list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Supplier of unfiltered product lists.
///
/// Latency and failure are the source's concern; callers only see a list or a
/// [`FetchFailure`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All products, optionally narrowed by a free-text query.
    async fn fetch_products(&self, query: Option<&str>) -> Result<Vec<ProductRecord>, FetchFailure>;

    /// Products in one category.
    async fn fetch_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductRecord>, FetchFailure>;

    /// Dispatch a [`CatalogQuery`] to the matching call.
    async fn fetch(&self, query: &CatalogQuery) -> Result<Vec<ProductRecord>, FetchFailure> {
        match query {
            CatalogQuery::All => self.fetch_products(None).await,
            CatalogQuery::Search(q) => self.fetch_products(Some(q.as_str())).await,
            CatalogQuery::Category(id) => self.fetch_products_by_category(*id).await,
        }
    }
}

#[async_trait]
impl<S> CatalogSource for Arc<S>
where
    S: CatalogSource + ?Sized,
{
    async fn fetch_products(&self, query: Option<&str>) -> Result<Vec<ProductRecord>, FetchFailure> {
        (**self).fetch_products(query).await
    }

    async fn fetch_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductRecord>, FetchFailure> {
        (**self).fetch_products_by_category(category_id).await
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    categories: Vec<Category>,
    products: Vec<ProductRecord>,
}

const DEMO_CATALOG: &str = include_str!("../data/demo_catalog.json");

/// In-memory catalog backed by fixed arrays (dev/demo/tests).
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<ProductRecord>,
    categories: Vec<Category>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self {
            products,
            categories: Vec::new(),
        }
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Parse a `{ "categories": [...], "products": [...] }` document.
    ///
    /// Every product goes through record validation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let fixture: CatalogFixture = serde_json::from_str(json)?;
        Ok(Self {
            products: fixture.products,
            categories: fixture.categories,
        })
    }

    /// Small clothing catalog bundled with the crate.
    pub fn demo() -> Result<Self, serde_json::Error> {
        Self::from_json(DEMO_CATALOG)
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug.eq_ignore_ascii_case(slug))
    }

    fn search(&self, query: &str) -> Vec<ProductRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.clone();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name().to_lowercase().contains(&needle) || p.label().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_products(&self, query: Option<&str>) -> Result<Vec<ProductRecord>, FetchFailure> {
        Ok(match query {
            Some(q) => self.search(q),
            None => self.products.clone(),
        })
    }

    async fn fetch_products_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<ProductRecord>, FetchFailure> {
        Ok(self
            .products
            .iter()
            .filter(|p| p.category_id() == Some(category_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[ProductRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id_typed().get()).collect()
    }

    #[test]
    fn demo_catalog_parses() {
        let catalog = InMemoryCatalog::demo().unwrap();
        assert_eq!(catalog.products().len(), 16);
        assert_eq!(catalog.categories().len(), 4);
        assert_eq!(catalog.category_by_slug("Outerwear").unwrap().id, CategoryId::new(3));
    }

    #[test]
    fn blank_search_collapses_to_all() {
        assert_eq!(CatalogQuery::search("   "), CatalogQuery::All);
        assert_eq!(CatalogQuery::search(" tee "), CatalogQuery::Search("tee".to_string()));
    }

    #[tokio::test]
    async fn search_matches_name_or_label_case_insensitively() {
        let catalog = InMemoryCatalog::demo().unwrap();

        let by_name = catalog.fetch(&CatalogQuery::search("LINEN")).await.unwrap();
        assert_eq!(ids(&by_name), vec![1, 7]);

        let by_label = catalog.fetch(&CatalogQuery::search("fieldhouse")).await.unwrap();
        assert_eq!(ids(&by_label), vec![9, 12]);

        let none = catalog.fetch(&CatalogQuery::search("tuxedo")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn category_fetch_filters_by_category() {
        let catalog = InMemoryCatalog::demo().unwrap();
        let outerwear = catalog.fetch(&CatalogQuery::Category(CategoryId::new(3))).await.unwrap();
        assert_eq!(ids(&outerwear), vec![9, 10, 11, 12]);

        let unknown = catalog.fetch(&CatalogQuery::Category(CategoryId::new(99))).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn arc_wrapped_source_delegates() {
        let catalog: Arc<dyn CatalogSource> = Arc::new(InMemoryCatalog::demo().unwrap());
        let all = catalog.fetch(&CatalogQuery::All).await.unwrap();
        assert_eq!(all.len(), 16);
    }

    #[test]
    fn rejects_invalid_fixture_products() {
        let json = r#"{ "products": [ { "id": 1, "name": "Bad", "price": 10, "rating": 9.0,
            "label": "X", "created_at": "2024-01-01T00:00:00Z", "stock": 1 } ] }"#;
        assert!(InMemoryCatalog::from_json(json).is_err());
    }
}
