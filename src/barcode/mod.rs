//! Barcode resolution: an ordered list of product databases, first hit wins.

pub mod sources;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::api_connection::ApiConnectionError;
use crate::error::{EngineError, Result};
pub use sources::{OpenFoodFacts, UpcItemDb};

pub const PRODUCT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

pub const NOT_FOUND_SUGGESTIONS: [&str; 3] = [
    "Try entering ingredients manually",
    "Check if the barcode is clear and readable",
    "This might be a local or new product not yet in databases",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub brand: String,
    /// Raw ingredient text as published by the source.
    pub ingredients: String,
    /// `ingredients` split with the analysis tokenizer.
    pub ingredients_list: Vec<String>,
    pub allergens: String,
    pub image_url: String,
    pub categories: String,
    pub source: String,
}

#[async_trait]
pub trait ProductSource: Send + Sync + fmt::Debug {
    /// `Ok(None)` means the source answered but does not know the product.
    async fn lookup(&self, barcode: &str) -> Result<Option<ProductInfo>, ApiConnectionError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct BarcodeResolver {
    sources: Vec<Arc<dyn ProductSource>>,
}

impl BarcodeResolver {
    pub fn new(sources: Vec<Arc<dyn ProductSource>>) -> Self {
        Self { sources }
    }

    /// OpenFoodFacts first, then UPCItemDB, each request bounded by
    /// [`PRODUCT_LOOKUP_TIMEOUT`].
    pub fn with_default_sources() -> Result<Self, ApiConnectionError> {
        Self::with_request_timeout(PRODUCT_LOOKUP_TIMEOUT)
    }

    pub fn with_request_timeout(timeout: Duration) -> Result<Self, ApiConnectionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::new(vec![
            Arc::new(OpenFoodFacts::new(client.clone())),
            Arc::new(UpcItemDb::new(client)),
        ]))
    }

    pub async fn resolve(&self, barcode: &str) -> Result<ProductInfo> {
        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(EngineError::InvalidInput("Barcode is required".to_string()));
        }

        for source in &self.sources {
            match source.lookup(barcode).await {
                Ok(Some(product)) => {
                    tracing::info!(
                        barcode,
                        product_name = %product.name,
                        source = source.name(),
                        "Product lookup successful"
                    );
                    return Ok(product);
                }
                Ok(None) => {
                    tracing::debug!(barcode, source = source.name(), "Product not listed");
                }
                Err(e) => {
                    tracing::warn!(barcode, source = source.name(), error = %e, "Product source failed");
                }
            }
        }

        Err(EngineError::ProductNotFound {
            barcode: barcode.to_string(),
            suggestions: NOT_FOUND_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed {
        name: &'static str,
        product: Option<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl ProductSource for Fixed {
        async fn lookup(&self, _barcode: &str) -> Result<Option<ProductInfo>, ApiConnectionError> {
            if self.fail {
                return Err(ApiConnectionError::EmptyResponse);
            }
            Ok(self.product.map(|name| ProductInfo {
                name: name.to_string(),
                source: self.name.to_string(),
                ..Default::default()
            }))
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn source(name: &'static str, product: Option<&'static str>, fail: bool) -> Arc<dyn ProductSource> {
        Arc::new(Fixed { name, product, fail })
    }

    #[tokio::test]
    async fn test_resolve_falls_back_in_order() {
        let resolver = BarcodeResolver::new(vec![
            source("broken", None, true),
            source("empty", None, false),
            source("second", Some("Granola"), false),
            source("third", Some("Other"), false),
        ]);
        let product = resolver.resolve("0123").await.unwrap();
        assert_eq!(product.name, "Granola");
        assert_eq!(product.source, "second");
    }

    #[tokio::test]
    async fn test_resolve_not_found_has_suggestions() {
        let resolver = BarcodeResolver::new(vec![source("empty", None, false)]);
        match resolver.resolve("0123").await {
            Err(EngineError::ProductNotFound { barcode, suggestions }) => {
                assert_eq!(barcode, "0123");
                assert_eq!(suggestions.len(), 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_default_sources_in_order() {
        let resolver = BarcodeResolver::with_default_sources().unwrap();
        let names: Vec<&str> = resolver.sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["OpenFoodFacts", "UPCItemDB"]);
    }

    #[tokio::test]
    async fn test_resolve_rejects_blank_barcode() {
        let resolver = BarcodeResolver::new(vec![]);
        assert!(matches!(resolver.resolve("  ").await, Err(EngineError::InvalidInput(_))));
    }
}
