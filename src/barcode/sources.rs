use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ProductInfo, ProductSource};
use crate::analysis::tokenizer::parse_ingredients_text;
use crate::api_connection::ApiConnectionError;

const OPEN_FOOD_FACTS_URL: &str = "https://world.openfoodfacts.org/api/v0/product";
const UPC_ITEM_DB_URL: &str = "https://api.upcitemdb.com/prod/trial/lookup";
const UNKNOWN_PRODUCT: &str = "Unknown Product";

fn first_non_empty(candidates: &[&Option<String>]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
pub struct OpenFoodFactsResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub product: Option<OpenFoodFactsProduct>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenFoodFactsProduct {
    pub product_name: Option<String>,
    pub product_name_en: Option<String>,
    pub brands: Option<String>,
    pub ingredients_text: Option<String>,
    pub ingredients_text_en: Option<String>,
    pub allergens: Option<String>,
    pub image_front_url: Option<String>,
    pub image_url: Option<String>,
    pub categories: Option<String>,
}

impl OpenFoodFactsResponse {
    pub fn into_product(self) -> Option<ProductInfo> {
        if self.status != 1 {
            return None;
        }
        let product = self.product?;
        let ingredients =
            first_non_empty(&[&product.ingredients_text, &product.ingredients_text_en]).unwrap_or_default();
        Some(ProductInfo {
            name: first_non_empty(&[&product.product_name, &product.product_name_en])
                .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            brand: product.brands.unwrap_or_default(),
            ingredients_list: parse_ingredients_text(&ingredients),
            ingredients,
            allergens: product.allergens.unwrap_or_default(),
            image_url: first_non_empty(&[&product.image_front_url, &product.image_url]).unwrap_or_default(),
            categories: product.categories.unwrap_or_default(),
            source: "OpenFoodFacts".to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpcItemDbResponse {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub items: Vec<UpcItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpcItem {
    pub title: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: Option<String>,
}

impl UpcItemDbResponse {
    /// UPCItemDB has no ingredient field; the free-text description is the best
    /// available stand-in.
    pub fn into_product(self) -> Option<ProductInfo> {
        if self.code != "OK" {
            return None;
        }
        let item = self.items.into_iter().next()?;
        let ingredients = item.description.unwrap_or_default();
        Some(ProductInfo {
            name: first_non_empty(&[&item.title]).unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            brand: item.brand.unwrap_or_default(),
            ingredients_list: parse_ingredients_text(&ingredients),
            ingredients,
            allergens: String::new(),
            image_url: item.images.into_iter().next().unwrap_or_default(),
            categories: item.category.unwrap_or_default(),
            source: "UPCItemDB".to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct OpenFoodFacts {
    client: Client,
}

impl OpenFoodFacts {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductSource for OpenFoodFacts {
    async fn lookup(&self, barcode: &str) -> Result<Option<ProductInfo>, ApiConnectionError> {
        let response = self
            .client
            .get(format!("{}/{}.json", OPEN_FOOD_FACTS_URL, barcode))
            .send()
            .await?;
        let body: OpenFoodFactsResponse = response.json().await?;
        Ok(body.into_product())
    }

    fn name(&self) -> &str {
        "OpenFoodFacts"
    }
}

#[derive(Debug, Clone)]
pub struct UpcItemDb {
    client: Client,
}

impl UpcItemDb {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductSource for UpcItemDb {
    async fn lookup(&self, barcode: &str) -> Result<Option<ProductInfo>, ApiConnectionError> {
        let response = self
            .client
            .get(UPC_ITEM_DB_URL)
            .query(&[("upc", barcode)])
            .send()
            .await?;
        let body: UpcItemDbResponse = response.json().await?;
        Ok(body.into_product())
    }

    fn name(&self) -> &str {
        "UPCItemDB"
    }
}
