//! Product catalog business logic service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::models::{NewProduct, Product, ProductChanges, ProductId};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::{ProductListQuery, ProductStore};
use crate::validation::{self, ProductFields};

/// Image applied when a product is created without one.
pub const DEFAULT_IMAGE: &str = "https://via.placeholder.com/300x200";

/// Create/update payload. `price` stays raw JSON because clients send both
/// numbers and numeric strings.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Value>,
    pub image: Option<String>,
}

impl ProductPayload {
    fn fields(&self) -> ProductFields<'_> {
        ProductFields {
            title: self.title.as_deref(),
            description: self.description.as_deref(),
            price: self.price.as_ref(),
        }
    }
}

/// Client-facing product shape. The internal row id never appears here; the
/// public UUID serializes as `id`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        ProductView {
            id: product.public_id.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            created_by: product.created_by.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Reduced shape echoed back after a delete.
#[derive(Debug, Serialize)]
pub struct DeletedProductView {
    pub id: ProductId,
    pub title: String,
}

impl From<&Product> for DeletedProductView {
    fn from(product: &Product) -> Self {
        DeletedProductView {
            id: product.public_id.clone(),
            title: product.title.clone(),
        }
    }
}

pub struct ProductService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> ProductService<'a> {
    pub fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Creates a product owned by `created_by`.
    pub async fn create(&self, created_by: &str, payload: &ProductPayload) -> ServiceResult<Product> {
        let errors = validation::validate_product(&payload.fields());
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let price = payload
            .price
            .as_ref()
            .and_then(validation::parse_price)
            .ok_or_else(|| ServiceError::internal("validated price failed to parse"))?;

        let product = self
            .products
            .insert(NewProduct {
                public_id: ProductId::generate(),
                title: payload.title.as_deref().unwrap_or_default().trim().to_string(),
                description: payload
                    .description
                    .as_deref()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                price,
                image: payload
                    .image
                    .clone()
                    .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
                created_by: created_by.to_string(),
            })
            .await?;

        Ok(product)
    }

    pub async fn get(&self, id: &ProductId) -> ServiceResult<Product> {
        self.products
            .find_by_public_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id.as_str()))
    }

    /// Applies the supplied fields. An empty payload is a no-op read so the
    /// stored `updated_at` only moves on real changes.
    pub async fn update(&self, id: &ProductId, payload: &ProductPayload) -> ServiceResult<Product> {
        let errors = validation::validate_product_changes(&payload.fields());
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let changes = ProductChanges {
            title: payload.title.as_deref().map(|t| t.trim().to_string()),
            description: payload.description.as_deref().map(|d| d.trim().to_string()),
            price: payload.price.as_ref().and_then(validation::parse_price),
            image: payload.image.clone(),
        };

        if changes.is_empty() {
            return self.get(id).await;
        }

        self.products
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id.as_str()))
    }

    pub async fn delete(&self, id: &ProductId) -> ServiceResult<Product> {
        self.products
            .delete(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Product", id.as_str()))
    }

    pub async fn list(&self, query: &ProductListQuery) -> ServiceResult<(Vec<Product>, u64)> {
        Ok(self.products.list(query).await?)
    }
}
