//! Handler functions for product catalog API endpoints.
//!
//! These functions parse product requests, delegate to the product service,
//! and shape the JSON responses including pagination metadata.

use axum::extract::rejection::JsonRejection;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::common::{PaginationFilter, PaginationMeta, json_or_default};
use crate::auth::middleware::CurrentUser;
use crate::database::models::ProductId;
use crate::errors::ServiceError;
use crate::services::product_service::{
    DeletedProductView, ProductPayload, ProductService, ProductView,
};
use crate::state::AppState;

/// Filter values echoed back on list responses.
#[derive(Debug, Serialize)]
pub struct FiltersEcho {
    pub keyword: Option<String>,
    pub sort: String,
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub message: &'static str,
    pub products: Vec<ProductView>,
    pub pagination: PaginationMeta,
    pub filters: FiltersEcho,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: &'static str,
    pub product: ProductView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedProductResponse {
    pub message: &'static str,
    pub deleted_product: DeletedProductView,
}

/// Lists products with pagination, sorting, and keyword search.
#[axum::debug_handler]
pub async fn list_products(
    Extension(state): Extension<AppState>,
    Query(filter): Query<PaginationFilter>,
) -> Result<Json<ProductListResponse>, ServiceError> {
    let (products, total) = ProductService::new(state.products.as_ref())
        .list(&filter.to_product_query())
        .await?;

    Ok(Json(ProductListResponse {
        message: "Products retrieved successfully",
        products: products.iter().map(ProductView::from).collect(),
        pagination: PaginationMeta::from_filter(&filter, total),
        filters: FiltersEcho {
            keyword: filter.keyword().map(str::to_string),
            sort: filter.sort_echo().to_string(),
        },
    }))
}

/// Creates a product owned by the authenticated user.
#[axum::debug_handler]
pub async fn create_product(
    Extension(state): Extension<AppState>,
    Extension(current): Extension<CurrentUser>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), ServiceError> {
    let payload = json_or_default(payload);
    let product = ProductService::new(state.products.as_ref())
        .create(&current.user.id, &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            message: "Product created successfully",
            product: ProductView::from(&product),
        }),
    ))
}

/// Retrieves a product by its public ID.
#[axum::debug_handler]
pub async fn get_product(
    Extension(state): Extension<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>, ServiceError> {
    let product = ProductService::new(state.products.as_ref()).get(&id).await?;

    Ok(Json(ProductResponse {
        message: "Product retrieved successfully",
        product: ProductView::from(&product),
    }))
}

/// Applies a partial update to a product.
#[axum::debug_handler]
pub async fn update_product(
    Extension(state): Extension<AppState>,
    Path(id): Path<ProductId>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<Json<ProductResponse>, ServiceError> {
    let payload = json_or_default(payload);
    let product = ProductService::new(state.products.as_ref())
        .update(&id, &payload)
        .await?;

    Ok(Json(ProductResponse {
        message: "Product updated successfully",
        product: ProductView::from(&product),
    }))
}

/// Deletes a product, echoing what was removed.
#[axum::debug_handler]
pub async fn delete_product(
    Extension(state): Extension<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<DeletedProductResponse>, ServiceError> {
    let product = ProductService::new(state.products.as_ref())
        .delete(&id)
        .await?;

    Ok(Json(DeletedProductResponse {
        message: "Product deleted successfully",
        deleted_product: DeletedProductView::from(&product),
    }))
}
