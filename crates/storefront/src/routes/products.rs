//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query};
use techmart_core::ProductId;
use techmart_core::view::ProductDetail;
use tracing::instrument;

use super::NoticeQuery;
use crate::error::{AppError, Result};
use crate::middleware::{Chrome, Shop};

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub chrome: Chrome,
    pub product: ProductDetail,
}

/// Display a product's detail page.
#[instrument(skip(shop))]
pub async fn show(
    shop: Shop,
    Path(id): Path<String>,
    Query(query): Query<NoticeQuery>,
) -> Result<ProductTemplate> {
    let not_found = || AppError::NotFound(format!("product {id}"));
    let product_id: ProductId = id.parse().map_err(|_| not_found())?;
    let product = shop
        .controller()
        .product_detail(product_id)
        .map_err(|_| not_found())?;

    Ok(ProductTemplate {
        chrome: shop.chrome(query.notice),
        product,
    })
}
