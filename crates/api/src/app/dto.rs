use serde::Deserialize;

use catalog_products::{CreateProduct, ProductId};

use crate::app::errors::{self, ErrorStatus};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(body: CreateProductRequest) -> Self {
        CreateProduct::new(body.name, body.price)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateProductsRequest {
    pub ids: Vec<ProductId>,
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>()
        .map_err(|e| errors::json_error(ErrorStatus::BadRequest, e.to_string()))
}
