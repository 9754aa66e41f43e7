use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::variation::{
    NewVariation as DomainNewVariation, VariantOptions, Variation as DomainVariation,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_variations)]
#[diesel(belongs_to(super::product::Product, foreign_key = product_id))]
pub struct ProductVariation {
    pub id: i32,
    pub product_id: i32,
    pub sku: Option<String>,
    /// JSON object mapping variable names to values.
    pub options: String,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_variations)]
pub struct NewProductVariation<'a> {
    pub product_id: i32,
    pub sku: Option<&'a str>,
    pub options: String,
    pub price_cents: Option<i64>,
    pub image_url: Option<&'a str>,
    pub stock_quantity: i32,
    pub is_active: bool,
}

impl<'a> NewProductVariation<'a> {
    pub fn new(product_id: i32, value: &'a DomainNewVariation) -> Self {
        let options = serde_json::to_string(&value.options).unwrap_or_else(|err| {
            log::warn!("Failed to encode variation options for product {product_id}: {err}");
            String::from("{}")
        });

        Self {
            product_id,
            sku: value.sku.as_deref(),
            options,
            price_cents: value.price_cents,
            image_url: value.image_url.as_deref(),
            stock_quantity: value.stock_quantity,
            is_active: value.is_active,
        }
    }
}

impl From<ProductVariation> for DomainVariation {
    fn from(value: ProductVariation) -> Self {
        let options = serde_json::from_str::<VariantOptions>(&value.options).unwrap_or_else(|err| {
            log::warn!("Variation {} has unreadable options: {err}", value.id);
            VariantOptions::default()
        });

        Self {
            id: value.id,
            product_id: value.product_id,
            sku: value.sku,
            options,
            price_cents: value.price_cents,
            image_url: value.image_url,
            stock_quantity: value.stock_quantity,
            is_active: value.is_active,
            created_at: value.created_at,
        }
    }
}
