use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;
use crate::forms::{sanitize_inline_text, sanitize_optional_text};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a SKU.
const SKU_MAX_LEN: usize = 64;
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;

/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: usize = 2048;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// A referenced identifier is not a positive integer.
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: i32 },
}

/// Payload submitted when adding a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional SKU supplied by the user.
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub sku: Option<String>,
    /// Optional longer description.
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub description: Option<String>,
    /// Category to file the product under.
    #[serde(default)]
    pub category_id: Option<i32>,
    /// Tags to attach to the product.
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self, hub_id: i32) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let tag_ids = normalize_tag_ids(self.tag_ids)?;

        let mut product = NewProduct::new(hub_id, sanitized_name).with_tag_ids(tag_ids);
        if let Some(sku) = sanitize_optional_text(self.sku.as_deref()) {
            product = product.with_sku(sku);
        }
        if let Some(description) = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            product = product.with_description(description);
        }
        if let Some(category_id) = self.category_id {
            if category_id <= 0 {
                return Err(ProductFormError::InvalidIdentifier {
                    field: "category",
                    value: category_id,
                });
            }
            product = product.with_category_id(category_id);
        }

        Ok(product)
    }
}

/// Payload submitted when replacing the tags of a product.
#[derive(Debug, Deserialize)]
pub struct AssignProductTagsForm {
    /// Identifiers of the tags the product should carry.
    #[serde(default)]
    pub tag_ids: Vec<i32>,
}

impl AssignProductTagsForm {
    /// Returns the sorted, de-duplicated tag identifiers.
    pub fn into_tag_ids(self) -> ProductFormResult<Vec<i32>> {
        normalize_tag_ids(self.tag_ids)
    }
}

fn normalize_tag_ids(tag_ids: Vec<i32>) -> ProductFormResult<Vec<i32>> {
    if let Some(invalid) = tag_ids.iter().find(|tag_id| **tag_id <= 0) {
        return Err(ProductFormError::InvalidIdentifier {
            field: "tag",
            value: *invalid,
        });
    }

    let mut normalized = tag_ids;
    normalized.sort_unstable();
    normalized.dedup();
    Ok(normalized)
}
