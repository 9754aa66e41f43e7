use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::sanitize_inline_text;

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
    /// A category identifier was listed more than once in an ordering.
    #[error("category {0} appears more than once in the requested order")]
    DuplicateIdentifier(i32),
}

/// Payload submitted when adding a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self, hub_id: i32) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(NewCategory::new(hub_id, sanitized_name))
    }
}

/// Payload submitted when renaming an existing category.
#[derive(Debug, Deserialize, Validate)]
pub struct RenameCategoryForm {
    /// Identifier of the category to rename.
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// New name submitted by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
}

impl RenameCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<UpdateCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        Ok(UpdateCategory::new(sanitized_name))
    }
}

/// Payload submitted when persisting a new category order.
#[derive(Debug, Deserialize)]
pub struct ReorderCategoriesForm {
    /// Every category identifier of the hub in the desired order.
    #[serde(default)]
    pub category_ids: Vec<i32>,
}

impl ReorderCategoriesForm {
    /// Returns the requested order, rejecting repeated identifiers.
    pub fn into_ordered_ids(self) -> CategoryFormResult<Vec<i32>> {
        let mut seen = HashSet::with_capacity(self.category_ids.len());

        for category_id in &self.category_ids {
            if !seen.insert(*category_id) {
                return Err(CategoryFormError::DuplicateIdentifier(*category_id));
            }
        }

        Ok(self.category_ids)
    }
}
