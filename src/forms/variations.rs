use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::variable::{NewVariable, NewVariableValue};
use crate::domain::variation::{NewVariation, VariableInput, VariantOptions};
use crate::forms::{sanitize_inline_text, sanitize_optional_text};

/// Maximum allowed length for variable names and values.
const LABEL_MAX_LEN: usize = 64;
const LABEL_MAX_LEN_VALIDATOR: u64 = LABEL_MAX_LEN as u64;

/// Maximum allowed length for a variation SKU.
const SKU_MAX_LEN: usize = 64;
const SKU_MAX_LEN_VALIDATOR: u64 = SKU_MAX_LEN as u64;

/// Maximum allowed length for an image URL.
const IMAGE_URL_MAX_LEN: usize = 2048;
const IMAGE_URL_MAX_LEN_VALIDATOR: u64 = IMAGE_URL_MAX_LEN as u64;

/// Result type returned by the variation form helpers.
pub type VariationFormResult<T> = Result<T, VariationFormError>;

/// Errors that can occur while processing variable and variation forms.
#[derive(Debug, Error)]
pub enum VariationFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// A variable value is longer than [`LABEL_MAX_LEN`] characters.
    #[error("value {index} of variable `{variable}` is too long")]
    ValueTooLong { variable: String, index: usize },
}

/// One variable row of the product editor.
#[derive(Debug, Deserialize, Validate)]
pub struct VariableForm {
    #[validate(length(max = LABEL_MAX_LEN_VALIDATOR))]
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Payload submitted when saving the variables of a product.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveVariablesForm {
    #[validate(nested)]
    #[serde(default)]
    pub variables: Vec<VariableForm>,
}

impl SaveVariablesForm {
    /// Converts the editor rows into replace-all payloads.
    ///
    /// Blank values are skipped and variables with a blank name or no
    /// remaining values are dropped. Display orders are the positions in the
    /// submitted lists. Values are limited to [`LABEL_MAX_LEN`] characters
    /// once sanitized.
    pub fn into_new_variables(self) -> VariationFormResult<Vec<NewVariable>> {
        self.validate()?;

        let mut variables = Vec::with_capacity(self.variables.len());

        for (position, row) in self.variables.into_iter().enumerate() {
            let name = sanitize_inline_text(&row.name);
            if name.is_empty() {
                continue;
            }

            let mut values = Vec::with_capacity(row.values.len());
            for (index, value) in row.values.iter().enumerate() {
                let value = sanitize_inline_text(value);
                if value.is_empty() {
                    continue;
                }
                if value.chars().count() > LABEL_MAX_LEN {
                    return Err(VariationFormError::ValueTooLong {
                        variable: name,
                        index,
                    });
                }
                values.push(NewVariableValue::new(value, index as i32));
            }

            if values.is_empty() {
                continue;
            }

            variables.push(NewVariable {
                name,
                display_order: position as i32,
                values,
            });
        }

        Ok(variables)
    }

    /// Converts the editor rows into generator input using the same filtering
    /// as [`SaveVariablesForm::into_new_variables`].
    pub fn into_variable_inputs(self) -> VariationFormResult<Vec<VariableInput>> {
        Ok(self
            .into_new_variables()?
            .into_iter()
            .map(|variable| {
                VariableInput::new(
                    variable.name,
                    variable.values.into_iter().map(|value| value.value),
                )
            })
            .collect())
    }
}

/// One variation row of the product editor.
#[derive(Debug, Deserialize, Validate)]
pub struct VariationForm {
    #[validate(length(max = SKU_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub options: VariantOptions,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[validate(length(max = IMAGE_URL_MAX_LEN_VALIDATOR))]
    #[serde(default)]
    pub image_url: Option<String>,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock_quantity: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Payload submitted when saving the variations of a product.
#[derive(Debug, Deserialize, Validate)]
pub struct SaveVariationsForm {
    #[validate(nested)]
    #[serde(default)]
    pub variations: Vec<VariationForm>,
}

impl SaveVariationsForm {
    /// Converts the editor rows into replace-all payloads, defaulting missing
    /// stock to zero and missing activity to active.
    pub fn into_new_variations(self) -> VariationFormResult<Vec<NewVariation>> {
        self.validate()?;

        Ok(self
            .variations
            .into_iter()
            .map(|row| NewVariation {
                sku: sanitize_optional_text(row.sku.as_deref()),
                options: row.options,
                price_cents: row.price_cents,
                image_url: row
                    .image_url
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty()),
                stock_quantity: row.stock_quantity.unwrap_or(0),
                is_active: row.is_active.unwrap_or(true),
            })
            .collect())
    }
}
