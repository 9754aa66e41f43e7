use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A named axis of variation for one product, such as "Color".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variable {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    /// Position of the variable in the product editor.
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    /// Values in display order.
    pub values: Vec<VariableValue>,
}

/// One discrete setting of a [`Variable`], such as "Red".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableValue {
    pub id: i32,
    pub variable_id: i32,
    pub value: String,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

/// Payload for one variable written by a replace-all save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariable {
    pub name: String,
    pub display_order: i32,
    pub values: Vec<NewVariableValue>,
}

/// Payload for one value of a [`NewVariable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariableValue {
    pub value: String,
    pub display_order: i32,
}

impl NewVariableValue {
    pub fn new(value: impl Into<String>, display_order: i32) -> Self {
        Self {
            value: value.into(),
            display_order,
        }
    }
}

impl NewVariable {
    pub fn new(name: impl Into<String>, display_order: i32) -> Self {
        Self {
            name: name.into(),
            display_order,
            values: Vec::new(),
        }
    }

    /// Append a value to the variable payload.
    pub fn with_value(mut self, value: impl Into<String>, display_order: i32) -> Self {
        self.values.push(NewVariableValue::new(value, display_order));
        self
    }
}
