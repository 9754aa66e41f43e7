use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::variable::{Variable as DomainVariable, VariableValue as DomainVariableValue};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_variables)]
#[diesel(belongs_to(super::product::Product, foreign_key = product_id))]
pub struct ProductVariable {
    pub id: i32,
    pub product_id: i32,
    pub name: String,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::product_variable_values)]
#[diesel(belongs_to(ProductVariable, foreign_key = variable_id))]
pub struct ProductVariableValue {
    pub id: i32,
    pub variable_id: i32,
    pub value: String,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_variables)]
pub struct NewProductVariable<'a> {
    pub product_id: i32,
    pub name: &'a str,
    pub display_order: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_variable_values)]
pub struct NewProductVariableValue<'a> {
    pub variable_id: i32,
    pub value: &'a str,
    pub display_order: i32,
}

impl ProductVariable {
    pub fn into_domain(self, values: Vec<ProductVariableValue>) -> DomainVariable {
        DomainVariable {
            id: self.id,
            product_id: self.product_id,
            name: self.name,
            display_order: self.display_order,
            created_at: self.created_at,
            values: values.into_iter().map(DomainVariableValue::from).collect(),
        }
    }
}

impl From<ProductVariableValue> for DomainVariableValue {
    fn from(value: ProductVariableValue) -> Self {
        Self {
            id: value.id,
            variable_id: value.variable_id,
            value: value.value,
            display_order: value.display_order,
            created_at: value.created_at,
        }
    }
}
