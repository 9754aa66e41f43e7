//! Product variations and the combination generator used to seed them.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping from variable name to the chosen value.
///
/// Keys keep their insertion order, both in memory and when serialised as a
/// JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantOptions(Vec<(String, String)>);

impl VariantOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for VariantOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = VariantOptions::new();
        for (name, value) in iter {
            options.insert(name, value);
        }
        options
    }
}

impl Serialize for VariantOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VariantOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = VariantOptions;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of variable names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut options = VariantOptions::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    options.insert(name, value);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

/// A variable name with its ordered values, as fed to [`generate_combinations`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VariableInput {
    pub name: String,
    pub values: Vec<String>,
}

impl VariableInput {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

/// Cartesian product of every variable's values.
///
/// Combinations come out in odometer order: the last variable varies fastest
/// and each combination lists the variables in input order. An empty input
/// yields no combinations, and so does any variable without values.
pub fn generate_combinations(variables: &[VariableInput]) -> Vec<VariantOptions> {
    if variables.is_empty() {
        return Vec::new();
    }

    let mut combinations = vec![VariantOptions::new()];
    for variable in variables {
        let mut next = Vec::with_capacity(combinations.len() * variable.values.len());
        for combination in &combinations {
            for value in &variable.values {
                let mut extended = combination.clone();
                extended.insert(variable.name.as_str(), value.as_str());
                next.push(extended);
            }
        }
        combinations = next;
    }

    combinations
}

/// One purchasable combination of variable values for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Variation {
    pub id: i32,
    pub product_id: i32,
    pub sku: Option<String>,
    /// Chosen value for each variable.
    pub options: VariantOptions,
    /// Price override in the smallest currency unit.
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Payload for one variation written by a replace-all save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVariation {
    pub sku: Option<String>,
    pub options: VariantOptions,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
    pub is_active: bool,
}

impl NewVariation {
    /// Active variation with no stock and no overrides.
    pub fn new(options: VariantOptions) -> Self {
        Self {
            sku: None,
            options,
            price_cents: None,
            image_url: None,
            stock_quantity: 0,
            is_active: true,
        }
    }

    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn with_price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn with_stock_quantity(mut self, stock_quantity: i32) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }
}
