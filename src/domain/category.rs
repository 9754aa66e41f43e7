use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::slug::slugify;

/// Domain representation of an ordered product category belonging to a hub.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Category {
    /// Unique identifier of the category.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name, unique within the hub regardless of case.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Explicit position used to order categories inside the hub.
    pub sort_order: i32,
    /// Timestamp for when the category record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the category record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new category for a hub.
///
/// The sort position is not part of the payload: the repository appends new
/// categories after every existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the category.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Timestamp captured when the category payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewCategory {
    /// Build a new category payload, deriving the slug from `name`.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            hub_id,
            slug: slugify(&name),
            name,
            updated_at: Local::now().naive_utc(),
        }
    }
}

/// Patch data applied when renaming an existing category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCategory {
    /// New name for the category.
    pub name: String,
    /// Slug recomputed from the new name.
    pub slug: String,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateCategory {
    /// Build a rename patch, deriving the slug from `name`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            updated_at: Local::now().naive_utc(),
        }
    }
}
