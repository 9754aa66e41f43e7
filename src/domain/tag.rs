use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::slug::slugify;

/// Domain representation of a reusable tag that can be attached to multiple products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name, unique within the hub regardless of case.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Timestamp for when the tag record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the tag record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new tag for a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the tag.
    pub name: String,
    /// URL-safe identifier derived from the name.
    pub slug: String,
}

impl NewTag {
    /// Construct a new tag payload with a trimmed name and derived slug.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        let name = name.into().trim().to_string();
        Self {
            hub_id,
            slug: slugify(&name),
            name,
        }
    }
}

/// Patch data applied when renaming an existing tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTag {
    /// Updated human-readable name of the tag.
    pub name: String,
    /// Slug recomputed from the new name.
    pub slug: String,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateTag {
    /// Build a rename patch stamped with `updated_at`.
    pub fn new(name: impl Into<String>, updated_at: NaiveDateTime) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
            updated_at,
        }
    }

    /// Build a rename patch stamped with the current time.
    pub fn now(name: impl Into<String>) -> Self {
        Self::new(name, Local::now().naive_utc())
    }
}
