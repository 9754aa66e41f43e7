//! Outcomes and dispositions shared by the category and tag namespaces.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A taxonomy entry annotated with the number of products referencing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UsageCount<T> {
    /// The category or tag itself.
    #[serde(flatten)]
    pub entry: T,
    /// Number of products currently referencing the entry.
    pub product_count: usize,
}

impl<T> UsageCount<T> {
    pub fn new(entry: T, product_count: usize) -> Self {
        Self {
            entry,
            product_count,
        }
    }
}

/// Result of renaming a taxonomy entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenameOutcome<T> {
    /// The entry after the rename.
    pub entry: T,
    /// Number of products whose reference was refreshed.
    pub products_updated: usize,
}

impl<T> RenameOutcome<T> {
    /// Outcome for a rename that did not change anything.
    pub fn unchanged(entry: T) -> Self {
        Self {
            entry,
            products_updated: 0,
        }
    }
}

/// Caller-selected handling of products still referencing a category being deleted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum CategoryDisposition {
    /// Leave the category and its products untouched.
    Cancel,
    /// Remove the category and clear the reference on every product.
    Delete,
    /// Move every product to `target_id`, then remove the category.
    Merge { target_id: i32 },
}

/// Caller-selected handling of a tag deletion. Tags cannot be merged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum TagDisposition {
    /// Leave the tag and its product links untouched.
    Cancel,
    /// Remove the tag together with every product link.
    Delete,
}

/// Result of a delete request against a taxonomy entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Nothing was changed.
    Cancelled,
    /// The entry was removed and its references cleared.
    Deleted { products_updated: usize },
    /// The entry was removed after its products were re-pointed to `target_id`.
    Merged {
        target_id: i32,
        products_merged: usize,
    },
}

/// Adjacent swap requested by the move-up / move-down controls.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(format!("unknown move direction `{other}`")),
        }
    }
}

/// Whether two category or tag names clash under Unicode case folding.
pub fn same_name(left: &str, right: &str) -> bool {
    left.to_lowercase() == right.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_folds_non_ascii_case() {
        assert!(same_name("Кофе", "кофе"));
        assert!(same_name("ÉCLAIR", "éclair"));
        assert!(!same_name("Кофе", "Чай"));
    }

    #[test]
    fn category_disposition_parses_tagged_json() {
        let merge: CategoryDisposition =
            serde_json::from_str(r#"{"disposition":"merge","target_id":4}"#)
                .expect("merge disposition");
        assert_eq!(merge, CategoryDisposition::Merge { target_id: 4 });

        let cancel: CategoryDisposition =
            serde_json::from_str(r#"{"disposition":"cancel"}"#).expect("cancel disposition");
        assert_eq!(cancel, CategoryDisposition::Cancel);
    }

    #[test]
    fn tag_disposition_rejects_merge() {
        let result =
            serde_json::from_str::<TagDisposition>(r#"{"disposition":"merge","target_id":4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn usage_count_flattens_entry() {
        #[derive(Serialize)]
        struct Entry {
            id: i32,
        }

        let value = serde_json::to_value(UsageCount::new(Entry { id: 7 }, 3))
            .expect("serialization should succeed");

        assert_eq!(value["id"], 7);
        assert_eq!(value["product_count"], 3);
    }

    #[test]
    fn move_direction_parses_case_insensitively() {
        assert_eq!("UP".parse::<MoveDirection>(), Ok(MoveDirection::Up));
        assert_eq!("down".parse::<MoveDirection>(), Ok(MoveDirection::Down));
        assert!("sideways".parse::<MoveDirection>().is_err());
    }
}
