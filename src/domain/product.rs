use chrono::NaiveDateTime;
use pushkind_common::pagination::Pagination;
use serde::{Deserialize, Serialize};

/// Domain representation of a product as seen by the catalog taxonomy.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional stock keeping unit identifier.
    pub sku: Option<String>,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Category the product belongs to, if any.
    pub category_id: Option<i32>,
    /// Identifiers of the tags attached to the product, ascending.
    pub tag_ids: Vec<i32>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product for a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional stock keeping unit identifier.
    pub sku: Option<String>,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Category the product should be filed under.
    pub category_id: Option<i32>,
    /// Tags attached to the product on creation.
    pub tag_ids: Vec<i32>,
}

impl NewProduct {
    /// Build a new product payload with no category or tags.
    pub fn new(hub_id: i32, name: impl Into<String>) -> Self {
        Self {
            hub_id,
            name: name.into(),
            sku: None,
            description: None,
            category_id: None,
            tag_ids: Vec::new(),
        }
    }

    /// Attach an SKU identifier to the product payload.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// File the product under a category.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Attach tags to the product payload.
    pub fn with_tag_ids(mut self, tag_ids: impl Into<Vec<i32>>) -> Self {
        self.tag_ids = tag_ids.into();
        self
    }
}

/// Query definition used to list products for a hub.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Owning hub identifier.
    pub hub_id: i32,
    /// Optional name or SKU search term.
    pub search: Option<String>,
    /// Only products filed under this category.
    pub category_id: Option<i32>,
    /// Only products carrying this tag.
    pub tag_id: Option<i32>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets all products belonging to `hub_id`.
    pub fn new(hub_id: i32) -> Self {
        Self {
            hub_id,
            search: None,
            category_id: None,
            tag_id: None,
            pagination: None,
        }
    }

    /// Filter the results by a search term applied to the name or SKU.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restrict the results to one category.
    pub fn category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict the results to products carrying one tag.
    pub fn tag(mut self, tag_id: i32) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
