use std::collections::HashMap;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
use thiserror::Error;

use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductListQuery};
use crate::domain::tag::{NewTag, Tag, UpdateTag};
use crate::domain::taxonomy::{RenameOutcome, same_name};
use crate::domain::variable::{NewVariable, Variable};
use crate::domain::variation::{NewVariation, Variation};

pub mod category;
pub mod product;
pub mod tag;
pub mod variable;
pub mod variation;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Failure of a write that claims a category or tag name within a hub.
#[derive(Debug, Error)]
pub enum UniqueNameError {
    /// Another entry of the hub already uses the name, ignoring case.
    #[error("name `{0}` is already taken in the hub")]
    Taken(String),
    #[error("{0}")]
    Repository(RepositoryError),
}

pub type UniqueNameResult<T> = Result<T, UniqueNameError>;

impl From<RepositoryError> for UniqueNameError {
    fn from(value: RepositoryError) -> Self {
        UniqueNameError::Repository(value)
    }
}

impl From<DieselError> for UniqueNameError {
    fn from(value: DieselError) -> Self {
        UniqueNameError::Repository(RepositoryError::from(value))
    }
}

/// Fails with [`UniqueNameError::Taken`] when `name` matches one of `taken`
/// under Unicode case folding.
pub(crate) fn ensure_name_available<'a>(
    taken: impl IntoIterator<Item = &'a str>,
    name: &str,
) -> UniqueNameResult<()> {
    if taken.into_iter().any(|existing| same_name(existing, name)) {
        return Err(UniqueNameError::Taken(name.to_string()));
    }
    Ok(())
}

/// Turns a unique index violation on the name into [`UniqueNameError::Taken`].
pub(crate) fn name_conflict(err: DieselError, name: &str) -> UniqueNameError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UniqueNameError::Taken(name.to_string())
        }
        other => other.into(),
    }
}

/// Read-only operations over category records.
pub trait CategoryReader {
    fn get_category_by_id(&self, category_id: i32, hub_id: i32)
    -> RepositoryResult<Option<Category>>;
    /// All categories of the hub ordered by sort position.
    fn list_categories(&self, hub_id: i32) -> RepositoryResult<Vec<Category>>;
    /// Number of products referencing each category of the hub. Categories
    /// without products are absent from the map.
    fn count_products_by_category(&self, hub_id: i32) -> RepositoryResult<HashMap<i32, usize>>;
}

/// Write operations over category records.
///
/// Cascading operations report how many products they touched and leave the
/// way products reference categories to the implementation. Creating and
/// renaming check the name against the hub inside the same write.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> UniqueNameResult<Category>;
    fn rename_category(
        &self,
        category_id: i32,
        hub_id: i32,
        updates: &UpdateCategory,
    ) -> UniqueNameResult<RenameOutcome<Category>>;
    /// Remove a category, re-pointing its products to `reassign_to` or
    /// clearing their reference when it is `None`.
    fn delete_category(
        &self,
        category_id: i32,
        hub_id: i32,
        reassign_to: Option<i32>,
    ) -> RepositoryResult<usize>;
    /// Persist sort positions `0..N` following `ordered_ids`, which must list
    /// every category of the hub exactly once.
    fn reorder_categories(&self, hub_id: i32, ordered_ids: &[i32])
    -> RepositoryResult<Vec<Category>>;
}

/// Read-only operations over tag records.
pub trait TagReader {
    fn get_tag_by_id(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<Option<Tag>>;
    /// All tags of the hub ordered by name.
    fn list_tags(&self, hub_id: i32) -> RepositoryResult<Vec<Tag>>;
    /// Number of products linked to each tag of the hub.
    fn count_products_by_tag(&self, hub_id: i32) -> RepositoryResult<HashMap<i32, usize>>;
}

/// Write operations over tag records.
pub trait TagWriter {
    fn create_tag(&self, new_tag: &NewTag) -> UniqueNameResult<Tag>;
    fn rename_tag(
        &self,
        tag_id: i32,
        hub_id: i32,
        updates: &UpdateTag,
    ) -> UniqueNameResult<RenameOutcome<Tag>>;
    /// Remove a tag together with its product links, returning the number of
    /// products that lost the tag.
    fn delete_tag(&self, tag_id: i32, hub_id: i32) -> RepositoryResult<usize>;
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32, hub_id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Replace every tag link of the product with `tag_ids`.
    fn set_product_tags(
        &self,
        product_id: i32,
        hub_id: i32,
        tag_ids: &[i32],
    ) -> RepositoryResult<Product>;
}

/// Read-only access to the variables of a product.
pub trait VariableReader {
    fn list_variables(&self, product_id: i32, hub_id: i32) -> RepositoryResult<Vec<Variable>>;
}

/// Replace-all persistence of the variables of a product.
pub trait VariableWriter {
    fn replace_variables(
        &self,
        product_id: i32,
        hub_id: i32,
        variables: &[NewVariable],
    ) -> RepositoryResult<Vec<Variable>>;
}

/// Read-only access to the variations of a product.
pub trait VariationReader {
    fn list_variations(&self, product_id: i32, hub_id: i32) -> RepositoryResult<Vec<Variation>>;
}

/// Replace-all persistence of the variations of a product.
pub trait VariationWriter {
    fn replace_variations(
        &self,
        product_id: i32,
        hub_id: i32,
        variations: &[NewVariation],
    ) -> RepositoryResult<Vec<Variation>>;
}
