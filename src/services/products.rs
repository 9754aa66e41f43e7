use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::check_role;
use serde::Deserialize;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::product::{Product, ProductListQuery};
use crate::forms::products::{AddProductForm, AssignProductTagsForm};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the products listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    /// Optional search string matched against name and SKU.
    pub search: Option<String>,
    /// Page requested by the client (1-based).
    pub page: Option<usize>,
    /// Restrict the listing to one category.
    pub category_id: Option<i32>,
    /// Restrict the listing to products carrying one tag.
    pub tag_id: Option<i32>,
}

/// Loads a page of the hub's products.
pub fn load_products<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ProductsQuery,
) -> ServiceResult<Paginated<Product>>
where
    R: ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let ProductsQuery {
        search,
        page,
        category_id,
        tag_id,
    } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ProductListQuery::new(user.hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }
    if let Some(category_id) = category_id {
        list_query = list_query.category(category_id);
    }
    if let Some(tag_id) = tag_id {
        list_query = list_query.tag(tag_id);
    }

    let (total, items) = repo.list_products(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(Paginated::new(items, page, total_pages))
}

/// Creates a product, optionally filed under a category and tagged.
pub fn create_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddProductForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form
        .into_new_product(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!(
        "Created product {} `{}` in hub {}",
        product.id,
        product.name,
        product.hub_id
    );

    Ok(product)
}

/// Replaces the tag set of a product.
pub fn assign_product_tags<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: AssignProductTagsForm,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tag_ids = form
        .into_tag_ids()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.set_product_tags(product_id, user.hub_id, &tag_ids)
        .map_err(ServiceError::from)
}
