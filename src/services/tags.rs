use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::tag::Tag;
use crate::domain::taxonomy::{DeleteOutcome, RenameOutcome, TagDisposition, UsageCount};
use crate::forms::tags::{AddTagForm, RenameTagForm};
use crate::repository::{TagReader, TagWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists the hub's tags by name together with the number of tagged products.
pub fn load_tags<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<UsageCount<Tag>>>
where
    R: TagReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tags = repo.list_tags(user.hub_id).map_err(ServiceError::from)?;
    let counts = repo
        .count_products_by_tag(user.hub_id)
        .map_err(ServiceError::from)?;

    Ok(tags
        .into_iter()
        .map(|tag| {
            let product_count = counts.get(&tag.id).copied().unwrap_or(0);
            UsageCount::new(tag, product_count)
        })
        .collect())
}

/// Creates a new tag for the authenticated user's hub.
pub fn create_tag<R>(repo: &R, user: &AuthenticatedUser, form: AddTagForm) -> ServiceResult<Tag>
where
    R: TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_tag = form
        .into_new_tag(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo.create_tag(&new_tag).map_err(ServiceError::from)?;
    log::info!(
        "Created tag {} `{}` in hub {}",
        created.id,
        created.name,
        created.hub_id
    );

    Ok(created)
}

/// Renames a tag and refreshes every product link pointing at it.
pub fn rename_tag<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RenameTagForm,
) -> ServiceResult<RenameOutcome<Tag>>
where
    R: TagReader + TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let tag_id = form.tag_id;
    let update = form
        .into_update_tag()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_tag_by_id(tag_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if current.name == update.name {
        return Ok(RenameOutcome::unchanged(current));
    }

    let outcome = repo
        .rename_tag(tag_id, user.hub_id, &update)
        .map_err(ServiceError::from)?;

    log::info!(
        "Renamed tag {tag_id} in hub {} to `{}`, {} products updated",
        user.hub_id,
        outcome.entry.name,
        outcome.products_updated
    );

    Ok(outcome)
}

/// Deletes a tag, dropping it from every product, unless the caller cancels.
pub fn remove_tag<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tag_id: i32,
    disposition: TagDisposition,
) -> ServiceResult<DeleteOutcome>
where
    R: TagReader + TagWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    if disposition == TagDisposition::Cancel {
        return Ok(DeleteOutcome::Cancelled);
    }

    repo.get_tag_by_id(tag_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    let products_updated = repo
        .delete_tag(tag_id, user.hub_id)
        .map_err(ServiceError::from)?;

    log::info!(
        "Deleted tag {tag_id} in hub {}, removed from {products_updated} products",
        user.hub_id
    );

    Ok(DeleteOutcome::Deleted { products_updated })
}
