use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::Category;
use crate::domain::taxonomy::{
    CategoryDisposition, DeleteOutcome, MoveDirection, RenameOutcome, UsageCount,
};
use crate::forms::categories::{AddCategoryForm, RenameCategoryForm, ReorderCategoriesForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists the hub's categories in sort order together with their product counts.
pub fn load_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<UsageCount<Category>>>
where
    R: CategoryReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo
        .list_categories(user.hub_id)
        .map_err(ServiceError::from)?;
    let counts = repo
        .count_products_by_category(user.hub_id)
        .map_err(ServiceError::from)?;

    Ok(categories
        .into_iter()
        .map(|category| {
            let product_count = counts.get(&category.id).copied().unwrap_or(0);
            UsageCount::new(category, product_count)
        })
        .collect())
}

/// Creates a new category at the end of the hub's order.
pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_category = form
        .into_new_category(user.hub_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let created = repo
        .create_category(&new_category)
        .map_err(ServiceError::from)?;

    log::info!(
        "Created category {} `{}` in hub {}",
        created.id,
        created.name,
        created.hub_id
    );

    Ok(created)
}

/// Renames a category. Submitting the current name changes nothing.
pub fn rename_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RenameCategoryForm,
) -> ServiceResult<RenameOutcome<Category>>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let category_id = form.category_id;
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let current = repo
        .get_category_by_id(category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if current.name == update.name {
        return Ok(RenameOutcome::unchanged(current));
    }

    let outcome = repo
        .rename_category(category_id, user.hub_id, &update)
        .map_err(ServiceError::from)?;

    log::info!(
        "Renamed category {category_id} in hub {} to `{}`, {} products updated",
        user.hub_id,
        outcome.entry.name,
        outcome.products_updated
    );

    Ok(outcome)
}

/// Deletes a category according to the caller's disposition for its products.
pub fn remove_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    disposition: CategoryDisposition,
) -> ServiceResult<DeleteOutcome>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let reassign_to = match disposition {
        CategoryDisposition::Cancel => return Ok(DeleteOutcome::Cancelled),
        CategoryDisposition::Delete => None,
        CategoryDisposition::Merge { target_id } => {
            if target_id == category_id {
                return Err(ServiceError::InvalidTarget(target_id));
            }
            Some(target_id)
        }
    };

    repo.get_category_by_id(category_id, user.hub_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if let Some(target_id) = reassign_to {
        let target = repo
            .get_category_by_id(target_id, user.hub_id)
            .map_err(ServiceError::from)?;
        if target.is_none() {
            return Err(ServiceError::InvalidTarget(target_id));
        }
    }

    let products_updated = repo
        .delete_category(category_id, user.hub_id, reassign_to)
        .map_err(ServiceError::from)?;

    match reassign_to {
        Some(target_id) => {
            log::info!(
                "Merged category {category_id} into {target_id} in hub {}, {products_updated} products moved",
                user.hub_id
            );
            Ok(DeleteOutcome::Merged {
                target_id,
                products_merged: products_updated,
            })
        }
        None => {
            log::info!(
                "Deleted category {category_id} in hub {}, {products_updated} products cleared",
                user.hub_id
            );
            Ok(DeleteOutcome::Deleted { products_updated })
        }
    }
}

/// Persists a complete new order of the hub's categories.
pub fn reorder_categories<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ReorderCategoriesForm,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let ordered_ids = form
        .into_ordered_ids()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let existing = repo
        .list_categories(user.hub_id)
        .map_err(ServiceError::from)?;

    let complete = existing.len() == ordered_ids.len()
        && existing
            .iter()
            .all(|category| ordered_ids.contains(&category.id));
    if !complete {
        return Err(ServiceError::Form(
            "the order must list every category of the hub exactly once".to_string(),
        ));
    }

    repo.reorder_categories(user.hub_id, &ordered_ids)
        .map_err(ServiceError::from)
}

/// Swaps a category with its neighbour and persists the resulting order.
///
/// Moving the first category up or the last one down leaves the order as is.
pub fn move_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    direction: MoveDirection,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let categories = repo
        .list_categories(user.hub_id)
        .map_err(ServiceError::from)?;

    let position = categories
        .iter()
        .position(|category| category.id == category_id)
        .ok_or(ServiceError::NotFound)?;

    let neighbour = match direction {
        MoveDirection::Up => position.checked_sub(1),
        MoveDirection::Down => Some(position + 1).filter(|index| *index < categories.len()),
    };

    let Some(neighbour) = neighbour else {
        return Ok(categories);
    };

    let mut ordered_ids: Vec<i32> = categories.iter().map(|category| category.id).collect();
    ordered_ids.swap(position, neighbour);

    repo.reorder_categories(user.hub_id, &ordered_ids)
        .map_err(ServiceError::from)
}
