use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::variable::Variable;
use crate::domain::variation::{VariantOptions, Variation, generate_combinations};
use crate::forms::variations::{SaveVariablesForm, SaveVariationsForm};
use crate::repository::{VariableReader, VariableWriter, VariationReader, VariationWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns the variables of a product with their values, in display order.
pub fn load_variables<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Vec<Variable>>
where
    R: VariableReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_variables(product_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Replaces every variable of a product with the submitted ones.
///
/// Rows with a blank name or without a non-blank value are dropped silently.
pub fn save_variables<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: SaveVariablesForm,
) -> ServiceResult<Vec<Variable>>
where
    R: VariableWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let variables = form
        .into_new_variables()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let saved = repo
        .replace_variables(product_id, user.hub_id, &variables)
        .map_err(ServiceError::from)?;

    log::info!(
        "Saved {} variables for product {product_id} in hub {}",
        saved.len(),
        user.hub_id
    );

    Ok(saved)
}

/// Returns the variations of a product in creation order.
pub fn load_variations<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
) -> ServiceResult<Vec<Variation>>
where
    R: VariationReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_variations(product_id, user.hub_id)
        .map_err(ServiceError::from)
}

/// Replaces every variation of a product with the submitted ones.
///
/// Options are stored as given. They are not checked against the product's
/// current variables.
pub fn save_variations<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: SaveVariationsForm,
) -> ServiceResult<Vec<Variation>>
where
    R: VariationWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let variations = form
        .into_new_variations()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let saved = repo
        .replace_variations(product_id, user.hub_id, &variations)
        .map_err(ServiceError::from)?;

    log::info!(
        "Saved {} variations for product {product_id} in hub {}",
        saved.len(),
        user.hub_id
    );

    Ok(saved)
}

/// Computes every combination of the submitted variables without saving anything.
pub fn preview_combinations(
    user: &AuthenticatedUser,
    form: SaveVariablesForm,
) -> ServiceResult<Vec<VariantOptions>> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let inputs = form
        .into_variable_inputs()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    Ok(generate_combinations(&inputs))
}
