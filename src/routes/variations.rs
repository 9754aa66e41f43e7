use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::variations::{SaveVariablesForm, SaveVariationsForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::variations::{
    load_variables, load_variations, preview_combinations, save_variables, save_variations,
};

#[get("/v1/products/{product_id}/variables")]
pub async fn api_v1_variables(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
) -> impl Responder {
    match load_variables(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(variables) => HttpResponse::Ok().json(variables),
        Err(err) => error_response(err, "list variables"),
    }
}

#[post("/v1/products/{product_id}/variables")]
/// Replaces all variables of the product with the submitted list.
pub async fn api_v1_save_variables(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
    form: web::Json<SaveVariablesForm>,
) -> impl Responder {
    match save_variables(repo.get_ref(), &user, product_id.into_inner(), form.into_inner()) {
        Ok(variables) => HttpResponse::Ok().json(variables),
        Err(err) => error_response(err, "save variables"),
    }
}

#[post("/v1/variations/combinations")]
/// Every combination of the submitted variables, for seeding the variation editor.
pub async fn api_v1_preview_combinations(
    user: AuthenticatedUser,
    form: web::Json<SaveVariablesForm>,
) -> impl Responder {
    match preview_combinations(&user, form.into_inner()) {
        Ok(combinations) => HttpResponse::Ok().json(combinations),
        Err(err) => error_response(err, "generate combinations"),
    }
}

#[get("/v1/products/{product_id}/variations")]
pub async fn api_v1_variations(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
) -> impl Responder {
    match load_variations(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(variations) => HttpResponse::Ok().json(variations),
        Err(err) => error_response(err, "list variations"),
    }
}

#[post("/v1/products/{product_id}/variations")]
/// Replaces all variations of the product with the submitted list.
pub async fn api_v1_save_variations(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
    form: web::Json<SaveVariationsForm>,
) -> impl Responder {
    match save_variations(repo.get_ref(), &user, product_id.into_inner(), form.into_inner()) {
        Ok(variations) => HttpResponse::Ok().json(variations),
        Err(err) => error_response(err, "save variations"),
    }
}
