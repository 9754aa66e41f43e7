use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::taxonomy::{CategoryDisposition, MoveDirection};
use crate::forms::categories::{AddCategoryForm, RenameCategoryForm, ReorderCategoriesForm};
use crate::repository::DieselRepository;
use crate::routes::{ErrorResponse, error_response};
use crate::services::categories::{
    create_category, load_categories, move_category, remove_category, rename_category,
    reorder_categories,
};

#[get("/v1/categories")]
/// Categories of the hub in sort order, each with its product count.
pub async fn api_v1_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_categories(repo.get_ref(), &user) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err, "list categories"),
    }
}

#[post("/v1/categories")]
pub async fn api_v1_add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddCategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(category) => HttpResponse::Created().json(category),
        Err(err) => error_response(err, "create category"),
    }
}

#[post("/v1/categories/rename")]
pub async fn api_v1_rename_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RenameCategoryForm>,
) -> impl Responder {
    match rename_category(repo.get_ref(), &user, form.into_inner()) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(err, "rename category"),
    }
}

#[post("/v1/categories/reorder")]
pub async fn api_v1_reorder_categories(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<ReorderCategoriesForm>,
) -> impl Responder {
    match reorder_categories(repo.get_ref(), &user, form.into_inner()) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err, "reorder categories"),
    }
}

#[post("/v1/categories/{category_id}/delete")]
/// Deletes a category. The body selects what happens to its products:
/// `{"disposition": "cancel" | "delete"}` or
/// `{"disposition": "merge", "target_id": 2}`.
pub async fn api_v1_delete_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    category_id: web::Path<i32>,
    disposition: web::Json<CategoryDisposition>,
) -> impl Responder {
    match remove_category(
        repo.get_ref(),
        &user,
        category_id.into_inner(),
        disposition.into_inner(),
    ) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(err, "delete category"),
    }
}

#[post("/v1/categories/{category_id}/move/{direction}")]
pub async fn api_v1_move_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    path: web::Path<(i32, String)>,
) -> impl Responder {
    let (category_id, direction) = path.into_inner();
    let direction: MoveDirection = match direction.parse() {
        Ok(direction) => direction,
        Err(message) => return HttpResponse::BadRequest().json(ErrorResponse::new(message)),
    };

    match move_category(repo.get_ref(), &user, category_id, direction) {
        Ok(categories) => HttpResponse::Ok().json(categories),
        Err(err) => error_response(err, "move category"),
    }
}
