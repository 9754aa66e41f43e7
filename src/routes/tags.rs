use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::taxonomy::TagDisposition;
use crate::forms::tags::{AddTagForm, RenameTagForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::tags::{create_tag, load_tags, remove_tag, rename_tag};

#[get("/v1/tags")]
/// Tags of the hub by name, each with the number of tagged products.
pub async fn api_v1_tags(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_tags(repo.get_ref(), &user) {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(err) => error_response(err, "list tags"),
    }
}

#[post("/v1/tags")]
pub async fn api_v1_add_tag(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddTagForm>,
) -> impl Responder {
    match create_tag(repo.get_ref(), &user, form.into_inner()) {
        Ok(tag) => HttpResponse::Created().json(tag),
        Err(err) => error_response(err, "create tag"),
    }
}

#[post("/v1/tags/rename")]
pub async fn api_v1_rename_tag(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<RenameTagForm>,
) -> impl Responder {
    match rename_tag(repo.get_ref(), &user, form.into_inner()) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(err, "rename tag"),
    }
}

#[post("/v1/tags/{tag_id}/delete")]
pub async fn api_v1_delete_tag(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tag_id: web::Path<i32>,
    disposition: web::Json<TagDisposition>,
) -> impl Responder {
    match remove_tag(
        repo.get_ref(),
        &user,
        tag_id.into_inner(),
        disposition.into_inner(),
    ) {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(err) => error_response(err, "delete tag"),
    }
}
