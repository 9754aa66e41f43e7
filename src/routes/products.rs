use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::forms::products::{AddProductForm, AssignProductTagsForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products::{
    ProductsQuery, assign_product_tags, create_product, load_products,
};

#[get("/v1/products")]
/// Paginated products of the hub, filtered by `search`, `category_id` or `tag_id`.
pub async fn api_v1_products(
    params: web::Query<ProductsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match load_products(repo.get_ref(), &user, params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => error_response(err, "list products"),
    }
}

#[post("/v1/products")]
pub async fn api_v1_add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(err, "create product"),
    }
}

#[post("/v1/products/{product_id}/tags")]
pub async fn api_v1_assign_product_tags(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    product_id: web::Path<i32>,
    form: web::Json<AssignProductTagsForm>,
) -> impl Responder {
    match assign_product_tags(repo.get_ref(), &user, product_id.into_inner(), form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(err, "assign product tags"),
    }
}
