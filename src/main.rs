use std::env;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::db::establish_connection_pool;
use pushkind_common::middleware::RedirectUnauthorized;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::{logout, not_assigned};

use pushkind_catalog::repository::DieselRepository;
use pushkind_catalog::routes::categories::{
    api_v1_add_category, api_v1_categories, api_v1_delete_category, api_v1_move_category,
    api_v1_rename_category, api_v1_reorder_categories,
};
use pushkind_catalog::routes::products::{
    api_v1_add_product, api_v1_assign_product_tags, api_v1_products,
};
use pushkind_catalog::routes::tags::{
    api_v1_add_tag, api_v1_delete_tag, api_v1_rename_tag, api_v1_tags,
};
use pushkind_catalog::routes::variations::{
    api_v1_preview_combinations, api_v1_save_variables, api_v1_save_variations, api_v1_variables,
    api_v1_variations,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = env::var("SECRET_KEY");
    let secret_key = match &secret {
        Ok(key) => Key::from(key.as_bytes()),
        Err(_) => Key::generate(),
    };

    let auth_service_url = match env::var("AUTH_SERVICE_URL") {
        Ok(auth_service_url) => auth_service_url,
        Err(_) => {
            log::error!("AUTH_SERVICE_URL environment variable not set");
            std::process::exit(1);
        }
    };

    let common_config = CommonServerConfig {
        secret: secret.unwrap_or_default(),
        auth_service_url,
    };

    let domain = env::var("DOMAIN").unwrap_or("localhost".to_string());

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    log::info!("Starting catalog service on {address}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(not_assigned)
            .service(
                web::scope("/api")
                    .wrap(RedirectUnauthorized)
                    .service(api_v1_categories)
                    .service(api_v1_add_category)
                    .service(api_v1_rename_category)
                    .service(api_v1_reorder_categories)
                    .service(api_v1_delete_category)
                    .service(api_v1_move_category)
                    .service(api_v1_tags)
                    .service(api_v1_add_tag)
                    .service(api_v1_rename_tag)
                    .service(api_v1_delete_tag)
                    .service(api_v1_products)
                    .service(api_v1_add_product)
                    .service(api_v1_assign_product_tags)
                    .service(api_v1_variables)
                    .service(api_v1_save_variables)
                    .service(api_v1_preview_combinations)
                    .service(api_v1_variations)
                    .service(api_v1_save_variations),
            )
            .service(web::scope("").wrap(RedirectUnauthorized).service(logout))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
