use actix_files::Files;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use pushkind_storefront::db::establish_connection_pool;
use pushkind_storefront::models::config::ServerConfig;
use pushkind_storefront::repository::DieselRepository;
use pushkind_storefront::routes::admin::{
    cancel_product_form, confirm_delete_product, create_product, destroy_product, edit_product,
    new_product, show_admin, update_product,
};
use pushkind_storefront::routes::api::api_v1_products;
use pushkind_storefront::routes::cart::{add_cart_item, remove_cart_item, show_cart};
use pushkind_storefront::routes::storefront::show_storefront;

fn cookie_key(secret: Option<&str>) -> Key {
    match secret.map(|secret| Key::try_from(secret.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            log::warn!("SECRET_KEY rejected ({e}), using a random key");
            Key::generate()
        }
        None => Key::generate(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = cookie_key(server_config.secret_key.as_deref());

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new(&server_config.templates_glob()) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let domain = server_config.domain.clone();
    let assets_dir = server_config.assets_dir.clone();
    log::info!(
        "Starting storefront on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(domain.clone()))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &assets_dir))
            .service(show_storefront)
            .service(show_cart)
            .service(add_cart_item)
            .service(remove_cart_item)
            .service(show_admin)
            .service(new_product)
            .service(edit_product)
            .service(create_product)
            .service(update_product)
            .service(cancel_product_form)
            .service(confirm_delete_product)
            .service(destroy_product)
            .service(api_v1_products)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((server_config.address.as_str(), server_config.port))?
    .run()
    .await
}
