use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::repository::DieselRepository;
use crate::services::storefront::{StorefrontQuery, search_products};

#[get("/api/v1/products")]
/// Return a JSON list of products filtered by `search` and `category`.
pub async fn api_v1_products(
    params: web::Query<StorefrontQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match search_products(repo.get_ref(), params.into_inner()) {
        Ok(products) => HttpResponse::Ok().json(products),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to load products" }))
        }
    }
}
