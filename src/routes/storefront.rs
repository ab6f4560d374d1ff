use actix_session::Session;
use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::storefront::{StorefrontQuery, load_storefront};

#[get("/")]
pub async fn show_storefront(
    req: HttpRequest,
    params: web::Query<StorefrontQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = load_storefront(repo.get_ref(), params.into_inner());

    let mut context = base_context(&flash_messages, &session, "storefront", &[]);
    context.insert("grid", &data.grid);
    context.insert("search", &data.search);
    context.insert("category", &data.category);
    context.insert("categories", &data.categories);
    context.insert("result_count", &data.result_count);
    context.insert("return_to", &req.uri().to_string());
    render_template(&tera, "storefront/index.html", &context)
}
