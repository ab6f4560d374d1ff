use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::cart::AddToCartForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, load_cart, redirect, render_template, send_flash, store_cart};
use crate::services::{Notification, ServiceError};
use crate::services::cart::{add_to_cart, load_cart_page, remove_from_cart};

#[get("/cart")]
pub async fn show_cart(
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut cart = load_cart(&session);

    match load_cart_page(repo.get_ref(), &mut cart) {
        Ok(data) => {
            store_cart(&session, &cart);
            let mut context = base_context(&flash_messages, &session, "cart", &[]);
            context.insert("lines", &data.lines);
            context.insert("total_formatted", &data.total_formatted);
            render_template(&tera, "cart/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/cart/add/{product_id}")]
pub async fn add_cart_item(
    path: web::Path<i32>,
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddToCartForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let mut cart = load_cart(&session);

    match add_to_cart(repo.get_ref(), &mut cart, product_id) {
        Ok(product) => {
            store_cart(&session, &cart);
            FlashMessage::success(format!("«{}» added to cart", product.title)).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
        }
        Err(ServiceError::Form(message)) => {
            send_flash(&Notification::warning(message));
        }
        Err(err) => {
            log::error!("Failed to add product {product_id} to cart: {err}");
            FlashMessage::error("Failed to add product to cart").send();
        }
    }

    redirect(form.return_path())
}

#[post("/cart/remove/{product_id}")]
pub async fn remove_cart_item(path: web::Path<i32>, session: Session) -> impl Responder {
    let product_id = path.into_inner();
    let mut cart = load_cart(&session);

    if remove_from_cart(&mut cart, product_id) {
        store_cart(&session, &cart);
        FlashMessage::success("Removed from cart").send();
    }

    redirect("/cart")
}
