use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::cart::{CART_SESSION_KEY, Cart};
use crate::services::{Notification, NotificationLevel};

pub mod admin;
pub mod api;
pub mod cart;
pub mod storefront;

#[derive(Serialize)]
struct Alert<'a> {
    message: &'a str,
    level: &'static str,
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render template '{template}': {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Template context shared by every page: alerts, the header cart count and
/// the active navigation item.
///
/// `notifications` are shown alongside the flashes carried over from the
/// previous request.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    session: &Session,
    current_page: &str,
    notifications: &[Notification],
) -> Context {
    let mut alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|f| Alert {
            message: f.content(),
            level: alert_level_to_str(&f.level()),
        })
        .collect();
    alerts.extend(notifications.iter().map(|n| Alert {
        message: &n.message,
        level: notification_level_to_str(n.level),
    }));

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("cart_count", &load_cart(session).item_count());
    context
}

/// Queue a notification for the next rendered page.
pub fn send_flash(notification: &Notification) {
    let message = notification.message.clone();
    match notification.level {
        NotificationLevel::Success => FlashMessage::success(message).send(),
        NotificationLevel::Warning => FlashMessage::warning(message).send(),
        NotificationLevel::Error => FlashMessage::error(message).send(),
    }
}

/// Cart stored in the session; unreadable data starts an empty cart.
pub fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(CART_SESSION_KEY) {
        Ok(cart) => cart.unwrap_or_default(),
        Err(err) => {
            log::warn!("Discarding unreadable cart session: {err}");
            Cart::new()
        }
    }
}

pub fn store_cart(session: &Session, cart: &Cart) {
    if let Err(err) = session.insert(CART_SESSION_KEY, cart) {
        log::error!("Failed to store cart in session: {err}");
    }
}

fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn notification_level_to_str(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Error => "danger",
        NotificationLevel::Warning => "warning",
        NotificationLevel::Success => "success",
    }
}
