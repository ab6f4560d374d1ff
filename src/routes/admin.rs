use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::admin::AdminPanel;
use crate::forms::products::{ConfirmDeleteForm, ProductDraft, ProductForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template, send_flash};
use crate::services::admin::{
    AdminQuery, SaveOutcome, admin_url, build_admin_page, cancel_form, delete_product,
    load_admin_panel, load_delete_confirmation, open_create_form, open_edit_form, save_product,
    with_search,
};
use crate::services::{Notification, ServiceError};

struct AdminView<'a> {
    tera: &'a Tera,
    flash_messages: &'a IncomingFlashMessages,
    session: &'a Session,
}

impl AdminView<'_> {
    fn render(
        &self,
        panel: &AdminPanel,
        form: Option<&ProductForm>,
        notifications: &[Notification],
    ) -> HttpResponse {
        let page = build_admin_page(panel, form);

        let mut context = base_context(self.flash_messages, self.session, "admin", notifications);
        context.insert("grid", &page.grid);
        context.insert("stats", &page.stats);
        context.insert("search", &page.search);
        context.insert("visible_count", &page.visible_count);
        context.insert("form", &page.form);
        context.insert(
            "new_product_url",
            &with_search("/admin/products/new", &page.search),
        );
        render_template(self.tera, "admin/index.html", &context)
    }

    /// Redirect after a stored change; keep the editor open otherwise.
    fn finish_save(
        &self,
        panel: &AdminPanel,
        form: &ProductForm,
        outcome: SaveOutcome,
    ) -> HttpResponse {
        match outcome {
            SaveOutcome::Saved(notification) => {
                send_flash(&notification);
                redirect(&admin_url(panel.search()))
            }
            SaveOutcome::Failed(notification) => self.render(panel, Some(form), &[notification]),
            SaveOutcome::Invalid | SaveOutcome::InFlight => self.render(panel, Some(form), &[]),
        }
    }
}

#[get("/admin")]
pub async fn show_admin(
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let view = AdminView {
        tera: &tera,
        flash_messages: &flash_messages,
        session: &session,
    };
    let (panel, notification) = load_admin_panel(repo.get_ref(), params.into_inner());
    view.render(&panel, None, notification.as_slice())
}

#[get("/admin/products/new")]
pub async fn new_product(
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let view = AdminView {
        tera: &tera,
        flash_messages: &flash_messages,
        session: &session,
    };
    let (mut panel, notification) = load_admin_panel(repo.get_ref(), params.into_inner());
    let form = open_create_form(&mut panel);
    view.render(&panel, Some(&form), notification.as_slice())
}

#[get("/admin/products/{product_id}/edit")]
pub async fn edit_product(
    path: web::Path<i32>,
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let view = AdminView {
        tera: &tera,
        flash_messages: &flash_messages,
        session: &session,
    };
    let product_id = path.into_inner();
    let (mut panel, notification) = load_admin_panel(repo.get_ref(), params.into_inner());

    match open_edit_form(repo.get_ref(), &mut panel, product_id) {
        Ok(form) => view.render(&panel, Some(&form), notification.as_slice()),
        Err(ServiceError::NotFound) => {
            send_flash(&Notification::error("Product not found"));
            redirect(&admin_url(panel.search()))
        }
        Err(err) => {
            log::error!("Failed to open product {product_id} for editing: {err}");
            send_flash(&Notification::error("Failed to load product"));
            redirect(&admin_url(panel.search()))
        }
    }
}

#[post("/admin/products")]
pub async fn create_product(
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(draft): web::Form<ProductDraft>,
) -> impl Responder {
    let view = AdminView {
        tera: &tera,
        flash_messages: &flash_messages,
        session: &session,
    };
    let (mut panel, notification) = load_admin_panel(repo.get_ref(), params.into_inner());
    if let Some(notification) = notification {
        // Without a loaded list there is nothing to reconcile against.
        return view.render(&panel, None, &[notification]);
    }

    let mut form = open_create_form(&mut panel).with_draft(draft);
    let outcome = save_product(repo.get_ref(), &mut panel, &mut form);
    view.finish_save(&panel, &form, outcome)
}

#[post("/admin/products/{product_id}")]
pub async fn update_product(
    path: web::Path<i32>,
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(draft): web::Form<ProductDraft>,
) -> impl Responder {
    let view = AdminView {
        tera: &tera,
        flash_messages: &flash_messages,
        session: &session,
    };
    let product_id = path.into_inner();
    let (mut panel, notification) = load_admin_panel(repo.get_ref(), params.into_inner());
    if let Some(notification) = notification {
        return view.render(&panel, None, &[notification]);
    }

    let mut form = match open_edit_form(repo.get_ref(), &mut panel, product_id) {
        Ok(form) => form.with_draft(draft),
        Err(ServiceError::NotFound) => {
            send_flash(&Notification::error("Product not found"));
            return redirect(&admin_url(panel.search()));
        }
        Err(err) => {
            log::error!("Failed to open product {product_id} for editing: {err}");
            send_flash(&Notification::error("Failed to update product"));
            return redirect(&admin_url(panel.search()));
        }
    };

    let outcome = save_product(repo.get_ref(), &mut panel, &mut form);
    view.finish_save(&panel, &form, outcome)
}

#[post("/admin/form/cancel")]
pub async fn cancel_product_form(
    params: web::Query<AdminQuery>,
    web::Form(draft): web::Form<ProductDraft>,
) -> impl Responder {
    let mut panel = AdminPanel::new();
    panel.set_search(params.into_inner().search.unwrap_or_default().trim());
    let form = open_create_form(&mut panel).with_draft(draft);
    cancel_form(&mut panel, form);
    redirect(&admin_url(panel.search()))
}

#[get("/admin/products/{product_id}/delete")]
pub async fn confirm_delete_product(
    path: web::Path<i32>,
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();
    let search = params.into_inner().search.unwrap_or_default();
    let search = search.trim();

    match load_delete_confirmation(repo.get_ref(), product_id) {
        Ok(product) => {
            let mut context = base_context(&flash_messages, &session, "admin", &[]);
            context.insert("product", &product);
            context.insert(
                "action",
                &with_search(&format!("/admin/products/{product_id}/delete"), search),
            );
            context.insert("cancel_url", &admin_url(search));
            render_template(&tera, "admin/delete.html", &context)
        }
        Err(ServiceError::NotFound) => {
            send_flash(&Notification::error("Product not found"));
            redirect(&admin_url(search))
        }
        Err(err) => {
            log::error!("Failed to load product {product_id} for deletion: {err}");
            send_flash(&Notification::error("Failed to delete product"));
            redirect(&admin_url(search))
        }
    }
}

#[post("/admin/products/{product_id}/delete")]
pub async fn destroy_product(
    path: web::Path<i32>,
    params: web::Query<AdminQuery>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ConfirmDeleteForm>,
) -> impl Responder {
    let view = AdminView {
        tera: &tera,
        flash_messages: &flash_messages,
        session: &session,
    };
    let product_id = path.into_inner();
    let (mut panel, notification) = load_admin_panel(repo.get_ref(), params.into_inner());
    if let Some(notification) = notification {
        return view.render(&panel, None, &[notification]);
    }

    let notification = delete_product(repo.get_ref(), &mut panel, product_id, form.confirmed);
    if let Some(notification) = notification {
        send_flash(&notification);
    }
    redirect(&admin_url(panel.search()))
}
