//! Admin catalog orchestration: loads the panel, runs saves and deletes
//! against the product store and reconciles the cached list.

use serde::{Deserialize, Serialize};

use crate::domain::admin::{AdminPanel, InventoryStats};
use crate::domain::product::Product;
use crate::forms::products::{FieldErrors, ProductDraft, ProductForm, SubmitOutcome};
use crate::repository::{ProductReader, ProductWriter};
use crate::services::grid::{GridMode, ProductGrid, render_grid};
use crate::services::{Notification, ServiceError, ServiceResult};

/// Location of the admin panel, also used as the grid's retry link.
pub const ADMIN_PATH: &str = "/admin";

/// Target of the editor's "Cancel" button.
pub const CANCEL_PATH: &str = "/admin/form/cancel";

/// Query parameters accepted by the admin page.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AdminQuery {
    /// Free-text filter over titles and descriptions.
    pub search: Option<String>,
}

/// Mount the panel: fetch every product and apply the search term.
///
/// A failed load leaves the panel in the failed state and yields an error
/// notification; it is not an `Err`.
pub fn load_admin_panel<R>(repo: &R, query: AdminQuery) -> (AdminPanel, Option<Notification>)
where
    R: ProductReader + ?Sized,
{
    let mut panel = AdminPanel::new();
    panel.set_search(query.search.unwrap_or_default().trim());
    panel.load_started();

    match repo.list_products() {
        Ok(products) => {
            panel.load_succeeded(products);
            (panel, None)
        }
        Err(err) => {
            log::error!("Failed to load products: {err}");
            panel.load_failed(ServiceError::from(err).to_string());
            (panel, Some(Notification::error("Failed to load products")))
        }
    }
}

/// Open the empty editor.
pub fn open_create_form(panel: &mut AdminPanel) -> ProductForm {
    panel.open_create();
    ProductForm::create()
}

/// Open the editor for `product_id`, preferring the cached copy.
pub fn open_edit_form<R>(
    repo: &R,
    panel: &mut AdminPanel,
    product_id: i32,
) -> ServiceResult<ProductForm>
where
    R: ProductReader + ?Sized,
{
    let product = match panel.product(product_id) {
        Some(product) => product.clone(),
        None => repo
            .get_product_by_id(product_id)
            .map_err(ServiceError::from)?
            .ok_or(ServiceError::NotFound)?,
    };

    let form = ProductForm::edit(&product);
    panel.open_edit(product);
    Ok(form)
}

/// Close the editor and discard its draft; the cached list is left as it was.
pub fn cancel_form(panel: &mut AdminPanel, form: ProductForm) {
    form.cancel();
    panel.close_form();
}

/// Product shown on the delete confirmation page.
pub fn load_delete_confirmation<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Delete a product once the user confirmed it.
///
/// Without confirmation nothing happens and no notification is produced. On
/// failure the cached list is left as it was.
pub fn delete_product<R>(
    repo: &R,
    panel: &mut AdminPanel,
    product_id: i32,
    confirmed: bool,
) -> Option<Notification>
where
    R: ProductWriter + ?Sized,
{
    if !confirmed {
        return None;
    }

    match repo.delete_product(product_id) {
        Ok(()) => {
            panel.item_deleted(product_id);
            Some(Notification::success("Product deleted successfully"))
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            Some(Notification::error("Failed to delete product"))
        }
    }
}

/// Result of [`save_product`].
#[derive(Debug, PartialEq)]
pub enum SaveOutcome {
    /// Validation failed; the form stays open with inline errors.
    Invalid,
    /// The form is already saving.
    InFlight,
    /// Stored and reconciled; the form is closed.
    Saved(Notification),
    /// The store rejected the save; the form stays open.
    Failed(Notification),
}

impl SaveOutcome {
    pub fn notification(&self) -> Option<&Notification> {
        match self {
            SaveOutcome::Saved(notification) | SaveOutcome::Failed(notification) => {
                Some(notification)
            }
            SaveOutcome::Invalid | SaveOutcome::InFlight => None,
        }
    }
}

/// Submit the form and reconcile the cached list with the stored record.
pub fn save_product<R>(repo: &R, panel: &mut AdminPanel, form: &mut ProductForm) -> SaveOutcome
where
    R: ProductWriter + ?Sized,
{
    let editing_id = form.product().map(|product| product.id);

    let outcome = form.submit(|data| {
        let stored = match editing_id {
            Some(id) => repo.update_product(id, &data),
            None => repo.create_product(&data),
        };
        stored.map_err(ServiceError::from)
    });

    match outcome {
        SubmitOutcome::Invalid => SaveOutcome::Invalid,
        SubmitOutcome::InFlight => SaveOutcome::InFlight,
        SubmitOutcome::Saved(product) => {
            panel.item_upserted(product);
            panel.close_form();
            let message = if editing_id.is_some() {
                "Product updated successfully"
            } else {
                "Product created successfully"
            };
            SaveOutcome::Saved(Notification::success(message))
        }
        SubmitOutcome::Failed(err) => {
            log::error!("Failed to save product: {err}");
            let message = if editing_id.is_some() {
                "Failed to update product"
            } else {
                "Failed to create product"
            };
            SaveOutcome::Failed(Notification::error(message))
        }
    }
}

/// Product editor as rendered inside the admin page.
#[derive(Debug, Serialize)]
pub struct ProductFormView {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub action: String,
    /// Discards the draft and closes the editor.
    pub cancel_action: String,
    pub draft: ProductDraft,
    pub errors: FieldErrors,
    pub saving: bool,
}

impl ProductFormView {
    fn new(form: &ProductForm, search: &str) -> Self {
        let (heading, submit_label, action) = match form.product() {
            Some(product) => (
                "Edit Product",
                "Update Product",
                with_search(&format!("/admin/products/{}", product.id), search),
            ),
            None => (
                "Add New Product",
                "Create Product",
                with_search("/admin/products", search),
            ),
        };

        Self {
            heading,
            submit_label,
            action,
            cancel_action: with_search(CANCEL_PATH, search),
            draft: form.draft().clone(),
            errors: form.errors().clone(),
            saving: form.is_saving(),
        }
    }
}

/// Data required to render the admin template.
#[derive(Debug, Serialize)]
pub struct AdminPageData {
    pub grid: ProductGrid,
    pub stats: InventoryStats,
    pub search: String,
    /// Number of products passing the search filter.
    pub visible_count: usize,
    pub form: Option<ProductFormView>,
}

/// Project the panel (and the open editor, if any) into the admin view.
pub fn build_admin_page(panel: &AdminPanel, form: Option<&ProductForm>) -> AdminPageData {
    let visible = panel.visible_products();
    let visible_count = visible.len();
    let grid = render_grid(
        visible,
        panel.is_loading(),
        panel.error(),
        GridMode::Admin,
        ADMIN_PATH,
    );

    let form = match (panel.form(), form) {
        (Some(_), Some(form)) => Some(ProductFormView::new(form, panel.search())),
        _ => None,
    };

    AdminPageData {
        grid,
        stats: panel.stats(),
        search: panel.search().to_string(),
        visible_count,
        form,
    }
}

/// Admin page URL keeping the current search filter.
pub fn admin_url(search: &str) -> String {
    with_search(ADMIN_PATH, search)
}

/// Append the search filter to an admin path.
pub fn with_search(path: &str, search: &str) -> String {
    if search.is_empty() {
        return path.to_string();
    }

    let query = AdminQuery {
        search: Some(search.to_string()),
    };
    match serde_qs::to_string(&query) {
        Ok(encoded) => format!("{path}?{encoded}"),
        Err(err) => {
            log::error!("Failed to encode admin query: {err}");
            path.to_string()
        }
    }
}
