//! State container behind the admin catalog page.
//!
//! The panel caches the product list of the last full load and is reconciled
//! in place after create, update and delete calls instead of reloading.

use serde::Serialize;

use crate::domain::product::Product;

/// Lifecycle of the cached product list.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

/// Product editor the panel currently shows, if any.
#[derive(Debug, Clone, PartialEq)]
pub enum FormTarget {
    Create,
    Edit(Product),
}

/// Stock counters derived from the cached list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct InventoryStats {
    pub total: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
}

impl InventoryStats {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        products
            .into_iter()
            .fold(InventoryStats::default(), |mut stats, product| {
                stats.total += 1;
                if product.is_in_stock() {
                    stats.in_stock += 1;
                }
                if product.is_out_of_stock() {
                    stats.out_of_stock += 1;
                }
                if product.is_low_stock() {
                    stats.low_stock += 1;
                }
                stats
            })
    }
}

#[derive(Debug, Clone)]
pub struct AdminPanel {
    state: LoadState,
    products: Vec<Product>,
    search: String,
    form: Option<FormTarget>,
}

impl Default for AdminPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminPanel {
    /// A freshly mounted panel waiting for its first load.
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            products: Vec::new(),
            search: String::new(),
            form: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: i32) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn form(&self) -> Option<&FormTarget> {
        self.form.as_ref()
    }

    /// Identifier of the product being edited, `None` in create mode or when closed.
    pub fn editing_id(&self) -> Option<i32> {
        match &self.form {
            Some(FormTarget::Edit(product)) => Some(product.id),
            _ => None,
        }
    }

    pub fn load_started(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn load_succeeded(&mut self, products: Vec<Product>) {
        self.products = products;
        self.state = LoadState::Loaded;
    }

    /// Record a failed load; the previous cache is left untouched.
    pub fn load_failed(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn open_create(&mut self) {
        self.form = Some(FormTarget::Create);
    }

    pub fn open_edit(&mut self, product: Product) {
        self.form = Some(FormTarget::Edit(product));
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Drop the product with `id` from the cache.
    pub fn item_deleted(&mut self, id: i32) {
        self.products.retain(|product| product.id != id);
    }

    /// Replace the cached product with the same id, or append a new one.
    pub fn item_upserted(&mut self, product: Product) {
        match self.products.iter_mut().find(|item| item.id == product.id) {
            Some(existing) => *existing = product,
            None => self.products.push(product),
        }
    }

    /// Cached products matching the current search term, in cache order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.matches_search(&self.search))
            .collect()
    }

    pub fn stats(&self) -> InventoryStats {
        InventoryStats::from_products(&self.products)
    }
}
