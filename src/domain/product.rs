use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rating assigned to products that were saved without one.
pub const DEFAULT_RATING: f64 = 4.5;
/// Stock strictly below this value (and above zero) counts as low.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Identifier assigned by the store.
    pub id: i32,
    /// Title shown on the product card.
    pub title: String,
    /// Longer description shown to shoppers.
    pub description: String,
    /// Current selling price.
    pub price: f64,
    /// Price before discount, when the product is on sale.
    pub original_price: Option<f64>,
    /// Free-form category name.
    pub category: String,
    /// Units available for sale.
    pub stock: i32,
    /// URL of the product image.
    pub image: String,
    /// Brand or manufacturer name.
    pub brand: String,
    /// Average rating in the `[0, 5]` range.
    pub rating: f64,
    /// Number of reviews behind the rating.
    pub reviews: i32,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Availability bucket derived from the stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    InStock,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock < LOW_STOCK_THRESHOLD
    }

    pub fn stock_level(&self) -> StockLevel {
        if self.is_low_stock() {
            StockLevel::Low
        } else if self.is_in_stock() {
            StockLevel::InStock
        } else {
            StockLevel::OutOfStock
        }
    }

    /// Whole-percent discount relative to the original price, if any.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= self.price || original <= 0.0 {
            return None;
        }
        let percent = ((original - self.price) / original * 100.0).round();
        Some(percent as u32)
    }

    /// Case-insensitive substring match over the title and the description.
    ///
    /// An empty term matches every product.
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// Payload carrying this product's editable fields.
    pub fn data(&self) -> ProductData {
        ProductData {
            title: self.title.clone(),
            description: self.description.clone(),
            price: self.price,
            original_price: self.original_price,
            category: self.category.clone(),
            stock: self.stock,
            image: self.image.clone(),
            brand: self.brand.clone(),
            rating: self.rating,
            reviews: self.reviews,
        }
    }
}

/// Typed payload passed to the store when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub stock: i32,
    pub image: String,
    pub brand: String,
    pub rating: f64,
    pub reviews: i32,
}

impl ProductData {
    /// Build a payload with the required fields and default rating/reviews.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        stock: i32,
        image: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            original_price: None,
            category: category.into(),
            stock,
            image: image.into(),
            brand: brand.into(),
            rating: DEFAULT_RATING,
            reviews: 0,
        }
    }

    /// Attach the pre-discount price.
    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Override the rating and review count.
    pub fn with_rating(mut self, rating: f64, reviews: i32) -> Self {
        self.rating = rating;
        self.reviews = reviews;
        self
    }
}
