//! View model for the product grid shared by the storefront and the admin panel.

use serde::Serialize;

use crate::domain::product::{Product, StockLevel};

/// Which affordances each card exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    Storefront,
    Admin,
}

/// What the grid area renders.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProductGrid {
    Loading,
    Error { message: String, retry_url: String },
    Empty,
    Cards { cards: Vec<ProductCard> },
}

impl ProductGrid {
    pub fn cards(&self) -> &[ProductCard] {
        match self {
            ProductGrid::Cards { cards } => cards,
            _ => &[],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductCard {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub image: String,
    pub price_formatted: String,
    pub original_price_formatted: Option<String>,
    pub discount_percent: Option<u32>,
    pub rating: f64,
    pub reviews: i32,
    pub stock: i32,
    pub stock_level: StockLevel,
    pub actions: CardActions,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardActions {
    Storefront {
        add_to_cart_url: String,
        can_add_to_cart: bool,
    },
    Admin {
        edit_url: String,
        delete_url: String,
    },
}

impl ProductCard {
    fn new(product: &Product, mode: GridMode) -> Self {
        let actions = match mode {
            GridMode::Storefront => CardActions::Storefront {
                add_to_cart_url: format!("/cart/add/{}", product.id),
                can_add_to_cart: product.is_in_stock(),
            },
            GridMode::Admin => CardActions::Admin {
                edit_url: format!("/admin/products/{}/edit", product.id),
                delete_url: format!("/admin/products/{}/delete", product.id),
            },
        };

        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price_formatted: format_price(product.price),
            original_price_formatted: product
                .discount_percent()
                .and(product.original_price)
                .map(format_price),
            discount_percent: product.discount_percent(),
            rating: product.rating,
            reviews: product.reviews,
            stock: product.stock,
            stock_level: product.stock_level(),
            actions,
        }
    }
}

pub fn format_price(value: f64) -> String {
    format!("{value:.2}")
}

/// Pick the grid state: loading wins over error, error over empty.
pub fn render_grid<'a>(
    items: impl IntoIterator<Item = &'a Product>,
    loading: bool,
    error: Option<&str>,
    mode: GridMode,
    retry_url: &str,
) -> ProductGrid {
    if loading {
        return ProductGrid::Loading;
    }

    if let Some(message) = error {
        return ProductGrid::Error {
            message: message.to_string(),
            retry_url: retry_url.to_string(),
        };
    }

    let cards: Vec<ProductCard> = items
        .into_iter()
        .map(|product| ProductCard::new(product, mode))
        .collect();

    if cards.is_empty() {
        ProductGrid::Empty
    } else {
        ProductGrid::Cards { cards }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;
    use serde_json::Value;

    use super::*;

    fn product(id: i32, stock: i32) -> Product {
        Product {
            id,
            title: format!("Item {id}"),
            description: "Thing".to_string(),
            price: 8.0,
            original_price: Some(10.0),
            category: "Misc".to_string(),
            stock,
            image: "http://x/y.png".to_string(),
            brand: "Acme".to_string(),
            rating: 4.0,
            reviews: 2,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    #[test]
    fn loading_takes_precedence() {
        let items = [product(1, 1)];

        let grid = render_grid(&items, true, Some("boom"), GridMode::Admin, "/admin");

        assert!(matches!(grid, ProductGrid::Loading));
    }

    #[test]
    fn error_carries_message_and_retry() {
        let grid = render_grid(
            std::iter::empty(),
            false,
            Some("boom"),
            GridMode::Admin,
            "/admin",
        );

        let value = serde_json::to_value(&grid).expect("serialization");
        assert_eq!(value.get("state").and_then(Value::as_str), Some("error"));
        assert_eq!(value.get("message").and_then(Value::as_str), Some("boom"));
        assert_eq!(value.get("retry_url").and_then(Value::as_str), Some("/admin"));
    }

    #[test]
    fn no_items_is_empty_state() {
        let grid = render_grid(std::iter::empty(), false, None, GridMode::Storefront, "/");

        assert!(matches!(grid, ProductGrid::Empty));
    }

    #[test]
    fn admin_cards_expose_edit_and_delete() {
        let items = [product(4, 3)];

        let grid = render_grid(&items, false, None, GridMode::Admin, "/admin");

        let card = &grid.cards()[0];
        assert_eq!(card.price_formatted, "8.00");
        assert_eq!(card.original_price_formatted.as_deref(), Some("10.00"));
        assert_eq!(card.discount_percent, Some(20));
        match &card.actions {
            CardActions::Admin {
                edit_url,
                delete_url,
            } => {
                assert_eq!(edit_url, "/admin/products/4/edit");
                assert_eq!(delete_url, "/admin/products/4/delete");
            }
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[test]
    fn storefront_cards_disable_cart_when_out_of_stock() {
        let items = [product(1, 0), product(2, 5)];

        let grid = render_grid(&items, false, None, GridMode::Storefront, "/");

        let flags: Vec<bool> = grid
            .cards()
            .iter()
            .map(|card| match card.actions {
                CardActions::Storefront {
                    can_add_to_cart, ..
                } => can_add_to_cart,
                CardActions::Admin { .. } => panic!("storefront grid has admin actions"),
            })
            .collect();
        assert_eq!(flags, vec![false, true]);
    }
}
