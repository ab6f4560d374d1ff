use serde::Serialize;

use crate::domain::cart::Cart;
use crate::domain::product::Product;
use crate::repository::ProductReader;
use crate::services::grid::format_price;
use crate::services::{ServiceError, ServiceResult};

/// Add one unit of a product to the cart.
pub fn add_to_cart<R>(repo: &R, cart: &mut Cart, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;

    if !product.is_in_stock() {
        return Err(ServiceError::Form(format!(
            "«{}» is out of stock",
            product.title
        )));
    }

    let available = u32::try_from(product.stock).unwrap_or(0);
    cart.add(product.id, available);
    Ok(product)
}

pub fn remove_from_cart(cart: &mut Cart, product_id: i32) -> bool {
    cart.remove(product_id)
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: i32,
    pub title: String,
    pub brand: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price_formatted: String,
    pub line_total_formatted: String,
    pub remove_url: String,
}

/// Data required to render the cart template.
#[derive(Debug, Serialize)]
pub struct CartPageData {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total_formatted: String,
}

/// Resolve cart lines against the catalog.
///
/// Lines whose product disappeared or ran out are dropped from `cart`, and
/// quantities are clamped to the current stock.
pub fn load_cart_page<R>(repo: &R, cart: &mut Cart) -> ServiceResult<CartPageData>
where
    R: ProductReader + ?Sized,
{
    let mut resolved = Vec::new();
    let mut missing = Vec::new();

    for (product_id, _) in cart.lines() {
        match repo
            .get_product_by_id(product_id)
            .map_err(ServiceError::from)?
        {
            Some(product) => resolved.push(product),
            None => missing.push(product_id),
        }
    }

    for product_id in missing {
        cart.remove(product_id);
    }
    for product in &resolved {
        cart.clamp(product.id, u32::try_from(product.stock).unwrap_or(0));
    }

    let mut total = 0.0;
    let lines = resolved
        .into_iter()
        .filter_map(|product| {
            let quantity = cart.quantity(product.id);
            if quantity == 0 {
                return None;
            }
            let line_total = product.price * f64::from(quantity);
            total += line_total;
            Some(CartLineView {
                product_id: product.id,
                remove_url: format!("/cart/remove/{}", product.id),
                unit_price_formatted: format_price(product.price),
                line_total_formatted: format_price(line_total),
                title: product.title,
                brand: product.brand,
                image: product.image,
                quantity,
            })
        })
        .collect();

    Ok(CartPageData {
        lines,
        item_count: cart.item_count(),
        total_formatted: format_price(total),
    })
}
