use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};
use crate::services::grid::{GridMode, ProductGrid, render_grid};

/// Query parameters submitted by the header search bar and category links.
#[derive(Debug, Default, Deserialize)]
pub struct StorefrontQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Data required to render the storefront template.
#[derive(Debug, Serialize)]
pub struct StorefrontPageData {
    pub grid: ProductGrid,
    /// Search query echoed back to the search bar.
    pub search: String,
    /// Active category filter.
    pub category: Option<String>,
    /// Distinct catalog categories for the header navigation.
    pub categories: Vec<String>,
    pub result_count: usize,
}

/// Load the storefront grid filtered by search term and category.
pub fn load_storefront<R>(repo: &R, query: StorefrontQuery) -> StorefrontPageData
where
    R: ProductReader + ?Sized,
{
    let (search, category) = normalize(query);

    let products = match repo.list_products() {
        Ok(products) => products,
        Err(err) => {
            log::error!("Failed to load storefront products: {err}");
            let message = ServiceError::from(err).to_string();
            return StorefrontPageData {
                grid: render_grid(
                    std::iter::empty(),
                    false,
                    Some(&message),
                    GridMode::Storefront,
                    "/",
                ),
                search,
                category,
                categories: Vec::new(),
                result_count: 0,
            };
        }
    };

    let visible: Vec<&Product> = products
        .iter()
        .filter(|product| matches_filters(product, &search, category.as_deref()))
        .collect();
    let result_count = visible.len();

    StorefrontPageData {
        grid: render_grid(visible, false, None, GridMode::Storefront, "/"),
        categories: distinct_categories(&products),
        search,
        category,
        result_count,
    }
}

/// Products matching the storefront filters, as served by the JSON API.
pub fn search_products<R>(repo: &R, query: StorefrontQuery) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    let (search, category) = normalize(query);
    let products = repo.list_products().map_err(ServiceError::from)?;
    Ok(products
        .into_iter()
        .filter(|product| matches_filters(product, &search, category.as_deref()))
        .collect())
}

fn normalize(query: StorefrontQuery) -> (String, Option<String>) {
    let search = query.search.unwrap_or_default().trim().to_string();
    let category = query
        .category
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    (search, category)
}

fn matches_filters(product: &Product, search: &str, category: Option<&str>) -> bool {
    let in_category = match category {
        Some(wanted) => product.category.trim().eq_ignore_ascii_case(wanted),
        None => true,
    };
    in_category && product.matches_search(search)
}

/// Sorted category names, deduplicated without regard to ASCII case.
pub fn distinct_categories(products: &[Product]) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for product in products {
        let name = product.category.trim();
        if name.is_empty() {
            continue;
        }
        seen.entry(name.to_ascii_lowercase())
            .or_insert_with(|| name.to_string());
    }
    seen.into_values().collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::*;
    use crate::repository::RepositoryError;
    use crate::repository::mock::MockProductReader;

    fn product(id: i32, title: &str, category: &str) -> Product {
        Product {
            id,
            title: title.to_string(),
            description: String::from("Catalog item"),
            price: 3.5,
            original_price: None,
            category: category.to_string(),
            stock: 2,
            image: "http://x/y.png".to_string(),
            brand: "Acme".to_string(),
            rating: 4.5,
            reviews: 1,
            created_at: NaiveDateTime::default(),
            updated_at: NaiveDateTime::default(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Widget", "Tools"),
            product(2, "Gadget", "tools"),
            product(3, "Lamp", "Home"),
        ]
    }

    #[test]
    fn filters_by_search_and_category() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products().returning(|| Ok(catalog()));

        let data = load_storefront(
            &repo,
            StorefrontQuery {
                search: Some("get".to_string()),
                category: Some("TOOLS".to_string()),
            },
        );

        assert_eq!(data.result_count, 2);
        let ids: Vec<i32> = data.grid.cards().iter().map(|card| card.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(data.categories, vec!["Home".to_string(), "Tools".to_string()]);
    }

    #[test]
    fn blank_filters_show_everything() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products().returning(|| Ok(catalog()));

        let data = load_storefront(
            &repo,
            StorefrontQuery {
                search: Some("   ".to_string()),
                category: Some(String::new()),
            },
        );

        assert_eq!(data.result_count, 3);
        assert!(data.category.is_none());
    }

    #[test]
    fn search_products_applies_filters() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products().returning(|| Ok(catalog()));

        let products = search_products(
            &repo,
            StorefrontQuery {
                search: Some("LAMP".to_string()),
                category: None,
            },
        )
        .expect("products");

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 3);
    }

    #[test]
    fn search_products_propagates_store_errors() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products()
            .returning(|| Err(RepositoryError::NotFound));

        let result = search_products(&repo, StorefrontQuery::default());

        assert_eq!(result.err(), Some(ServiceError::NotFound));
    }

    #[test]
    fn store_failure_renders_error_grid() {
        let mut repo = MockProductReader::new();
        repo.expect_list_products()
            .returning(|| Err(RepositoryError::NotFound));

        let data = load_storefront(&repo, StorefrontQuery::default());

        assert!(matches!(data.grid, ProductGrid::Error { .. }));
        assert!(data.categories.is_empty());
    }
}
