use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{Product as DomainProduct, ProductData as DomainProductData};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
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
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: &'a str,
    pub stock: i32,
    pub image: &'a str,
    pub brand: &'a str,
    pub rating: f64,
    pub reviews: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateProduct<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: &'a str,
    pub stock: i32,
    pub image: &'a str,
    pub brand: &'a str,
    pub rating: f64,
    pub reviews: i32,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            price: value.price,
            original_price: value.original_price,
            category: value.category,
            stock: value.stock,
            image: value.image,
            brand: value.brand,
            rating: value.rating,
            reviews: value.reviews,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> From<&'a DomainProductData> for NewProduct<'a> {
    fn from(value: &'a DomainProductData) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_str(),
            price: value.price,
            original_price: value.original_price,
            category: value.category.as_str(),
            stock: value.stock,
            image: value.image.as_str(),
            brand: value.brand.as_str(),
            rating: value.rating,
            reviews: value.reviews,
        }
    }
}

impl<'a> UpdateProduct<'a> {
    /// Full-record changeset; every editable column is overwritten.
    pub fn new(value: &'a DomainProductData, updated_at: NaiveDateTime) -> Self {
        Self {
            title: value.title.as_str(),
            description: value.description.as_str(),
            price: value.price,
            original_price: value.original_price,
            category: value.category.as_str(),
            stock: value.stock,
            image: value.image.as_str(),
            brand: value.brand.as_str(),
            rating: value.rating,
            reviews: value.reviews,
            updated_at,
        }
    }
}
