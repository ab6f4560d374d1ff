//! Product editor: string-typed draft, validation and the form state machine.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::product::{DEFAULT_RATING, Product, ProductData};

/// Maximum allowed length for short text fields (title, brand, category).
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: usize = 4096;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Maximum allowed length for an image URL.
const IMAGE_MAX_LEN: usize = 2048;
const IMAGE_MAX_LEN_VALIDATOR: u64 = IMAGE_MAX_LEN as u64;

const MAX_RATING: f64 = 5.0;

/// Editable product fields, named as in the HTML form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Title,
    Description,
    Price,
    OriginalPrice,
    Category,
    Stock,
    Image,
    Brand,
    Rating,
    Reviews,
}

impl DraftField {
    pub const ALL: [DraftField; 10] = [
        DraftField::Title,
        DraftField::Description,
        DraftField::Price,
        DraftField::OriginalPrice,
        DraftField::Category,
        DraftField::Stock,
        DraftField::Image,
        DraftField::Brand,
        DraftField::Rating,
        DraftField::Reviews,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Price => "price",
            DraftField::OriginalPrice => "original_price",
            DraftField::Category => "category",
            DraftField::Stock => "stock",
            DraftField::Image => "image",
            DraftField::Brand => "brand",
            DraftField::Rating => "rating",
            DraftField::Reviews => "reviews",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// Field name to error message. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(field.as_str()).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.0.contains_key(field.as_str())
    }

    /// Names of the flagged fields in alphabetical order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }

    fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.entry(field.as_str()).or_insert_with(|| message.into());
    }

    fn remove(&mut self, field: DraftField) {
        self.0.remove(field.as_str());
    }
}

/// Form-local product representation holding every field as typed by the user.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct ProductDraft {
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub title: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN_VALIDATOR))]
    pub description: String,
    pub price: String,
    pub original_price: String,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub category: String,
    pub stock: String,
    #[validate(length(max = IMAGE_MAX_LEN_VALIDATOR))]
    pub image: String,
    #[validate(length(max = NAME_MAX_LEN_VALIDATOR))]
    pub brand: String,
    pub rating: String,
    pub reviews: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            original_price: String::new(),
            category: String::new(),
            stock: String::new(),
            image: String::new(),
            brand: String::new(),
            rating: DEFAULT_RATING.to_string(),
            reviews: "0".to_string(),
        }
    }
}

impl ProductDraft {
    /// Stringify an existing product for editing.
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            original_price: product
                .original_price
                .map(|value| value.to_string())
                .unwrap_or_default(),
            category: product.category.clone(),
            stock: product.stock.to_string(),
            image: product.image.clone(),
            brand: product.brand.clone(),
            rating: product.rating.to_string(),
            reviews: product.reviews.to_string(),
        }
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::Price => &self.price,
            DraftField::OriginalPrice => &self.original_price,
            DraftField::Category => &self.category,
            DraftField::Stock => &self.stock,
            DraftField::Image => &self.image,
            DraftField::Brand => &self.brand,
            DraftField::Rating => &self.rating,
            DraftField::Reviews => &self.reviews,
        }
    }

    fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
            DraftField::Price => &mut self.price,
            DraftField::OriginalPrice => &mut self.original_price,
            DraftField::Category => &mut self.category,
            DraftField::Stock => &mut self.stock,
            DraftField::Image => &mut self.image,
            DraftField::Brand => &mut self.brand,
            DraftField::Rating => &mut self.rating,
            DraftField::Reviews => &mut self.reviews,
        }
    }

    /// Validate and parse the draft into a typed payload.
    pub fn to_product_data(&self) -> Result<ProductData, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = required_text(&self.title, DraftField::Title, &mut errors);
        let description = required_text(&self.description, DraftField::Description, &mut errors);
        let category = required_text(&self.category, DraftField::Category, &mut errors);
        let image = required_text(&self.image, DraftField::Image, &mut errors);
        let brand = required_text(&self.brand, DraftField::Brand, &mut errors);

        let price = parse_decimal(&self.price).filter(|value| *value > 0.0);
        if price.is_none() {
            errors.insert(DraftField::Price, "Valid price is required");
        }

        let stock = parse_whole(&self.stock);
        if stock.is_none() {
            errors.insert(DraftField::Stock, "Valid stock quantity is required");
        }

        let original_price = optional(&self.original_price, None, |raw| {
            parse_decimal(raw).filter(|value| *value >= 0.0).map(Some)
        });
        if original_price.is_none() {
            errors.insert(
                DraftField::OriginalPrice,
                "Original price must be a non-negative number",
            );
        }

        let rating = optional(&self.rating, DEFAULT_RATING, |raw| {
            parse_decimal(raw).filter(|value| (0.0..=MAX_RATING).contains(value))
        });
        if rating.is_none() {
            errors.insert(DraftField::Rating, "Rating must be between 0 and 5");
        }

        let reviews = optional(&self.reviews, 0, parse_whole);
        if reviews.is_none() {
            errors.insert(
                DraftField::Reviews,
                "Number of reviews must be a non-negative whole number",
            );
        }

        if let Err(length_errors) = self.validate() {
            for (name, _) in length_errors.field_errors() {
                if let Some(field) = DraftField::from_name(&name) {
                    errors.insert(field, "Value is too long");
                }
            }
        }

        match (price, stock, original_price, rating, reviews) {
            (Some(price), Some(stock), Some(original_price), Some(rating), Some(reviews))
                if errors.is_empty() =>
            {
                Ok(ProductData {
                    title,
                    description,
                    price,
                    original_price,
                    category,
                    stock,
                    image,
                    brand,
                    rating,
                    reviews,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Field-scoped validation of a draft; the empty mapping means it can be saved.
pub fn validate_draft(draft: &ProductDraft) -> FieldErrors {
    draft.to_product_data().err().unwrap_or_default()
}

fn required_text(raw: &str, field: DraftField, errors: &mut FieldErrors) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let message = match field {
            DraftField::Title => "Product title is required",
            DraftField::Description => "Product description is required",
            DraftField::Category => "Category is required",
            DraftField::Image => "Product image URL is required",
            DraftField::Brand => "Brand is required",
            _ => "This field is required",
        };
        errors.insert(field, message);
    }
    trimmed.to_string()
}

/// Finite decimal, surrounding whitespace ignored.
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Non-negative integer, surrounding whitespace ignored.
fn parse_whole(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|value| *value >= 0)
}

/// Blank input yields `default`; anything else must satisfy `parse`.
fn optional<T>(raw: &str, default: T, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    if raw.trim().is_empty() {
        Some(default)
    } else {
        parse(raw)
    }
}

/// Outcome of [`ProductForm::submit`].
#[derive(Debug)]
pub enum SubmitOutcome<T, E> {
    /// Validation failed; errors are available on the form and nothing was saved.
    Invalid,
    /// A previous submission has not finished yet.
    InFlight,
    Saved(T),
    Failed(E),
}

/// Reason [`ProductForm::begin_submit`] refused to start a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    Invalid,
    InFlight,
}

/// Stateful product editor.
#[derive(Debug, Clone)]
pub struct ProductForm {
    product: Option<Product>,
    draft: ProductDraft,
    errors: FieldErrors,
    saving: bool,
}

impl ProductForm {
    /// Editor for a new product.
    pub fn create() -> Self {
        Self {
            product: None,
            draft: ProductDraft::default(),
            errors: FieldErrors::default(),
            saving: false,
        }
    }

    /// Editor pre-populated from an existing product.
    pub fn edit(product: &Product) -> Self {
        Self {
            product: Some(product.clone()),
            draft: ProductDraft::from_product(product),
            errors: FieldErrors::default(),
            saving: false,
        }
    }

    /// Replace every field with values submitted at once.
    pub fn with_draft(mut self, draft: ProductDraft) -> Self {
        for field in DraftField::ALL {
            self.change(field, draft.field(field));
        }
        self
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.product.is_some()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Update one field and clear that field's error only.
    pub fn change(&mut self, field: DraftField, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
        self.errors.remove(field);
    }

    /// Validate the draft and mark the form as saving.
    pub fn begin_submit(&mut self) -> Result<ProductData, SubmitRejected> {
        if self.saving {
            return Err(SubmitRejected::InFlight);
        }

        match self.draft.to_product_data() {
            Ok(data) => {
                self.errors = FieldErrors::default();
                self.saving = true;
                Ok(data)
            }
            Err(errors) => {
                self.errors = errors;
                Err(SubmitRejected::Invalid)
            }
        }
    }

    pub fn finish_submit(&mut self) {
        self.saving = false;
    }

    /// Validate, then hand the typed payload to `save`.
    ///
    /// `save` is never called for an invalid draft. The saving flag is reset
    /// whatever `save` returns.
    pub fn submit<T, E, F>(&mut self, save: F) -> SubmitOutcome<T, E>
    where
        F: FnOnce(ProductData) -> Result<T, E>,
        E: Display,
    {
        let data = match self.begin_submit() {
            Ok(data) => data,
            Err(SubmitRejected::Invalid) => return SubmitOutcome::Invalid,
            Err(SubmitRejected::InFlight) => return SubmitOutcome::InFlight,
        };

        let result = save(data);
        self.finish_submit();

        match result {
            Ok(saved) => SubmitOutcome::Saved(saved),
            Err(err) => {
                log::warn!("Error saving product: {err}");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Discard the editor and its draft.
    pub fn cancel(self) {}
}

/// Payload of the delete confirmation page.
#[derive(Debug, Default, Deserialize)]
pub struct ConfirmDeleteForm {
    /// Set only by the explicit "Delete" button; anything else aborts.
    #[serde(default)]
    pub confirmed: bool,
}
