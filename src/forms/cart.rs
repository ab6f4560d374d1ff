use serde::Deserialize;

/// Page the visitor returns to when the form carries no usable location.
pub const DEFAULT_RETURN_PATH: &str = "/";

/// Payload of the "Add to cart" button on product cards.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartForm {
    /// Storefront page (path and query) the button was pressed on.
    pub return_to: Option<String>,
}

impl AddToCartForm {
    /// Local path to redirect to after adding the product.
    ///
    /// Anything that is not a same-site absolute path falls back to the storefront.
    pub fn return_path(&self) -> &str {
        match self.return_to.as_deref().map(str::trim) {
            Some(path) if is_local_path(path) => path,
            _ => DEFAULT_RETURN_PATH,
        }
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.chars().any(char::is_control)
}
