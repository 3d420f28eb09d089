//! Widget configuration (`minicart.json`).
//!
//! Every field has a default matching the stock page markup, so an empty
//! object (or no file at all) is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Data attribute holding a product or line identifier.
pub const ATTR_ID: &str = "data-id";
/// Data attribute holding a product display name.
pub const ATTR_NAME: &str = "data-name";
/// Data attribute holding a product price as decimal text.
pub const ATTR_PRICE: &str = "data-price";

/// Element ids, class names and storage key the widget binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Persistence key the cart is stored under.
    pub storage_key: String,
    /// Id of the cart count badge.
    pub badge_id: String,
    /// Id of the cart page's line container.
    pub items_id: String,
    /// Id of the cart page's total display.
    pub total_id: String,
    /// Class of the container carrying a product's data attributes.
    pub product_class: String,
    /// Class of the per-product add control.
    pub add_class: String,
    /// Class of the per-line remove control.
    pub remove_class: String,
    /// Class applied to an add control once its product is in the cart.
    pub added_class: String,
    /// Text shown on the cart page when the cart is empty.
    pub empty_message: String,
    pub routing: RoutingConfig,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            storage_key: "cart".into(),
            badge_id: "cart-count".into(),
            items_id: "cart-items".into(),
            total_id: "cart-total".into(),
            product_class: "product".into(),
            add_class: "add-to-cart".into(),
            remove_class: "remove-item".into(),
            added_class: "added".into(),
            empty_message: "Your cart is empty.".into(),
            routing: RoutingConfig::default(),
        }
    }
}

/// Page names used when a host resolves the current page from its address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub product_page: String,
    pub cart_page: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            product_page: "index.html".into(),
            cart_page: "cart.html".into(),
        }
    }
}

impl WidgetConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, CoreError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| CoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Every id, class, key and page name must be non-empty.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("storage_key", &self.storage_key),
            ("badge_id", &self.badge_id),
            ("items_id", &self.items_id),
            ("total_id", &self.total_id),
            ("product_class", &self.product_class),
            ("add_class", &self.add_class),
            ("remove_class", &self.remove_class),
            ("added_class", &self.added_class),
            ("routing.product_page", &self.routing.product_page),
            ("routing.cart_page", &self.routing.cart_page),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CoreError::Config(format!("`{name}` must not be empty")));
            }
        }
        Ok(())
    }
}
