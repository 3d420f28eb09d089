//! Page bootstrap: what runs once per page load.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::RoutingConfig;
use crate::error::CoreError;
use crate::system::{Dom, Persistence};
use crate::widget::CartWidget;

/// Which page the widget is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Product listing with add controls.
    ProductListing,
    /// Cart summary.
    Cart,
    /// Anything else; only the badge is refreshed.
    Other,
}

impl Page {
    /// Resolve a page from an address path, for hosts that only know their
    /// location. The listing matches by suffix or as the site root; the cart
    /// matches by substring.
    pub fn from_path(path: &str, routing: &RoutingConfig) -> Self {
        if path.is_empty() || path == "/" || path.ends_with(routing.product_page.as_str()) {
            Page::ProductListing
        } else if path.contains(routing.cart_page.as_str()) {
            Page::Cart
        } else {
            Page::Other
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::ProductListing => write!(f, "product"),
            Page::Cart => write!(f, "cart"),
            Page::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Page {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" | "products" | "listing" => Ok(Page::ProductListing),
            "cart" => Ok(Page::Cart),
            "other" => Ok(Page::Other),
            other => Err(CoreError::Config(format!(
                "unknown page {other:?} (expected product, cart or other)"
            ))),
        }
    }
}

impl<P: Persistence> CartWidget<P> {
    /// Page-load entry point: always refresh the badge, then set up the
    /// view for `page`.
    pub fn boot<D: Dom + ?Sized>(&self, dom: &mut D, page: Page) -> Result<(), CoreError> {
        debug!(%page, "booting cart widget");
        self.refresh_badge(dom)?;
        match page {
            Page::ProductListing => {
                self.init_product_controls(dom)?;
            }
            Page::Cart => self.render_cart(dom)?,
            Page::Other => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_path() {
        let routing = RoutingConfig::default();
        assert_eq!(Page::from_path("/", &routing), Page::ProductListing);
        assert_eq!(Page::from_path("", &routing), Page::ProductListing);
        assert_eq!(Page::from_path("/shop/index.html", &routing), Page::ProductListing);
        assert_eq!(Page::from_path("/cart.html", &routing), Page::Cart);
        assert_eq!(Page::from_path("/cart.html?x=1", &routing), Page::Cart);
        assert_eq!(Page::from_path("/about.html", &routing), Page::Other);
    }

    #[test]
    fn listing_wins_when_both_match() {
        let routing = RoutingConfig {
            product_page: "index.html".into(),
            cart_page: "cart".into(),
        };
        assert_eq!(Page::from_path("/cart/index.html", &routing), Page::ProductListing);
    }

    #[test]
    fn page_names_parse() {
        assert_eq!("cart".parse::<Page>().unwrap(), Page::Cart);
        assert_eq!("product".parse::<Page>().unwrap(), Page::ProductListing);
        assert!("checkout".parse::<Page>().is_err());
        assert_eq!(Page::Other.to_string(), "other");
    }
}
