//! Client-side shopping cart widget.
//!
//! The cart is an ordered list of line items persisted under a single key of
//! a string store. Pure list operations live in [`cart`]; the
//! [`storage::CartStore`] moves carts in and out of a [`system::Persistence`]
//! backend; the [`view`] modules mirror the cart into a page through the
//! [`system::Dom`] capability supplied by the host.

pub mod bootstrap;
pub mod cart;
pub mod config;
pub mod error;
pub mod storage;
pub mod system;
pub mod view;
pub mod widget;

pub use bootstrap::Page;
pub use cart::{format_price, Cart, LineItem};
pub use config::{RoutingConfig, WidgetConfig};
pub use error::CoreError;
pub use storage::CartStore;
pub use view::Action;
pub use widget::CartWidget;
