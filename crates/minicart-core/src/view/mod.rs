//! Page views: the count badge, the product listing controls and the cart
//! page. Each view reads the cart through a [`crate::CartStore`] and writes
//! to the page through [`crate::system::Dom`].

pub mod badge;
pub mod cart_page;
pub mod product;

use crate::cart::LineItem;
use crate::system::NodeId;

/// What activating a bound control does.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append `line` (captured when the control was wired) and mark
    /// `control` as added.
    Add { control: NodeId, line: LineItem },
    /// Remove the first line whose id is read from `control` at activation.
    Remove { control: NodeId },
}
