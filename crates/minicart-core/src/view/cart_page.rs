//! Cart summary page: one row per line, a running total and a remove
//! control per row. Every mutation triggers a full re-render.
//!
//! Removing a line here does not touch add-control state on the product
//! listing; that page recomputes its state on its next load.

use tracing::{debug, info};

use super::badge::refresh_badge;
use super::Action;
use crate::cart::format_price;
use crate::config::{WidgetConfig, ATTR_ID};
use crate::error::CoreError;
use crate::storage::CartStore;
use crate::system::{Dom, NodeId, Persistence};

pub const ROW_CLASS: &str = "cart-item";
pub const EMPTY_CLASS: &str = "empty-cart";
pub const REMOVE_LABEL: &str = "Remove";

/// Render the cart into the list container and the total display. A page
/// missing either element is left alone.
pub fn render<P, D>(store: &CartStore<P>, dom: &mut D, config: &WidgetConfig) -> Result<(), CoreError>
where
    P: Persistence,
    D: Dom + ?Sized,
{
    let cart = store.load()?;
    let (Some(list), Some(total_el)) = (
        dom.element_by_id(&config.items_id),
        dom.element_by_id(&config.total_id),
    ) else {
        return Ok(());
    };

    dom.clear_children(list);

    if cart.is_empty() {
        let message = dom.append_element(list, "p");
        dom.toggle_class(message, EMPTY_CLASS, true);
        dom.set_text(message, &config.empty_message);
        dom.set_text(total_el, &format_price(0.0));
        debug!("rendered empty cart");
        return Ok(());
    }

    let mut total = 0.0;
    for line in &cart {
        total += line.price;

        let row = dom.append_element(list, "div");
        dom.toggle_class(row, ROW_CLASS, true);

        let name = dom.append_element(row, "span");
        dom.toggle_class(name, "item-name", true);
        dom.set_text(name, &line.name);

        let price = dom.append_element(row, "span");
        dom.toggle_class(price, "item-price", true);
        dom.set_text(price, &format_price(line.price));

        let remove = dom.append_element(row, "button");
        dom.toggle_class(remove, &config.remove_class, true);
        dom.set_attribute(remove, ATTR_ID, &line.id);
        dom.set_text(remove, REMOVE_LABEL);
    }
    dom.set_text(total_el, &format_price(total));

    // Rows were just recreated, so handlers are attached afresh.
    for control in dom.elements_by_class(&config.remove_class) {
        dom.bind(control, Action::Remove { control });
    }
    debug!(lines = cart.len(), "rendered cart");
    Ok(())
}

/// Remove handler: drop the first line with the control's id, persist,
/// refresh the badge and re-render.
pub fn remove_from_cart<P, D>(
    store: &mut CartStore<P>,
    dom: &mut D,
    config: &WidgetConfig,
    control: NodeId,
) -> Result<(), CoreError>
where
    P: Persistence,
    D: Dom + ?Sized,
{
    let id = dom.attribute(control, ATTR_ID).unwrap_or_default();
    let cart = store.load()?.remove_first_matching(&id);
    store.save(&cart)?;
    info!(product = %id, lines = cart.len(), "removed from cart");
    refresh_badge(store, dom, config)?;
    render(store, dom, config)
}
