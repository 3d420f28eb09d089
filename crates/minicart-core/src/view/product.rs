//! Product listing view.
//!
//! Every add control has two states. It starts `Absent` unless some cart
//! line already carries its product id, and moves to `Present` once added.
//! Nothing on this page moves it back; removal happens on the cart page.

use tracing::{info, warn};

use super::badge::refresh_badge;
use super::Action;
use crate::cart::{Cart, LineItem};
use crate::config::{WidgetConfig, ATTR_ID, ATTR_NAME, ATTR_PRICE};
use crate::error::CoreError;
use crate::storage::CartStore;
use crate::system::{Dom, NodeId, Persistence};

pub const LABEL_ADD: &str = "Add to Cart";
pub const LABEL_ADDED: &str = "Added to Cart";

/// Cart membership of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    Absent,
    Present,
}

/// `Present` iff any line in `cart` has `product_id`.
pub fn compute_state(cart: &Cart, product_id: &str) -> LineState {
    if cart.contains(product_id) {
        LineState::Present
    } else {
        LineState::Absent
    }
}

/// Set label, enabled flag and added-style of an add control.
pub fn apply_state<D: Dom + ?Sized>(
    dom: &mut D,
    control: NodeId,
    state: LineState,
    config: &WidgetConfig,
) {
    let present = state == LineState::Present;
    dom.set_text(control, if present { LABEL_ADDED } else { LABEL_ADD });
    dom.set_disabled(control, present);
    dom.toggle_class(control, &config.added_class, present);
}

/// Parse a price attribute. Only finite, non-negative decimals are accepted;
/// `-0` is read as `0`.
pub fn parse_price(raw: &str) -> Option<f64> {
    let price: f64 = raw.trim().parse().ok()?;
    (price.is_finite() && price >= 0.0).then_some(price + 0.0)
}

/// Read the product a control belongs to from its enclosing container.
fn read_product<D: Dom + ?Sized>(
    dom: &D,
    control: NodeId,
    config: &WidgetConfig,
) -> Option<LineItem> {
    let Some(container) = dom.closest(control, &config.product_class) else {
        warn!(control, "add control outside a product container, skipping");
        return None;
    };
    let Some(id) = dom.attribute(container, ATTR_ID) else {
        warn!(control, "product container has no {ATTR_ID}, skipping");
        return None;
    };
    let name = dom.attribute(container, ATTR_NAME).unwrap_or_default();
    let raw_price = dom.attribute(container, ATTR_PRICE).unwrap_or_default();
    let Some(price) = parse_price(&raw_price) else {
        warn!(product = %id, price = %raw_price, "unparseable product price, skipping");
        return None;
    };
    Some(LineItem::new(id, name, price))
}

/// Set the initial state of every add control on the page and bind its add
/// action. Returns the number of controls wired.
pub fn init_product_controls<P, D>(
    store: &CartStore<P>,
    dom: &mut D,
    config: &WidgetConfig,
) -> Result<usize, CoreError>
where
    P: Persistence,
    D: Dom + ?Sized,
{
    let cart = store.load()?;
    let mut wired = 0;
    for control in dom.elements_by_class(&config.add_class) {
        let Some(line) = read_product(dom, control, config) else {
            continue;
        };
        apply_state(dom, control, compute_state(&cart, &line.id), config);
        dom.bind(control, Action::Add { control, line });
        wired += 1;
    }
    Ok(wired)
}

/// Add handler: append the line, persist, refresh the badge and flip the
/// control to `Present`.
pub fn add_to_cart<P, D>(
    store: &mut CartStore<P>,
    dom: &mut D,
    config: &WidgetConfig,
    control: NodeId,
    line: LineItem,
) -> Result<(), CoreError>
where
    P: Persistence,
    D: Dom + ?Sized,
{
    let id = line.id.clone();
    let cart = store.load()?.add_line(line);
    store.save(&cart)?;
    info!(product = %id, lines = cart.len(), "added to cart");
    refresh_badge(store, dom, config)?;
    apply_state(dom, control, compute_state(&cart, &id), config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::format_price;
    use crate::system::{Document, MemoryPersistence};

    fn product(doc: &mut Document, id: &str, name: &str, price: &str) -> NodeId {
        let container = doc.create_element(
            doc.root(),
            "div",
            vec![
                ("class".into(), "product".into()),
                ("data-id".into(), id.into()),
                ("data-name".into(), name.into()),
                ("data-price".into(), price.into()),
            ],
        );
        let button = doc.create_element(
            container,
            "button",
            vec![("class".into(), "add-to-cart".into())],
        );
        doc.append_text(button, LABEL_ADD);
        button
    }

    #[test]
    fn state_follows_membership() {
        let cart = Cart::new().add_line(LineItem::new("A", "Widget", 9.99));
        assert_eq!(compute_state(&cart, "A"), LineState::Present);
        assert_eq!(compute_state(&cart, "A"), LineState::Present);
        assert_eq!(compute_state(&cart, "B"), LineState::Absent);
        assert_eq!(compute_state(&Cart::new(), "A"), LineState::Absent);
    }

    #[test]
    fn membership_sees_lines_past_the_first() {
        let cart = Cart::new()
            .add_line(LineItem::new("B", "b", 1.0))
            .add_line(LineItem::new("A", "a", 1.0));
        assert_eq!(compute_state(&cart, "A"), LineState::Present);
    }

    #[test]
    fn price_parsing() {
        assert_eq!(parse_price("9.99"), Some(9.99));
        assert_eq!(parse_price(" 12 "), Some(12.0));
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-1"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn negative_zero_price_reads_as_zero() {
        let price = parse_price("-0").unwrap();
        assert!(price.is_sign_positive());
        assert_eq!(parse_price("-0.00").map(format_price), Some("0.00".to_string()));
    }

    #[test]
    fn init_marks_products_already_in_cart() {
        let mut store = CartStore::new(MemoryPersistence::new(), "cart");
        store
            .save(&Cart::new().add_line(LineItem::new("A", "Widget", 9.99)))
            .unwrap();
        let mut doc = Document::new();
        let a = product(&mut doc, "A", "Widget", "9.99");
        let b = product(&mut doc, "B", "Gadget", "5.00");
        let config = WidgetConfig::default();

        let wired = init_product_controls(&store, &mut doc, &config).unwrap();
        assert_eq!(wired, 2);

        assert_eq!(doc.text_content(a), LABEL_ADDED);
        assert!(doc.is_disabled(a));
        assert!(doc.has_class(a, "added"));

        assert_eq!(doc.text_content(b), LABEL_ADD);
        assert!(!doc.is_disabled(b));
        assert!(!doc.has_class(b, "added"));
        assert_eq!(
            doc.activate(b),
            Some(Action::Add {
                control: b,
                line: LineItem::new("B", "Gadget", 5.0),
            })
        );
    }

    #[test]
    fn bad_price_leaves_control_unwired() {
        let store = CartStore::new(MemoryPersistence::new(), "cart");
        let mut doc = Document::new();
        let bad = product(&mut doc, "A", "Widget", "free");
        let wired = init_product_controls(&store, &mut doc, &WidgetConfig::default()).unwrap();
        assert_eq!(wired, 0);
        assert!(doc.handler(bad).is_none());
    }

    #[test]
    fn add_flips_control_and_persists() {
        let mut store = CartStore::new(MemoryPersistence::new(), "cart");
        let mut doc = Document::new();
        let badge = doc.create_element(doc.root(), "span", vec![("id".into(), "cart-count".into())]);
        let a = product(&mut doc, "A", "Widget", "9.99");
        let config = WidgetConfig::default();

        add_to_cart(&mut store, &mut doc, &config, a, LineItem::new("A", "Widget", 9.99)).unwrap();

        assert_eq!(store.load().unwrap().len(), 1);
        assert_eq!(doc.text_content(badge), "1");
        assert_eq!(doc.text_content(a), LABEL_ADDED);
        assert!(doc.activate(a).is_none());
    }
}
