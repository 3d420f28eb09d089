use crate::config::WidgetConfig;
use crate::error::CoreError;
use crate::storage::CartStore;
use crate::system::{Dom, Persistence};

/// Write the number of cart lines into the badge element. Pages without a
/// badge are left alone.
pub fn refresh_badge<P, D>(
    store: &CartStore<P>,
    dom: &mut D,
    config: &WidgetConfig,
) -> Result<(), CoreError>
where
    P: Persistence,
    D: Dom + ?Sized,
{
    let cart = store.load()?;
    if let Some(badge) = dom.element_by_id(&config.badge_id) {
        dom.set_text(badge, &cart.len().to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, LineItem};
    use crate::system::{Document, MemoryPersistence};

    fn page_with_badge() -> (Document, u32) {
        let mut doc = Document::new();
        let badge = doc.create_element(
            doc.root(),
            "span",
            vec![("id".into(), "cart-count".into())],
        );
        doc.append_text(badge, "?");
        (doc, badge)
    }

    #[test]
    fn counts_duplicates() {
        let mut store = CartStore::new(MemoryPersistence::new(), "cart");
        let line = LineItem::new("A", "Widget", 9.99);
        store
            .save(&Cart::new().add_line(line.clone()).add_line(line))
            .unwrap();
        let (mut doc, badge) = page_with_badge();

        refresh_badge(&store, &mut doc, &WidgetConfig::default()).unwrap();
        assert_eq!(doc.text_content(badge), "2");
    }

    #[test]
    fn empty_store_shows_zero() {
        let store = CartStore::new(MemoryPersistence::new(), "cart");
        let (mut doc, badge) = page_with_badge();
        refresh_badge(&store, &mut doc, &WidgetConfig::default()).unwrap();
        assert_eq!(doc.text_content(badge), "0");
    }

    #[test]
    fn missing_badge_is_noop() {
        let store = CartStore::new(MemoryPersistence::new(), "cart");
        let mut doc = Document::new();
        refresh_badge(&store, &mut doc, &WidgetConfig::default()).unwrap();
        assert!(doc.children(doc.root()).is_empty());
    }
}
