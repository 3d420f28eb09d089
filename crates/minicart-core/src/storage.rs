//! Storage adapter: moves a [`Cart`] in and out of a [`Persistence`] backend
//! under one fixed key, as JSON text.
//!
//! Every mutation rewrites the whole list. There is no merge or version
//! check, so a writer that saves between our `load` and `save` is silently
//! overwritten.

use tracing::debug;

use crate::cart::Cart;
use crate::error::CoreError;
use crate::system::Persistence;

/// Encode a cart to the stored text form.
pub fn encode(cart: &Cart) -> Result<String, CoreError> {
    serde_json::to_string(cart).map_err(CoreError::Encode)
}

/// Decode the stored text form. `key` is only used for error reporting.
pub fn decode(key: &str, text: &str) -> Result<Cart, CoreError> {
    serde_json::from_str(text).map_err(|source| CoreError::Decode {
        key: key.to_string(),
        source,
    })
}

/// A cart bound to one key of a persistence backend.
#[derive(Debug)]
pub struct CartStore<P> {
    backend: P,
    key: String,
}

impl<P: Persistence> CartStore<P> {
    pub fn new(backend: P, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }

    pub fn into_backend(self) -> P {
        self.backend
    }

    /// Read the cart. An absent entry is an empty cart.
    pub fn load(&self) -> Result<Cart, CoreError> {
        let Some(text) = self.backend.load(&self.key)? else {
            debug!(key = %self.key, "no stored cart, starting empty");
            return Ok(Cart::new());
        };
        let cart = decode(&self.key, &text)?;
        debug!(key = %self.key, lines = cart.len(), "loaded cart");
        Ok(cart)
    }

    /// Overwrite the stored cart with `cart`.
    pub fn save(&mut self, cart: &Cart) -> Result<(), CoreError> {
        let text = encode(cart)?;
        self.backend.save(&self.key, &text)?;
        debug!(key = %self.key, lines = cart.len(), "saved cart");
        Ok(())
    }

    /// Drop the stored entry. The next `load` yields an empty cart.
    pub fn clear(&mut self) -> Result<(), CoreError> {
        self.backend.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::LineItem;
    use crate::system::MemoryPersistence;

    fn store() -> CartStore<MemoryPersistence> {
        CartStore::new(MemoryPersistence::new(), "cart")
    }

    #[test]
    fn absent_entry_is_empty_cart() {
        assert!(store().load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order_and_duplicates() {
        let mut store = store();
        let cart = Cart::new()
            .add_line(LineItem::new("A", "Widget", 9.99))
            .add_line(LineItem::new("B", "Gadget", 5.0))
            .add_line(LineItem::new("A", "Widget", 9.99));
        store.save(&cart).unwrap();
        assert_eq!(store.load().unwrap(), cart);
    }

    #[test]
    fn stored_layout_is_array_of_objects() {
        let mut store = store();
        store
            .save(&Cart::new().add_line(LineItem::new("A", "Widget", 9.99)))
            .unwrap();
        assert_eq!(
            store.backend().raw("cart"),
            Some(r#"[{"id":"A","name":"Widget","price":9.99}]"#)
        );
    }

    #[test]
    fn save_fully_overwrites() {
        let mut store = store();
        store
            .save(&Cart::new().add_line(LineItem::new("A", "a", 1.0)))
            .unwrap();
        store.save(&Cart::new()).unwrap();
        assert_eq!(store.backend().raw("cart"), Some("[]"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn malformed_text_is_decode_error() {
        let mut backend = MemoryPersistence::new();
        backend.save("cart", "{not json").unwrap();
        let store = CartStore::new(backend, "cart");
        match store.load() {
            Err(CoreError::Decode { key, .. }) => assert_eq!(key, "cart"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_integer_prices_written_by_other_encoders() {
        let cart = decode("cart", r#"[{"id":"A","name":"Widget","price":10}]"#).unwrap();
        assert_eq!(cart.lines()[0].price, 10.0);
    }

    #[test]
    fn clear_removes_entry() {
        let mut store = store();
        store
            .save(&Cart::new().add_line(LineItem::new("A", "a", 1.0)))
            .unwrap();
        store.clear().unwrap();
        assert!(store.backend().raw("cart").is_none());
        assert!(store.load().unwrap().is_empty());
    }
}
