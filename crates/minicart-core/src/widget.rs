use crate::cart::Cart;
use crate::config::WidgetConfig;
use crate::error::CoreError;
use crate::storage::CartStore;
use crate::system::{Document, Dom, NodeId, Persistence};
use crate::view::{badge, cart_page, product, Action};

/// The cart widget: a cart store plus the page bindings from its config.
///
/// Hosts call [`CartWidget::boot`] once per page load and route every
/// activation of a bound control to [`CartWidget::handle`].
#[derive(Debug)]
pub struct CartWidget<P> {
    store: CartStore<P>,
    config: WidgetConfig,
}

impl<P: Persistence> CartWidget<P> {
    pub fn new(backend: P, config: WidgetConfig) -> Self {
        let store = CartStore::new(backend, config.storage_key.clone());
        Self { store, config }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn store(&self) -> &CartStore<P> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CartStore<P> {
        &mut self.store
    }

    pub fn into_store(self) -> CartStore<P> {
        self.store
    }

    /// Current cart as stored.
    pub fn cart(&self) -> Result<Cart, CoreError> {
        self.store.load()
    }

    pub fn refresh_badge<D: Dom + ?Sized>(&self, dom: &mut D) -> Result<(), CoreError> {
        badge::refresh_badge(&self.store, dom, &self.config)
    }

    pub fn init_product_controls<D: Dom + ?Sized>(&self, dom: &mut D) -> Result<usize, CoreError> {
        product::init_product_controls(&self.store, dom, &self.config)
    }

    pub fn render_cart<D: Dom + ?Sized>(&self, dom: &mut D) -> Result<(), CoreError> {
        cart_page::render(&self.store, dom, &self.config)
    }

    /// Run the handler for an activated control.
    pub fn handle<D: Dom + ?Sized>(&mut self, dom: &mut D, action: Action) -> Result<(), CoreError> {
        match action {
            Action::Add { control, line } => {
                product::add_to_cart(&mut self.store, dom, &self.config, control, line)
            }
            Action::Remove { control } => {
                cart_page::remove_from_cart(&mut self.store, dom, &self.config, control)
            }
        }
    }

    /// Activate `node` in an in-memory document. Returns `false` when the
    /// node has no live handler (unbound, disabled or detached).
    pub fn activate(&mut self, doc: &mut Document, node: NodeId) -> Result<bool, CoreError> {
        let Some(action) = doc.activate(node) else {
            return Ok(false);
        };
        self.handle(doc, action)?;
        Ok(true)
    }
}
