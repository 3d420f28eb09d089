//! Host capabilities the widget is written against.

pub mod document;
pub mod dom;
pub mod persistence;

pub use document::Document;
pub use dom::{Dom, NodeId};
pub use persistence::{MemoryPersistence, Persistence};
