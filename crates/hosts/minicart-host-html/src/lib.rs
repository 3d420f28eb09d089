//! Static HTML host for the minicart widget.
//!
//! Turns page source into a [`minicart_core::system::Document`], serializes
//! it back after the widget has run, and stores the cart in a JSON file
//! standing in for browser local storage.

pub mod parse;
pub mod serialize;
pub mod storage;

pub use parse::parse_document;
pub use serialize::to_html;
pub use storage::FilePersistence;
