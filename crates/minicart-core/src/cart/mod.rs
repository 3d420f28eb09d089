//! Cart model: an ordered list of line items and the pure operations on it.
//!
//! Insertion order is the only order. The same product id may appear more
//! than once; lines are never merged into a quantity.

use serde::{Deserialize, Serialize};

/// One selected product, priced at the moment it was added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// External product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Non-negative unit price.
    pub price: f64,
}

impl LineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Ordered sequence of line items. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `line` to the end, even if a line with the same id exists.
    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    /// Remove the first line whose id equals `id`. Later duplicates are kept;
    /// an unknown id leaves the cart unchanged.
    pub fn remove_first_matching(mut self, id: &str) -> Self {
        if let Some(pos) = self.lines.iter().position(|l| l.id == id) {
            self.lines.remove(pos);
        }
        self
    }

    /// Whether any line carries `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.lines.iter().any(|l| l.id == id)
    }

    /// Number of lines, duplicates counted.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.lines.iter()
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Sum of all line prices, in insertion order, unrounded.
    pub fn total(&self) -> f64 {
        self.lines.iter().fold(0.0, |acc, l| acc + l.price)
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Format an amount with exactly two decimal places (`9.5` → `"9.50"`).
///
/// Rounds on the exact binary value. Values that are exact ties in binary
/// (`0.125`) round half to even, giving `"0.12"` where a browser's
/// `toFixed(2)` gives `"0.13"`. Decimal inputs such as `14.995` are not exact
/// ties and match the browser. Negative zero prints as `"0.00"`.
pub fn format_price(amount: f64) -> String {
    let amount = amount + 0.0;
    format!("{amount:.2}")
}
