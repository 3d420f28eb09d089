//! Build a [`Document`] from HTML using html5ever's tokenizer.
//!
//! This is a lenient tree construction: start tags open elements, end tags
//! close the nearest open element of the same name, and void elements never
//! take children. It does not apply the HTML5 insertion-mode rules, which
//! the widget's pages do not rely on.

use std::cell::RefCell;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use minicart_core::system::{Document, NodeId};

/// HTML5 void elements: no children, no end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose contents are raw text and must not be escaped.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

struct TreeBuilder {
    doc: Document,
    open: Vec<(NodeId, String)>,
}

impl TreeBuilder {
    fn current(&self) -> NodeId {
        self.open
            .last()
            .map(|(id, _)| *id)
            .unwrap_or_else(|| self.doc.root())
    }

    fn start_tag(&mut self, tag: &Tag) -> Option<RawKind> {
        let name = tag.name.to_string();
        let attrs = tag
            .attrs
            .iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect();
        let parent = self.current();
        let node = self.doc.create_element(parent, &name, attrs);
        if tag.self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            return None;
        }
        let raw = match name.as_str() {
            "script" => Some(RawKind::ScriptData),
            "style" => Some(RawKind::Rawtext),
            "title" | "textarea" => Some(RawKind::Rcdata),
            _ => None,
        };
        self.open.push((node, name));
        raw
    }

    fn end_tag(&mut self, tag: &Tag) {
        let name = tag.name.to_string();
        if let Some(pos) = self.open.iter().rposition(|(_, open)| *open == name) {
            self.open.truncate(pos);
        }
    }
}

struct DocumentSink {
    builder: RefCell<TreeBuilder>,
}

impl TokenSink for DocumentSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        let mut builder = self.builder.borrow_mut();
        match token {
            Token::TagToken(tag) => match tag.kind {
                TagKind::StartTag => {
                    if let Some(kind) = builder.start_tag(&tag) {
                        return TokenSinkResult::RawData(kind);
                    }
                }
                TagKind::EndTag => builder.end_tag(&tag),
            },
            Token::CharacterTokens(text) => {
                let parent = builder.current();
                builder.doc.append_text(parent, &text);
            }
            // Doctype, comments and parse errors carry nothing the widget
            // reads.
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

/// Parse page source into a document the widget can run against.
pub fn parse_document(html: &str) -> Document {
    let sink = DocumentSink {
        builder: RefCell::new(TreeBuilder {
            doc: Document::new(),
            open: Vec::new(),
        }),
    };
    let tokenizer = Tokenizer::new(sink, TokenizerOpts::default());

    let input = BufferQueue::default();
    input.push_back(StrTendril::from(html));
    let _ = tokenizer.feed(&input);
    tokenizer.end();

    tokenizer.sink.builder.into_inner().doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicart_core::system::Dom;

    #[test]
    fn builds_nested_elements() {
        let doc = parse_document(
            r#"<div class="product" data-id="A" data-name="Widget" data-price="9.99">
<button class="add-to-cart">Add to Cart</button></div>"#,
        );
        let buttons = doc.elements_by_class("add-to-cart");
        assert_eq!(buttons.len(), 1);
        let product = doc.closest(buttons[0], "product").unwrap();
        assert_eq!(doc.attribute(product, "data-price").as_deref(), Some("9.99"));
        assert_eq!(doc.text_content(buttons[0]), "Add to Cart");
    }

    #[test]
    fn void_elements_take_no_children() {
        let doc = parse_document(r#"<p>a<br>b<img src="x.png">c</p>"#);
        let p = doc.children(doc.root())[0];
        assert_eq!(doc.tag(p), Some("p"));
        assert_eq!(doc.text_content(p), "abc");
        assert_eq!(doc.children(p).len(), 5);
    }

    #[test]
    fn entities_are_decoded() {
        let doc = parse_document(r#"<span id="n" title="a &amp; b">Fish &amp; Chips</span>"#);
        let span = doc.element_by_id("n").unwrap();
        assert_eq!(doc.text_content(span), "Fish & Chips");
        assert_eq!(doc.attribute(span, "title").as_deref(), Some("a & b"));
    }

    #[test]
    fn stray_end_tag_is_ignored() {
        let doc = parse_document("<div id=\"a\"></span><p>x</p></div>");
        let div = doc.element_by_id("a").unwrap();
        assert_eq!(doc.children(div).len(), 1);
    }

    #[test]
    fn script_body_is_raw_text() {
        let doc = parse_document("<script>if (a < b) { x(\"<div>\"); }</script><div id=\"d\"></div>");
        let script = doc.children(doc.root())[0];
        assert_eq!(doc.text_content(script), "if (a < b) { x(\"<div>\"); }");
        assert!(doc.element_by_id("d").is_some());
        assert_eq!(doc.parent(doc.element_by_id("d").unwrap()), Some(doc.root()));
    }
}
