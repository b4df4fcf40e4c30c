use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Style flags carried by an inline span. Flags combine freely; how a
    /// combination looks is the renderer's decision.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct SpanAttributes: u8 {
        const BOLD = 1 << 0;
        const ITALIC = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
        const CODE = 1 << 3;
        const LINK = 1 << 4;
        /// Detected monetary amount, e.g. `$12.50`.
        const MONEY = 1 << 5;
        /// Synthetic first-line indentation marker.
        const INDENT = 1 << 6;
    }
}

/// A contiguous run of text sharing one attribute set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub content: String,
    pub attributes: SpanAttributes,
}

impl Span {
    pub fn new(content: impl Into<String>, attributes: SpanAttributes) -> Self {
        Self {
            content: content.into(),
            attributes,
        }
    }
}

/// The bullet of a list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Marker {
    /// Numbered bullet; `index` is the 1-based position among siblings
    Ordered { index: u64 },
    Unordered,
    /// Task-list checkbox
    Checklist { checked: bool },
}

/// A single list item, which can carry a nested sub-list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub marker: Marker,
    pub content: Vec<Span>,
    pub nested: Option<Box<List>>,
}

/// One list at one nesting level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level elements produced from Markdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Heading with level (1-6) and content
    Heading { level: u8, content: Vec<Span> },
    /// Regular paragraph with inline content
    Paragraph { content: Vec<Span> },
    /// Fenced or indented code block with optional language
    Code {
        language: Option<String>,
        content: String,
    },
    /// Image reference; the alt text is not retained
    Image {
        source: String,
        title: Option<String>,
    },
    /// A quoted paragraph lifted out of a block quote
    Quote { content: Vec<Span> },
    /// List tree; `level` is the nesting depth at emission (always 0 for
    /// top-level lists, nested lists hang off their parent items instead)
    List { list: List, level: usize },
    /// Horizontal rule
    ThematicBreak,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_combine() {
        let attrs = SpanAttributes::BOLD | SpanAttributes::ITALIC | SpanAttributes::LINK;
        assert!(attrs.contains(SpanAttributes::BOLD));
        assert!(attrs.contains(SpanAttributes::ITALIC));
        assert!(attrs.contains(SpanAttributes::LINK));
        assert!(!attrs.contains(SpanAttributes::MONEY));
    }

    #[test]
    fn span_roundtrips_through_json() {
        let span = Span::new("fee", SpanAttributes::BOLD | SpanAttributes::MONEY);
        let json = serde_json::to_string(&span).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
