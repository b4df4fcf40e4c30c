//! Markdown parsing using pulldown-cmark

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::block::{Block, List, ListItem, Marker, Span, SpanAttributes};
use crate::config::Config;
use crate::money::{self, SplitKind};

/// Marker repeated in front of indented paragraphs (an en space).
const INDENT_MARKER: &str = "\u{2002}";

/// Strip YAML frontmatter from the beginning of markdown content
fn strip_frontmatter(markdown: &str) -> &str {
    if !markdown.starts_with("---") {
        return markdown;
    }
    // Find the closing ---
    if let Some(end) = markdown[3..].find("\n---") {
        let after_frontmatter = &markdown[3 + end + 4..];
        after_frontmatter.trim_start_matches('\n')
    } else {
        markdown
    }
}

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str, config: &Config) -> Vec<Block> {
    let markdown = strip_frontmatter(markdown);
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(markdown, options);
    let mut blocks = Vec::new();
    let mut state = ParseState::new(config);

    for event in parser {
        process_event(event, &mut state, &mut blocks);
    }

    blocks
}

struct ParseState<'a> {
    // Current inline content being built
    spans: Vec<Span>,
    // Active attribute sets, one frame per open styling tag
    attr_stack: Vec<SpanAttributes>,

    // Current heading level (if in a heading)
    heading_level: Option<u8>,

    // Code block state
    in_code_block: bool,
    code_language: Option<String>,
    code_content: String,

    // Events captured between a link's start and end tags; the link's
    // display text replaces every text node inside it
    link_events: Option<Vec<Event<'a>>>,

    // Depth of image tags being skipped (alt text is not retained)
    image_depth: usize,

    // List state
    list_stack: Vec<ListBuilder>,

    // Quote state: paragraphs divert to `quoted` while the flag is set
    in_quote: bool,
    quoted: Vec<Block>,

    // Tables are parsed but contribute nothing to the output
    in_table: bool,

    // Synthetic indentation width for top-level paragraphs
    indent: usize,
}

impl<'a> ParseState<'a> {
    fn new(config: &Config) -> Self {
        Self {
            spans: Vec::new(),
            attr_stack: Vec::new(),
            heading_level: None,
            in_code_block: false,
            code_language: None,
            code_content: String::new(),
            link_events: None,
            image_depth: 0,
            list_stack: Vec::new(),
            in_quote: false,
            quoted: Vec::new(),
            in_table: false,
            indent: config.paragraph.indent,
        }
    }

    fn current_attrs(&self) -> SpanAttributes {
        self.attr_stack
            .last()
            .copied()
            .unwrap_or(SpanAttributes::empty())
    }

    fn push_attr(&mut self, attr: SpanAttributes) {
        self.attr_stack.push(self.current_attrs() | attr);
    }

    fn pop_attr(&mut self) {
        self.attr_stack.pop();
    }
}

struct ListBuilder {
    ordered: bool,
    items: Vec<ListItem>,
    // 1-based position of the item currently being built
    item_index: u64,
    // Task-list marker seen for the current item
    checked: Option<bool>,
}

impl ListBuilder {
    fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
            item_index: 0,
            checked: None,
        }
    }

    /// Append an item for the content of one closed paragraph (or the tail
    /// of a tight item). A checkbox wins over the list kind; ordered items
    /// carry their sibling position.
    fn push_item(&mut self, content: Vec<Span>) {
        let marker = match self.checked.take() {
            Some(checked) => Marker::Checklist { checked },
            None if self.ordered => Marker::Ordered {
                index: self.item_index,
            },
            None => Marker::Unordered,
        };
        self.items.push(ListItem {
            marker,
            content,
            nested: None,
        });
    }

    fn finish(self) -> List {
        List {
            ordered: self.ordered,
            items: self.items,
        }
    }
}

/// Convert resolved text into spans, splicing out monetary amounts.
///
/// Detected amounts are padded with one space on each side and forced to
/// bold; the surrounding text keeps the inherited attributes untouched.
fn push_spans(spans: &mut Vec<Span>, text: &str, attributes: SpanAttributes) {
    let splits = money::split_amounts(text);
    if splits.is_empty() {
        spans.push(Span::new(text, attributes));
        return;
    }

    for split in splits {
        match split.kind {
            SplitKind::Amount => spans.push(Span::new(
                format!(" {} ", split.text),
                attributes | SpanAttributes::BOLD | SpanAttributes::MONEY,
            )),
            SplitKind::Text => spans.push(Span::new(split.text, attributes)),
        }
    }
}

/// Plain display text of a link: the concatenated text of its children,
/// destination and title dropped.
fn link_display_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) => text.push_str(t),
            Event::Code(c) => text.push_str(c),
            Event::SoftBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

fn process_event<'a>(event: Event<'a>, state: &mut ParseState<'a>, blocks: &mut Vec<Block>) {
    // Table content is visited but produces no output
    if state.in_table {
        if matches!(event, Event::End(TagEnd::Table)) {
            state.in_table = false;
        }
        return;
    }

    // Alt text inside an image is dropped
    if state.image_depth > 0 {
        match event {
            Event::Start(Tag::Image { .. }) => state.image_depth += 1,
            Event::End(TagEnd::Image) => state.image_depth -= 1,
            _ => {}
        }
        return;
    }

    // Inside a link everything is buffered until the closing tag
    if let Some(captured) = state.link_events.as_mut() {
        if !matches!(event, Event::End(TagEnd::Link)) {
            captured.push(event);
            return;
        }
    }

    match event {
        // Headings
        Event::Start(Tag::Heading { level, .. }) => {
            state.heading_level = Some(heading_level_to_u8(level));
        }
        Event::End(TagEnd::Heading(_)) => {
            let content = std::mem::take(&mut state.spans);
            if let Some(level) = state.heading_level.take() {
                if !state.in_quote {
                    blocks.push(Block::Heading { level, content });
                }
            }
        }

        // Paragraphs
        Event::Start(Tag::Paragraph) => {}
        Event::End(TagEnd::Paragraph) => {
            let mut content = std::mem::take(&mut state.spans);
            if content.is_empty() {
                return;
            }
            if let Some(list) = state.list_stack.last_mut() {
                // List item content; the enclosing list decides the marker
                list.push_item(content);
            } else if state.in_quote {
                state.quoted.push(Block::Paragraph { content });
            } else {
                if state.indent > 0 {
                    content.insert(
                        0,
                        Span::new(INDENT_MARKER.repeat(state.indent), SpanAttributes::INDENT),
                    );
                }
                blocks.push(Block::Paragraph { content });
            }
        }

        // Text content
        Event::Text(text) => {
            if state.in_code_block {
                state.code_content.push_str(&text);
            } else {
                let attrs = state.current_attrs();
                push_spans(&mut state.spans, &text, attrs);
            }
        }

        // Inline code never inherits surrounding styles and is never
        // amount-split
        Event::Code(code) => {
            state
                .spans
                .push(Span::new(code.into_string(), SpanAttributes::CODE));
        }

        // Inline styling
        Event::Start(Tag::Strong) => state.push_attr(SpanAttributes::BOLD),
        Event::End(TagEnd::Strong) => state.pop_attr(),
        Event::Start(Tag::Emphasis) => state.push_attr(SpanAttributes::ITALIC),
        Event::End(TagEnd::Emphasis) => state.pop_attr(),
        Event::Start(Tag::Strikethrough) => state.push_attr(SpanAttributes::STRIKETHROUGH),
        Event::End(TagEnd::Strikethrough) => state.pop_attr(),

        // Links: the destination is dropped and every text node inside the
        // link emits the link's whole display text
        Event::Start(Tag::Link { .. }) => {
            state.push_attr(SpanAttributes::LINK);
            state.link_events = Some(Vec::new());
        }
        Event::End(TagEnd::Link) => {
            if let Some(captured) = state.link_events.take() {
                let display = link_display_text(&captured);
                for inner in captured {
                    if matches!(inner, Event::Text(_)) {
                        let attrs = state.current_attrs();
                        push_spans(&mut state.spans, &display, attrs);
                    } else {
                        process_event(inner, state, blocks);
                    }
                }
                state.pop_attr();
            }
        }

        // Code blocks
        Event::Start(Tag::CodeBlock(kind)) => {
            state.in_code_block = true;
            state.code_language = match kind {
                CodeBlockKind::Fenced(lang) => {
                    let lang = lang.into_string();
                    if lang.is_empty() { None } else { Some(lang) }
                }
                CodeBlockKind::Indented => None,
            };
            state.code_content.clear();
        }
        Event::End(TagEnd::CodeBlock) => {
            state.in_code_block = false;
            let content = std::mem::take(&mut state.code_content);
            let language = state.code_language.take();
            if !state.in_quote {
                blocks.push(Block::Code { language, content });
            }
            // stray inline state never leaks across a code block
            state.spans.clear();
        }

        // Lists
        Event::Start(Tag::List(first_item)) => {
            // A nested list closes out any text already collected for the
            // current item, so the sub-list attaches to the right place
            if let Some(list) = state.list_stack.last_mut() {
                let pending = std::mem::take(&mut state.spans);
                if !pending.is_empty() {
                    list.push_item(pending);
                }
            }
            state.list_stack.push(ListBuilder::new(first_item.is_some()));
        }
        Event::End(TagEnd::List(_)) => {
            let list = state
                .list_stack
                .pop()
                .expect("list end without an open list")
                .finish();
            if let Some(parent) = state.list_stack.last_mut() {
                // Nested: hang the finished list off the parent's last item
                if let Some(last_item) = parent.items.last_mut() {
                    last_item.nested = Some(Box::new(list));
                }
            } else if !state.in_quote {
                blocks.push(Block::List {
                    list,
                    level: state.list_stack.len(),
                });
            }
        }

        Event::Start(Tag::Item) => {
            let list = state
                .list_stack
                .last_mut()
                .expect("list item outside an open list");
            list.item_index += 1;
            list.checked = None;
        }
        Event::End(TagEnd::Item) => {
            // Tight items carry their inline content without a paragraph
            let remaining = std::mem::take(&mut state.spans);
            if !remaining.is_empty() {
                state
                    .list_stack
                    .last_mut()
                    .expect("list item outside an open list")
                    .push_item(remaining);
            }
        }

        // Task list checkboxes
        Event::TaskListMarker(checked) => {
            if let Some(list) = state.list_stack.last_mut() {
                list.checked = Some(checked);
            }
        }

        // Images drop their alt text and are emitted in visit order, so an
        // image inside a paragraph precedes the paragraph itself
        Event::Start(Tag::Image { dest_url, title, .. }) => {
            if !state.in_quote {
                blocks.push(Block::Image {
                    source: dest_url.into_string(),
                    title: if title.is_empty() {
                        None
                    } else {
                        Some(title.into_string())
                    },
                });
            }
            state.image_depth += 1;
        }

        // Block quotes: buffered paragraphs come back out as quote blocks,
        // anything else inside the quote is dropped
        Event::Start(Tag::BlockQuote(_)) => {
            state.in_quote = true;
        }
        Event::End(TagEnd::BlockQuote(_)) => {
            for quoted in std::mem::take(&mut state.quoted) {
                if let Block::Paragraph { content } = quoted {
                    blocks.push(Block::Quote { content });
                }
            }
            state.spans.clear();
            state.in_quote = false;
        }

        // Tables are parsed (so their syntax is consumed) but unsupported
        Event::Start(Tag::Table(_)) => {
            state.in_table = true;
        }

        // Horizontal rule
        Event::Rule => {
            if !state.in_quote {
                blocks.push(Block::ThematicBreak);
            }
        }

        // A soft break is plain text with no inherited styling
        Event::SoftBreak => {
            push_spans(&mut state.spans, " ", SpanAttributes::empty());
        }
        // Hard breaks carry no content in the block model
        Event::HardBreak => {}

        // Raw HTML is unsupported
        Event::Html(_) | Event::InlineHtml(_) => {}
        Event::Start(Tag::HtmlBlock) | Event::End(TagEnd::HtmlBlock) => {}

        _ => {}
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
