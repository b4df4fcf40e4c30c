mod block;
mod config;
mod money;
mod parser;

pub use block::{Block, List, ListItem, Marker, Span, SpanAttributes};
pub use config::{Config, ParagraphConfig};
pub use money::{Split, SplitKind, amount_value, split_amounts};

/// Parse markdown text into a vector of blocks using the default config.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::parse(markdown, &Config::compiled_default())
}

/// Parse markdown text into a vector of blocks.
pub fn parse_with_config(markdown: &str, config: &Config) -> Vec<Block> {
    parser::parse(markdown, config)
}
