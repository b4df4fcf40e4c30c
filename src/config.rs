use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paragraph: ParagraphConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ParagraphConfig {
    /// Number of en-space markers inserted before every top-level paragraph.
    /// 0 disables first-line indentation.
    pub indent: usize,
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// The config bundled with the crate, validated by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(include_str!("default_config.toml"))
            .expect("default_config.toml is validated at build time")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_default_disables_indentation() {
        let config = Config::compiled_default();
        assert_eq!(config.paragraph.indent, 0);
    }

    #[test]
    fn parses_partial_config() {
        let config: Config = toml::from_str("[paragraph]\nindent = 2").unwrap();
        assert_eq!(config.paragraph.indent, 2);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.paragraph.indent, 0);
    }
}
