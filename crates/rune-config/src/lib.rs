//! rune-reorder configuration
//!
//! Settings come from `rune.toml` in the current directory, with
//! environment variables taking precedence over the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RuneConfig {
    /// Bidi resolution and line breaking
    pub bidi: BidiConfig,
    /// What the binary prints
    pub output: OutputConfig,
}

/// How lines are wrapped when a line width is set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WrapModeConfig {
    /// Break at mandatory breaks only
    #[default]
    None,
    /// Break between words, falling back to graphemes for long words
    Word,
    /// Break between any two graphemes
    All,
}

impl WrapModeConfig {
    /// Parse the names used on the command line and in the environment.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" | "no-wrap" => Some(Self::None),
            "word" | "break-word" => Some(Self::Word),
            "all" | "break-all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Bidi configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BidiConfig {
    /// Paragraph embedding level (0 or 1); detected from the text when unset
    pub paragraph_level: Option<u8>,
    /// Emit mirrored glyphs for RTL brackets (default: true)
    pub mirroring: bool,
    /// Maximum line width in code points
    pub line_width: Option<usize>,
    /// Wrapping strategy used with `line_width`
    pub wrap: WrapModeConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Print resolved levels instead of visual text
    pub show_levels: bool,
    /// Mark line break opportunities in the output
    pub mark_breaks: bool,
}

impl Default for BidiConfig {
    fn default() -> Self {
        Self {
            paragraph_level: None,
            mirroring: true,
            line_width: None,
            wrap: WrapModeConfig::None,
        }
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl RuneConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (rune.toml in the current directory)
    /// or return default configuration if file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file("rune.toml").unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    fn merge_with(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Bidi settings
        if let Some(val) = var("RUNE_BIDI_PARAGRAPH_LEVEL") {
            match val.trim() {
                "" | "auto" => self.bidi.paragraph_level = None,
                level => {
                    if let Ok(level @ 0..=1) = level.parse::<u8>() {
                        self.bidi.paragraph_level = Some(level);
                    }
                }
            }
        }
        if let Some(val) = var("RUNE_BIDI_MIRRORING") {
            self.bidi.mirroring = parse_flag(&val);
        }
        if let Some(val) = var("RUNE_BIDI_LINE_WIDTH") {
            if let Ok(width) = val.parse::<usize>() {
                self.bidi.line_width = Some(width);
            }
        }
        if let Some(wrap) = var("RUNE_BIDI_WRAP").as_deref().and_then(WrapModeConfig::parse) {
            self.bidi.wrap = wrap;
        }

        // Output settings
        if let Some(val) = var("RUNE_BIDI_SHOW_LEVELS") {
            self.output.show_levels = parse_flag(&val);
        }
        if let Some(val) = var("RUNE_BIDI_MARK_BREAKS") {
            self.output.mark_breaks = parse_flag(&val);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
