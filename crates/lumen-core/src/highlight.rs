//! Syntax tokenizers for the document viewer
//!
//! The session never calls these. A frontend hands the viewer's content and
//! language to a [`Tokenizer`] and paints the spans however it likes.

use serde::Serialize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Default syntect theme
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Foreground used by [`PlainTokenizer`]
pub const PLAIN_FG: (u8, u8, u8) = (0xc0, 0xc5, 0xce);

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledSpan {
    pub text: String,

    /// RGB foreground
    pub fg: (u8, u8, u8),

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: PLAIN_FG,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Splits text into styled spans, one vector per line
pub trait Tokenizer: Send {
    /// `language` is a loose tag such as "python" or "rs"
    fn tokenize(&self, text: &str, language: &str) -> Vec<Vec<StyledSpan>>;
}

/// Tokenizer that applies no highlighting at all
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, text: &str, _language: &str) -> Vec<Vec<StyledSpan>> {
        text.lines()
            .map(|line| {
                if line.is_empty() {
                    Vec::new()
                } else {
                    vec![StyledSpan::plain(line)]
                }
            })
            .collect()
    }
}

/// Tokenizer backed by syntect's bundled grammars and themes
pub struct SyntectTokenizer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectTokenizer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: DEFAULT_THEME.to_string(),
        }
    }

    /// Name of the grammar a language tag resolves to
    pub fn syntax_name(&self, language: &str) -> &str {
        self.find_syntax(language).name.as_str()
    }

    fn find_syntax(&self, language: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }
}

impl Tokenizer for SyntectTokenizer {
    fn tokenize(&self, text: &str, language: &str) -> Vec<Vec<StyledSpan>> {
        let Some(theme) = self.theme() else {
            return PlainTokenizer.tokenize(text, language);
        };

        let mut highlighter = HighlightLines::new(self.find_syntax(language), theme);
        let mut result = Vec::new();

        for line in text.lines() {
            // syntect parses line by line and expects the terminator
            let with_newline = format!("{}\n", line);
            let spans = match highlighter.highlight_line(&with_newline, &self.syntax_set) {
                Ok(ranges) => ranges
                    .into_iter()
                    .map(|(style, piece)| to_span(style, piece.trim_end_matches('\n')))
                    .filter(|span| !span.text.is_empty())
                    .collect(),
                Err(err) => {
                    tracing::debug!(error = %err, "highlight failed, falling back to plain");
                    PlainTokenizer.tokenize(line, language).into_iter().flatten().collect()
                }
            };
            result.push(spans);
        }

        result
    }
}

fn to_span(style: Style, text: &str) -> StyledSpan {
    StyledSpan {
        text: text.to_string(),
        fg: (style.foreground.r, style.foreground.g, style.foreground.b),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}
