use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;

/// One of the three toggleable inline styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
}

/// A combination of inline style flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic && !self.underline
    }

    pub fn contains(&self, flag: StyleFlag) -> bool {
        match flag {
            StyleFlag::Bold => self.bold,
            StyleFlag::Italic => self.italic,
            StyleFlag::Underline => self.underline,
        }
    }

    pub fn with(mut self, flag: StyleFlag) -> Style {
        match flag {
            StyleFlag::Bold => self.bold = true,
            StyleFlag::Italic => self.italic = true,
            StyleFlag::Underline => self.underline = true,
        }
        self
    }

    pub fn without(mut self, flag: StyleFlag) -> Style {
        match flag {
            StyleFlag::Bold => self.bold = false,
            StyleFlag::Italic => self.italic = false,
            StyleFlag::Underline => self.underline = false,
        }
        self
    }
}

impl From<StyleFlag> for Style {
    fn from(flag: StyleFlag) -> Style {
        Style::default().with(flag)
    }
}

/// A styled span of text. Offsets and lengths are in characters.
///
/// A run is only ever represented when at least one flag is set; absence of
/// a run over a span means "no styling".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRun {
    pub start: usize,
    pub length: usize,
    pub style: Style,
}

impl StyleRun {
    pub fn new(start: usize, length: usize, style: Style) -> Self {
        Self {
            start,
            length,
            style,
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// The marker kind of one list bullet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletKind {
    Number,
    LetterUpper,
    LetterLower,
    Dot,
}

impl BulletKind {
    /// The list tag this kind is written as on the wire.
    pub fn tag_name(&self) -> &'static str {
        match self {
            BulletKind::Number => "ol_number",
            BulletKind::LetterUpper => "ol_upper",
            BulletKind::LetterLower => "ol_lower",
            BulletKind::Dot => "ul",
        }
    }

    pub fn from_tag_name(name: &str) -> Option<BulletKind> {
        match name {
            "ol_number" => Some(BulletKind::Number),
            "ol_upper" => Some(BulletKind::LetterUpper),
            "ol_lower" => Some(BulletKind::LetterLower),
            "ul" => Some(BulletKind::Dot),
            _ => None,
        }
    }
}

/// The bullet assigned to one line of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bullet {
    pub kind: BulletKind,
    pub indent_level: usize,
}

impl Bullet {
    /// Rendering width of this bullet under the given configuration.
    pub fn render_width(&self, config: &EngineConfig) -> usize {
        config.bullet_width + self.indent_level * config.indent_step
    }
}

/// A violation of the style-run invariants, reported by [`Document::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("style run {0} has zero length")]
    EmptyRun(usize),
    #[error("style run {0} carries no style flags")]
    PlainRun(usize),
    #[error("style runs {0} and {1} overlap or are out of order")]
    Overlap(usize, usize),
    #[error("adjacent style runs {0} and {1} share the same style and must be merged")]
    NotMaximal(usize, usize),
    #[error("style run {0} extends past the end of the text")]
    OutOfBounds(usize),
}

/// Plain text plus non-overlapping style runs and per-line bullets.
///
/// Produced by the parser or reconstructed from a live surface; treated as
/// immutable input everywhere else. The serializer and the range algebra
/// read it, they never modify it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub style_runs: Vec<StyleRun>,
    pub line_bullets: BTreeMap<usize, Bullet>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_runs: Vec::new(),
            line_bullets: BTreeMap::new(),
        }
    }

    /// Length of the text in characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Audits the style-run invariants: runs sorted ascending, mutually
    /// non-overlapping, non-empty, within the text, never plain, and
    /// maximal (touching runs with identical style are merged).
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let len = self.char_len();
        let mut prev: Option<(usize, &StyleRun)> = None;
        for (i, run) in self.style_runs.iter().enumerate() {
            if run.length == 0 {
                return Err(InvariantViolation::EmptyRun(i));
            }
            if run.style.is_plain() {
                return Err(InvariantViolation::PlainRun(i));
            }
            if run.end() > len {
                return Err(InvariantViolation::OutOfBounds(i));
            }
            if let Some((prev_index, prev_run)) = prev {
                if run.start < prev_run.end() {
                    return Err(InvariantViolation::Overlap(prev_index, i));
                }
                if run.start == prev_run.end() && run.style == prev_run.style {
                    return Err(InvariantViolation::NotMaximal(prev_index, i));
                }
            }
            prev = Some((i, run));
        }
        Ok(())
    }
}
