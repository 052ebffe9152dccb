//! The formatting façade and the host-surface seam.
//!
//! The engine never owns a live buffer; it reads a snapshot from a
//! [`HostSurface`] and hands back fresh data for the host to apply. The
//! host is responsible for serializing calls (one UI thread); nothing here
//! keeps state between calls.

use std::collections::BTreeMap;

use crate::document::{Bullet, Document, StyleFlag, StyleRun};
use crate::ranges;
use crate::word;

/// The capability set of an external editable text surface.
///
/// All offsets are character offsets into the surface's buffer.
pub trait HostSurface {
    fn text(&self) -> String;
    /// Current selection as `(start, length)`; a zero length means a pure caret.
    fn selection(&self) -> (usize, usize);
    fn caret(&self) -> usize;
    fn line_of_offset(&self, offset: usize) -> usize;
    fn style_runs(&self) -> Vec<StyleRun>;
    fn set_style_runs(&mut self, runs: Vec<StyleRun>);
    fn line_bullet(&self, line: usize) -> Option<Bullet>;
    /// Assigns `bullet` to `count` consecutive lines starting at `line`;
    /// `None` clears them.
    fn set_line_bullet(&mut self, line: usize, count: usize, bullet: Option<Bullet>);
}

/// Toggles inline styles over the surface's selection or the word under
/// the caret.
#[derive(Debug, Default)]
pub struct StyleEditor;

impl StyleEditor {
    pub fn new() -> Self {
        Self
    }

    /// Applies or removes `flag` over the current selection. An empty
    /// selection is substituted by the word at the caret; an empty line is
    /// a no-op.
    pub fn format(&self, surface: &mut dyn HostSurface, flag: StyleFlag, enable: bool) {
        let (mut sel_start, mut sel_len) = surface.selection();
        if sel_len == 0 {
            let caret = surface.caret();
            let text = surface.text();
            let line_index = surface.line_of_offset(caret);
            let (line_start, line) = line_at(&text, line_index);
            let (word_start, word_len) = word::select_word(caret, line_start, &line);
            if word_len == 0 {
                return;
            }
            sel_start = word_start;
            sel_len = word_len;
        }
        let runs = surface.style_runs();
        let new_runs = ranges::modify_ranges(flag, sel_start, sel_len, &runs, enable);
        surface.set_style_runs(new_runs);
    }
}

/// Reconstructs a [`Document`] from a live surface.
pub fn snapshot(surface: &dyn HostSurface) -> Document {
    let text = surface.text();
    let line_count = text.split('\n').count();
    let mut line_bullets = BTreeMap::new();
    for line in 0..line_count {
        if let Some(bullet) = surface.line_bullet(line) {
            line_bullets.insert(line, bullet);
        }
    }
    Document {
        text,
        style_runs: surface.style_runs(),
        line_bullets,
    }
}

/// Pushes a document's style runs and bullets onto a surface whose buffer
/// already holds the document's text. The text itself is owned by the host
/// and is not written here.
pub fn apply_document(surface: &mut dyn HostSurface, doc: &Document) {
    surface.set_style_runs(doc.style_runs.clone());
    surface.set_line_bullet(0, doc.line_count(), None);
    for (&line, &bullet) in &doc.line_bullets {
        surface.set_line_bullet(line, 1, Some(bullet));
    }
}

/// Char offset of a line's first character plus the line's text, without
/// the delimiter.
fn line_at(text: &str, line_index: usize) -> (usize, String) {
    let mut start = 0;
    for (index, segment) in text.split('\n').enumerate() {
        if index == line_index {
            return (start, segment.to_string());
        }
        start += segment.chars().count() + 1;
    }
    (start, String::new())
}

/// In-memory [`HostSurface`], used headless and by the engine tests.
#[derive(Debug, Default, Clone)]
pub struct BufferSurface {
    text: String,
    selection: (usize, usize),
    caret: usize,
    runs: Vec<StyleRun>,
    bullets: BTreeMap<usize, Bullet>,
}

impl BufferSurface {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn select(&mut self, start: usize, length: usize) {
        self.selection = (start, length);
        self.caret = start + length;
    }

    pub fn place_caret(&mut self, position: usize) {
        self.selection = (position, 0);
        self.caret = position;
    }
}

impl HostSurface for BufferSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        self.text
            .chars()
            .take(offset)
            .filter(|&c| c == '\n')
            .count()
    }

    fn style_runs(&self) -> Vec<StyleRun> {
        self.runs.clone()
    }

    fn set_style_runs(&mut self, runs: Vec<StyleRun>) {
        self.runs = runs;
    }

    fn line_bullet(&self, line: usize) -> Option<Bullet> {
        self.bullets.get(&line).copied()
    }

    fn set_line_bullet(&mut self, line: usize, count: usize, bullet: Option<Bullet>) {
        for index in line..line + count {
            match bullet {
                Some(bullet) => {
                    self.bullets.insert(index, bullet);
                }
                None => {
                    self.bullets.remove(&index);
                }
            }
        }
    }
}
