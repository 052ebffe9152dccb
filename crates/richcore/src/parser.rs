//! Scanner for the tagged markup language.
//!
//! The parser is a single forward pass with two explicit stacks: one for the
//! active inline styles and one for the active list contexts. Malformed
//! input never fails; it degrades to best-effort plain text.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::document::{Bullet, BulletKind, Document, Style, StyleFlag, StyleRun};
use crate::entity;
use crate::ranges;

lazy_static! {
    static ref INDENT_ATTR: Regex =
        Regex::new(r#"indent\s*=\s*"(\d+)""#).expect("Invalid INDENT_ATTR regex pattern");
}

/// The closed set of tags the grammar knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TagKind {
    Inline(StyleFlag),
    List(BulletKind),
    Item,
    Unknown(String),
}

fn classify(name: &str) -> TagKind {
    match name {
        "b" => TagKind::Inline(StyleFlag::Bold),
        "i" => TagKind::Inline(StyleFlag::Italic),
        "u" => TagKind::Inline(StyleFlag::Underline),
        "li" => TagKind::Item,
        other => match BulletKind::from_tag_name(other) {
            Some(kind) => TagKind::List(kind),
            None => TagKind::Unknown(other.to_string()),
        },
    }
}

#[derive(Debug)]
struct ListContext {
    kind: BulletKind,
    indent: usize,
}

/// Parses markup into a [`Document`]. Never fails; see the module notes on
/// degradation.
pub fn parse(markup: &str) -> Document {
    let mut parser = Parser::default();
    let chars: Vec<char> = markup.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '<' {
            match find_tag_end(&chars, i) {
                Some(end) => {
                    let body: String = chars[i + 1..end].iter().collect();
                    parser.handle_tag(&body);
                    i = end + 1;
                }
                None => {
                    // no closing '>' before end of input: literal trailing text
                    let rest: String = chars[i..].iter().collect();
                    parser.push_text(&rest);
                    break;
                }
            }
        } else {
            let start = i;
            while i < chars.len() && chars[i] != '<' {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            parser.push_text(&text);
        }
    }
    parser.finish()
}

pub(crate) fn find_tag_end(chars: &[char], open: usize) -> Option<usize> {
    chars[open + 1..]
        .iter()
        .position(|&c| c == '>')
        .map(|offset| open + 1 + offset)
}

#[derive(Default)]
struct Parser {
    out: String,
    out_chars: usize,
    line: usize,
    runs: Vec<StyleRun>,
    active: Style,
    run_start: usize,
    style_stack: Vec<StyleFlag>,
    list_stack: Vec<ListContext>,
    bullets: BTreeMap<usize, Bullet>,
}

impl Parser {
    fn push_text(&mut self, raw: &str) {
        for c in entity::decode(raw).chars() {
            self.push_char(c);
        }
    }

    fn push_char(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
        }
        self.out.push(c);
        self.out_chars += 1;
    }

    fn handle_tag(&mut self, body: &str) {
        let body = body.trim();
        let (closing, body) = match body.strip_prefix('/') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, body),
        };
        let name = body.split_whitespace().next().unwrap_or("");
        match classify(name) {
            TagKind::Inline(flag) => {
                if closing {
                    self.close_inline(flag);
                } else {
                    self.style_stack.push(flag);
                }
                self.refresh_style();
            }
            TagKind::List(kind) => {
                if closing {
                    self.close_list(kind);
                } else {
                    let indent = parse_indent(body);
                    self.list_stack.push(ListContext { kind, indent });
                }
            }
            TagKind::Item => {
                if !closing {
                    self.open_item();
                }
                // </li> is a no-op; item boundaries materialize at <li>
            }
            TagKind::Unknown(name) => {
                log::debug!("stripping unknown tag <{}{}>", if closing { "/" } else { "" }, name);
            }
        }
    }

    fn close_inline(&mut self, flag: StyleFlag) {
        match self.style_stack.iter().rposition(|&f| f == flag) {
            Some(index) => {
                self.style_stack.remove(index);
            }
            None => log::warn!("closing tag for {flag:?} has no matching open tag; ignoring"),
        }
    }

    fn close_list(&mut self, kind: BulletKind) {
        match self.list_stack.iter().rposition(|ctx| ctx.kind == kind) {
            Some(index) => {
                self.list_stack.truncate(index);
            }
            None => log::warn!("closing </{}> has no matching open list; ignoring", kind.tag_name()),
        }
    }

    /// Closes the current style run and opens a new one when the combined
    /// inline style changed.
    fn refresh_style(&mut self) {
        let combined = self
            .style_stack
            .iter()
            .fold(Style::default(), |style, &flag| style.with(flag));
        if combined == self.active {
            return;
        }
        self.close_segment();
        self.active = combined;
        self.run_start = self.out_chars;
    }

    fn close_segment(&mut self) {
        if !self.active.is_plain() && self.out_chars > self.run_start {
            self.runs.push(StyleRun::new(
                self.run_start,
                self.out_chars - self.run_start,
                self.active,
            ));
        }
    }

    fn open_item(&mut self) {
        let Some(context) = self.list_stack.last() else {
            log::warn!("<li> outside of any list; ignoring");
            return;
        };
        let bullet = Bullet {
            kind: context.kind,
            indent_level: context.indent,
        };
        // An item boundary implies a line break when the markup carries no
        // literal newline of its own.
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.push_char('\n');
        }
        self.bullets.insert(self.line, bullet);
    }

    fn finish(mut self) -> Document {
        self.close_segment();
        Document {
            text: self.out,
            style_runs: ranges::coalesce(self.runs),
            line_bullets: self.bullets,
        }
    }
}

fn parse_indent(body: &str) -> usize {
    let parsed = INDENT_ATTR
        .captures(body)
        .and_then(|captures| captures[1].parse().ok());
    match parsed {
        Some(indent) => indent,
        None => {
            log::warn!("list tag missing or malformed indent attribute: <{body}>");
            0
        }
    }
}
