//! Rendering of a [`Document`] back into minimal, well-formed markup.
//!
//! Inline tags are emitted at exact character positions in the canonical
//! nesting order `<u><i><b>`; the parser accepts any order on input, so
//! re-serializing previously parsed content is behavior-identical rather
//! than byte-identical. Line boundaries are written as literal newlines,
//! with list structure interleaved around them.

use crate::document::{Bullet, Document, Style};
use crate::entity;
use crate::parser::find_tag_end;

/// Renders `doc` as tagged markup, the inverse of [`crate::parser::parse`]
/// up to behavioral equality.
pub fn serialize(doc: &Document) -> String {
    let chars: Vec<char> = doc.text.chars().collect();
    let mut out = String::with_capacity(doc.text.len() + 16);
    // open lists, innermost last; each entry has an open <li>
    let mut lists: Vec<Bullet> = Vec::new();
    let mut run_index = 0;
    let mut open: Option<(usize, Style)> = None;
    let mut line = 0;

    open_structure(&mut out, &mut lists, doc.line_bullets.get(&0).copied());

    for (pos, &c) in chars.iter().enumerate() {
        if let Some((end, style)) = open {
            if end == pos {
                push_close_tags(&mut out, style);
                open = None;
            }
        }
        if open.is_none() && run_index < doc.style_runs.len() {
            let run = doc.style_runs[run_index];
            if run.start == pos {
                push_open_tags(&mut out, run.style);
                open = Some((run.end(), run.style));
                run_index += 1;
            }
        }
        if c == '\n' {
            line += 1;
            let next = doc.line_bullets.get(&line).copied();
            close_structure(&mut out, &mut lists, next);
            out.push('\n');
            open_structure(&mut out, &mut lists, next);
        } else {
            entity::encode_char_into(c, &mut out);
        }
    }

    if let Some((_, style)) = open {
        push_close_tags(&mut out, style);
    }
    close_structure(&mut out, &mut lists, None);
    out
}

/// Strips every tag and decodes entities; bullets and item boundaries are
/// ignored. Used where only the plain content of a markup string matters.
pub fn get_untagged_text(markup: &str) -> String {
    let chars: Vec<char> = markup.chars().collect();
    let mut out = String::with_capacity(markup.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '<' {
            match find_tag_end(&chars, i) {
                Some(end) => i = end + 1,
                None => {
                    let rest: String = chars[i..].iter().collect();
                    out.push_str(&entity::decode(&rest));
                    break;
                }
            }
        } else {
            let start = i;
            while i < chars.len() && chars[i] != '<' {
                i += 1;
            }
            let segment: String = chars[start..i].iter().collect();
            out.push_str(&entity::decode(&segment));
        }
    }
    out
}

fn push_open_tags(out: &mut String, style: Style) {
    if style.underline {
        out.push_str("<u>");
    }
    if style.italic {
        out.push_str("<i>");
    }
    if style.bold {
        out.push_str("<b>");
    }
}

fn push_close_tags(out: &mut String, style: Style) {
    if style.bold {
        out.push_str("</b>");
    }
    if style.italic {
        out.push_str("</i>");
    }
    if style.underline {
        out.push_str("</u>");
    }
}

fn push_list_close(out: &mut String, list: Bullet) {
    out.push_str("</li></");
    out.push_str(list.kind.tag_name());
    out.push('>');
}

/// Closes list structure before a line break, leaving open whatever the
/// next line's bullet continues or nests into.
fn close_structure(out: &mut String, lists: &mut Vec<Bullet>, next: Option<Bullet>) {
    let Some(next) = next else {
        while let Some(list) = lists.pop() {
            push_list_close(out, list);
        }
        return;
    };
    while let Some(top) = lists.last().copied() {
        if top.indent_level > next.indent_level {
            // dedent: the inner list ends, its parent item stays open
            lists.pop();
            push_list_close(out, top);
            continue;
        }
        if top.indent_level == next.indent_level {
            if top.kind == next.kind {
                out.push_str("</li>");
            } else {
                // sibling list of a different kind replaces this one
                lists.pop();
                push_list_close(out, top);
            }
        }
        // top.indent_level < next.indent_level: the next line nests inside
        // the still-open item, nothing closes here
        break;
    }
}

/// Opens the `<li>` (and list, when one is not already open) for a line's
/// bullet after the line break has been written.
fn open_structure(out: &mut String, lists: &mut Vec<Bullet>, next: Option<Bullet>) {
    let Some(next) = next else { return };
    let continues = lists
        .last()
        .is_some_and(|top| top.indent_level == next.indent_level && top.kind == next.kind);
    if continues {
        out.push_str("<li>");
    } else {
        out.push('<');
        out.push_str(next.kind.tag_name());
        out.push_str(" indent=\"");
        out.push_str(&next.indent_level.to_string());
        out.push_str("\"><li>");
        lists.push(next);
    }
}
