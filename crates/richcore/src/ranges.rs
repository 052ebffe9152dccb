//! Interval algebra over style runs.
//!
//! Toggling a style over a selection never moves a boundary the selection
//! does not touch: runs are cut exactly at pre-existing run boundaries and
//! at the two selection boundaries, then neighbors with identical style are
//! merged back together.

use crate::document::{Style, StyleFlag, StyleRun};

/// Computes the style-run list after enabling or disabling `flag` over
/// `[sel_start, sel_start + sel_len)`.
///
/// `existing` must satisfy the document invariants (sorted, non-overlapping,
/// maximal); the result is a fresh list satisfying them as well. Enabling
/// turns unstyled gaps inside the selection into runs carrying just `flag`;
/// disabling deletes sub-intervals whose style becomes empty. A zero-length
/// selection returns a normalized copy of the input.
pub fn modify_ranges(
    flag: StyleFlag,
    sel_start: usize,
    sel_len: usize,
    existing: &[StyleRun],
    enable: bool,
) -> Vec<StyleRun> {
    let sel_end = sel_start + sel_len;
    let mut pieces: Vec<StyleRun> = Vec::with_capacity(existing.len() + 2);

    for run in existing {
        let overlap_start = run.start.max(sel_start);
        let overlap_end = run.end().min(sel_end);
        if overlap_start >= overlap_end {
            pieces.push(*run);
            continue;
        }
        if run.start < overlap_start {
            pieces.push(StyleRun::new(run.start, overlap_start - run.start, run.style));
        }
        let new_style = if enable {
            run.style.with(flag)
        } else {
            run.style.without(flag)
        };
        if !new_style.is_plain() {
            pieces.push(StyleRun::new(
                overlap_start,
                overlap_end - overlap_start,
                new_style,
            ));
        }
        if overlap_end < run.end() {
            pieces.push(StyleRun::new(
                overlap_end,
                run.end() - overlap_end,
                run.style,
            ));
        }
    }

    if enable && sel_len > 0 {
        // unstyled gaps inside the selection become singleton runs
        let mut cursor = sel_start;
        for run in existing {
            if run.end() <= sel_start {
                continue;
            }
            if run.start >= sel_end {
                break;
            }
            if run.start > cursor {
                pieces.push(StyleRun::new(cursor, run.start - cursor, Style::from(flag)));
            }
            cursor = cursor.max(run.end());
        }
        if cursor < sel_end {
            pieces.push(StyleRun::new(cursor, sel_end - cursor, Style::from(flag)));
        }
    }

    pieces.sort_by_key(|run| run.start);
    coalesce(pieces)
}

/// Merges touching runs with identical style. Input must be sorted by start.
pub fn coalesce(runs: Vec<StyleRun>) -> Vec<StyleRun> {
    let mut out: Vec<StyleRun> = Vec::with_capacity(runs.len());
    for run in runs {
        if run.length == 0 {
            continue;
        }
        if let Some(last) = out.last_mut() {
            if last.end() == run.start && last.style == run.style {
                last.length += run.length;
                continue;
            }
        }
        out.push(run);
    }
    out
}
