//! Caret-to-word resolution for "format the word under the cursor".

/// True for the characters that make up a word: letters, digits, underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Finds the word enclosing `position` within one line of text.
///
/// `position` and `line_start` are absolute character offsets; `line` is the
/// line's text without its delimiter. Returns the absolute `(start, length)`
/// of the enclosing word, or a length-1 selection of the adjacent character
/// when that character is punctuation or whitespace. When `position` sits at
/// the end of the line the character immediately before it is probed instead.
///
/// An empty line yields `(line_start, 0)`; callers treat a zero-length
/// result as "nothing to select".
pub fn select_word(position: usize, line_start: usize, line: &str) -> (usize, usize) {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return (line_start, 0);
    }

    let col = position.saturating_sub(line_start);
    let index = if col >= chars.len() {
        chars.len() - 1
    } else {
        col
    };

    if !is_word_char(chars[index]) {
        return (line_start + index, 1);
    }

    let mut start = index;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = index + 1;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    (line_start + start, end - start)
}
