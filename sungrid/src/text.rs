//! Cell text shaping: wrapping and clipping.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap text to a given width, respecting existing line breaks.
///
/// Word-wraps at whitespace when possible and hard-breaks words longer
/// than the width.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }

    let mut result = Vec::new();

    for line in text.lines() {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in words {
            let word_width = UnicodeWidthStr::width(word);
            let current_width = UnicodeWidthStr::width(current.as_str());

            if current.is_empty() {
                if word_width > width {
                    current = break_long_word(word, width, &mut result);
                } else {
                    current = word.to_string();
                }
            } else if current_width + 1 + word_width <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                result.push(current);
                if word_width > width {
                    current = break_long_word(word, width, &mut result);
                } else {
                    current = word.to_string();
                }
            }
        }
        if !current.is_empty() {
            result.push(current);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }
    result
}

/// Push full-width chunks of an over-long word, returning the remainder.
fn break_long_word(word: &str, width: usize, out: &mut Vec<String>) -> String {
    let mut chunk = String::new();
    let mut chunk_width = 0;
    for c in word.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if chunk_width + cw > width && !chunk.is_empty() {
            out.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += cw;
    }
    chunk
}

/// Drop the first `n` display cells of a string.
///
/// Used when a column is partially scrolled off the left edge. A wide
/// character straddling the cut is replaced by a space.
pub fn skip_cells(text: &str, n: usize) -> String {
    if n == 0 {
        return text.to_string();
    }
    let mut skipped = 0;
    let mut out = String::new();
    for c in text.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if skipped >= n {
            out.push(c);
        } else if skipped + cw > n {
            out.push(' ');
            skipped += cw;
        } else {
            skipped += cw;
        }
    }
    out
}

/// Truncate text to a width, appending an ellipsis when clipped.
pub fn clip_text(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let cw = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('…');
    out
}
