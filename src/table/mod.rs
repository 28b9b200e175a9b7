//! Box-drawn table text - rendering and reading back report trees.
//!
//! The formatter and the parser share the fixed character set and width
//! rules defined here; neither ever looks at queries.
//!
//! # Grammar
//!
//! ```text
//! ┌──────────────┬────────────┐
//! │ Date         │ 2024-03-01 │
//! ├──────────────┼────────────┤
//! │ Readings     │ ┌──────┐   │
//! │              │ │ 12.5 │   │
//! │              │ ├──────┤   │
//! │              │ │ 13.0 │   │
//! │              │ └──────┘   │
//! └──────────────┴────────────┘
//! ```
//!
//! - every cell has one space of padding on each side
//! - column `i` has the same width in every row where it is not the last column
//! - the last column of a row stretches to the right border
//! - a row is as tall as its tallest cell; cells are top-aligned
//! - junctions on horizontal lines show where boundaries meet them:
//!   `┬` below only, `┴` above only, `┼` both
//! - an empty composite is `┌┐` over `└┘`
//!
//! # Module Organization
//!
//! - `format` - `Column` tree to text
//! - `parse` - text to `Column` tree

mod format;
mod parse;

pub use format::{format, format_lines};
pub use parse::parse;

use unicode_width::UnicodeWidthChar;

pub const TOP_LEFT: char = '┌';
pub const TOP_RIGHT: char = '┐';
pub const BOTTOM_LEFT: char = '└';
pub const BOTTOM_RIGHT: char = '┘';
pub const HORIZONTAL: char = '─';
pub const VERTICAL: char = '│';
pub const LEFT_TEE: char = '├';
pub const RIGHT_TEE: char = '┤';
pub const DOWN_TEE: char = '┬';
pub const UP_TEE: char = '┴';
pub const CROSS: char = '┼';

/// Every character with a meaning in the grammar
pub const GRAMMAR_CHARS: [char; 11] = [
    TOP_LEFT, TOP_RIGHT, BOTTOM_LEFT, BOTTOM_RIGHT, HORIZONTAL, VERTICAL, LEFT_TEE, RIGHT_TEE, DOWN_TEE, UP_TEE, CROSS,
];

/// Spaces between a cell's separators and its content, on each side
pub const PADDING: usize = 1;

/// Characters that may not appear in leaf text
pub fn is_reserved(c: char) -> bool {
    GRAMMAR_CHARS.contains(&c) || c.is_control()
}

/// Display columns taken by one character.
///
/// Zero-width characters attach to the preceding glyph. Characters without
/// a defined width count as one column.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(1)
}

/// Display width of a string, summed per character so that the formatter
/// and the parser agree on every column position
pub fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Pad with spaces on the right up to `width` display columns
pub fn pad_to(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_display_width_unicode() {
        assert_eq!(display_width("│"), 1);
        assert_eq!(display_width("📦"), 2);
        assert_eq!(display_width("e\u{301}"), 1);
    }

    #[test]
    fn test_pad_to() {
        assert_eq!(pad_to("hi", 5), "hi   ");
        assert_eq!(pad_to("hello", 3), "hello");
        assert_eq!(display_width(&pad_to("📦", 4)), 4);
    }

    #[test]
    fn test_reserved_characters() {
        assert!(is_reserved('│'));
        assert!(is_reserved('\n'));
        assert!(is_reserved('\t'));
        assert!(!is_reserved('|'));
        assert!(!is_reserved('-'));
    }
}
