//! Reading box-drawn text back into `Column` trees.
//!
//! The text is laid out on a grid of display columns. A table is found by
//! following its borders; each row's separators are taken from the junctions
//! of the horizontal line above it and cross-checked against the line below
//! and against every text line of the row.

use super::{
    BOTTOM_LEFT, BOTTOM_RIGHT, CROSS, DOWN_TEE, HORIZONTAL, LEFT_TEE, PADDING, RIGHT_TEE, TOP_LEFT, TOP_RIGHT, UP_TEE,
    VERTICAL, is_reserved,
};
use crate::error::ParseError;
use crate::types::{Column, Endpoint, Row};
use log::{debug, trace};
use std::collections::BTreeSet;
use unicode_width::UnicodeWidthChar;

/// Parse report text produced by [`format`](super::format).
///
/// Leading and trailing blank lines are ignored; anything else outside the
/// outer table is an error.
pub fn parse(text: &str) -> Result<Column, ParseError> {
    let grid = Grid::new(text);
    let first = (0..grid.lines.len()).find(|&line| !grid.blank_from(line, 0)).ok_or(ParseError::Empty)?;

    let table = grid.table(first, 0, grid.lines.len(), usize::MAX)?;

    let end = first + table.height;
    for line in first..end {
        if !grid.blank_from(line, table.width) {
            return Err(ParseError::TrailingContent { line: line + 1 });
        }
    }
    if let Some(line) = (end..grid.lines.len()).find(|&line| !grid.blank_from(line, 0)) {
        return Err(ParseError::TrailingContent { line: line + 1 });
    }

    debug!("Parsed report table: {} lines, width {}", table.height, table.width);
    Ok(table.column)
}

/// Content of one display column
struct Glyph {
    /// The character, with any zero-width characters that follow it
    text: String,
    /// Second column of a double-width character
    tail: bool,
}

impl Glyph {
    fn is_blank(&self) -> bool {
        !self.tail && self.text == " "
    }
}

/// A parsed table and the area it occupies
struct Parsed {
    column: Column,
    height: usize,
    width: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Rule {
    Top,
    Middle,
    Bottom,
}

/// Separator positions announced by a horizontal line
struct Junctions {
    /// Boundaries of the row above (`┴`, `┼`)
    up: BTreeSet<usize>,
    /// Boundaries of the row below (`┬`, `┼`)
    down: BTreeSet<usize>,
}

struct Grid {
    lines: Vec<Vec<Glyph>>,
}

impl Grid {
    fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                let mut glyphs: Vec<Glyph> = Vec::new();
                for c in line.chars() {
                    let width = UnicodeWidthChar::width(c);
                    if width == Some(0)
                        && let Some(base) = glyphs.iter_mut().rev().find(|g| !g.tail)
                    {
                        base.text.push(c);
                        continue;
                    }
                    glyphs.push(Glyph { text: c.to_string(), tail: false });
                    if width == Some(2) {
                        glyphs.push(Glyph { text: String::new(), tail: true });
                    }
                }
                glyphs
            })
            .collect();
        Grid { lines }
    }

    fn glyph(&self, line: usize, column: usize) -> Option<&Glyph> {
        self.lines.get(line).and_then(|glyphs| glyphs.get(column))
    }

    /// The single character at a position; positions past the end of a line read as spaces
    fn char_at(&self, line: usize, column: usize) -> Option<char> {
        match self.glyph(line, column) {
            None => Some(' '),
            Some(glyph) if glyph.tail => None,
            Some(glyph) => {
                let mut chars = glyph.text.chars();
                let first = chars.next();
                if chars.next().is_some() { None } else { first }
            }
        }
    }

    fn is_blank(&self, line: usize, column: usize) -> bool {
        self.glyph(line, column).is_none_or(Glyph::is_blank)
    }

    fn blank_from(&self, line: usize, column: usize) -> bool {
        self.lines
            .get(line)
            .is_none_or(|glyphs| glyphs.iter().skip(column).all(Glyph::is_blank))
    }

    fn describe(&self, line: usize, column: usize) -> String {
        match self.glyph(line, column) {
            None => "end of line".to_string(),
            Some(glyph) if glyph.tail => "the second half of a wide character".to_string(),
            Some(glyph) => format!("{:?}", glyph.text),
        }
    }

    fn unexpected(&self, line: usize, column: usize, expected: &'static str) -> ParseError {
        ParseError::UnexpectedCharacter { line: line + 1, column, expected, found: self.describe(line, column) }
    }

    fn expect(&self, line: usize, column: usize, wanted: char, expected: &'static str) -> Result<(), ParseError> {
        if self.char_at(line, column) == Some(wanted) {
            Ok(())
        } else {
            Err(self.unexpected(line, column, expected))
        }
    }

    /// Parse the table whose top-left corner is at (`top`, `left`).
    ///
    /// The table must end above line `bottom_limit` and left of column `right_limit`.
    fn table(&self, top: usize, left: usize, bottom_limit: usize, right_limit: usize) -> Result<Parsed, ParseError> {
        self.expect(top, left, TOP_LEFT, "top-left corner")?;

        let mut right = left + 1;
        loop {
            if right >= right_limit {
                return Err(self.unexpected(top, right, "top-right corner inside the cell"));
            }
            match self.char_at(top, right) {
                Some(HORIZONTAL) | Some(DOWN_TEE) => right += 1,
                Some(TOP_RIGHT) => break,
                _ => return Err(self.unexpected(top, right, "top border")),
            }
        }

        // Horizontal lines down the left border
        let mut rules = vec![top];
        let mut line = top + 1;
        loop {
            if line >= bottom_limit {
                return Err(ParseError::Unterminated { line: top + 1 });
            }
            match self.char_at(line, left) {
                Some(VERTICAL) => {}
                Some(LEFT_TEE) => rules.push(line),
                Some(BOTTOM_LEFT) => {
                    rules.push(line);
                    break;
                }
                _ => return Err(self.unexpected(line, left, "left border")),
            }
            line += 1;
        }

        let last = rules.len() - 1;
        let junctions = rules
            .iter()
            .enumerate()
            .map(|(index, &line)| {
                let rule = match index {
                    0 => Rule::Top,
                    i if i == last => Rule::Bottom,
                    _ => Rule::Middle,
                };
                self.junctions(line, left, right, rule)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let width = right - left + 1;

        // Top border directly over the bottom border: a table without rows
        if rules == [top, top + 1] {
            if let Some(&column) = junctions[0].down.union(&junctions[1].up).next() {
                return Err(ParseError::Misaligned {
                    line: top + 1,
                    column,
                    detail: "a table without rows has no column separators".to_string(),
                });
            }
            return Ok(Parsed { column: Column::Composite(Vec::new()), height: 2, width });
        }

        let mut rows = Vec::with_capacity(last);
        // Separator offset of column i, for rows where column i is not the last
        let mut column_edges: Vec<usize> = Vec::new();

        for (index, pair) in rules.windows(2).enumerate() {
            let (upper, lower) = (pair[0], pair[1]);
            if lower == upper + 1 {
                return Err(self.unexpected(lower, left, "a row between horizontal lines"));
            }

            let boundaries = &junctions[index].down;
            let closing = &junctions[index + 1].up;
            if let Some(&column) = boundaries.symmetric_difference(closing).next() {
                return Err(ParseError::Misaligned {
                    line: lower + 1,
                    column,
                    detail: "junction does not match the row above".to_string(),
                });
            }

            for line in upper + 1..lower {
                self.expect(line, right, VERTICAL, "right border")?;
                if let Some(&column) = boundaries.iter().find(|&&c| self.char_at(line, c) != Some(VERTICAL)) {
                    return Err(ParseError::Misaligned {
                        line: line + 1,
                        column,
                        detail: "expected a column separator".to_string(),
                    });
                }
            }

            for (position, &edge) in boundaries.iter().enumerate() {
                match column_edges.get(position) {
                    Some(&expected) if expected != edge => {
                        return Err(ParseError::Misaligned {
                            line: upper + 2,
                            column: edge,
                            detail: format!("column {} ends at offset {} in an earlier row", position + 1, expected - left),
                        });
                    }
                    Some(_) => {}
                    None => column_edges.push(edge),
                }
            }

            let mut edges = Vec::with_capacity(boundaries.len() + 2);
            edges.push(left);
            edges.extend(boundaries.iter().copied());
            edges.push(right);

            let columns = edges
                .windows(2)
                .map(|cell| self.cell(upper + 1, lower, cell[0], cell[1]))
                .collect::<Result<Vec<_>, _>>()?;
            let row = Row::new(columns).map_err(|_| self.unexpected(upper + 1, left, "at least one cell"))?;
            rows.push(row);
        }

        let height = rules[last] - top + 1;
        trace!("Parsed table at {}:{}: {} rows, {}x{}", top + 1, left, rows.len(), width, height);
        Ok(Parsed { column: Column::Composite(rows), height, width })
    }

    /// Read the junctions of one horizontal line and check its ends
    fn junctions(&self, line: usize, left: usize, right: usize, rule: Rule) -> Result<Junctions, ParseError> {
        let (end, expected) = match rule {
            Rule::Top => (TOP_RIGHT, "top-right corner"),
            Rule::Middle => (RIGHT_TEE, "right end of a row separator"),
            Rule::Bottom => (BOTTOM_RIGHT, "bottom-right corner"),
        };
        self.expect(line, right, end, expected)?;

        let mut junctions = Junctions { up: BTreeSet::new(), down: BTreeSet::new() };
        for column in left + 1..right {
            let c = self.char_at(line, column);
            let (up, down) = match (rule, c) {
                (_, Some(HORIZONTAL)) => (false, false),
                (Rule::Top | Rule::Middle, Some(DOWN_TEE)) => (false, true),
                (Rule::Middle | Rule::Bottom, Some(UP_TEE)) => (true, false),
                (Rule::Middle, Some(CROSS)) => (true, true),
                _ => return Err(self.unexpected(line, column, "horizontal border")),
            };
            if up {
                junctions.up.insert(column);
            }
            if down {
                junctions.down.insert(column);
            }
        }
        Ok(junctions)
    }

    /// Parse the cell between separators at `left` and `right`, spanning lines `top..bottom`
    fn cell(&self, top: usize, bottom: usize, left: usize, right: usize) -> Result<Column, ParseError> {
        if right - left - 1 < 2 * PADDING {
            return Err(ParseError::Misaligned {
                line: top + 1,
                column: right,
                detail: "cell is too narrow for its padding".to_string(),
            });
        }
        let start = left + 1 + PADDING;
        let end = right - PADDING;

        for line in top..bottom {
            if let Some(column) = (left + 1..start).chain(end..right).find(|&c| !self.is_blank(line, c)) {
                return Err(self.unexpected(line, column, "cell padding"));
            }
        }

        if self.char_at(top, start) == Some(TOP_LEFT) {
            let nested = self.table(top, start, bottom, end)?;
            for line in top..bottom {
                for column in start..end {
                    let inside = line < top + nested.height && column < start + nested.width;
                    if !inside && !self.is_blank(line, column) {
                        return Err(self.unexpected(line, column, "blank space around a nested table"));
                    }
                }
            }
            return Ok(nested.column);
        }

        let mut text = String::new();
        for column in start..end {
            let Some(glyph) = self.glyph(top, column) else { break };
            if glyph.text.chars().any(is_reserved) {
                return Err(self.unexpected(top, column, "leaf text"));
            }
            text.push_str(&glyph.text);
        }

        for line in top + 1..bottom {
            if let Some(column) = (start..end).find(|&c| !self.is_blank(line, c)) {
                return Err(self.unexpected(line, column, "blank space below leaf text"));
            }
        }

        Ok(Column::Leaf(Endpoint::from(text.trim_end())))
    }
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;
