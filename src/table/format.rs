//! Rendering of `Column` trees into box-drawn text.
//!
//! Rendering is bottom-up: every column becomes a `Block` of equally wide
//! lines, and a composite lays out its children's blocks into a grid.

use super::{
    BOTTOM_LEFT, BOTTOM_RIGHT, CROSS, DOWN_TEE, HORIZONTAL, LEFT_TEE, PADDING, RIGHT_TEE, TOP_LEFT, TOP_RIGHT, UP_TEE,
    VERTICAL, char_width, display_width, is_reserved, pad_to,
};
use crate::error::FormatError;
use crate::types::{Column, Row};
use log::{debug, trace};

/// Rendered lines of one column, all `width` display columns wide
struct Block {
    lines: Vec<String>,
    width: usize,
}

impl Block {
    fn height(&self) -> usize {
        self.lines.len()
    }

    /// Line `index`, or an empty line below the block's own content
    fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Render a report tree as text, one `\n`-terminated line per table line.
///
/// The root must be a composite: a bare leaf has no border to parse it back from.
pub fn format(column: &Column) -> Result<String, FormatError> {
    let lines = format_lines(column)?;
    let mut output = String::new();
    for line in &lines {
        output.push_str(line);
        output.push('\n');
    }
    debug!("Formatted report: {} lines", lines.len());
    Ok(output)
}

/// Render a report tree into its lines, without line terminators
pub fn format_lines(column: &Column) -> Result<Vec<String>, FormatError> {
    match column {
        Column::Leaf(endpoint) => Err(FormatError::LeafRoot { text: endpoint.as_str().to_string() }),
        Column::Composite(rows) => Ok(render_table(rows)?.lines),
    }
}

fn render(column: &Column) -> Result<Block, FormatError> {
    match column {
        Column::Leaf(endpoint) => render_leaf(endpoint.as_str()),
        Column::Composite(rows) => render_table(rows),
    }
}

fn render_leaf(text: &str) -> Result<Block, FormatError> {
    // Trailing whitespace is indistinguishable from cell padding
    let text = text.trim_end();

    // A leading zero-width character would merge into the padding space
    let leading_zero_width = text.chars().next().filter(|c| char_width(*c) == 0);
    if let Some(found) = text.chars().find(|c| is_reserved(*c)).or(leading_zero_width) {
        return Err(FormatError::ReservedCharacter { text: text.to_string(), found });
    }

    Ok(Block { width: display_width(text), lines: vec![text.to_string()] })
}

fn render_table(rows: &[Row]) -> Result<Block, FormatError> {
    if rows.is_empty() {
        return Ok(Block {
            lines: vec![format!("{}{}", TOP_LEFT, TOP_RIGHT), format!("{}{}", BOTTOM_LEFT, BOTTOM_RIGHT)],
            width: 2,
        });
    }

    let cells = rows
        .iter()
        .map(|row| row.columns().iter().map(render).collect::<Result<Vec<_>, _>>())
        .collect::<Result<Vec<_>, _>>()?;
    let layout = Layout::new(&cells);
    trace!("Table layout: {} rows, inner width {}", cells.len(), layout.inner);

    let mut lines = vec![layout.rule(Rule::Top, None, Some(0))];
    for (index, row) in cells.iter().enumerate() {
        let height = row.iter().map(Block::height).max().unwrap_or(1);
        for line in 0..height {
            lines.push(layout.content_line(index, row, line));
        }
        if index + 1 < cells.len() {
            lines.push(layout.rule(Rule::Middle, Some(index), Some(index + 1)));
        } else {
            lines.push(layout.rule(Rule::Bottom, Some(index), None));
        }
    }

    Ok(Block { lines, width: layout.inner + 2 })
}

#[derive(Clone, Copy)]
enum Rule {
    Top,
    Middle,
    Bottom,
}

/// Cell spans and separator positions for one table
struct Layout {
    /// Per row, the width of each cell between its separators (padding included)
    spans: Vec<Vec<usize>>,
    /// Per row, offsets of the separators between its cells (left border is offset 0)
    boundaries: Vec<Vec<usize>>,
    /// Width between the left and right borders
    inner: usize,
}

impl Layout {
    fn new(cells: &[Vec<Block>]) -> Self {
        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in cells {
            for (index, block) in row.iter().enumerate() {
                widths[index] = widths[index].max(block.width + 2 * PADDING);
            }
        }

        // Cells plus the separators between them
        let natural = |len: usize| widths[..len].iter().sum::<usize>() + len.saturating_sub(1);
        let inner = cells.iter().map(|row| natural(row.len())).max().unwrap_or(0);

        let mut spans = Vec::with_capacity(cells.len());
        let mut boundaries = Vec::with_capacity(cells.len());
        for row in cells {
            let fixed = row.len().saturating_sub(1);
            let mut row_spans = widths[..fixed].to_vec();
            // The last cell takes whatever the others and their separators leave
            let used: usize = row_spans.iter().map(|span| span + 1).sum();
            row_spans.push(inner - used);

            let mut offset = 0;
            let row_boundaries = row_spans[..fixed]
                .iter()
                .map(|span| {
                    offset += 1 + span;
                    offset
                })
                .collect();

            spans.push(row_spans);
            boundaries.push(row_boundaries);
        }

        Layout { spans, boundaries, inner }
    }

    /// A horizontal line with junctions for the rows above and below it
    fn rule(&self, rule: Rule, above: Option<usize>, below: Option<usize>) -> String {
        let (left, right) = match rule {
            Rule::Top => (TOP_LEFT, TOP_RIGHT),
            Rule::Middle => (LEFT_TEE, RIGHT_TEE),
            Rule::Bottom => (BOTTOM_LEFT, BOTTOM_RIGHT),
        };
        let has_boundary = |row: Option<usize>, offset: usize| row.is_some_and(|r| self.boundaries[r].contains(&offset));

        let mut line = String::new();
        line.push(left);
        for offset in 1..=self.inner {
            line.push(match (has_boundary(above, offset), has_boundary(below, offset)) {
                (true, true) => CROSS,
                (true, false) => UP_TEE,
                (false, true) => DOWN_TEE,
                (false, false) => HORIZONTAL,
            });
        }
        line.push(right);
        line
    }

    /// Text line `line` of row `row`
    fn content_line(&self, row: usize, blocks: &[Block], line: usize) -> String {
        let padding = " ".repeat(PADDING);
        let mut output = String::new();
        output.push(VERTICAL);
        for (block, span) in blocks.iter().zip(&self.spans[row]) {
            output.push_str(&padding);
            output.push_str(&pad_to(block.line(line), span - 2 * PADDING));
            output.push_str(&padding);
            output.push(VERTICAL);
        }
        output
    }
}

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;
