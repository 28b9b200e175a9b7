/// Tests for reading tables back
///
/// Well-formed text must come back as the exact tree that produced it;
/// malformed text must be rejected with a located error.

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::table::*;
    use crate::types::*;

    fn text(lines: &[&str]) -> String {
        lines.iter().map(|l| format!("{}\n", l)).collect()
    }

    fn leaves(values: &[&str]) -> Row {
        Row::leaves(values.iter().copied()).unwrap()
    }

    fn assert_round_trip(tree: &Column) {
        let rendered = format(tree).unwrap();
        let parsed = parse(&rendered).unwrap_or_else(|e| panic!("{}\n{}", e, rendered));
        assert_eq!(&parsed, tree);
        assert_eq!(format(&parsed).unwrap(), rendered);
    }

    #[test]
    fn test_parse_header_rows_with_nested_body() {
        let input = text(&[
            "┌──────────────┬────────────┐",
            "│ Date         │ 2024-03-01 │",
            "├──────────────┼────────────┤",
            "│ Tested by    │ Alice      │",
            "├──────────────┼────────────┤",
            "│ Final result │ PASS       │",
            "├──────────────┼────────────┤",
            "│ Readings     │ ┌──────┐   │",
            "│              │ │ 12.5 │   │",
            "│              │ ├──────┤   │",
            "│              │ │ 13.0 │   │",
            "│              │ └──────┘   │",
            "└──────────────┴────────────┘",
        ]);
        let readings = Column::composite(vec![leaves(&["12.5"]), leaves(&["13.0"])]);
        let expected = Column::composite(vec![
            leaves(&["Date", "2024-03-01"]),
            leaves(&["Tested by", "Alice"]),
            leaves(&["Final result", "PASS"]),
            Row::new(vec![Column::leaf("Readings"), readings]).unwrap(),
        ]);
        assert_eq!(parse(&input).unwrap(), expected);
    }

    #[test]
    fn test_round_trip_uneven_rows() {
        assert_round_trip(&Column::composite(vec![leaves(&["a", "bb", "c"]), leaves(&["dddddddddd"])]));
        assert_round_trip(&Column::composite(vec![leaves(&["k"]), leaves(&["a", "b"]), leaves(&["long value"])]));
    }

    #[test]
    fn test_round_trip_deep_nesting() {
        let inner = Column::composite(vec![leaves(&["1"]), leaves(&["2"]), leaves(&["3"])]);
        let middle = Column::composite(vec![Row::new(vec![Column::leaf("x"), inner]).unwrap(), leaves(&["y"])]);
        let tree = Column::composite(vec![
            Row::new(vec![Column::leaf("id"), middle, Column::leaf("tail")]).unwrap(),
            leaves(&["only"]),
            Row::new(vec![Column::composite(vec![]), Column::leaf("after empty")]).unwrap(),
        ]);
        assert_round_trip(&tree);
    }

    #[test]
    fn test_round_trip_side_by_side_nested_tables() {
        let short = Column::composite(vec![leaves(&["x"])]);
        let tall = Column::composite(vec![leaves(&["y", "w"]), leaves(&["z"])]);
        assert_round_trip(&Column::composite(vec![
            Row::new(vec![short, Column::leaf(""), tall]).unwrap(),
            leaves(&["end"]),
        ]));
    }

    #[test]
    fn test_round_trip_special_text() {
        assert_round_trip(&Column::composite(vec![
            leaves(&["📦 crate", "naïve"]),
            leaves(&["  indented", "e\u{301}"]),
            leaves(&["", "a | b - c"]),
        ]));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(parse("┌┐\n└┘\n").unwrap(), Column::composite(vec![]));
    }

    #[test]
    fn test_tolerates_missing_final_newline_and_crlf() {
        let expected = Column::composite(vec![leaves(&["x"])]);
        assert_eq!(parse("┌───┐\n│ x │\n└───┘").unwrap(), expected);
        assert_eq!(parse("┌───┐\r\n│ x │\r\n└───┘\r\n").unwrap(), expected);
        assert_eq!(parse("\n\n┌───┐\n│ x │\n└───┘\n\n").unwrap(), expected);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("  \n\n   \n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_separator_one_column_left_is_rejected() {
        let input = text(&[
            "┌─────┬─────┐",
            "│ a   │ b   │",
            "├─────┼─────┤",
            "│ c  │ d    │",
            "└─────┴─────┘",
        ]);
        match parse(&input) {
            Err(ParseError::Misaligned { line, column, .. }) => assert_eq!((line, column), (4, 6)),
            other => panic!("expected a misalignment, got {:?}", other),
        }
    }

    #[test]
    fn test_column_moving_between_rows_is_rejected() {
        let input = text(&["┌───┬─────┐", "│ a │ b   │", "├───┴─┬───┤", "│ c   │ d │", "└─────┴───┘"]);
        match parse(&input) {
            Err(ParseError::Misaligned { line, column, .. }) => assert_eq!((line, column), (4, 6)),
            other => panic!("expected a misalignment, got {:?}", other),
        }
    }

    #[test]
    fn test_junction_without_separator_is_rejected() {
        let input = text(&["┌───┬───┐", "│ a │ b │", "└───────┘"]);
        assert!(matches!(parse(&input), Err(ParseError::Misaligned { line: 3, column: 4, .. })));
    }

    #[test]
    fn test_missing_right_border() {
        let input = text(&["┌───┐", "│ x  ", "└───┘"]);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { line: 2, column: 4, .. }), "{:?}", err);
    }

    #[test]
    fn test_unterminated_table() {
        let input = text(&["┌───┐", "│ x │"]);
        assert_eq!(parse(&input), Err(ParseError::Unterminated { line: 1 }));
    }

    #[test]
    fn test_text_before_table_is_rejected() {
        let err = parse("title\n┌───┐\n│ x │\n└───┘\n").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { line: 1, column: 0, .. }), "{:?}", err);
    }

    #[test]
    fn test_trailing_content() {
        assert_eq!(parse("┌───┐\n│ x │\n└───┘\nnotes\n"), Err(ParseError::TrailingContent { line: 4 }));
        assert_eq!(parse("┌───┐\n│ x │ extra\n└───┘\n"), Err(ParseError::TrailingContent { line: 2 }));
    }

    #[test]
    fn test_grammar_character_inside_leaf() {
        let err = parse(&text(&["┌─────┐", "│ a┼b │", "└─────┘"])).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { line: 2, column: 3, .. }), "{:?}", err);
    }

    #[test]
    fn test_leaf_text_must_fit_on_one_line() {
        let input = text(&[
            "┌───┬───────┐",
            "│ a │ ┌───┐ │",
            "│ b │ │ x │ │",
            "│   │ └───┘ │",
            "└───┴───────┘",
        ]);
        let err = parse(&input).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { line: 3, column: 2, .. }), "{:?}", err);
    }

    #[test]
    fn test_missing_cell_padding() {
        let err = parse(&text(&["┌───┐", "│xy │", "└───┘"])).unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedCharacter { line: 2, column: 1, .. }), "{:?}", err);
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(ParseError::Empty.position(), None);
        assert_eq!(ParseError::TrailingContent { line: 3 }.position(), Some((3, 0)));
    }
}
