use super::*;

#[test]
fn empty_input_yields_no_records() {
    assert_eq!(parse("").unwrap(), Vec::new());
    assert_eq!(parse("   ").unwrap(), Vec::new());
    assert_eq!(parse("\n \n").unwrap(), Vec::new());
}

#[test]
fn three_lines_span_the_domain() {
    let records = parse("2.45 -10\n2.46 -11\n2.47 -12").unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].glucose, 0.0);
    assert_eq!(records[1].glucose, 500.0);
    assert_eq!(records[2].glucose, 1000.0);

    assert_eq!(records[0].frequency, 2.45);
    assert_eq!(records[0].amplitude, -10.0);
    assert_eq!(records[2].frequency, 2.47);
    assert_eq!(records[2].amplitude, -12.0);
}

#[test]
fn single_line_sits_at_zero() {
    let records = parse("2.45 -10").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].glucose, 0.0);
    assert_eq!(records[0].frequency, 2.45);
}

#[test]
fn accepted_separators() {
    for line in ["2.45 -10", "2.45, -10", "2.45,-10", "(2.45, -10)", "2.45 ,  -10"] {
        let records = parse(line).unwrap();
        assert_eq!(records[0].frequency, 2.45, "line: {line:?}");
        assert_eq!(records[0].amplitude, -10.0, "line: {line:?}");
    }
}

#[test]
fn malformed_line_rejects_everything() {
    let err = parse("2.45\n2.46 -11").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidLine {
            line: 1,
            text: "2.45".to_string(),
        }
    );
    assert_eq!(err.line(), 1);
    assert!(err.to_string().contains("\"2.45\""));
}

#[test]
fn error_names_the_right_line() {
    let err = parse("2.45 -10\nbogus here too much\n2.47 -12").unwrap_err();
    assert_eq!(err.line(), 2);

    // Blank interior lines still count toward numbering.
    let err = parse("2.45 -10\n\nnope").unwrap_err();
    assert_eq!(err.line(), 3);
}

#[test]
fn three_tokens_is_an_error() {
    assert!(parse("1 2 3").is_err());
}

#[test]
fn non_numeric_token_is_an_error() {
    assert!(parse("2.45 abc").is_err());
}

#[test]
fn blank_interior_lines_are_skipped() {
    let records = parse("2.45 -10\n\n2.47 -12").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].glucose, 1000.0);
}

#[test]
fn positions_round_to_two_decimals() {
    // 7 records: 1000/6 = 166.666... -> 166.67
    let text = (0..7)
        .map(|i| format!("2.{i} -1"))
        .collect::<Vec<_>>()
        .join("\n");
    let records = parse(&text).unwrap();
    assert_eq!(records[1].glucose, 166.67);
    assert_eq!(records[6].glucose, 1000.0);
}

#[test]
fn extract_pairs_skips_junk() {
    let pairs = extract_pairs("(1.0, -2.0) junk (3.0, -4.0)");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].frequency, 1.0);
    assert_eq!(pairs[0].amplitude, -2.0);
    assert_eq!(pairs[1].frequency, 3.0);
    assert_eq!(pairs[1].amplitude, -4.0);
}

#[test]
fn extract_pairs_ignores_malformed_groups() {
    assert!(extract_pairs("").is_empty());
    assert!(extract_pairs("no pairs at all").is_empty());
    assert!(extract_pairs("(one, two)").is_empty());
    assert!(extract_pairs("(1.0)").is_empty());
    assert!(extract_pairs("(1 2 3)").is_empty());

    let pairs = extract_pairs("(x, 1) (2.5, -3.5) (4,");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].frequency, 2.5);
}

#[test]
fn extract_pairs_spans_lines() {
    let pairs = extract_pairs("header\n(2.45, -10)\nmid\n(2.46, -11)\n");
    assert_eq!(pairs.len(), 2);
}

mod properties {
    use super::*;
    use crate::metrics;
    use proptest::prelude::*;

    fn measurement_text(lines: usize) -> impl Strategy<Value = String> {
        prop::collection::vec(
            (
                (0.1f64..30.0).prop_map(|f| (f * 1e4).round() / 1e4),
                (-80.0f64..0.0).prop_map(|a| (a * 100.0).round() / 100.0),
            ),
            1..=lines,
        )
        .prop_map(|pairs| {
            pairs
                .iter()
                .map(|(f, a)| format!("{f} {a}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
    }

    proptest! {
        /// Positions are strictly non-decreasing and span [0, 1000]
        /// whenever more than one record parses.
        #[test]
        fn positions_cover_the_domain(text in measurement_text(50)) {
            let records = parse(&text).unwrap();
            prop_assert!(!records.is_empty());

            for pair in records.windows(2) {
                prop_assert!(pair[0].glucose <= pair[1].glucose);
            }
            prop_assert_eq!(records[0].glucose, 0.0);
            if records.len() > 1 {
                prop_assert_eq!(records[records.len() - 1].glucose, 1000.0);
            }
            for record in &records {
                prop_assert!((0.0..=1000.0).contains(&record.glucose));
            }
        }

        /// Every parsed position is re-findable through the tolerant
        /// lookup: rounding to two decimals stays well under 0.1.
        #[test]
        fn parsed_positions_roundtrip_through_find_row(text in measurement_text(50)) {
            let records = parse(&text).unwrap();
            let positions: Vec<f64> = records.iter().map(|r| r.glucose).collect();

            for glucose in positions {
                prop_assert!(metrics::find_row(&records, glucose).is_some());
            }
        }
    }
}
