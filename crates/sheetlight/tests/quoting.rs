use sheetlight::{Cell, Dialect, Error, ErrorKind, Location, parse_with};

#[test]
fn doubled_quotes_are_escapes() -> Result<(), Box<dyn std::error::Error>> {
    let grid = parse_with("\"a\"\"b\"\"c\"", &Dialect::default())?;
    assert_eq!(grid.to_array(), vec![vec![Cell::from("a\"b\"c")]]);
    Ok(())
}

#[test]
fn undoubled_quote_inside_quotes_is_malformed() {
    let err = parse_with("\"a\"b\"c\"", &Dialect::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedQuoting);
}

#[test]
fn quotes_in_unquoted_values_are_malformed() {
    let err = parse_with("a\"\"b\"\"c", &Dialect::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedQuoting);
    assert_eq!(err.location().map(|at| at.start), Some(1));
}

#[test]
fn lone_quote_is_an_invalid_start() {
    let lenient = Dialect::default().with_strict_mode(false);
    for d in [Dialect::default(), lenient] {
        let err = parse_with("\"", &d).unwrap_err();
        assert_eq!(err, Error::InvalidLeadingCharacter);
    }
}

#[test]
fn delimiters_and_breaks_inside_quotes_are_content() -> Result<(), Box<dyn std::error::Error>> {
    let grid = parse_with("\"a,b\",\"c\r\nd\"\r\ne,f", &Dialect::default())?;
    assert!(grid.is_table());
    assert_eq!(grid.read(1, 1)?, Some(&Cell::from("a,b")));
    assert_eq!(grid.read(1, 2)?, Some(&Cell::from("c\r\nd")));
    assert_eq!(grid.read(2, 2)?, Some(&Cell::from("f")));
    Ok(())
}

#[test]
fn quoted_empty_is_an_empty_string() -> Result<(), Box<dyn std::error::Error>> {
    let grid = parse_with("\"\",", &Dialect::default())?;
    assert_eq!(grid.to_array(), vec![vec![Cell::from(""), Cell::Empty]]);
    Ok(())
}

#[test]
fn unterminated_quote_is_fatal_when_strict() {
    let err = parse_with("x,y\r\n1,\"2", &Dialect::default()).unwrap_err();
    assert_eq!(
        err,
        Error::UnterminatedQuote {
            at: Location {
                start: 7,
                end: 9,
                row: 2,
                column: 2,
            }
        }
    );
}

#[test]
fn unterminated_quote_is_kept_verbatim_when_lenient() -> Result<(), Box<dyn std::error::Error>> {
    let lenient = Dialect::default().with_strict_mode(false);
    let grid = parse_with("a,\"b,c", &lenient)?;
    assert_eq!(grid.to_array(), vec![vec![Cell::from("a"), Cell::from("\"b,c")]]);
    Ok(())
}

#[test]
fn lenient_mode_keeps_stray_quotes() -> Result<(), Box<dyn std::error::Error>> {
    let lenient = Dialect::default().with_strict_mode(false);
    let grid = parse_with("a\"\"b,\"x\"y\"z\"", &lenient)?;
    assert_eq!(grid.to_array(), vec![vec![Cell::from("a\"\"b"), Cell::from("x\"y\"z")]]);
    Ok(())
}

#[test]
fn stray_quote_position_is_reported() {
    let err = parse_with("ab,c\"d", &Dialect::default()).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedQuoting {
            at: Location {
                start: 4,
                end: 5,
                row: 1,
                column: 2,
            }
        }
    );
}

#[test]
fn strict_mode_trims_around_quoted_values() -> Result<(), Box<dyn std::error::Error>> {
    let grid = parse_with(" \"a\" , b ,\" c \"\t", &Dialect::default())?;
    assert_eq!(
        grid.to_array(),
        vec![vec![Cell::from("a"), Cell::from("b"), Cell::from(" c ")]]
    );

    let lenient = Dialect::default().with_strict_mode(false);
    let grid = parse_with("\"a\" ,b", &lenient)?;
    assert_eq!(grid.read(1, 1)?, Some(&Cell::from("\"a\" ")));
    Ok(())
}
