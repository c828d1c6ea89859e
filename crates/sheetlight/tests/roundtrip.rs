use sheetlight::{Cell, Dialect, Grid, Number, parse_with, stringify_with};

fn mixed_rows() -> Vec<Vec<Cell>> {
    vec![
        vec![
            Cell::from("a,b"),
            Cell::from("he said \"hi\""),
            Cell::from("line\r\nbreak"),
        ],
        vec![Cell::Number(Number::I64(-3)), Cell::from(2.5), Cell::Bool(false)],
        vec![Cell::Null, Cell::Empty, Cell::from("")],
        vec![
            Cell::from("  padded  "),
            Cell::from("true"),
            Cell::Object(vec![(
                "k".into(),
                Cell::Array(vec![Cell::from(1u64), Cell::from("x,]")]),
            )]),
        ],
    ]
}

#[test]
fn parse_of_stringify_restores_cells() -> Result<(), Box<dyn std::error::Error>> {
    let d = Dialect::default();
    let rows = mixed_rows();
    let text = stringify_with(&rows, &d)?;
    let grid = parse_with(&text, &d)?;
    assert!(grid.is_table());
    assert_eq!(grid.to_array(), rows);
    Ok(())
}

#[test]
fn text_only_roundtrip_without_coercion() -> Result<(), Box<dyn std::error::Error>> {
    let d = Dialect::default().with_coerce_literals(false);
    let rows: Vec<Vec<Cell>> = vec![
        vec![Cell::from("12"), Cell::from("null"), Cell::from("[1,2]")],
        vec![Cell::from("\""), Cell::from(""), Cell::from("x")],
    ];
    let text = stringify_with(&rows, &d)?;
    assert_eq!(parse_with(&text, &d)?.to_array(), rows);
    Ok(())
}

#[test]
fn roundtrip_with_headers() -> Result<(), Box<dyn std::error::Error>> {
    let grid = Grid::from_rows(
        vec![vec![Cell::from(1u64), Cell::from("x")]],
        vec!["id".into(), "label, long".into()],
        Dialect::default(),
    )?;
    let text = grid.as_text().to_string();
    assert_eq!(text, "\"id\",\"label, long\"\r\n1,\"x\"");
    let back = parse_with(&text, grid.dialect())?;
    assert_eq!(back, grid);
    Ok(())
}

#[test]
fn roundtrip_with_exotic_markers() -> Result<(), Box<dyn std::error::Error>> {
    let d = Dialect::default()
        .with_quote("~~")
        .with_delimiter("|")
        .with_line_break("\n");
    let rows = vec![
        vec![Cell::from("a~~b"), Cell::from("c|d")],
        vec![Cell::from("e\nf"), Cell::from(7u64)],
    ];
    let text = stringify_with(&rows, &d)?;
    assert_eq!(text, "~~a~~~~b~~|~~c|d~~\n~~e\nf~~|7");
    assert_eq!(parse_with(&text, &d)?.to_array(), rows);
    Ok(())
}

#[test]
fn reparsing_a_grid_text_is_stable() -> Result<(), Box<dyn std::error::Error>> {
    let d = Dialect::default();
    let grid = parse_with("1,\"two\",{\"three\":3}\r\ntrue,,null", &d)?;
    let again = parse_with(grid.as_text(), &d)?;
    assert_eq!(again, grid);
    assert_eq!(again.as_text(), grid.as_text());
    Ok(())
}

#[test]
fn trailing_blank_row_survives() -> Result<(), Box<dyn std::error::Error>> {
    let d = Dialect::default();
    let grid = parse_with("a\r\n\r\n", &d)?;
    assert_eq!(grid.to_array(), vec![vec![Cell::from("a")], vec![Cell::Empty]]);
    let text = stringify_with(&grid, &d)?;
    assert_eq!(text, "\"a\"\r\n\r\n");
    let back = parse_with(&text, &d)?;
    assert_eq!(back, grid);
    Ok(())
}

#[test]
fn lone_blank_row_survives() -> Result<(), Box<dyn std::error::Error>> {
    let d = Dialect::default();
    let grid = parse_with("\r\n", &d)?;
    assert_eq!(grid.to_array(), vec![vec![Cell::Empty]]);
    let text = stringify_with(&grid, &d)?;
    assert_eq!(text, "\r\n");
    assert_eq!(parse_with(&text, &d)?, grid);
    Ok(())
}
