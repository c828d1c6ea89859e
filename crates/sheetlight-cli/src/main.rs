use std::fs::File;
use std::io::{Read, stdin};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Deserialize;
use sheetlight::{Cell, CellSelector, Dialect, DialectPatch, Grid, RangeSelector, diagnostic};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DelimArg {
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl DelimArg {
    fn as_str(self) -> &'static str {
        match self {
            DelimArg::Comma => ",",
            DelimArg::Tab => "\t",
            DelimArg::Pipe => "|",
            DelimArg::Semicolon => ";",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BreakArg {
    Crlf,
    Lf,
    Cr,
}

impl BreakArg {
    fn as_str(self) -> &'static str {
        match self {
            BreakArg::Crlf => "\r\n",
            BreakArg::Lf => "\n",
            BreakArg::Cr => "\r",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "sheetlight-cli",
    about = "Convert delimited text to JSON and back",
    version
)]
struct Args {
    /// Encode a JSON array of rows to delimited text (default parses text to JSON)
    #[arg(short, long)]
    encode: bool,

    /// Cell delimiter
    #[arg(long, value_enum)]
    delimiter: Option<DelimArg>,

    /// Quote string
    #[arg(long)]
    quote: Option<String>,

    /// Row separator
    #[arg(long, value_enum)]
    line_break: Option<BreakArg>,

    /// The first line holds column names
    #[arg(long)]
    headers: bool,

    /// Keep malformed quotes as text instead of failing
    #[arg(long)]
    lenient: bool,

    /// Keep every unquoted value as text
    #[arg(long)]
    no_coerce: bool,

    /// Skip lines with no content
    #[arg(long)]
    ignore_empty_lines: bool,

    /// JSON file with dialect settings, applied before the flags above
    #[arg(long, value_name = "FILE")]
    dialect: Option<PathBuf>,

    /// Print a single cell
    #[arg(long, num_args = 2, value_names = ["ROW", "COLUMN"], conflicts_with_all = ["range", "encode"])]
    cell: Option<Vec<String>>,

    /// Print the rectangle between two corners
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"], conflicts_with = "encode")]
    range: Option<Vec<String>>,

    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

/// Rows to encode: a bare array of rows, or the object printed when parsing.
#[derive(Deserialize)]
#[serde(untagged)]
enum EncodeInput {
    Rows(Vec<Vec<Cell>>),
    Grid {
        #[serde(default)]
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    let mut buf = String::new();
    match path {
        Some(path) => {
            let mut f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    Ok(buf)
}

fn build_dialect(args: &Args) -> Result<Dialect> {
    let mut dialect = Dialect::default().with_memoize(false);
    if let Some(path) = &args.dialect {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read dialect file {}", path.display()))?;
        let patch: DialectPatch = serde_json::from_str(&text)
            .with_context(|| format!("invalid dialect file {}", path.display()))?;
        dialect = patch.apply_to(dialect);
    }
    if let Some(d) = args.delimiter {
        dialect = dialect.with_delimiter(d.as_str());
    }
    if let Some(q) = &args.quote {
        dialect = dialect.with_quote(q.as_str());
    }
    if let Some(b) = args.line_break {
        dialect = dialect.with_line_break(b.as_str());
    }
    if args.headers {
        dialect = dialect.with_headers(true);
    }
    if args.lenient {
        dialect = dialect.with_strict_mode(false);
    }
    if args.no_coerce {
        dialect = dialect.with_coerce_literals(false);
    }
    if args.ignore_empty_lines {
        dialect = dialect.with_ignore_empty_lines(true);
    }
    dialect.validate()?;
    Ok(dialect)
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

fn encode(buf: &str, dialect: &Dialect) -> Result<()> {
    let input: EncodeInput = serde_json::from_str(buf).context("input is not a JSON array of rows")?;
    let text = match input {
        EncodeInput::Rows(rows) => sheetlight::stringify_with(&rows, dialect)?,
        EncodeInput::Grid { headers, rows } => {
            let grid = Grid::from_rows(rows, headers, dialect.clone())?;
            sheetlight::stringify_with(&grid, grid.dialect())?
        }
    };
    println!("{text}");
    Ok(())
}

fn parse(buf: &str, dialect: &Dialect) -> Result<Grid> {
    match sheetlight::parse_with(buf, dialect) {
        Ok(grid) => Ok(grid),
        Err(e) => {
            if let Some(excerpt) = diagnostic::render(buf, &e, dialect) {
                eprintln!("{excerpt}");
            }
            Err(e).context("failed to parse input")
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let buf = read_input(args.input.as_deref())?;
    let dialect = build_dialect(&args)?;
    tracing::debug!(bytes = buf.len(), encode = args.encode, "input read");

    if args.encode {
        return encode(&buf, &dialect);
    }

    let grid = parse(&buf, &dialect)?;
    if let Some(cell) = &args.cell {
        let row: CellSelector = cell[0].parse()?;
        let column: CellSelector = cell[1].parse()?;
        match grid.read(row, column)? {
            Some(value) => print_json(value, args.pretty)?,
            None => bail!("no cell at row {}, column {}", cell[0], cell[1]),
        }
    } else if let Some(range) = &args.range {
        let from: RangeSelector = range[0].parse()?;
        let to: RangeSelector = range[1].parse()?;
        print_json(&grid.range(from, to)?, args.pretty)?;
    } else {
        print_json(&grid, args.pretty)?;
    }
    Ok(())
}
