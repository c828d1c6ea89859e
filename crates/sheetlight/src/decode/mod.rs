//! Decoding pipeline: validation, scanning, token processing and row
//! assembly, fronted by the last-result cache.

pub mod memo;
pub mod parser;
pub mod process;
pub mod scanner;
pub mod validation;

use crate::error::Result;
use crate::grid::Grid;
use crate::options::Dialect;

use self::validation::Source;

/// Parse `text` under `dialect` into a grid.
pub fn parse_grid(text: &str, dialect: &Dialect) -> Result<Grid> {
    if dialect.memoize {
        if let Some(grid) = memo::lookup(text, dialect) {
            tracing::debug!(len = text.len(), "parse served from memo");
            return Ok(grid);
        }
    }
    tracing::debug!(len = text.len(), strict = dialect.strict_mode, "parse start");

    let result = parse_uncached(text, dialect);
    match &result {
        Ok(grid) => {
            tracing::debug!(
                rows = grid.rows(),
                is_table = grid.is_table(),
                headers = grid.headers().len(),
                "parse finished"
            );
            if dialect.memoize {
                memo::store(text, dialect, grid);
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "parse failed");
            memo::invalidate();
        }
    }
    result
}

fn parse_uncached(text: &str, dialect: &Dialect) -> Result<Grid> {
    match validation::check_source(text, dialect)? {
        Source::Empty => Ok(Grid::empty(dialect.clone())),
        Source::Body(body) => {
            let parsed = parser::parse_document(body, dialect)?;
            Ok(Grid::from_parsed(parsed, dialect.clone()))
        }
    }
}
