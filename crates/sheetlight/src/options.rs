use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};
use crate::value::Cell;

pub const QUOTE: &str = "\"";
pub const COMMA: &str = ",";
pub const CRLF: &str = "\r\n";

/// Textual conventions for one parse or serialize call.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    pub quote: String,
    pub delimiter: String,
    pub line_break: String,
    /// The source carries one trailing end character that is not content.
    pub has_end_character: bool,
    /// Malformed quoting and unterminated quotes are fatal; unquoted
    /// values are trimmed.
    pub strict_mode: bool,
    /// The first row holds column names.
    pub has_headers: bool,
    /// Reuse the last result when the same text is parsed again.
    pub memoize: bool,
    /// Turn unquoted `true`/`false`/`null`, numbers and JSON literals into
    /// typed cells.
    pub coerce_literals: bool,
    /// Lines with no content at all produce no row.
    pub ignore_empty_lines: bool,
    /// Stored for cells with no content.
    pub empty: Cell,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            quote: QUOTE.to_string(),
            delimiter: COMMA.to_string(),
            line_break: CRLF.to_string(),
            has_end_character: false,
            strict_mode: true,
            has_headers: false,
            memoize: true,
            coerce_literals: true,
            ignore_empty_lines: false,
            empty: Cell::Empty,
        }
    }
}

impl Dialect {
    pub fn csv() -> Self {
        Self::default()
    }

    pub fn tsv() -> Self {
        Self::default().with_delimiter("\t")
    }

    pub fn pipe() -> Self {
        Self::default().with_delimiter("|")
    }

    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_line_break(mut self, line_break: impl Into<String>) -> Self {
        self.line_break = line_break.into();
        self
    }

    pub fn with_end_character(mut self, has_end_character: bool) -> Self {
        self.has_end_character = has_end_character;
        self
    }

    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    pub fn with_coerce_literals(mut self, coerce_literals: bool) -> Self {
        self.coerce_literals = coerce_literals;
        self
    }

    pub fn with_ignore_empty_lines(mut self, ignore_empty_lines: bool) -> Self {
        self.ignore_empty_lines = ignore_empty_lines;
        self
    }

    pub fn with_empty(mut self, empty: Cell) -> Self {
        self.empty = empty;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let markers = [
            ("quote", &self.quote),
            ("delimiter", &self.delimiter),
            ("line break", &self.line_break),
        ];
        for (name, value) in markers {
            if value.is_empty() {
                return Err(Error::invalid_dialect(format!("{name} must not be empty")));
            }
        }
        for (i, (a_name, a)) in markers.iter().enumerate() {
            for (b_name, b) in &markers[i + 1..] {
                if a == b {
                    return Err(Error::invalid_dialect(format!(
                        "{a_name} and {b_name} are both {a:?}"
                    )));
                }
            }
        }
        validate_empty_sentinel(&self.empty)
    }
}

/// The empty marker must stay distinguishable from every value a token can
/// decode to, so only the dedicated marker and `null` are accepted.
pub(crate) fn validate_empty_sentinel(empty: &Cell) -> Result<()> {
    match empty {
        Cell::Empty | Cell::Null => Ok(()),
        _ => Err(Error::InvalidEmptySentinel),
    }
}

/// A partial dialect, merged over an existing one.
///
/// Field names follow the camelCase spelling used by JSON dialect files;
/// `brk` and `transform` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DialectPatch {
    pub quote: Option<String>,
    pub delimiter: Option<String>,
    #[serde(alias = "brk")]
    pub line_break: Option<String>,
    pub has_end_character: Option<bool>,
    pub strict_mode: Option<bool>,
    pub has_headers: Option<bool>,
    pub memoize: Option<bool>,
    #[serde(alias = "transform")]
    pub coerce_literals: Option<bool>,
    pub ignore_empty_lines: Option<bool>,
    #[serde(deserialize_with = "present")]
    pub empty: Option<Cell>,
}

// A present `empty` key always sets the marker, `null` included.
fn present<'de, D: Deserializer<'de>>(d: D) -> core::result::Result<Option<Cell>, D::Error> {
    Cell::deserialize(d).map(Some)
}

impl DialectPatch {
    pub fn apply_to(self, mut base: Dialect) -> Dialect {
        if let Some(v) = self.quote {
            base.quote = v;
        }
        if let Some(v) = self.delimiter {
            base.delimiter = v;
        }
        if let Some(v) = self.line_break {
            base.line_break = v;
        }
        if let Some(v) = self.has_end_character {
            base.has_end_character = v;
        }
        if let Some(v) = self.strict_mode {
            base.strict_mode = v;
        }
        if let Some(v) = self.has_headers {
            base.has_headers = v;
        }
        if let Some(v) = self.memoize {
            base.memoize = v;
        }
        if let Some(v) = self.coerce_literals {
            base.coerce_literals = v;
        }
        if let Some(v) = self.ignore_empty_lines {
            base.ignore_empty_lines = v;
        }
        if let Some(v) = self.empty {
            base.empty = v;
        }
        base
    }
}

impl From<Dialect> for DialectPatch {
    fn from(d: Dialect) -> Self {
        Self {
            quote: Some(d.quote),
            delimiter: Some(d.delimiter),
            line_break: Some(d.line_break),
            has_end_character: Some(d.has_end_character),
            strict_mode: Some(d.strict_mode),
            has_headers: Some(d.has_headers),
            memoize: Some(d.memoize),
            coerce_literals: Some(d.coerce_literals),
            ignore_empty_lines: Some(d.ignore_empty_lines),
            empty: Some(d.empty),
        }
    }
}

// `None` means the built-in default is in effect.
static CURRENT: RwLock<Option<Dialect>> = RwLock::new(None);

/// Copy of the process-wide dialect used by [`crate::parse`] and
/// [`crate::stringify`].
pub fn dialect() -> Dialect {
    CURRENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_default()
}

/// Merge `patch` over the process-wide dialect.
///
/// The merged dialect is validated first; on error the current dialect is
/// left untouched. Must not race with an in-flight parse that relies on the
/// process-wide dialect.
pub fn configure(patch: impl Into<DialectPatch>) -> Result<()> {
    let patch = patch.into();
    if let Some(empty) = &patch.empty {
        validate_empty_sentinel(empty)?;
    }
    let mut guard = CURRENT.write().unwrap_or_else(PoisonError::into_inner);
    let merged = patch.apply_to(guard.clone().unwrap_or_default());
    merged.validate()?;
    tracing::debug!(
        quote = %merged.quote.escape_debug(),
        delimiter = %merged.delimiter.escape_debug(),
        line_break = %merged.line_break.escape_debug(),
        strict = merged.strict_mode,
        headers = merged.has_headers,
        "process-wide dialect updated"
    );
    *guard = Some(merged);
    Ok(())
}

/// Restore the built-in default dialect.
pub fn reset_dialect() {
    *CURRENT.write().unwrap_or_else(PoisonError::into_inner) = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_in_delimiter() {
        assert_eq!(Dialect::csv(), Dialect::default());
        assert_eq!(Dialect::tsv().delimiter, "\t");
        assert_eq!(Dialect::pipe().with_delimiter(","), Dialect::default());
    }

    #[test]
    fn colliding_markers_are_rejected() {
        let err = Dialect::default().with_line_break(",").validate().unwrap_err();
        assert_eq!(
            err,
            Error::invalid_dialect("delimiter and line break are both \",\"")
        );
        assert!(Dialect::default().with_quote("").validate().is_err());
    }

    #[test]
    fn structured_empty_marker_is_rejected() {
        let d = Dialect::default().with_empty(Cell::Array(vec![]));
        assert_eq!(d.validate(), Err(Error::InvalidEmptySentinel));
        assert!(Dialect::default().with_empty(Cell::Null).validate().is_ok());
        for scalar in [Cell::from(""), Cell::Bool(false), Cell::from(0u64)] {
            let d = Dialect::default().with_empty(scalar);
            assert_eq!(d.validate(), Err(Error::InvalidEmptySentinel));
        }
    }

    #[test]
    fn patch_overrides_only_present_fields() {
        let patch: DialectPatch =
            serde_json::from_str(r#"{"delimiter":";","brk":"\n","empty":null}"#).unwrap();
        let merged = patch.apply_to(Dialect::default());
        assert_eq!(merged.delimiter, ";");
        assert_eq!(merged.line_break, "\n");
        assert_eq!(merged.empty, Cell::Null);
        assert_eq!(merged.quote, QUOTE);
        assert!(merged.strict_mode);
    }

    #[test]
    fn unknown_patch_fields_fail() {
        assert!(serde_json::from_str::<DialectPatch>(r#"{"separator":";"}"#).is_err());
    }
}
