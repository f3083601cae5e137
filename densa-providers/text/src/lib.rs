//! Text provider reading one delimited point per UTF-8 line.
//!
//! Blank lines and lines starting with `#` are skipped. Every other line must
//! carry the same number of finite coordinates.
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use densa_core::{Dataset, DatasetError};
use thiserror::Error;
use tracing::debug;

/// How coordinates on a line are separated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Any run of ASCII or Unicode whitespace.
    #[default]
    Whitespace,
    /// A single separator character; surrounding whitespace is trimmed.
    Char(char),
}

impl Delimiter {
    fn split<'a>(self, line: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self {
            Self::Whitespace => Box::new(line.split_whitespace()),
            Self::Char(separator) => Box::new(line.split(separator).map(str::trim)),
        }
    }
}

/// Errors produced by [`TextProvider`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TextProviderError {
    /// No point lines were found.
    #[error("text input contained no points")]
    EmptyInput,
    /// A field did not parse as a number.
    #[error("line {line}, field {field}: `{value}` is not a number")]
    InvalidNumber {
        /// One-based source line.
        line: usize,
        /// One-based field position.
        field: usize,
        /// The offending text.
        value: String,
    },
    /// A field parsed to NaN or an infinity.
    #[error("line {line}, field {field}: coordinate must be finite")]
    NonFinite {
        /// One-based source line.
        line: usize,
        /// One-based field position.
        field: usize,
    },
    /// A line had a different number of fields than the first point line.
    #[error("line {line} has {actual} fields but expected {expected}")]
    DimensionMismatch {
        /// One-based source line.
        line: usize,
        /// Field count of the first point line.
        expected: usize,
        /// Field count of this line.
        actual: usize,
    },
    /// The parsed points were rejected by the dataset.
    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),
    /// Reading the input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Stable codes for [`TextProviderError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TextProviderErrorCode {
    /// Input had no point lines.
    EmptyInput,
    /// A field was not numeric.
    InvalidNumber,
    /// A field was NaN or infinite.
    NonFinite,
    /// Field counts differed between lines.
    DimensionMismatch,
    /// Dataset construction failed.
    Dataset,
    /// Reading failed.
    Io,
}

impl TextProviderErrorCode {
    /// Machine-readable form of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "TEXT_EMPTY_INPUT",
            Self::InvalidNumber => "TEXT_INVALID_NUMBER",
            Self::NonFinite => "TEXT_NON_FINITE",
            Self::DimensionMismatch => "TEXT_DIMENSION_MISMATCH",
            Self::Dataset => "TEXT_INVALID_DATASET",
            Self::Io => "TEXT_IO",
        }
    }
}

impl std::fmt::Display for TextProviderErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TextProviderError {
    /// Stable code for this error.
    #[must_use]
    pub const fn code(&self) -> TextProviderErrorCode {
        match self {
            Self::EmptyInput => TextProviderErrorCode::EmptyInput,
            Self::InvalidNumber { .. } => TextProviderErrorCode::InvalidNumber,
            Self::NonFinite { .. } => TextProviderErrorCode::NonFinite,
            Self::DimensionMismatch { .. } => TextProviderErrorCode::DimensionMismatch,
            Self::Dataset(_) => TextProviderErrorCode::Dataset,
            Self::Io(_) => TextProviderErrorCode::Io,
        }
    }
}

/// Points parsed from delimited text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProvider {
    name: String,
    dimension: usize,
    values: Vec<f64>,
    lines: Vec<usize>,
}

impl TextProvider {
    /// Parses points from a buffered reader.
    ///
    /// # Errors
    /// Returns [`TextProviderError::EmptyInput`] when no point lines exist,
    /// [`TextProviderError::InvalidNumber`] or [`TextProviderError::NonFinite`]
    /// for bad fields, [`TextProviderError::DimensionMismatch`] for ragged
    /// lines and [`TextProviderError::Io`] when reading fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use densa_providers_text::{Delimiter, TextProvider};
    ///
    /// let input = Cursor::new("# x,y\n0.0,1.0\n2.5, 3.5\n");
    /// let provider = TextProvider::try_from_reader("demo", input, Delimiter::Char(','))
    ///     .expect("valid points");
    /// assert_eq!(provider.len(), 2);
    /// assert_eq!(provider.line_of(1), Some(3));
    /// ```
    pub fn try_from_reader<R>(
        name: impl Into<String>,
        reader: R,
        delimiter: Delimiter,
    ) -> Result<Self, TextProviderError>
    where
        R: BufRead,
    {
        let name = name.into();
        let mut dimension: Option<usize> = None;
        let mut values = Vec::new();
        let mut lines = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let before = values.len();
            for (position, raw) in delimiter.split(trimmed).enumerate() {
                values.push(parse_field(raw, line_number, position + 1)?);
            }
            let actual = values.len() - before;
            match dimension {
                Some(expected) if expected != actual => {
                    return Err(TextProviderError::DimensionMismatch {
                        line: line_number,
                        expected,
                        actual,
                    });
                }
                Some(_) => {}
                None => dimension = Some(actual),
            }
            lines.push(line_number);
        }

        let Some(dimension) = dimension else {
            return Err(TextProviderError::EmptyInput);
        };
        debug!(provider = %name, rows = lines.len(), dimension, "text points parsed");
        Ok(Self {
            name,
            dimension,
            values,
            lines,
        })
    }

    /// Parses points from a file.
    ///
    /// # Errors
    /// Fails when the file cannot be opened and otherwise as
    /// [`TextProvider::try_from_reader`].
    pub fn try_from_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        delimiter: Delimiter,
    ) -> Result<Self, TextProviderError> {
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file), delimiter)
    }

    /// Returns the provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of parsed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` when no points were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of coordinates per point.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the one-based source line of point `row`.
    #[must_use]
    pub fn line_of(&self, row: usize) -> Option<usize> {
        self.lines.get(row).copied()
    }

    /// Converts the parsed points into a [`Dataset`].
    ///
    /// # Errors
    /// Returns [`TextProviderError::Dataset`] when the dataset rejects the
    /// buffer, which only happens for zero-field lines.
    pub fn into_dataset(self) -> Result<Dataset, TextProviderError> {
        Ok(Dataset::from_row_major(
            self.name,
            self.dimension,
            self.values,
        )?)
    }
}

fn parse_field(raw: &str, line: usize, field: usize) -> Result<f64, TextProviderError> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| TextProviderError::InvalidNumber {
            line,
            field,
            value: raw.to_owned(),
        })?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(TextProviderError::NonFinite { line, field })
    }
}
