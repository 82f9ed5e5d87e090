//! Plain-text persistence of the detector size and overscan boundaries.
//!
//! The file holds four numbers, one per line, in a fixed order: detector
//! length (columns, dispersion axis), detector width (rows, cross-dispersion
//! axis), the column where the left overscan ends, and the column where the
//! right overscan starts. Readers accept integer or floating-point spellings
//! (`2048` or `2.048000000000000000e+03`) and truncate toward zero.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

pub const DEFAULT_OVERSCAN_PATH: &str = "01-CalibrationMasters/overscan.dat";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverscanParams {
    /// Detector size along the dispersion direction (columns).
    pub length: i64,
    /// Detector size along the cross-dispersion direction (rows).
    pub width: i64,
    /// Columns `0..left` are overscan.
    pub left: i64,
    /// Columns `right..length` are overscan.
    pub right: i64,
}

#[derive(Debug)]
pub enum OverscanError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    WrongCount {
        path: PathBuf,
        found: usize,
    },
    NotNumeric {
        path: PathBuf,
        token: String,
    },
    Invalid(OverscanParams),
}

impl std::fmt::Display for OverscanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverscanError::Io { path, source } => {
                write!(f, "overscan file {}: {source}", path.display())
            }
            OverscanError::WrongCount { path, found } => write!(
                f,
                "overscan file {} holds {found} values, expected 4",
                path.display()
            ),
            OverscanError::NotNumeric { path, token } => write!(
                f,
                "overscan file {}: `{token}` is not a number",
                path.display()
            ),
            OverscanError::Invalid(p) => write!(
                f,
                "overscan bounds must satisfy 0 <= left < right <= length (left={}, right={}, length={})",
                p.left, p.right, p.length
            ),
        }
    }
}

impl std::error::Error for OverscanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverscanError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl OverscanParams {
    pub fn new(length: i64, width: i64, left: i64, right: i64) -> Self {
        Self {
            length,
            width,
            left,
            right,
        }
    }

    pub fn validate(&self) -> Result<(), OverscanError> {
        if self.left < 0 || self.left >= self.right || self.right > self.length {
            return Err(OverscanError::Invalid(*self));
        }
        Ok(())
    }

    /// Columns between the two overscan regions.
    pub fn illuminated_columns(&self) -> Range<usize> {
        self.left.max(0) as usize..self.right.max(0) as usize
    }

    fn to_text(self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n",
            self.length, self.width, self.left, self.right
        )
    }

    fn parse(text: &str, path: &Path) -> Result<Self, OverscanError> {
        let tokens: Vec<&str> = text
            .lines()
            .map(|l| l.split('#').next().unwrap_or(""))
            .flat_map(str::split_whitespace)
            .collect();
        if tokens.len() != 4 {
            return Err(OverscanError::WrongCount {
                path: path.to_path_buf(),
                found: tokens.len(),
            });
        }
        let mut values = [0i64; 4];
        for (slot, token) in values.iter_mut().zip(&tokens) {
            *slot = parse_integer(token).ok_or_else(|| OverscanError::NotNumeric {
                path: path.to_path_buf(),
                token: token.to_string(),
            })?;
        }
        let [length, width, left, right] = values;
        Ok(Self::new(length, width, left, right))
    }
}

fn parse_integer(token: &str) -> Option<i64> {
    if let Ok(v) = token.parse::<i64>() {
        return Some(v);
    }
    let v = token.parse::<f64>().ok()?;
    // `as` saturates, so keep to the range that truncates faithfully.
    (v.is_finite() && v.abs() < 9.0e18).then(|| v.trunc() as i64)
}

/// Write `params` to `path`, creating the parent directory if needed.
pub fn write_overscan(path: &Path, params: &OverscanParams) -> Result<(), OverscanError> {
    params.validate()?;
    let io_err = |source| OverscanError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    fs::write(path, params.to_text()).map_err(io_err)?;
    debug!("overscan written to {}: {params:?}", path.display());
    Ok(())
}

/// Read parameters written by [`write_overscan`] (or any file with four
/// whitespace-separated numbers).
pub fn read_overscan(path: &Path) -> Result<OverscanParams, OverscanError> {
    let text = fs::read_to_string(path).map_err(|source| OverscanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    OverscanParams::parse(&text, path)
}

/// [`write_overscan`] to [`DEFAULT_OVERSCAN_PATH`] under `base_dir`.
pub fn write_overscan_in(base_dir: &Path, params: &OverscanParams) -> Result<(), OverscanError> {
    write_overscan(&base_dir.join(DEFAULT_OVERSCAN_PATH), params)
}

/// [`read_overscan`] from [`DEFAULT_OVERSCAN_PATH`] under `base_dir`.
pub fn read_overscan_in(base_dir: &Path) -> Result<OverscanParams, OverscanError> {
    read_overscan(&base_dir.join(DEFAULT_OVERSCAN_PATH))
}

/// [`write_overscan`] to [`DEFAULT_OVERSCAN_PATH`] relative to the working directory.
pub fn write_default_overscan(params: &OverscanParams) -> Result<(), OverscanError> {
    write_overscan_in(Path::new(""), params)
}

/// [`read_overscan`] from [`DEFAULT_OVERSCAN_PATH`] relative to the working directory.
pub fn read_default_overscan() -> Result<OverscanParams, OverscanError> {
    read_overscan_in(Path::new(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<OverscanParams, OverscanError> {
        OverscanParams::parse(text, Path::new("overscan.dat"))
    }

    #[test]
    fn parses_scientific_notation() {
        let text = "2.048000000000000000e+03\n5.120000000000000000e+02\n\
                    5.000000000000000000e+01\n2.000000000000000000e+03\n";
        assert_eq!(parse(text).unwrap(), OverscanParams::new(2048, 512, 50, 2000));
    }

    #[test]
    fn float_values_truncate() {
        assert_eq!(
            parse("10.9 4.2 1.7 8.99").unwrap(),
            OverscanParams::new(10, 4, 1, 8)
        );
    }

    #[test]
    fn wrong_count_is_an_error() {
        assert!(matches!(
            parse("2048\n512\n50\n"),
            Err(OverscanError::WrongCount { found: 3, .. })
        ));
        assert!(matches!(
            parse("1 2 3 4 5"),
            Err(OverscanError::WrongCount { found: 5, .. })
        ));
    }

    #[test]
    fn non_numeric_is_an_error() {
        match parse("2048 512 left 2000") {
            Err(OverscanError::NotNumeric { token, .. }) => assert_eq!(token, "left"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse("2048 512 nan 2000"),
            Err(OverscanError::NotNumeric { .. })
        ));
    }

    #[test]
    fn validation_orders_bounds() {
        assert!(OverscanParams::new(2048, 512, 50, 2000).validate().is_ok());
        assert!(OverscanParams::new(2048, 512, 2000, 50).validate().is_err());
        assert!(OverscanParams::new(2048, 512, 50, 2049).validate().is_err());
        assert_eq!(
            OverscanParams::new(2048, 512, 50, 2000).illuminated_columns(),
            50..2000
        );
    }
}
