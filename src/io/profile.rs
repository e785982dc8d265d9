//! Airfoil coordinate ingest.
//!
//! Two layouts are accepted:
//!
//! - Selig-style `.dat` (any extension other than `.csv`): an optional name
//!   line followed by whitespace-separated `x y` rows.
//! - CSV with a header containing `x` and `y` columns (case-insensitive).
//!
//! Row order is the order along the airfoil surface and is kept as-is. Rows
//! are never dropped: a profile with a bad row is rejected with the line
//! numbers of every bad row, since skipping one would silently change the shape.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use csv::StringRecord;

use crate::domain::Profile;
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Load a profile, choosing the layout from the file extension.
pub fn load_profile(path: &Path) -> Result<Profile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open profile '{}': {e}", path.display())))?;

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let stem = path.file_stem().and_then(|s| s.to_str()).map(str::to_string);
    let profile = if is_csv {
        read_csv_profile(file, stem)?
    } else {
        read_selig(BufReader::new(file), stem)?
    };

    tracing::debug!(
        path = %path.display(),
        points = profile.len(),
        name = profile.display_name(),
        "loaded profile"
    );
    Ok(profile)
}

/// Parse Selig-style text. `fallback_name` is used when the file has no name line.
pub fn read_selig<R: BufRead>(reader: R, fallback_name: Option<String>) -> Result<Profile, AppError> {
    let mut name: Option<String> = None;
    let mut seen_content = false;
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| AppError::new(2, format!("Failed to read profile line {line_no}: {e}")))?;
        let text = line.trim().trim_start_matches('\u{feff}');
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        if !seen_content {
            seen_content = true;
            if !starts_with_number(text) {
                name = Some(text.to_string());
                continue;
            }
        }

        match parse_xy(text) {
            Ok((x, y)) => {
                xs.push(x);
                ys.push(y);
            }
            Err(message) => row_errors.push(RowError { line: line_no, message }),
        }
    }

    finish(name.or(fallback_name), xs, ys, &row_errors)
}

/// Parse a headed CSV with `x` and `y` columns.
pub fn read_csv_profile<R: Read>(reader: R, name: Option<String>) -> Result<Profile, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_idx = *header_map
        .get("x")
        .ok_or_else(|| AppError::new(2, "Missing required column: `x`"))?;
    let y_idx = *header_map
        .get("y")
        .ok_or_else(|| AppError::new(2, "Missing required column: `y`"))?;

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut row_errors = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match (parse_field(&record, x_idx, "x"), parse_field(&record, y_idx, "y")) {
            (Ok(x), Ok(y)) => {
                xs.push(x);
                ys.push(y);
            }
            (Err(message), _) | (_, Err(message)) => row_errors.push(RowError { line, message }),
        }
    }

    finish(name, xs, ys, &row_errors)
}

fn finish(name: Option<String>, xs: Vec<f64>, ys: Vec<f64>, row_errors: &[RowError]) -> Result<Profile, AppError> {
    if let Some(first) = row_errors.first() {
        let lines: Vec<String> = row_errors.iter().take(10).map(|e| e.line.to_string()).collect();
        return Err(AppError::new(
            2,
            format!(
                "Invalid coordinate rows ({} total, lines {}): line {}: {}",
                row_errors.len(),
                lines.join(", "),
                first.line,
                first.message
            ),
        ));
    }
    if xs.is_empty() {
        return Err(AppError::new(3, "Profile contains no coordinate rows."));
    }
    Ok(Profile::new(name, xs, ys)?)
}

/// A name line is any first line whose leading token is not a number.
fn starts_with_number(text: &str) -> bool {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .find(|s| !s.is_empty())
        .is_some_and(|tok| parse_number(tok, "x").is_ok())
}

fn parse_xy(text: &str) -> Result<(f64, f64), String> {
    let fields: Vec<&str> = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .collect();
    if fields.len() != 2 {
        return Err(format!("expected 2 columns, found {}", fields.len()));
    }
    let x = parse_number(fields[0], "x")?;
    let y = parse_number(fields[1], "y")?;
    Ok((x, y))
}

fn parse_number(s: &str, what: &str) -> Result<f64, String> {
    let v: f64 = s
        .parse()
        .map_err(|_| format!("invalid {what} value `{s}`"))?;
    if !v.is_finite() {
        return Err(format!("non-finite {what} value `{s}`"));
    }
    Ok(v)
}

fn parse_field(record: &StringRecord, idx: usize, what: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing `{what}` value"))?;
    parse_number(raw, what)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes start with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn selig_with_name_line() {
        let text = "S1223 high-lift\n  1.00000  0.00000\n  0.50000  0.08000\n\n  0.00000  0.00000\n";
        let profile = read_selig(text.as_bytes(), Some("fallback".into())).unwrap();
        assert_eq!(profile.name(), Some("S1223 high-lift"));
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.point(1), Some(Point::new(0.5, 0.08)));
    }

    #[test]
    fn selig_without_name_uses_fallback_and_keeps_order() {
        let text = "# comment\n1.0 0.001\n0.0 0.0\n1.0 -0.001\n";
        let profile = read_selig(text.as_bytes(), Some("naca".into())).unwrap();
        assert_eq!(profile.name(), Some("naca"));
        assert_eq!(profile.xs(), &[1.0, 0.0, 1.0]);
        assert_eq!(profile.ys(), &[0.001, 0.0, -0.001]);
    }

    #[test]
    fn selig_bad_row_is_an_error_with_line_number() {
        let text = "name\n1.0 0.0\n0.5 oops\n0.0 0.0 7\n";
        let err = read_selig(text.as_bytes(), None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("2 total"), "{err}");
        assert!(err.message().contains("lines 3, 4"), "{err}");
    }

    #[test]
    fn malformed_first_row_is_not_taken_as_a_name() {
        let text = "1.0 0.0 0.0\n0.5 0.05\n0.0 0.0\n";
        let err = read_selig(text.as_bytes(), None).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("line 1: expected 2 columns, found 3"), "{err}");

        let err = read_selig("1.0 oops\n0.0 0.0\n".as_bytes(), None).unwrap_err();
        assert!(err.message().contains("line 1: invalid y value `oops`"), "{err}");
    }

    #[test]
    fn name_starting_with_word_then_digits_is_a_name() {
        let profile = read_selig("NACA 0012\n1.0 0.0\n0.0 0.0\n".as_bytes(), None).unwrap();
        assert_eq!(profile.name(), Some("NACA 0012"));
        assert_eq!(profile.len(), 2);
    }

    #[test]
    fn empty_profile_is_insufficient_data() {
        let err = read_selig("only a name\n".as_bytes(), None).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn csv_with_bom_and_extra_columns() {
        let text = "\u{feff}X, Y, note\n1.0, 0.0, te\n0.0, 0.0, le\n";
        let profile = read_csv_profile(text.as_bytes(), Some("csv".into())).unwrap();
        assert_eq!(profile.points(), vec![Point::new(1.0, 0.0), Point::new(0.0, 0.0)]);
    }

    #[test]
    fn csv_missing_column() {
        let err = read_csv_profile("x,z\n1,2\n".as_bytes(), None).unwrap_err();
        assert!(err.message().contains("`y`"));
    }

    #[test]
    fn csv_bad_value_reports_line() {
        let err = read_csv_profile("x,y\n1,2\n3,nan\n".as_bytes(), None).unwrap_err();
        assert!(err.message().contains("line 3"), "{err}");
    }
}
