//! Axis label text cleanup and numeric parsing
//!
//! OCR output for chart labels is noisy: stray punctuation, wrapped lines,
//! and the letter O read in place of the digit 0. Category labels only need
//! the noise stripped; y-axis labels additionally have to yield a number
//! with its unit prefix and suffix.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::error::LabelError;

/// `<non-digit prefix><integer or decimal><non-digit suffix>`, whole string
static Y_LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\D*)(\d+(?:\.\d+)?)(\D*)$").unwrap());

/// Characters OCR commonly hallucinates around label text
const NOISE_CHARS: [char; 3] = [',', '.', '‘'];

/// Numeric content of a y-axis label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisValue {
    pub value: f64,
    pub prefix: String,
    pub suffix: String,
}

/// Parsed y-axis label; only `Valid` labels take part in calibration
#[derive(Debug, Clone, PartialEq)]
pub enum YLabelValue {
    Valid(AxisValue),
    Invalid,
}

impl YLabelValue {
    pub fn is_valid(&self) -> bool {
        matches!(self, YLabelValue::Valid(_))
    }

    pub fn as_valid(&self) -> Option<&AxisValue> {
        match self {
            YLabelValue::Valid(v) => Some(v),
            YLabelValue::Invalid => None,
        }
    }
}

/// Clean raw OCR text into a category label
///
/// Trims, turns newlines into spaces and drops `,` `.` `‘`.
pub fn parse_text_label(raw: &str) -> String {
    strip_layout(raw).chars().filter(|c| !NOISE_CHARS.contains(c)).collect()
}

/// Parse a y-axis label, mapping unreadable text onto `Invalid`
pub fn parse_y_label(raw: &str) -> YLabelValue {
    match try_parse_y_label(raw) {
        Ok(value) => YLabelValue::Valid(value),
        Err(_) => YLabelValue::Invalid,
    }
}

/// Parse a y-axis label into its value, prefix and suffix
///
/// Same cleanup as [`parse_text_label`], except that a `.` between two
/// digits survives as the decimal point. Letter `O`/`o` becomes `0`.
pub fn try_parse_y_label(raw: &str) -> Result<AxisValue, LabelError> {
    let cleaned = clean_numeric(raw);

    let invalid = || LabelError::InvalidLabelText { text: cleaned.clone() };
    let caps = Y_LABEL_REGEX.captures(&cleaned).ok_or_else(invalid)?;
    let value: f64 = caps[2].parse().map_err(|_| invalid())?;

    Ok(AxisValue {
        value,
        prefix: caps[1].to_string(),
        suffix: caps[3].to_string(),
    })
}

fn strip_layout(raw: &str) -> String {
    raw.trim().replace('\n', " ")
}

fn clean_numeric(raw: &str) -> String {
    let digitized: Vec<char> = strip_layout(raw)
        .chars()
        .filter(|c| *c != ',' && *c != '‘')
        .map(|c| if c == 'O' || c == 'o' { '0' } else { c })
        .collect();

    digitized
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            if c != '.' {
                return true;
            }
            let before = i.checked_sub(1).and_then(|p| digitized.get(p));
            let after = digitized.get(i + 1);
            matches!((before, after), (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit())
        })
        .map(|(_, &c)| c)
        .collect()
}
