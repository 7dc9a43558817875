//! Sentence generation for extracted chart data

use std::fmt::Write;

/// Render one sentence per (label, value) pair
///
/// Each line reads `The value of {label} is {prefix}{value:.2}{suffix}.`
/// and ends with a newline. Pairs beyond the shorter input are ignored.
pub fn describe<L: AsRef<str>>(labels: &[L], values: &[f64], prefix: &str, suffix: &str) -> String {
    let mut out = String::new();
    for (label, value) in labels.iter().zip(values) {
        // Writing into a String cannot fail
        let _ = writeln!(out, "The value of {} is {prefix}{value:.2}{suffix}.", label.as_ref());
    }
    out
}
