use super::super::domain::RawScore;

/// Coerce a backend score into a finite percentage.
///
/// Numbers pass through untouched (no clamping, no rounding). Text is parsed after trimming;
/// blank text, unparsable text and anything that would not be finite degrade to `0.0`.
pub fn normalize(raw: &RawScore) -> f64 {
    let value = match raw {
        RawScore::Number(value) => *value,
        RawScore::Text(text) => parse_text(text),
        RawScore::Missing => 0.0,
    };

    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn parse_text(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
