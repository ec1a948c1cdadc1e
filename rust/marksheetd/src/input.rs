use crate::calc::MAX_MARKS_PER_SUBJECT;
use serde_json::Value;

/// Turns a raw form value into a mark the grade engine accepts.
///
/// Blank or unparsable input reads as 0. Strings take their leading integer
/// the way a number field's text is integer-parsed (`"45.7"` -> 45,
/// `"12abc"` -> 12). The result is clamped to `0..=100`.
pub fn normalize_marks(raw: Option<&Value>) -> u32 {
    let parsed = match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Some(Value::String(s)) => leading_int(s),
        _ => None,
    };
    clamp_marks(parsed.unwrap_or(0))
}

fn clamp_marks(v: i64) -> u32 {
    v.clamp(0, MAX_MARKS_PER_SUBJECT as i64) as u32
}

fn leading_int(s: &str) -> Option<i64> {
    let t = s.trim_start();
    let (negative, digits) = match t.as_bytes().first() {
        Some(b'-') => (true, &t[1..]),
        Some(b'+') => (false, &t[1..]),
        _ => (false, t),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Long digit runs saturate; the clamp makes the exact value irrelevant.
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
