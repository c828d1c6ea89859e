use crate::value::Number;

/// Recognize a plain decimal number literal.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent (`12`, `-3.5`, `.5`, `1e-3`). Surrounding ASCII
/// whitespace is ignored. Anything else, including `inf`/`NaN` spellings
/// and hexadecimal forms, yields `None` so the token stays text.
pub(crate) fn parse_numeric_literal(token: &str) -> Option<Number> {
    let s = token.trim_matches(|c: char| c.is_ascii_whitespace());
    let shape = classify(s)?;
    match shape {
        Shape::Integer => {
            let unsigned = s.strip_prefix('+').unwrap_or(s);
            if unsigned.starts_with('-') {
                if let Ok(i) = unsigned.parse::<i64>() {
                    return Some(Number::I64(i));
                }
            } else if let Ok(u) = unsigned.parse::<u64>() {
                return Some(Number::U64(u));
            }
            // Too wide for 64 bits, fall back to a float like any other literal.
            s.parse::<f64>().ok().filter(|f| f.is_finite()).map(Number::F64)
        }
        Shape::Float => s.parse::<f64>().ok().filter(|f| f.is_finite()).map(Number::F64),
    }
}

enum Shape {
    Integer,
    Float,
}

fn classify(s: &str) -> Option<Shape> {
    let b = s.as_bytes();
    let mut i = 0usize;
    if i < b.len() && matches!(b[i], b'+' | b'-') {
        i += 1;
    }
    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;
    let mut frac_digits = 0usize;
    let mut is_float = false;
    if i < b.len() && b[i] == b'.' {
        is_float = true;
        i += 1;
        let frac_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        is_float = true;
        i += 1;
        if i < b.len() && matches!(b[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }
    if i != b.len() {
        return None;
    }
    Some(if is_float { Shape::Float } else { Shape::Integer })
}

/// Render a number the way it is written back into delimited text.
///
/// Integral values print without a fraction, positional notation is used
/// for decimal exponents in `-6..21` and scientific notation (`1e+21`,
/// `1.5e-7`) outside of it. `-0` prints as `0`.
pub(crate) fn format_number(number: &Number) -> String {
    match number {
        Number::I64(i) => i.to_string(),
        Number::U64(u) => u.to_string(),
        Number::F64(f) => format_f64(*f),
    }
}

pub(crate) fn format_f64(value: f64) -> String {
    if !value.is_finite() {
        debug_assert!(false, "format_f64 called with non-finite value");
        return String::from("null");
    }
    if value == 0.0 {
        return String::from("0");
    }
    let negative = value < 0.0;
    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value.abs());
    let (digits, point) = decompose(raw);

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    let k = digits.len() as i32;
    let n = point;
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(core::iter::repeat_n('0', (n - k) as usize));
    } else if 0 < n && n <= 21 {
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(core::iter::repeat_n('0', (-n) as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        let exp = n - 1;
        if exp >= 0 {
            out.push('+');
        }
        out.push_str(&exp.to_string());
    }
    out
}

/// Split ryu output into significant digits and the position of the
/// decimal point relative to the first digit.
fn decompose(raw: &str) -> (String, i32) {
    let (mantissa, exp) = match raw.find(['e', 'E']) {
        Some(idx) => (&raw[..idx], raw[idx + 1..].parse::<i32>().unwrap_or(0)),
        None => (raw, 0),
    };
    let mut digits = String::with_capacity(mantissa.len());
    let mut point: Option<i32> = None;
    for ch in mantissa.chars() {
        if ch == '.' {
            point = Some(digits.len() as i32);
        } else {
            digits.push(ch);
        }
    }
    let mut point = point.unwrap_or(digits.len() as i32) + exp;

    let leading = digits.bytes().take_while(|b| *b == b'0').count();
    digits.drain(..leading);
    point -= leading as i32;
    let trimmed = digits.trim_end_matches('0').len();
    digits.truncate(trimmed);
    if digits.is_empty() {
        return (String::from("0"), 1);
    }
    (digits, point)
}
