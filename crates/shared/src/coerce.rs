//! String to number coercion with the rules browsers apply to form input.
//!
//! Surrounding whitespace is ignored, empty input is zero, `0x`/`0o`/`0b`
//! prefixes select a radix and anything that is not a complete decimal
//! literal becomes NaN. No error is ever reported.

pub fn coerce_number(input: &str) -> f64 {
    let trimmed = input.trim_matches(is_number_whitespace);
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    if is_decimal_literal(trimmed) {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// Unicode white space plus the byte order mark, minus NEL (U+0085).
fn is_number_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Returns `None` when `text` carries no radix prefix at all.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let mut chars = text.chars();
    if chars.next() != Some('0') {
        return None;
    }
    let radix = match chars.next()? {
        'x' | 'X' => 16,
        'o' | 'O' => 8,
        'b' | 'B' => 2,
        _ => return None,
    };

    let digits = chars.as_str();
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(digit) => value = value * f64::from(radix) + f64::from(digit),
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

/// `[+-]? (digits ('.' digits?)? | '.' digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::coerce_number;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(coerce_number("7"), 7.0);
        assert_eq!(coerce_number("-3.25"), -3.25);
        assert_eq!(coerce_number("+.5"), 0.5);
        assert_eq!(coerce_number("5."), 5.0);
        assert_eq!(coerce_number("1e3"), 1000.0);
        assert_eq!(coerce_number("2.5E-1"), 0.25);
    }

    #[test]
    fn ignores_surrounding_whitespace_and_treats_blank_as_zero() {
        assert_eq!(coerce_number("  42\n"), 42.0);
        assert_eq!(coerce_number(""), 0.0);
        assert_eq!(coerce_number(" \t "), 0.0);
    }

    #[test]
    fn understands_radix_prefixes_and_infinity() {
        assert_eq!(coerce_number("0x1F"), 31.0);
        assert_eq!(coerce_number("0o17"), 15.0);
        assert_eq!(coerce_number("0b101"), 5.0);
        assert_eq!(coerce_number("Infinity"), f64::INFINITY);
        assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn rejects_partial_or_foreign_literals() {
        for input in [
            "abc", "12px", "1_000", "inf", "NaN", "0x", "0xZZ", "-0x10", "1e", ".", "1.2.3",
            "\u{85}7", "7\u{85}",
        ] {
            assert!(coerce_number(input).is_nan(), "{input:?} should be NaN");
        }
    }
}
