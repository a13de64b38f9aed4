//! Small text helpers shared by the extractors and collaborators.

/// Capitalize the first letter of every word and lower-case the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"o'hare airport"` becomes `"O'Hare Airport"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Insert `,` between groups of three digits in the integer part of a
/// plain decimal string (`"-1234567.5"` → `"-1,234,567.5"`). Exponent
/// forms such as `"1e+20"` come back unchanged.
pub fn group_thousands(digits: &str) -> String {
    if digits.contains(['e', 'E']) {
        return digits.to_string();
    }
    let (sign, rest) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let (int_part, frac_part) = match rest.find('.') {
        Some(idx) => rest.split_at(idx),
        None => (rest, ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}{frac_part}")
}
