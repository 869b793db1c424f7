//! Spoken-quantity parsing for the radius slot.
//!
//! Accepts plain digits ("200", "0.5") as well as spelled-out English
//! numbers ("fifty", "twenty five", "one hundred", "one point five").

/// Parse a user-supplied quantity into a number.
///
/// Returns `None` when the input is not recognizable as a quantity;
/// the caller decides how to re-prompt.
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return value.is_finite().then_some(value);
    }

    let lowered = trimmed.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| c == ' ' || c == '-')
        .filter(|w| !w.is_empty() && *w != "and")
        .collect();
    if words.is_empty() {
        return None;
    }

    // "one point five" splits into an integer part and spoken digits.
    let (integer_words, fraction_words) = match words.iter().position(|w| *w == "point") {
        Some(idx) => (&words[..idx], Some(&words[idx + 1..])),
        None => (&words[..], None),
    };

    let integer = if integer_words.is_empty() {
        // "point five" style input.
        fraction_words.is_some().then_some(0.0)?
    } else {
        parse_integer_words(integer_words)?
    };

    let fraction = match fraction_words {
        Some(digits) => parse_fraction_words(digits)?,
        None => 0.0,
    };

    Some(integer + fraction)
}

/// Standard accumulate/scale word-number algorithm: small words add into
/// a running group, "hundred" scales the group, larger multipliers flush
/// the group into the total.
fn parse_integer_words(words: &[&str]) -> Option<f64> {
    let mut total: f64 = 0.0;
    let mut group: f64 = 0.0;
    let mut consumed = false;

    for word in words {
        if let Some(value) = small_number(word) {
            group += value as f64;
            consumed = true;
        } else if *word == "hundred" {
            group = if group == 0.0 { 100.0 } else { group * 100.0 };
            consumed = true;
        } else if let Some(scale) = large_multiplier(word) {
            let factor = if group == 0.0 { 1.0 } else { group };
            total += factor * scale;
            group = 0.0;
            consumed = true;
        } else {
            return None;
        }
    }

    consumed.then_some(total + group)
}

fn parse_fraction_words(words: &[&str]) -> Option<f64> {
    if words.is_empty() {
        return None;
    }

    let mut fraction = 0.0;
    let mut place = 0.1;
    for word in words {
        let digit = small_number(word).filter(|d| *d <= 9)?;
        fraction += digit as f64 * place;
        place /= 10.0;
    }
    Some(fraction)
}

fn small_number(word: &str) -> Option<u64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

fn large_multiplier(word: &str) -> Option<f64> {
    match word {
        "thousand" => Some(1_000.0),
        "million" => Some(1_000_000.0),
        _ => None,
    }
}
