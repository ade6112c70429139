//! Currency formatting and locale parsing

use creohub_types::SupportedCurrency;

/// Render `amount` with the currency's symbol, thousands separators, and
/// minor-unit digits.
///
/// Alphabetic symbols are separated by a space (`KSh 1,234.50`), glyph
/// symbols are not (`$1,234.50`). Without a catalog entry the upper-cased
/// code is used as the symbol with two decimals.
pub fn format_amount(amount: f64, code: &str, currency: Option<&SupportedCurrency>) -> String {
    let (symbol, decimals) = match currency {
        Some(c) => (c.symbol.clone(), usize::from(c.decimals)),
        None => (code.trim().to_ascii_uppercase(), 2),
    };

    let amount = if amount.is_finite() { amount } else { 0.0 };
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut body = group_thousands(whole);
    if let Some(fraction) = fraction {
        body.push('.');
        body.push_str(fraction);
    }

    // -0.00 renders without a sign
    let negative = amount < 0.0 && body.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };

    let separator = match symbol.chars().last() {
        Some(c) if c.is_alphabetic() => " ",
        _ => "",
    };

    format!("{sign}{symbol}{separator}{body}")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Region subtag of a browser locale or `Accept-Language` header.
///
/// `en-KE` and `sw_KE` yield `KE`; `zh-Hant-TW` yields `TW`; a header like
/// `en-GB,en;q=0.9` uses its first tag. Language-only tags yield `None`.
pub fn region_from_locale(locale: &str) -> Option<String> {
    let tag = locale.split(',').next()?.split(';').next()?.trim();

    tag.split(['-', '_'])
        .skip(1)
        .find(|part| part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|region| region.to_ascii_uppercase())
}
