/// Milliunits per major currency unit.
pub const MILLIUNITS: i64 = 1000;

/// Milliunits as major units, e.g. -3000 -> -3.0.
pub fn major_units(milli: i64) -> f64 {
    milli as f64 / MILLIUNITS as f64
}

/// Flag totals keep the plain decimal form users already know: $-3.0, $12.5
pub fn flag_amount(milli: i128) -> String {
    format!("${:?}", milli as f64 / MILLIUNITS as f64)
}

/// Format milliunits as a dollar amount with thousands separators: $1,234.56
pub fn money(milli: i64) -> String {
    let negative = milli < 0;
    let abs = major_units(milli).abs();
    let cents = format!("{:.2}", abs);
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative && abs >= 0.005 {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}
