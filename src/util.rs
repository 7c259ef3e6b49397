// Display formatting for report cells.
use num_format::{Locale, ToFormattedString};

/// Placeholder shown for a missing numeric value.
pub const MISSING: &str = "-";

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators on the integer part,
    // e.g. `1,234,567.89`.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let int_val: u64 = match int_part.parse() {
        Ok(v) => v,
        Err(_) => return s,
    };
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Currency in the dashboard's display style: `R$ 1,234.56`.
pub fn format_brl(n: f64) -> String {
    format!("R$ {}", format_number(n, 2))
}

pub fn format_pct(n: f64) -> String {
    format!("{:.1}%", n)
}

pub fn format_opt(n: Option<f64>, f: fn(f64) -> String) -> String {
    n.map(f).unwrap_or_else(|| MISSING.to_string())
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
