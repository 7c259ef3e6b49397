// Locale-aware numeric normalization.
//
// Exports arrive with Brazilian formatting: "R$ 1.234,56" for money and
// "65,4%" for percentages. Every parser here returns `None` (the missing
// marker) instead of failing, so one bad cell never aborts a table load.

/// Parse a Brazilian-formatted currency string such as `"R$ 1.234.567,89"`.
///
/// - Drops every `R`, `$` and whitespace character.
/// - With a comma present, periods are thousands separators only when they
///   all come before the last comma; otherwise the value is missing.
/// - Without a comma, more than one period means the last segment is the
///   fraction and the others are thousands groups.
/// - Returns `None` for empty, unparseable or non-finite values.
pub fn parse_currency(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| *c != 'R' && *c != '$' && !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return None;
    }
    let resolved = resolve_thousands(&stripped);
    parse_finite(&resolved.replace(',', "."))
}

/// Parse a percentage string such as `"65,4%"` into `65.4`.
///
/// No thousands handling: the exports never group percentage digits.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| *c != '%' && !c.is_whitespace())
        .collect();
    if stripped.is_empty() {
        return None;
    }
    parse_finite(&stripped.replace(',', "."))
}

fn resolve_thousands(s: &str) -> String {
    if let Some(comma) = s.rfind(',') {
        if s[comma..].contains('.') {
            return s.to_string();
        }
        return s.replace('.', "");
    }
    if s.matches('.').count() <= 1 {
        return s.to_string();
    }
    match s.rsplit_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", int_part.replace('.', ""), frac_part),
        None => s.to_string(),
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Per-table tally of numeric cells that could not be parsed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoercionCounter {
    pub cells: usize,
    pub coerced: usize,
}

impl CoercionCounter {
    /// Parse an optional cell with `parser`, counting it as coerced when a
    /// non-empty value turns into the missing marker.
    pub fn apply(&mut self, cell: Option<&str>, parser: fn(&str) -> Option<f64>) -> Option<f64> {
        let cell = cell?;
        self.cells += 1;
        let parsed = parser(cell);
        if parsed.is_none() && !cell.trim().is_empty() {
            self.coerced += 1;
            tracing::debug!(value = cell, "numeric cell coerced to missing");
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_single_period_is_decimal() {
        assert_eq!(parse_currency("1234.5"), Some(1234.5));
    }

    #[test]
    fn test_currency_grouped_with_comma_fraction() {
        assert_eq!(parse_currency("1.234.567,89"), Some(1234567.89));
    }

    #[test]
    fn test_currency_with_symbol_and_spaces() {
        assert_eq!(parse_currency("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_currency(" R$ 980,00 "), Some(980.0));
        assert_eq!(parse_currency("R$1.000"), Some(1.0));
    }

    #[test]
    fn test_currency_multiple_periods_without_comma() {
        assert_eq!(parse_currency("1.234.5"), Some(1234.5));
    }

    #[test]
    fn test_currency_plain_integer_and_negative() {
        assert_eq!(parse_currency("600"), Some(600.0));
        assert_eq!(parse_currency("-R$ 10,50"), Some(-10.5));
    }

    #[test]
    fn test_currency_missing_marker() {
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("   "), None);
        assert_eq!(parse_currency("abc"), None);
        assert_eq!(parse_currency("R$ -"), None);
        assert_eq!(parse_currency("1,2,3"), None);
        assert_eq!(parse_currency("1,234.56"), None);
        assert_eq!(parse_currency("R$ 1.234,5.6"), None);
        assert_eq!(parse_currency("NaN"), None);
        assert_eq!(parse_currency("inf"), None);
    }

    #[test]
    fn test_percentage_with_comma() {
        assert_eq!(parse_percentage("65,4%"), Some(65.4));
        assert_eq!(parse_percentage("100%"), Some(100.0));
        assert_eq!(parse_percentage(" 7,25 % "), Some(7.25));
    }

    #[test]
    fn test_percentage_without_sign() {
        assert_eq!(parse_percentage("0,5"), Some(0.5));
    }

    #[test]
    fn test_percentage_malformed_is_missing() {
        assert_eq!(parse_percentage("n/a"), None);
        assert_eq!(parse_percentage("%"), None);
        assert_eq!(parse_percentage("1.234,5%"), None);
    }

    #[test]
    fn test_counter_tracks_coerced_cells() {
        let mut counter = CoercionCounter::default();
        assert_eq!(counter.apply(Some("R$ 10,00"), parse_currency), Some(10.0));
        assert_eq!(counter.apply(Some("x"), parse_currency), None);
        assert_eq!(counter.apply(Some(""), parse_currency), None);
        assert_eq!(counter.apply(None, parse_currency), None);
        assert_eq!(counter, CoercionCounter { cells: 3, coerced: 1 });
    }
}
