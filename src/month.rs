// Month labels as they appear in the monthly exports ("ABRIL", "MAIO", ...).
//
// Ordering follows the calendar, not the string, so "ABRIL" < "MAIO" < "JUNHO".
use chrono::Month;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthLabel {
    label: String,
    #[serde(skip)]
    month: Option<Month>,
}

impl MonthLabel {
    pub fn new(label: &str) -> Self {
        let label = label.trim().to_string();
        let month = parse_month_pt(&label);
        MonthLabel { label, month }
    }

    pub fn as_str(&self) -> &str {
        &self.label
    }

    pub fn month(&self) -> Option<Month> {
        self.month
    }

    // Unknown labels sort before every calendar month.
    fn sort_key(&self) -> (u32, &str) {
        (self.month.map(|m| m.number_from_month()).unwrap_or(0), &self.label)
    }
}

impl Ord for MonthLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for MonthLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Map a Portuguese month name (any case, with or without accents) to a
/// calendar month.
pub fn parse_month_pt(label: &str) -> Option<Month> {
    let month = match label.trim().to_uppercase().as_str() {
        "JANEIRO" | "JAN" => Month::January,
        "FEVEREIRO" | "FEV" => Month::February,
        "MARÇO" | "MARCO" | "MAR" => Month::March,
        "ABRIL" | "ABR" => Month::April,
        "MAIO" | "MAI" => Month::May,
        "JUNHO" | "JUN" => Month::June,
        "JULHO" | "JUL" => Month::July,
        "AGOSTO" | "AGO" => Month::August,
        "SETEMBRO" | "SET" => Month::September,
        "OUTUBRO" | "OUT" => Month::October,
        "NOVEMBRO" | "NOV" => Month::November,
        "DEZEMBRO" | "DEZ" => Month::December,
        _ => return None,
    };
    Some(month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_month_pt("ABRIL"), Some(Month::April));
        assert_eq!(parse_month_pt("março"), Some(Month::March));
        assert_eq!(parse_month_pt(" Junho "), Some(Month::June));
        assert_eq!(parse_month_pt("APRIL"), None);
    }

    #[test]
    fn test_calendar_order_beats_lexical_order() {
        let mut labels = vec![
            MonthLabel::new("JUNHO"),
            MonthLabel::new("ABRIL"),
            MonthLabel::new("MAIO"),
            MonthLabel::new("MARÇO"),
        ];
        labels.sort();
        let names: Vec<&str> = labels.iter().map(|m| m.as_str()).collect();
        assert_eq!(names, vec!["MARÇO", "ABRIL", "MAIO", "JUNHO"]);
    }

    #[test]
    fn test_unknown_labels_sort_first() {
        let mut labels = vec![MonthLabel::new("JANEIRO"), MonthLabel::new("Q2")];
        labels.sort();
        assert_eq!(labels[0].as_str(), "Q2");
        assert_eq!(labels[0].month(), None);
    }
}
