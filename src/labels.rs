//! Label table
//!
//! User-facing strings keyed by locale-neutral ids (`month.short.0`,
//! `event.rate_decision`, `day.favorable`, ...). Rendering code never embeds
//! literal text; it asks a [`Labels`] table instead.
//!
//! Lookups fall back to the English table, then to the id itself, so a
//! partial override table never breaks a render.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calendar::{DayClassification, EventKind};

/// Supported built-in locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Romanian (the landing page's language)
    #[default]
    Ro,
    En,
}

impl Locale {
    /// Thousands separator used by [`Labels::format_grouped`]
    pub fn grouping_separator(&self) -> char {
        match self {
            Locale::Ro => '.',
            Locale::En => ',',
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::Ro => RO,
            Locale::En => EN,
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ro" | "ro-ro" => Ok(Locale::Ro),
            "en" | "en-us" | "en-gb" => Ok(Locale::En),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

/// Locale-keyed label lookup
#[derive(Debug, Clone)]
pub struct Labels {
    locale: Locale,
    entries: HashMap<String, String>,
}

impl Default for Labels {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl Labels {
    pub fn new(locale: Locale) -> Self {
        let entries = locale
            .table()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self { locale, entries }
    }

    /// Builder method: replace individual labels
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        self.entries
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Look up a label by id
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(value) = self.entries.get(key) {
            return value;
        }

        EN.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key)
    }

    pub fn month_short(&self, month: u32) -> String {
        self.get(&format!("month.short.{}", month)).to_string()
    }

    pub fn month_long(&self, month: u32) -> String {
        self.get(&format!("month.long.{}", month)).to_string()
    }

    pub fn event(&self, kind: EventKind) -> &str {
        self.get(kind.label_key())
    }

    /// Tooltip for a classified calendar day
    pub fn classification(&self, classification: DayClassification) -> &str {
        match classification {
            DayClassification::Event => self.get("day.event"),
            DayClassification::Caution => self.get("day.caution"),
            DayClassification::Favorable => self.get("day.favorable"),
            DayClassification::Neutral => self.get("day.neutral"),
        }
    }

    /// Round to an integer and group thousands with the locale separator
    pub fn format_grouped(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }

        let rounded = value.round().abs() as u64;
        let digits = rounded.to_string();
        let separator = self.locale.grouping_separator();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(separator);
            }
            grouped.push(c);
        }

        if value.round() < 0.0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }
}

const RO: &[(&str, &str)] = &[
    ("month.short.0", "Ian"),
    ("month.short.1", "Feb"),
    ("month.short.2", "Mar"),
    ("month.short.3", "Apr"),
    ("month.short.4", "Mai"),
    ("month.short.5", "Iun"),
    ("month.short.6", "Iul"),
    ("month.short.7", "Aug"),
    ("month.short.8", "Sep"),
    ("month.short.9", "Oct"),
    ("month.short.10", "Nov"),
    ("month.short.11", "Dec"),
    ("month.long.0", "Ianuarie"),
    ("month.long.1", "Februarie"),
    ("month.long.2", "Martie"),
    ("month.long.3", "Aprilie"),
    ("month.long.4", "Mai"),
    ("month.long.5", "Iunie"),
    ("month.long.6", "Iulie"),
    ("month.long.7", "August"),
    ("month.long.8", "Septembrie"),
    ("month.long.9", "Octombrie"),
    ("month.long.10", "Noiembrie"),
    ("month.long.11", "Decembrie"),
    ("event.rate_decision", "Ședință FOMC (Decizie Rata Dobânzii)"),
    ("event.labor_report", "Non-Farm Payrolls (Raport Piața Muncii)"),
    ("event.inflation_report", "Consumer Price Index (Inflație)"),
    ("day.event", "Eveniment major"),
    ("day.favorable", "Perioadă favorabilă statistic"),
    ("day.caution", "Atenție: lună istoric slabă"),
    ("day.neutral", "Perioadă neutră"),
    ("legend.growth.a", "DCA Fix (standard)"),
    ("legend.growth.b", "DCA Adaptat (+17-70 bp/an)"),
    ("legend.seasonality.highlighted", "Top 3 luni"),
    ("legend.seasonality.neutral", "Luni neutre"),
    ("legend.seasonality.negative", "Luni negative"),
    ("chart.seasonality.title", "Return Mediu Lunar (%) - S&P 500, 1950-2025"),
    ("page.title", "Masterclass: Timing & Execuție în Investiții"),
    ("page.tagline", "Sistemul bate ghicirea. De fiecare dată."),
    ("section.heatmap", "Zile pozitive și negative (simulare S&P 500)"),
    ("section.calendar", "Calendar"),
    ("section.growth", "DCA Fix vs. DCA Adaptat"),
    ("section.seasonality", "Sezonalitate"),
];

const EN: &[(&str, &str)] = &[
    ("month.short.0", "Jan"),
    ("month.short.1", "Feb"),
    ("month.short.2", "Mar"),
    ("month.short.3", "Apr"),
    ("month.short.4", "May"),
    ("month.short.5", "Jun"),
    ("month.short.6", "Jul"),
    ("month.short.7", "Aug"),
    ("month.short.8", "Sep"),
    ("month.short.9", "Oct"),
    ("month.short.10", "Nov"),
    ("month.short.11", "Dec"),
    ("month.long.0", "January"),
    ("month.long.1", "February"),
    ("month.long.2", "March"),
    ("month.long.3", "April"),
    ("month.long.4", "May"),
    ("month.long.5", "June"),
    ("month.long.6", "July"),
    ("month.long.7", "August"),
    ("month.long.8", "September"),
    ("month.long.9", "October"),
    ("month.long.10", "November"),
    ("month.long.11", "December"),
    ("event.rate_decision", "FOMC Meeting (Interest Rate Decision)"),
    ("event.labor_report", "Non-Farm Payrolls (Labor Market Report)"),
    ("event.inflation_report", "Consumer Price Index (Inflation)"),
    ("day.event", "Major event"),
    ("day.favorable", "Statistically favorable period"),
    ("day.caution", "Caution: historically weak month"),
    ("day.neutral", "Neutral period"),
    ("legend.growth.a", "Fixed DCA (standard)"),
    ("legend.growth.b", "Adaptive DCA (+17-70 bp/yr)"),
    ("legend.seasonality.highlighted", "Top 3 months"),
    ("legend.seasonality.neutral", "Neutral months"),
    ("legend.seasonality.negative", "Negative months"),
    ("chart.seasonality.title", "Average Monthly Return (%) - S&P 500, 1950-2025"),
    ("page.title", "Masterclass: Timing & Execution in Investing"),
    ("page.tagline", "A system beats guessing. Every time."),
    ("section.heatmap", "Up and down days (S&P 500 simulation)"),
    ("section.calendar", "Calendar"),
    ("section.growth", "Fixed DCA vs. Adaptive DCA"),
    ("section.seasonality", "Seasonality"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        let labels = Labels::new(Locale::Ro);
        assert_eq!(labels.month_short(0), "Ian");
        assert_eq!(labels.month_long(8), "Septembrie");
        assert_eq!(labels.get("no.such.key"), "no.such.key");

        let mut overrides = HashMap::new();
        overrides.insert("month.short.0".to_string(), "Jan".to_string());
        let labels = Labels::new(Locale::Ro).with_overrides(&overrides);
        assert_eq!(labels.month_short(0), "Jan");
        assert_eq!(labels.month_short(1), "Feb");
    }

    #[test]
    fn test_locales_cover_same_keys() {
        for (key, _) in RO {
            assert!(EN.iter().any(|(k, _)| k == key), "missing en label {}", key);
        }
        assert_eq!(RO.len(), EN.len());
    }

    #[test]
    fn test_format_grouped() {
        let ro = Labels::new(Locale::Ro);
        assert_eq!(ro.format_grouped(147_183.4), "147.183");
        assert_eq!(ro.format_grouped(999.5), "1.000");
        assert_eq!(ro.format_grouped(12.0), "12");
        assert_eq!(ro.format_grouped(-1_234_567.0), "-1.234.567");

        let en = Labels::new(Locale::En);
        assert_eq!(en.format_grouped(1_234_567.0), "1,234,567");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("RO".parse::<Locale>(), Ok(Locale::Ro));
        assert_eq!("en-US".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }
}
