use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AccentTheme {
    BlackWhite,
    MinimalGray,
    ClassicSerif,
}

impl AccentTheme {
    pub const ALL: [AccentTheme; 3] = [
        AccentTheme::BlackWhite,
        AccentTheme::MinimalGray,
        AccentTheme::ClassicSerif,
    ];
}

// Display drives both the wizard Select and nothing else; the template
// matches on the serialized variant name instead.
impl fmt::Display for AccentTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccentTheme::BlackWhite => "Black & White",
            AccentTheme::MinimalGray => "Minimal Gray",
            AccentTheme::ClassicSerif => "Classic Serif",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StyleOptions {
    pub accent: AccentTheme,
    pub include_terms: bool,
    pub show_page_numbers: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientInfo {
    pub name: String,
    pub contact: String,
    pub address: String, // multi-line
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SenderConfig {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProjectDetails {
    pub title: String,
    pub summary: String,
    pub scope: Vec<String>,
    pub deliverables: Vec<String>,
    pub timeline: String,
    pub price: String,
    pub valid_until: String,
    pub payment_terms: String,
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AssetRefs {
    pub logo_data_uri: Option<String>,
    pub signature_data_uri: Option<String>,
}

/// The full record bound into the proposal template. Built fresh on every
/// run; never persisted.
#[derive(Debug, Serialize, Clone)]
pub struct ProposalContext {
    pub style: StyleOptions,
    pub client: ClientInfo,
    pub sender: SenderConfig,
    pub project: ProjectDetails,
    pub assets: AssetRefs,
}

/// Splits free text into list entries, dropping blank and whitespace-only
/// lines. Surviving lines are kept verbatim.
pub fn split_list_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

/// Quote validity dates always render as e.g. "March 03, 2025".
pub fn format_valid_until(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_lines_filters_blank_entries() {
        let raw = "Discovery workshop\n\n   \nResponsive frontend\n\t\nLaunch & handoff\n";
        let items = split_list_lines(raw);
        assert_eq!(
            items,
            vec!["Discovery workshop", "Responsive frontend", "Launch & handoff"]
        );
    }

    #[test]
    fn test_split_list_lines_keeps_entries_verbatim() {
        // Leading markers and inner whitespace survive untouched.
        let items = split_list_lines("- SEO report\n  indented line");
        assert_eq!(items, vec!["- SEO report", "  indented line"]);
    }

    #[test]
    fn test_split_list_lines_empty_input() {
        assert!(split_list_lines("").is_empty());
        assert!(split_list_lines("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_format_valid_until_long_month_padded_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(format_valid_until(date), "March 03, 2025");
    }

    #[test]
    fn test_format_valid_until_december() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_valid_until(date), "December 31, 2024");
    }

    #[test]
    fn test_accent_theme_labels() {
        assert_eq!(AccentTheme::BlackWhite.to_string(), "Black & White");
        assert_eq!(AccentTheme::MinimalGray.to_string(), "Minimal Gray");
        assert_eq!(AccentTheme::ClassicSerif.to_string(), "Classic Serif");
    }

    #[test]
    fn test_sender_config_toml_round_trip() {
        let sender = SenderConfig {
            name: "Price DevOps".to_string(),
            email: "hello@pricedevops.io".to_string(),
            phone: "(555) 867-5309".to_string(),
        };
        let toml_str = toml::to_string_pretty(&sender).unwrap();
        let parsed: SenderConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.name, sender.name);
        assert_eq!(parsed.email, sender.email);
        assert_eq!(parsed.phone, sender.phone);
    }
}
