//! Export of generated passwords and history

use crate::database::models::HistoryEntry;
use crate::error::Result;

/// Newline-joined passwords, as copied by "copy all"
pub fn export_text<S: AsRef<str>>(passwords: &[S]) -> String {
    passwords
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n")
}

/// History entries as a pretty-printed JSON array
pub fn export_history_json(entries: &[HistoryEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::PasswordOptions;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_text() {
        assert_eq!(export_text(&["a1!B", "c2@D"]), "a1!B\nc2@D");
        assert_eq!(export_text(&vec!["only".to_string()]), "only");
        assert_eq!(export_text::<&str>(&[]), "");
    }

    #[test]
    fn test_export_history_json() {
        let entry = HistoryEntry {
            id: "1700000000000-abc123xyz".to_string(),
            password: "Ab1!Ab1!".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            length: 8,
            settings: PasswordOptions {
                include_symbols: false,
                ..PasswordOptions::default()
            },
        };

        let json = export_history_json(&[entry.clone()]).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"includeSymbols\": false"));
        assert!(json.contains("\"timestamp\""));

        let parsed: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![entry]);
    }

    #[test]
    fn test_export_empty_history() {
        assert_eq!(export_history_json(&[]).unwrap(), "[]");
    }
}
