//! In-memory search over cached incidents.
//!
//! Pure filtering; obtaining a sufficiently fresh collection is the
//! caller's job (the web layer goes through the normal, non-forced cache
//! read path first).

use crate::mvg::Incident;

/// Filter incidents by a case-insensitive substring query, optionally
/// restricted to incidents affecting a specific line.
///
/// The query matches against title, description, and each line label.
/// The `line` filter requires an exact (case-insensitive) label match,
/// not a substring. Order is preserved; no match is an empty result,
/// not an error.
pub fn filter_incidents(incidents: &[Incident], query: &str, line: Option<&str>) -> Vec<Incident> {
    let query = query.to_lowercase();
    let line = line.map(str::to_lowercase);

    incidents
        .iter()
        .filter(|incident| {
            matches_query(incident, &query)
                && line
                    .as_deref()
                    .is_none_or(|label| matches_line(incident, label))
        })
        .cloned()
        .collect()
}

fn matches_query(incident: &Incident, query: &str) -> bool {
    incident.title.to_lowercase().contains(query)
        || incident.description.to_lowercase().contains(query)
        || incident
            .lines
            .iter()
            .any(|line| line.label.to_lowercase().contains(query))
}

fn matches_line(incident: &Incident, label: &str) -> bool {
    incident
        .lines
        .iter()
        .any(|line| line.label.to_lowercase() == label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvg::{Line, TransportType, enrich_messages};

    fn line(label: &str) -> Line {
        Line {
            label: label.to_string(),
            transport_type: TransportType::Ubahn,
            network: "swm".to_string(),
            diva_id: format!("diva-{label}"),
            sev: false,
        }
    }

    fn incident(title: &str, description: &str, labels: &[&str]) -> Incident {
        let raw = crate::mvg::RawMessage {
            message_type: "INCIDENT".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            publication: None,
            valid_from: None,
            valid_to: None,
            lines: labels.iter().map(|l| line(l)).collect(),
        };
        enrich_messages(vec![raw]).remove(0)
    }

    fn sample() -> Vec<Incident> {
        vec![
            incident("Verspätungen U6", "Stellwerksstörung", &["U6"]),
            incident("Aufzug defekt U3", "Aufzug außer Betrieb", &["U3"]),
        ]
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let incidents = sample();
        let matches = filter_incidents(&incidents, "aufzug", None);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Aufzug defekt U3");
    }

    #[test]
    fn query_matches_description() {
        let incidents = sample();
        let matches = filter_incidents(&incidents, "stellwerk", None);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Verspätungen U6");
    }

    #[test]
    fn query_matches_line_labels() {
        let incidents = vec![incident("Umleitung", "wegen Baustelle", &["U6", "S1"])];
        let matches = filter_incidents(&incidents, "s1", None);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn line_filter_requires_exact_label_match() {
        let incidents = sample();

        // "u" matches both titles, but the line filter keeps only U6.
        let matches = filter_incidents(&incidents, "u", Some("U6"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Verspätungen U6");

        // "U" is a prefix of "U6", not an exact label.
        let matches = filter_incidents(&incidents, "u", Some("U"));
        assert!(matches.is_empty());
    }

    #[test]
    fn line_filter_is_case_insensitive() {
        let incidents = sample();
        let matches = filter_incidents(&incidents, "u", Some("u6"));
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn unicode_query_lowercases() {
        let incidents = vec![incident("STÖRUNG Stammstrecke", "", &["S1"])];
        let matches = filter_incidents(&incidents, "störung", None);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let incidents = sample();
        assert!(filter_incidents(&incidents, "tram 19", None).is_empty());
        assert!(filter_incidents(&incidents, "aufzug", Some("U6")).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let incidents = vec![
            incident("U-Bahn Störung A", "", &["U1"]),
            incident("U-Bahn Störung B", "", &["U2"]),
            incident("U-Bahn Störung C", "", &["U3"]),
        ];
        let matches = filter_incidents(&incidents, "u-bahn", None);
        let titles: Vec<&str> = matches.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["U-Bahn Störung A", "U-Bahn Störung B", "U-Bahn Störung C"]
        );
    }
}
