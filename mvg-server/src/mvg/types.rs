//! Wire and domain types for the MVG message feed.

use serde::{Deserialize, Serialize};

/// Transport mode of a line.
///
/// The feed uses uppercase mode names. Values we do not know about are
/// passed through verbatim rather than rejected, so a new mode upstream
/// never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportType {
    Ubahn,
    Sbahn,
    Bus,
    Tram,
    /// Any mode the feed uses that we do not model explicitly.
    Other(String),
}

impl TransportType {
    /// Returns the feed's string representation of this mode.
    pub fn as_str(&self) -> &str {
        match self {
            TransportType::Ubahn => "UBAHN",
            TransportType::Sbahn => "SBAHN",
            TransportType::Bus => "BUS",
            TransportType::Tram => "TRAM",
            TransportType::Other(s) => s,
        }
    }
}

impl From<String> for TransportType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "UBAHN" => TransportType::Ubahn,
            "SBAHN" => TransportType::Sbahn,
            "BUS" => TransportType::Bus,
            "TRAM" => TransportType::Tram,
            _ => TransportType::Other(s),
        }
    }
}

impl From<TransportType> for String {
    fn from(t: TransportType) -> Self {
        match t {
            TransportType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// A transit line affected by a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// Line label, e.g. "U6" or "S1".
    pub label: String,

    /// Transport mode.
    pub transport_type: TransportType,

    /// Operating network identifier.
    #[serde(default)]
    pub network: String,

    /// DIVA line identifier.
    #[serde(default)]
    pub diva_id: String,

    /// Replacement-service (Schienenersatzverkehr) flag.
    #[serde(default)]
    pub sev: bool,
}

impl Line {
    /// Identity tuple used for deduplication within an incident.
    pub fn dedup_key(&self) -> (&str, &TransportType, &str, &str) {
        (&self.label, &self.transport_type, &self.network, &self.diva_id)
    }
}

/// A message as returned by the feed, before filtering and enrichment.
///
/// The feed mixes several message types; only `type == "INCIDENT"` survives
/// into the cache. All timestamps are Unix milliseconds and any of them may
/// be absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMessage {
    /// Message type discriminator, e.g. "INCIDENT" or "SCHEDULE_CHANGE".
    #[serde(rename = "type", default)]
    pub message_type: String,

    #[serde(default)]
    pub title: String,

    /// Longer text, may contain markup. Empty is valid.
    #[serde(default)]
    pub description: String,

    /// Publication time, Unix milliseconds.
    pub publication: Option<i64>,

    /// Start of validity, Unix milliseconds.
    pub valid_from: Option<i64>,

    /// End of validity, Unix milliseconds. Absent for ongoing disruptions.
    pub valid_to: Option<i64>,

    /// Affected lines. The feed may list the same line more than once.
    #[serde(default)]
    pub lines: Vec<Line>,
}

/// An enriched disruption record as served to callers.
///
/// Built from a `RawMessage` of type "INCIDENT" by `enrich_messages`.
/// Each `*_readable` field is present exactly when the corresponding
/// millisecond field was present and parseable; absent fields are omitted
/// from serialization entirely, never emitted as placeholder strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Incident {
    pub title: String,

    pub description: String,

    /// Always "INCIDENT" after filtering.
    #[serde(rename = "type")]
    pub message_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication: Option<i64>,

    #[serde(rename = "validFrom", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<i64>,

    #[serde(rename = "validTo", skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_readable: Option<String>,

    #[serde(rename = "validFrom_readable", skip_serializing_if = "Option::is_none")]
    pub valid_from_readable: Option<String>,

    #[serde(rename = "validTo_readable", skip_serializing_if = "Option::is_none")]
    pub valid_to_readable: Option<String>,

    /// Affected lines, deduplicated by (label, transportType, network, divaId).
    pub lines: Vec<Line>,

    /// Operator this instance monitors, always "MVG".
    pub provider: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_type_known_values() {
        assert_eq!(TransportType::from("UBAHN".to_string()), TransportType::Ubahn);
        assert_eq!(TransportType::from("SBAHN".to_string()), TransportType::Sbahn);
        assert_eq!(TransportType::from("BUS".to_string()), TransportType::Bus);
        assert_eq!(TransportType::from("TRAM".to_string()), TransportType::Tram);
    }

    #[test]
    fn transport_type_unknown_passes_through() {
        let t = TransportType::from("REGIONAL_BUS".to_string());
        assert_eq!(t, TransportType::Other("REGIONAL_BUS".to_string()));
        assert_eq!(t.as_str(), "REGIONAL_BUS");
        assert_eq!(String::from(t), "REGIONAL_BUS");
    }

    #[test]
    fn transport_type_lowercase_is_not_known() {
        // The feed is uppercase; anything else is passthrough, not a match.
        let t = TransportType::from("ubahn".to_string());
        assert_eq!(t, TransportType::Other("ubahn".to_string()));
    }

    #[test]
    fn line_deserializes_feed_field_names() {
        let json = r#"{
            "label": "U6",
            "transportType": "UBAHN",
            "network": "swm",
            "divaId": "010U6",
            "sev": false
        }"#;
        let line: Line = serde_json::from_str(json).unwrap();
        assert_eq!(line.label, "U6");
        assert_eq!(line.transport_type, TransportType::Ubahn);
        assert_eq!(line.network, "swm");
        assert_eq!(line.diva_id, "010U6");
        assert!(!line.sev);
    }

    #[test]
    fn line_missing_optional_fields_default() {
        let json = r#"{"label": "100", "transportType": "BUS"}"#;
        let line: Line = serde_json::from_str(json).unwrap();
        assert_eq!(line.network, "");
        assert_eq!(line.diva_id, "");
        assert!(!line.sev);
    }

    #[test]
    fn line_serializes_camel_case() {
        let line = Line {
            label: "U6".into(),
            transport_type: TransportType::Ubahn,
            network: "swm".into(),
            diva_id: "010U6".into(),
            sev: true,
        };
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["transportType"], "UBAHN");
        assert_eq!(value["divaId"], "010U6");
        assert_eq!(value["sev"], true);
    }

    #[test]
    fn raw_message_deserializes_with_absent_fields() {
        let json = r#"{"type": "INCIDENT", "title": "Verspätungen"}"#;
        let msg: RawMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.message_type, "INCIDENT");
        assert_eq!(msg.title, "Verspätungen");
        assert_eq!(msg.description, "");
        assert_eq!(msg.publication, None);
        assert_eq!(msg.valid_from, None);
        assert_eq!(msg.valid_to, None);
        assert!(msg.lines.is_empty());
    }

    #[test]
    fn raw_message_ignores_unknown_feed_fields() {
        let json = r#"{
            "type": "INCIDENT",
            "title": "Aufzug defekt",
            "stationGlobalIds": ["de:09162:6"],
            "eventTypes": ["DISRUPTION"]
        }"#;
        let msg: RawMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.title, "Aufzug defekt");
    }

    #[test]
    fn dedup_key_distinguishes_transport_type() {
        let bus = Line {
            label: "X30".into(),
            transport_type: TransportType::Bus,
            network: "swm".into(),
            diva_id: "19X30".into(),
            sev: false,
        };
        let mut tram = bus.clone();
        tram.transport_type = TransportType::Tram;
        assert_ne!(bus.dedup_key(), tram.dedup_key());
    }
}
