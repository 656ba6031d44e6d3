//! Filtering and enrichment of raw feed messages.
//!
//! The feed carries several message types; only "INCIDENT" records are kept.
//! Each kept record gains human-readable timestamps and a deduplicated line
//! list, and is stamped with the operator constant.

use std::collections::HashSet;
use std::fmt;

use chrono::{Local, TimeZone};

use super::types::{Incident, Line, RawMessage};

/// Feed message type that survives filtering.
const INCIDENT_TYPE: &str = "INCIDENT";

/// Operator this instance monitors.
pub const PROVIDER: &str = "MVG";

/// Format for the derived `*_readable` fields, e.g. "03.07.2025 08:52".
const READABLE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Filter a feed response down to incidents and enrich each record.
///
/// Non-incident messages are dropped silently. The filter is stable:
/// incidents come out in the order the feed listed them.
pub fn enrich_messages(messages: Vec<RawMessage>) -> Vec<Incident> {
    messages
        .into_iter()
        .filter(|m| m.message_type == INCIDENT_TYPE)
        .map(enrich_message)
        .collect()
}

fn enrich_message(msg: RawMessage) -> Incident {
    Incident {
        publication_readable: msg.publication.and_then(format_timestamp),
        valid_from_readable: msg.valid_from.and_then(format_timestamp),
        valid_to_readable: msg.valid_to.and_then(format_timestamp),
        title: msg.title,
        description: msg.description,
        message_type: msg.message_type,
        publication: msg.publication,
        valid_from: msg.valid_from,
        valid_to: msg.valid_to,
        lines: dedup_lines(msg.lines),
        provider: PROVIDER.to_string(),
    }
}

/// Collapse duplicate lines, keeping the first occurrence of each
/// (label, transportType, network, divaId) tuple and preserving order.
pub(crate) fn dedup_lines(lines: Vec<Line>) -> Vec<Line> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .filter(|line| {
            let (label, transport_type, network, diva_id) = line.dedup_key();
            seen.insert((
                label.to_string(),
                transport_type.clone(),
                network.to_string(),
                diva_id.to_string(),
            ))
        })
        .collect()
}

/// Render a Unix-millisecond timestamp in the local timezone.
///
/// Out-of-range timestamps yield `None`; the caller omits the readable
/// field rather than emitting a placeholder.
fn format_timestamp(millis: i64) -> Option<String> {
    format_timestamp_in(millis, &Local)
}

fn format_timestamp_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format(READABLE_FORMAT).to_string())
}
