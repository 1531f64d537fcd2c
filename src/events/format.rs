//! Compact text format for capture logs
//!
//! Format: `T:NNNNN|U|actor|action`
//! - T:NNNNN = timestamp in milliseconds (5 digits, wraps at 99999)
//! - U = action-use record
//! - actor, action = decimal entity id and action id
//!
//! Example:
//! ```text
//! T:00000|U|274|2259
//! T:00720|U|274|2261
//! T:01450|U|274|2263
//! ```
//!
//! Lines starting with `#` and blank lines are ignored when parsing, so logs
//! can carry hand-written annotations.

use super::types::ActionUseEvent;

/// Serialize one event to a capture-log line
pub fn serialize_event(event: &ActionUseEvent) -> String {
    format!(
        "T:{:05}|U|{}|{}",
        event.time_ms % 100_000,
        event.actor_id,
        event.action_id
    )
}

/// Parse one capture-log line; returns None for malformed lines
pub fn parse_line(line: &str) -> Option<ActionUseEvent> {
    let mut parts = line.trim().split('|');

    let ts = parts.next()?.strip_prefix("T:")?;
    let time_ms: u32 = ts.parse().ok()?;

    if parts.next()? != "U" {
        return None;
    }

    let actor_id: u32 = parts.next()?.parse().ok()?;
    let action_id: u32 = parts.next()?.parse().ok()?;

    Some(ActionUseEvent {
        actor_id,
        action_id,
        time_ms,
    })
}

/// Parse a whole capture log, skipping blank lines and `#` comments.
/// Malformed lines are dropped rather than failing the whole log.
pub fn parse_capture_log(content: &str) -> Vec<ActionUseEvent> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize() {
        let event = ActionUseEvent::new(274, 2259, 720);
        assert_eq!(serialize_event(&event), "T:00720|U|274|2259");
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("T:00720|U|274|2259"),
            Some(ActionUseEvent::new(274, 2259, 720))
        );
        assert_eq!(parse_line("T:00720|X|274|2259"), None);
        assert_eq!(parse_line("garbage"), None);
    }

    #[test]
    fn test_parse_log_skips_comments_and_garbage() {
        let log = "# ninja opener capture\n\nT:00000|U|274|2259\nnot a line\nT:00720|U|274|2261\n";
        let events = parse_capture_log(log);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action_id, 2259);
        assert_eq!(events[1].time_ms, 720);
    }

    #[test]
    fn test_timestamp_wraps_at_five_digits() {
        let event = ActionUseEvent::new(1, 2, 123_456);
        assert_eq!(serialize_event(&event), "T:23456|U|1|2");
    }
}
