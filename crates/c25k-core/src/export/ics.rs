//! iCalendar (RFC 5545) output.

use crate::calendar::place;
use crate::content;
use crate::plan::{DayLabel, Session};
use crate::profile::UserProfile;

const PRODID: &str = "-//Couch to 5K//EN";
const MAX_LINE_OCTETS: usize = 75;
const LOCAL_STAMP: &str = "%Y%m%dT%H%M%S";

pub fn render(sessions: &[Session], profile: &UserProfile) -> String {
    let tz = &profile.timezone;
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:{}", escape_text(&calendar_name(profile))),
        format!("X-WR-TIMEZONE:{tz}"),
    ];
    let stamp = profile.start_date.format("%Y%m%dT000000Z");

    for session in sessions {
        let placed = place(profile, session);
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!(
            "UID:c25k-{}-w{:02}-d{}@c25k.local",
            profile.start_date.format("%Y%m%d"),
            session.week,
            session.day_offset
        ));
        lines.push(format!("DTSTAMP:{stamp}"));
        lines.push(format!("SUMMARY:{}", escape_text(&summary(session))));
        lines.push(format!(
            "DTSTART;TZID={tz}:{}",
            placed.start.format(LOCAL_STAMP)
        ));
        lines.push(format!("DTEND;TZID={tz}:{}", placed.end.format(LOCAL_STAMP)));

        let mut description = session.description.clone();
        if let Some(weather) = &session.weather {
            description.push('\n');
            description.push_str(weather);
        }
        lines.push(format!("DESCRIPTION:{}", escape_text(&description)));
        lines.push(format!(
            "X-APPLE-NOTES:{}",
            escape_text(&format!("Workout: {} | Tip: {}", session.workout, session.tip))
        ));
        if session.is_rest() {
            lines.push("TRANSP:TRANSPARENT".to_string());
        } else if profile.alert_minutes > 0 {
            lines.push("BEGIN:VALARM".to_string());
            lines.push(format!("TRIGGER:-PT{}M", profile.alert_minutes));
            lines.push("ACTION:DISPLAY".to_string());
            lines.push(format!(
                "DESCRIPTION:{}",
                escape_text(content::alarm_text(profile.locale))
            ));
            lines.push("END:VALARM".to_string());
        }
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn calendar_name(profile: &UserProfile) -> String {
    format!("Couch to 5K - {}", profile.name)
}

pub fn summary(session: &Session) -> String {
    match session.day {
        DayLabel::Weekday(weekday) => format!("C25K Week {} {weekday} (Rest)", session.week),
        DayLabel::Index(day) => format!("C25K Week {} - Day {day}", session.week),
    }
}

/// Escape a TEXT property value.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Split a content line into 75-octet pieces joined by CRLF + space.
/// Never splits inside a UTF-8 sequence.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut budget = MAX_LINE_OCTETS;
    let mut used = 0;
    for c in line.chars() {
        let width = c.len_utf8();
        if used + width > budget {
            out.push_str("\r\n ");
            // Continuation lines spend one octet on the leading space.
            budget = MAX_LINE_OCTETS - 1;
            used = 0;
        }
        out.push(c);
        used += width;
    }
    out
}
