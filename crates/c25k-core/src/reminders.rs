//! Reminder email for the first workout.
//!
//! Messages go through a [`ReminderTransport`]. The shipped transport drops a
//! ready-to-send `reminder.eml` into the run directory.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use tracing::{info, warn};

use crate::calendar::place;
use crate::content::RESOURCE_URL;
use crate::plan::Session;
use crate::profile::{Locale, UserProfile};
use crate::weather::assess_conditions;

pub const OUTBOX_FILE_NAME: &str = "reminder.eml";

#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("failed to write reminder: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Build the reminder for `session`, warning about the weather when needed.
pub fn compose_reminder(profile: &UserProfile, session: &Session, to: &str) -> Reminder {
    let placed = place(profile, session);
    let date = placed.date.format("%Y-%m-%d");
    let time = placed.start.format("%H:%M");
    let mut body = String::new();

    let subject = match profile.locale {
        Locale::En => {
            let _ = writeln!(body, "Hi {},\n", profile.name);
            let _ = writeln!(
                body,
                "Your Couch to 5K plan starts on {date} at {time} ({}).\n",
                profile.timezone
            );
            let _ = writeln!(body, "Workout: {}", session.workout);
            let _ = writeln!(body, "Tip: {}", session.tip);
            format!("Your C25K session: Week {} Day {}", session.week, session.day)
        }
        Locale::Es => {
            let _ = writeln!(body, "Hola {},\n", profile.name);
            let _ = writeln!(
                body,
                "Su plan Couch to 5K comienza el {date} a las {time} ({}).\n",
                profile.timezone
            );
            let _ = writeln!(body, "Entrenamiento: {}", session.workout);
            let _ = writeln!(body, "Consejo: {}", session.tip);
            format!("Su sesión C25K: Semana {} Día {}", session.week, session.day)
        }
    };

    if let Some(weather) = &session.weather {
        let _ = writeln!(body, "\n{weather}");
        let conditions = assess_conditions(weather);
        if conditions.rain_expected {
            let _ = writeln!(body, "{}", rain_warning(profile.locale));
        } else if conditions.is_inclement() {
            let _ = writeln!(
                body,
                "{} ({})",
                inclement_warning(profile.locale),
                conditions.reasons.join(", ")
            );
        }
    }

    let _ = writeln!(body, "\n{RESOURCE_URL}");

    Reminder {
        to: to.to_string(),
        subject,
        body,
    }
}

fn rain_warning(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Rain is expected. Consider an indoor alternative such as a treadmill or mall walk.",
        Locale::Es => "Se espera lluvia. Considere una alternativa bajo techo, como una cinta o caminar en un centro comercial.",
    }
}

fn inclement_warning(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Weather may be inclement. Dress for the conditions or move the session indoors.",
        Locale::Es => "El clima puede ser adverso. Vístase de acuerdo con las condiciones o entrene bajo techo.",
    }
}

/// Where a reminder ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Outbox(PathBuf),
}

pub trait ReminderTransport {
    fn deliver(&self, reminder: &Reminder) -> Result<Delivery, ReminderError>;
}

/// Relay settings read from `C25K_SMTP_HOST`, `C25K_SMTP_USER` and `C25K_SMTP_PASSWORD`.
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl SmtpSettings {
    pub fn from_env() -> Option<Self> {
        let read = |var: &str| env::var(var).ok().filter(|value| !value.trim().is_empty());
        Some(Self {
            host: read("C25K_SMTP_HOST")?,
            user: read("C25K_SMTP_USER")?,
            password: read("C25K_SMTP_PASSWORD")?,
        })
    }
}

/// Writes the message as an RFC 5322 file for the user's mail client to send.
pub struct OutboxTransport {
    dir: PathBuf,
    relay: Option<SmtpSettings>,
}

impl OutboxTransport {
    pub fn new(dir: &Path, relay: Option<SmtpSettings>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            relay,
        }
    }
}

impl ReminderTransport for OutboxTransport {
    fn deliver(&self, reminder: &Reminder) -> Result<Delivery, ReminderError> {
        match &self.relay {
            Some(relay) => warn!(
                host = %relay.host,
                "Direct SMTP delivery is not available; writing reminder to the outbox"
            ),
            None => warn!("SMTP relay not configured; writing reminder to the outbox"),
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(OUTBOX_FILE_NAME);
        let from = self
            .relay
            .as_ref()
            .map(|relay| relay.user.as_str())
            .unwrap_or("c25k@localhost");
        let message = format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nMIME-Version: 1.0\r\n\
             Content-Type: text/plain; charset=utf-8\r\nContent-Transfer-Encoding: 8bit\r\n\r\n{}",
            header_value(from),
            header_value(&reminder.to),
            encode_header(&reminder.subject),
            reminder.body.replace('\n', "\r\n")
        );
        fs::write(&path, message)?;
        info!(to = %reminder.to, path = %path.display(), "Reminder saved");
        Ok(Delivery::Outbox(path))
    }
}

/// Single-line header value; CR and LF are dropped.
fn header_value(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '\r' | '\n')).collect()
}

/// RFC 2047 `B` encoding for header text that is not plain ASCII.
fn encode_header(value: &str) -> String {
    let value = header_value(value);
    if value.is_ascii() {
        value
    } else {
        format!("=?utf-8?B?{}?=", STANDARD.encode(value.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use tempfile::tempdir;

    fn first_workout(sessions: &[Session]) -> Session {
        sessions.iter().find(|s| !s.is_rest()).cloned().unwrap()
    }

    #[test]
    fn test_compose_plain_reminder() {
        let profile = fixtures::profile();
        let session = first_workout(&fixtures::plan(&profile));
        let reminder = compose_reminder(&profile, &session, "ana@example.com");
        assert_eq!(reminder.subject, "Your C25K session: Week 1 Day 1");
        assert!(reminder.body.contains("starts on 2025-07-15 at 07:00 (America/New_York)"));
        assert!(reminder.body.contains("Tip: Remember to stretch"));
        assert!(!reminder.body.contains("indoor"));
    }

    #[test]
    fn test_rain_and_inclement_warnings() {
        let profile = fixtures::profile();
        let mut session = first_workout(&fixtures::plan(&profile));

        session.weather = Some("Forecast: 50-60°F, rain likely, rainy.".to_string());
        let reminder = compose_reminder(&profile, &session, "ana@example.com");
        assert!(reminder.body.contains("Rain is expected"));

        session.weather = Some("Forecast: 78-96°F, clear skies.".to_string());
        let reminder = compose_reminder(&profile, &session, "ana@example.com");
        assert!(reminder.body.contains("Weather may be inclement. Dress for the conditions or move the session indoors. (high heat)"));
    }

    #[test]
    fn test_outbox_writes_eml() {
        let dir = tempdir().unwrap();
        let transport = OutboxTransport::new(dir.path(), None);
        let reminder = Reminder {
            to: "ana@example.com".to_string(),
            subject: "Hello".to_string(),
            body: "line one\nline two\n".to_string(),
        };
        let Delivery::Outbox(path) = transport.deliver(&reminder).unwrap();
        assert_eq!(path, dir.path().join(OUTBOX_FILE_NAME));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("From: c25k@localhost\r\nTo: ana@example.com\r\nSubject: Hello\r\n"));
        assert!(written.ends_with("\r\n\r\nline one\r\nline two\r\n"));
    }

    #[test]
    fn test_outbox_headers_stay_single_line_and_ascii() {
        let dir = tempdir().unwrap();
        let transport = OutboxTransport::new(dir.path(), None);
        let reminder = Reminder {
            to: "ana@example.com\r\nBcc: other@example.com".to_string(),
            subject: "Su sesión C25K: Semana 1 Día 1".to_string(),
            body: "Hola\n".to_string(),
        };
        let Delivery::Outbox(path) = transport.deliver(&reminder).unwrap();
        let written = fs::read_to_string(path).unwrap();
        let (headers, _) = written.split_once("\r\n\r\n").unwrap();

        assert!(headers.is_ascii());
        assert!(!headers.lines().any(|line| line.starts_with("Bcc:")));
        assert!(headers.contains("To: ana@example.comBcc: other@example.com\r\n"));
        let encoded = STANDARD.encode("Su sesión C25K: Semana 1 Día 1".as_bytes());
        assert!(headers.contains(&format!("Subject: =?utf-8?B?{encoded}?=\r\n")));
    }

    #[test]
    fn test_smtp_settings_debug_hides_password() {
        let settings = SmtpSettings {
            host: "smtp.example.com".to_string(),
            user: "me".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
