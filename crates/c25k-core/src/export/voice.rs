use std::fmt::Write as _;

use crate::calendar::session_date;
use crate::plan::Session;
use crate::profile::{Locale, UserProfile};

/// Script meant to be read aloud by a screen reader or voice assistant.
/// Rest days are skipped.
pub fn render(sessions: &[Session], profile: &UserProfile) -> String {
    let mut out = String::new();
    match profile.locale {
        Locale::En => {
            let _ = writeln!(
                out,
                "Couch to 5K voice prompts for {}. Listen to your body and stop if you feel unwell.\n",
                profile.name
            );
        }
        Locale::Es => {
            let _ = writeln!(
                out,
                "Indicaciones de voz Couch to 5K para {}. Escuche a su cuerpo y deténgase si no se siente bien.\n",
                profile.name
            );
        }
    }

    for session in sessions.iter().filter(|session| !session.is_rest()) {
        let date = session_date(profile.start_date, session);
        let time = profile.session_time.format("%H:%M");
        match profile.locale {
            Locale::En => {
                let _ = writeln!(
                    out,
                    "Week {}, day {}. {} at {time}. {} minutes. {} Tip: {}\n",
                    session.week,
                    session.day,
                    date.format("%A, %B %-d"),
                    session.duration,
                    session.workout,
                    session.tip
                );
            }
            Locale::Es => {
                let _ = writeln!(
                    out,
                    "Semana {}, día {}. {} a las {time}. {} minutos. {} Consejo: {}\n",
                    session.week,
                    session.day,
                    date.format("%d/%m/%Y"),
                    session.duration,
                    session.workout,
                    session.tip
                );
            }
        }
    }

    match profile.locale {
        Locale::En => out.push_str("You finished the plan. Well done!\n"),
        Locale::Es => out.push_str("Completó el plan. ¡Bien hecho!\n"),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;

    #[test]
    fn test_one_prompt_per_workout() {
        let profile = fixtures::profile();
        let sessions = fixtures::plan(&profile);
        let script = render(&sessions, &profile);
        let workouts = sessions.iter().filter(|s| !s.is_rest()).count();
        assert_eq!(script.matches("Week ").count(), workouts);
        assert!(script.contains("Week 1, day 1. Tuesday, July 15 at 07:00. 30 minutes."));
        assert!(!script.contains("Rest Day"));
    }

    #[test]
    fn test_spanish_script() {
        let mut profile = fixtures::profile();
        profile.locale = Locale::Es;
        let script = render(&fixtures::plan(&profile), &profile);
        assert!(script.contains("Semana 1, día 1. 15/07/2025 a las 07:00. 30 minutos."));
        assert!(script.ends_with("¡Bien hecho!\n"));
    }
}
