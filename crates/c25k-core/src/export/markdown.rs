use std::fmt::Write as _;

use crate::content::RESOURCE_URL;
use crate::plan::{DayLabel, Session};
use crate::profile::{Locale, UserProfile};

struct Labels {
    title: &'static str,
    name: &'static str,
    age: &'static str,
    start: &'static str,
    goal: &'static str,
    resource: &'static str,
    week: &'static str,
    day: &'static str,
    rest: &'static str,
    tip: &'static str,
    notes: &'static str,
}

const EN: Labels = Labels {
    title: "Couch to 5K Checklist",
    name: "Name",
    age: "Age",
    start: "Start Date",
    goal: "Personal Goal",
    resource: "Resource",
    week: "Week",
    day: "Day",
    rest: "Rest",
    tip: "Tip",
    notes: "Notes",
};

const ES: Labels = Labels {
    title: "Lista de control Couch to 5K",
    name: "Nombre",
    age: "Edad",
    start: "Fecha de inicio",
    goal: "Meta personal",
    resource: "Recurso",
    week: "Semana",
    day: "Día",
    rest: "Descanso",
    tip: "Consejo",
    notes: "Notas",
};

/// Printable checklist with one checkbox per session.
pub fn render(sessions: &[Session], profile: &UserProfile) -> String {
    let labels = match profile.locale {
        Locale::En => &EN,
        Locale::Es => &ES,
    };

    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", labels.title);
    let _ = writeln!(out, "**{}:** {}  ", labels.name, profile.name);
    let _ = writeln!(out, "**{}:** {}  ", labels.age, profile.age);
    let _ = writeln!(
        out,
        "**{}:** {}  ",
        labels.start,
        profile.start_date.format("%Y-%m-%d")
    );
    if let Some(goal) = &profile.goal {
        let _ = writeln!(out, "**{}:** {}  ", labels.goal, goal);
    }
    let _ = writeln!(
        out,
        "**{}:** [NHS Couch to 5K]({RESOURCE_URL})\n",
        labels.resource
    );

    for session in sessions {
        match session.day {
            DayLabel::Index(day) => {
                let _ = writeln!(
                    out,
                    "- [ ] {} {} {} {day}: {}",
                    labels.week, session.week, labels.day, session.workout
                );
            }
            DayLabel::Weekday(weekday) => {
                let _ = writeln!(
                    out,
                    "- [ ] {} {} {weekday} ({}): {}",
                    labels.week, session.week, labels.rest, session.workout
                );
            }
        }
        let _ = writeln!(out, "  - {}: {}", labels.tip, session.tip);
        if let Some(weather) = &session.weather {
            let _ = writeln!(out, "  - {weather}");
        }
        let _ = writeln!(out, "  - {}: ____", labels.notes);
    }
    out
}
