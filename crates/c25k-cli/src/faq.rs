use c25k_core::content::RESOURCE_URL;
use c25k_core::profile::{SAFETY_AGE_YEARS, SAFETY_WEIGHT_KG};

pub const DISCLAIMER: &str = "This program offers general fitness guidance only. \
It is not medical advice. Check with your doctor before starting any new exercise \
routine, especially if you have high blood pressure, heart problems or other \
health conditions.";

/// Question and answer pairs shown by `c25k faq`.
const ENTRIES: &[(&str, &str)] = &[
    (
        "What is Couch to 5K?",
        "A beginner running plan that builds from short run/walk intervals to \
         30 minutes of continuous running over about nine weeks.",
    ),
    (
        "How many days a week should I train?",
        "Three sessions with a rest day in between is the classic schedule. \
         Use --days-per-week to change it and --rest-days to pick your rest days.",
    ),
    (
        "What if I miss a session or a week feels too hard?",
        "Repeat the week. There is no prize for finishing early; consistency matters more than speed.",
    ),
    (
        "Which files does a run produce?",
        "Every run writes a checklist and a progress tracker. Add --format ics, csv, json, \
         google-fit or voice for calendar, spreadsheet and audio-friendly exports.",
    ),
    (
        "How do I record progress?",
        "Open the progress tracker CSV, mark completed sessions with 'y' and add notes. \
         The tracker is never overwritten, and the next run prints your completion rate.",
    ),
    (
        "Why is the forecast missing?",
        "Weather lookups need --location and network access. Use --no-weather to skip them.",
    ),
];

pub fn render() -> String {
    let mut text = String::from("Couch to 5K: frequently asked questions\n\n");
    for (question, answer) in ENTRIES {
        text.push_str(&format!("Q: {question}\nA: {answer}\n\n"));
    }
    text.push_str(&format!(
        "Q: Why are my sessions shorter?\nA: Runners aged {SAFETY_AGE_YEARS} or over, or \
         weighing {SAFETY_WEIGHT_KG:.0} kg or more, get 25-minute sessions instead of 30.\n\n"
    ));
    text.push_str(&format!("More information: {RESOURCE_URL}\n\n"));
    text.push_str("Disclaimer: ");
    text.push_str(DISCLAIMER);
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_ends_with_disclaimer() {
        let text = render();
        assert!(text.starts_with("Couch to 5K"));
        assert!(text.contains(RESOURCE_URL));
        assert!(text.trim_end().ends_with("health conditions."));
        assert_eq!(text.matches("Q: ").count(), ENTRIES.len() + 1);
    }
}
