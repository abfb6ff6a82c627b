//! Fixed workout, tip and narrative text in every supported locale.
//!
//! The tables follow the NHS Couch to 5K progression. They are plain constants:
//! nothing here is configurable at runtime.

use chrono::{NaiveTime, Weekday};

use crate::profile::{Gender, Locale};

/// Number of distinct weekly workouts; later weeks repeat the last entry.
pub const WORKOUT_TABLE_WEEKS: u32 = 10;

/// Link included in checklists and reminders.
pub const RESOURCE_URL: &str = "https://www.nhs.uk/live-well/exercise/couch-to-5k-week-by-week/";

const WORKOUTS_EN: [&str; 10] = [
    "Brisk 5-min warmup walk. Then alternate 60 sec jogging and 90 sec walking for 20 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Then alternate 90 sec jogging, 2 min walking for 20 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. 90 sec jog, 90 sec walk, 3 min jog, 3 min walk, repeat. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 3 min, walk 90 sec, jog 5 min, walk 2.5 min, jog 3 min, walk 90 sec, jog 5 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 5 min, walk 3 min, jog 5 min, walk 3 min, jog 5 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 8 min, walk 5 min, jog 8 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 25 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 28 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 30 min. Hydrate before and after.",
    "Brisk 5-min warmup walk. Jog 30 min and celebrate your first 5K! Hydrate before and after.",
];

const WORKOUTS_ES: [&str; 10] = [
    "Camine rápido 5 min para calentar. Luego alterne 60 seg corriendo y 90 seg caminando durante 20 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Luego alterne 90 seg corriendo, 2 min caminando durante 20 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. 90 seg corra, 90 seg camine, 3 min corra, 3 min camine, repita. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Corra 3 min, camine 90 seg, corra 5 min, camine 2.5 min, corra 3 min, camine 90 seg, corra 5 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Corra 5 min, camine 3 min, corra 5 min, camine 3 min, corra 5 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Corra 8 min, camine 5 min, corra 8 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Corra 25 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Corra 28 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. Corra 30 min. Hidrátese antes y después.",
    "Camine rápido 5 min para calentar. ¡Corra 30 min y celebre sus primeros 5K! Hidrátese antes y después.",
];

const TIPS_EN: [&str; 10] = [
    "Remember to stretch before and after your workout!",
    "Wear comfortable shoes and clothing.",
    "Stay hydrated and listen to your body.",
    "Rest is as important as running. Take it easy on rest days!",
    "Track your progress and celebrate small wins.",
    "Invite a friend or family member to join you!",
    "If you feel pain, stop and consult a professional.",
    "Set a reminder so you don't miss your session.",
    "Smile and enjoy the journey!",
    "You're doing great, keep going!",
];

const TIPS_ES: [&str; 10] = [
    "¡Recuerda estirar antes y después de tu entrenamiento!",
    "Usa calzado y ropa cómodos.",
    "Mantente hidratado y escucha a tu cuerpo.",
    "El descanso es tan importante como correr. ¡Tómalo con calma en los días de descanso!",
    "Registra tu progreso y celebra los pequeños logros.",
    "¡Invita a un amigo o familiar a unirse!",
    "Si sientes dolor, detente y consulta a un profesional.",
    "Pon una alarma para no perder tu sesión.",
    "¡Sonríe y disfruta el proceso!",
    "¡Lo estás haciendo genial, sigue así!",
];

/// Workout text for a plan week. Weeks past the table plateau on the final entry.
pub fn workout_for_week(week: u32, locale: Locale) -> &'static str {
    let index = week.clamp(1, WORKOUT_TABLE_WEEKS) as usize - 1;
    match locale {
        Locale::En => WORKOUTS_EN[index],
        Locale::Es => WORKOUTS_ES[index],
    }
}

/// Tip from the ten-entry rotation, indexed by `(day - 1) mod 10`.
pub fn tip_for_day(day: i64, locale: Locale) -> &'static str {
    let tips = match locale {
        Locale::En => &TIPS_EN,
        Locale::Es => &TIPS_ES,
    };
    tips[(day - 1).rem_euclid(tips.len() as i64) as usize]
}

/// Everything the workout narrative embeds about the runner.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext {
    pub week: u32,
    pub gender: Gender,
    pub age: u32,
    pub weight_kg: f64,
    pub session_time: NaiveTime,
}

pub fn workout_narrative(
    ctx: &NarrativeContext,
    workout: &str,
    tip: &str,
    locale: Locale,
) -> String {
    let time = ctx.session_time.format("%H:%M");
    match locale {
        Locale::En => format!(
            "Follow the Couch to 5K plan - Week {week} session. \
             Note: This plan is tailored for an adult {gender} aged {age} with hypertension. \
             Weight: {weight:.1} kg. Session time: {time}. \
             Please monitor your health and consult your doctor if needed.\n\
             Workout: {workout}\nTip: {tip}",
            week = ctx.week,
            gender = gender_label(ctx.gender, locale),
            age = ctx.age,
            weight = ctx.weight_kg,
        ),
        Locale::Es => format!(
            "Siga el plan Couch to 5K - sesión de la semana {week}. \
             Nota: este plan está adaptado para {gender} de {age} años con hipertensión. \
             Peso: {weight:.1} kg. Hora de la sesión: {time}. \
             Vigile su salud y consulte a su médico si es necesario.\n\
             Entrenamiento: {workout}\nConsejo: {tip}",
            week = ctx.week,
            gender = gender_label(ctx.gender, locale),
            age = ctx.age,
            weight = ctx.weight_kg,
        ),
    }
}

fn gender_label(gender: Gender, locale: Locale) -> &'static str {
    match (locale, gender) {
        (Locale::En, Gender::Male) => "male",
        (Locale::En, Gender::Female) => "female",
        (Locale::En, Gender::Other) => "person",
        (Locale::Es, Gender::Male) => "un hombre adulto",
        (Locale::Es, Gender::Female) => "una mujer adulta",
        (Locale::Es, Gender::Other) => "una persona adulta",
    }
}

/// Suffix appended to every workout narrative when the safety rule applies.
pub fn safety_note(locale: Locale) -> &'static str {
    match locale {
        Locale::En => " (Reduced session duration for safety.)",
        Locale::Es => " (Duración de la sesión reducida por seguridad.)",
    }
}

pub fn rest_narrative(week: u32, weekday: Weekday, locale: Locale) -> String {
    match locale {
        Locale::En => format!(
            "Rest Day - Week {week} {weekday}. Rest and recover. Hydrate and stretch."
        ),
        Locale::Es => format!(
            "Día de descanso - Semana {week} {weekday}. Descanse y recupérese. Hidrátese y estire."
        ),
    }
}

pub fn rest_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Rest Day",
        Locale::Es => "Día de descanso",
    }
}

pub fn alarm_text(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Time for your C25K session!",
        Locale::Es => "¡Hora de tu sesión C25K!",
    }
}
