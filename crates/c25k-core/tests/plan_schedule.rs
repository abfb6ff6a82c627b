use chrono::{Datelike, Duration, NaiveDate, Weekday};

use c25k_core::calendar::{place, session_date};
use c25k_core::export::json;
use c25k_core::{DayLabel, Gender, ProfileInput, UserProfile, WeightUnit, build_plan};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date")
}

fn profile(adjust: impl FnOnce(&mut ProfileInput)) -> UserProfile {
    let mut input = ProfileInput {
        name: Some("Jordan".to_string()),
        age: Some(45),
        weight: Some(180.0),
        units: WeightUnit::Imperial,
        gender: Some(Gender::Male),
        ..ProfileInput::default()
    };
    adjust(&mut input);
    input.validate(today()).expect("profile should validate")
}

#[test]
fn default_plan_runs_from_mid_july_to_late_september() {
    let profile = profile(|_| {});
    let sessions = build_plan(&profile);
    let workouts: Vec<_> = sessions.iter().filter(|s| !s.is_rest()).collect();

    assert_eq!(workouts.len(), 30);
    assert_eq!(
        session_date(profile.start_date, workouts[0]),
        NaiveDate::from_ymd_opt(2025, 7, 15).unwrap()
    );
    assert_eq!(
        session_date(profile.start_date, workouts[29]),
        NaiveDate::from_ymd_opt(2025, 9, 20).unwrap()
    );
    assert!(workouts.iter().all(|s| s.duration == 30));
}

#[test]
fn sessions_are_ordered_and_never_share_a_day() {
    let profile = profile(|input| {
        input.days_per_week = 4;
        input.rest_days = vec!["Wed".to_string(), "Sun".to_string()];
    });
    let sessions = build_plan(&profile);

    for pair in sessions.windows(2) {
        assert!(
            (pair[0].week, pair[0].day_offset) < (pair[1].week, pair[1].day_offset),
            "{:?} should come before {:?}",
            pair[0],
            pair[1]
        );
    }
    for session in sessions.iter().filter(|s| s.is_rest()) {
        let weekday = session_date(profile.start_date, session).weekday();
        assert!(profile.rest_days.contains(&weekday));
        assert!(matches!(session.day, DayLabel::Weekday(day) if day == weekday));
    }
}

#[test]
fn older_or_heavier_runners_get_shorter_sessions() {
    for adjust in [
        (|input: &mut ProfileInput| input.age = Some(60)) as fn(&mut ProfileInput),
        |input: &mut ProfileInput| {
            input.units = WeightUnit::Metric;
            input.weight = Some(100.0);
        },
    ] {
        let sessions = build_plan(&profile(adjust));
        assert!(
            sessions
                .iter()
                .filter(|s| !s.is_rest())
                .all(|s| s.duration == 25)
        );
    }
}

#[test]
fn next_monday_start_and_session_time_are_honored() {
    let profile = profile(|input| {
        input.start = "next-monday".to_string();
        input.session_time = "18:45".to_string();
    });
    assert_eq!(profile.start_date.weekday(), Weekday::Mon);
    assert_eq!(profile.start_date, NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());

    let sessions = build_plan(&profile);
    let placed = place(&profile, &sessions[0]);
    assert_eq!(placed.start.format("%Y-%m-%d %H:%M").to_string(), "2025-07-07 18:45");
    assert_eq!((placed.end - placed.start).num_minutes(), 30);
}

#[test]
fn long_plans_repeat_the_final_workout() {
    let profile = profile(|input| input.weeks = 12);
    let sessions = build_plan(&profile);
    let week = |n: u32| {
        sessions
            .iter()
            .find(|s| s.week == n && !s.is_rest())
            .map(|s| s.workout.clone())
            .unwrap()
    };
    assert_eq!(week(12), week(10));
    assert_ne!(week(9), week(10));
}

#[test]
fn json_export_reads_back_identically() {
    let profile = profile(|input| input.weeks = 3);
    let sessions = build_plan(&profile);
    let body = json::render(&sessions).unwrap();
    assert_eq!(json::parse(&body).unwrap(), sessions);
}

#[test]
fn session_dates_never_go_backwards() {
    for days in [1, 3, 7] {
        let profile = profile(|input| {
            input.days_per_week = days;
            input.rest_days = vec!["Sat".to_string(), "Sun".to_string(), "Wed".to_string()];
        });
        let dates: Vec<NaiveDate> = build_plan(&profile)
            .iter()
            .map(|session| session_date(profile.start_date, session))
            .collect();
        for pair in dates.windows(2) {
            assert!(
                pair[1] >= pair[0],
                "{days} days/week: {} follows {}",
                pair[1],
                pair[0]
            );
        }
    }
}

#[test]
fn same_slot_moves_exactly_one_week_per_week() {
    for days in [1, 3, 7] {
        let profile = profile(|input| input.days_per_week = days);
        let sessions = build_plan(&profile);
        for session in &sessions {
            let Some(next) = sessions
                .iter()
                .find(|s| s.week == session.week + 1 && s.day_offset == session.day_offset)
            else {
                assert!(
                    session.week == profile.weeks,
                    "{days} days/week: week {} offset {} has no follower",
                    session.week,
                    session.day_offset
                );
                continue;
            };
            assert_eq!(
                session_date(profile.start_date, next) - session_date(profile.start_date, session),
                Duration::days(7)
            );
        }
    }
}
