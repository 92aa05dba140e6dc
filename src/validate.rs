use crate::metrics;
use crate::records::{
    CalorieItem, CaregiverInvite, DoseEvent, DoseStatus, FitnessLog, HydrationEvent,
    HydrationSettings, HydrationSettingsUpdate, Medicine, MoodEntry, RecordDraft, RecordFields,
    SleepEntry,
};
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

pub const HYDRATION_GOAL_RANGE_ML: (f64, f64) = (500.0, 5000.0);
pub const REMINDER_RANGE_MIN: (f64, f64) = (15.0, 180.0);
pub const STRESS_RANGE: (f64, f64) = (1.0, 10.0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult<T> = Result<T, ValidationError>;

fn required_text(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn finite(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::new(format!("{field} must be a number")));
    }
    Ok(value)
}

fn positive(field: &str, value: f64) -> ValidationResult<f64> {
    if finite(field, value)? <= 0.0 {
        return Err(ValidationError::new(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(value)
}

fn bounded(field: &str, value: f64, (min, max): (f64, f64)) -> ValidationResult<f64> {
    let value = finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::new(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(value)
}

fn time_of_day(field: &str, value: &str) -> ValidationResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| ValidationError::new(format!("{field} must be a time in HH:MM format")))
}

fn calendar_date(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| ValidationError::new(format!("{field} must be a date in YYYY-MM-DD format")))?;
    Ok(trimmed.to_string())
}

fn trimmed_set(values: Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    for value in values {
        let trimmed = value.trim().to_string();
        if !trimmed.is_empty() && !out.contains(&trimmed) {
            out.push(trimmed);
        }
    }
    out
}

/// Validates one submitted draft and produces the normalized field-set for
/// storage. The caller performs no mutation when this fails.
pub fn validate_draft(draft: RecordDraft) -> ValidationResult<RecordFields> {
    match draft {
        RecordDraft::Medicine(draft) => {
            let name = required_text("name", &draft.name)?;
            let dosage = required_text("dosage", &draft.dosage)?;
            let frequency = required_text("frequency", &draft.frequency)?;
            if draft.times.is_empty() {
                return Err(ValidationError::new("at least one dose time is required"));
            }
            let mut times = Vec::with_capacity(draft.times.len());
            for time in &draft.times {
                times.push(time_of_day("dose time", time)?.format("%H:%M").to_string());
            }
            let supply = match draft.supply_days {
                Some(value) => bounded("supply", value, (0.0, 365.0))?,
                None => 30.0,
            };
            Ok(RecordFields::Medicine(Medicine {
                name,
                dosage,
                frequency,
                times,
                supply_days: supply.round() as u32,
                notes: draft.notes.trim().to_string(),
            }))
        }
        RecordDraft::DoseEvent(draft) => {
            let medicine = required_text("medicine", &draft.medicine)?;
            let dosage = required_text("dosage", &draft.dosage)?;
            let date = calendar_date("date", &draft.date)?;
            let time = time_of_day("time", &draft.time)?.format("%H:%M").to_string();
            let notes = match draft.notes {
                Some(notes) if !notes.trim().is_empty() => notes.trim().to_string(),
                _ => match draft.status {
                    DoseStatus::Taken => "On time".to_string(),
                    DoseStatus::Skipped => "Skipped dose".to_string(),
                },
            };
            Ok(RecordFields::DoseEvent(DoseEvent {
                medicine,
                dosage,
                date,
                time,
                status: draft.status,
                notes,
            }))
        }
        RecordDraft::FitnessLog(draft) => {
            let date = calendar_date("date", &draft.date)?;
            let steps = positive("steps", draft.steps)?.round() as u32;
            let duration = positive("duration", draft.duration_min)?.round() as u32;
            let goal_value = positive("goal value", draft.goal_value)?;
            let progress =
                metrics::fitness_progress(steps, duration, draft.goal_kind, goal_value);
            Ok(RecordFields::FitnessLog(FitnessLog {
                date,
                steps,
                duration_min: duration,
                goal_kind: draft.goal_kind,
                goal_value,
                progress_percent: progress,
                notes: draft.notes.trim().to_string(),
            }))
        }
        RecordDraft::SleepEntry(draft) => {
            let start = time_of_day("sleep start", &draft.start)?;
            let end = time_of_day("wake time", &draft.end)?;
            let duration = metrics::sleep_duration_hours(start, end);
            Ok(RecordFields::SleepEntry(SleepEntry {
                start: start.format("%H:%M").to_string(),
                end: end.format("%H:%M").to_string(),
                duration_hours: duration,
                quality: metrics::sleep_quality(duration),
                notes: draft.notes.trim().to_string(),
            }))
        }
        RecordDraft::MoodEntry(draft) => {
            let stress = bounded("stress level", draft.stress, STRESS_RANGE)?;
            Ok(RecordFields::MoodEntry(MoodEntry {
                mood: draft.mood,
                stress: stress.round() as u8,
                activities: trimmed_set(draft.activities),
                notes: draft.notes.trim().to_string(),
            }))
        }
        RecordDraft::CalorieItem(draft) => {
            let name = required_text("food name", &draft.name)?;
            let cal_per_serving = positive("calories per serving", draft.cal_per_serving)?;
            let servings = positive("servings", draft.servings)?;
            Ok(RecordFields::CalorieItem(CalorieItem {
                name,
                cal_per_serving,
                servings,
                total: metrics::round1(cal_per_serving * servings),
            }))
        }
        RecordDraft::CaregiverInvite(draft) => {
            let name = required_text("caregiver name", &draft.name)?;
            let email = required_text("caregiver email", &draft.email)?;
            if !email.contains('@') {
                return Err(ValidationError::new("caregiver email is not valid"));
            }
            let relation = required_text("relation", &draft.relation)?;
            let access_duration = required_text("access duration", &draft.access_duration)?;
            Ok(RecordFields::CaregiverInvite(CaregiverInvite {
                name,
                email,
                relation,
                shared_trackers: trimmed_set(draft.shared_trackers),
                access_duration,
                message: draft.message.trim().to_string(),
            }))
        }
        RecordDraft::HydrationEvent(draft) => {
            let amount = positive("drink amount", draft.amount_ml)?;
            Ok(RecordFields::HydrationEvent(HydrationEvent {
                amount_ml: amount.round() as u32,
            }))
        }
    }
}

/// Applies a partial settings update, leaving untouched fields as they are.
pub fn validate_hydration_settings(
    current: &HydrationSettings,
    update: HydrationSettingsUpdate,
) -> ValidationResult<HydrationSettings> {
    let mut settings = current.clone();
    if let Some(goal) = update.goal_ml {
        let goal = bounded("hydration goal", goal, HYDRATION_GOAL_RANGE_ML)?;
        settings.goal_ml = goal.round() as u32;
    }
    if let Some(interval) = update.reminder_minutes {
        let interval = bounded("reminder interval", interval, REMINDER_RANGE_MIN)?;
        settings.reminder_minutes = Some(interval.round() as u32);
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{
        CalorieItemDraft, HydrationEventDraft, MedicineDraft, Mood, MoodEntryDraft,
        SleepEntryDraft, StoreKind,
    };

    #[test]
    fn medicine_requires_name() {
        let draft = RecordDraft::Medicine(MedicineDraft {
            name: "   ".to_string(),
            dosage: "500mg".to_string(),
            frequency: "daily".to_string(),
            times: vec!["08:00".to_string()],
            supply_days: None,
            notes: String::new(),
        });
        let err = validate_draft(draft).unwrap_err();
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn medicine_defaults_supply_and_normalizes_times() {
        let draft = RecordDraft::Medicine(MedicineDraft {
            name: " Metformin ".to_string(),
            dosage: "500mg".to_string(),
            frequency: "twice daily".to_string(),
            times: vec![" 8:00 ".to_string(), "20:30".to_string()],
            supply_days: None,
            notes: "with food".to_string(),
        });
        let RecordFields::Medicine(med) = validate_draft(draft).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(med.name, "Metformin");
        assert_eq!(med.times, vec!["08:00", "20:30"]);
        assert_eq!(med.supply_days, 30);
    }

    #[test]
    fn mood_stress_out_of_range_rejected() {
        let draft = RecordDraft::MoodEntry(MoodEntryDraft {
            mood: Mood::Stressed,
            stress: 11.0,
            activities: vec![],
            notes: String::new(),
        });
        assert!(validate_draft(draft).is_err());
    }

    #[test]
    fn mood_activities_deduplicated() {
        let draft = RecordDraft::MoodEntry(MoodEntryDraft {
            mood: Mood::Happy,
            stress: 3.0,
            activities: vec![
                "Walking".to_string(),
                " Walking ".to_string(),
                "Music".to_string(),
                "".to_string(),
            ],
            notes: String::new(),
        });
        let RecordFields::MoodEntry(entry) = validate_draft(draft).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(entry.activities, vec!["Walking", "Music"]);
    }

    #[test]
    fn calorie_item_rejects_non_positive_and_non_finite() {
        let base = CalorieItemDraft {
            name: "Oatmeal".to_string(),
            cal_per_serving: 150.0,
            servings: 2.0,
        };

        let mut zero = base.clone();
        zero.servings = 0.0;
        assert!(validate_draft(RecordDraft::CalorieItem(zero)).is_err());

        let mut nan = base.clone();
        nan.cal_per_serving = f64::NAN;
        assert!(validate_draft(RecordDraft::CalorieItem(nan)).is_err());

        let RecordFields::CalorieItem(item) =
            validate_draft(RecordDraft::CalorieItem(base)).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(item.total, 300.0);
    }

    #[test]
    fn sleep_crossing_midnight_is_not_an_error() {
        let draft = RecordDraft::SleepEntry(SleepEntryDraft {
            start: "23:00".to_string(),
            end: "07:00".to_string(),
            notes: String::new(),
        });
        let RecordFields::SleepEntry(entry) = validate_draft(draft).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(entry.duration_hours, 8.0);
        assert_eq!(entry.quality, crate::records::SleepQuality::Excellent);
    }

    #[test]
    fn hydration_goal_bounds() {
        let current = HydrationSettings::default();

        let rejected = validate_hydration_settings(
            &current,
            HydrationSettingsUpdate {
                goal_ml: Some(6000.0),
                reminder_minutes: None,
            },
        );
        assert!(rejected.is_err());

        let too_frequent = validate_hydration_settings(
            &current,
            HydrationSettingsUpdate {
                goal_ml: None,
                reminder_minutes: Some(5.0),
            },
        );
        assert!(too_frequent.is_err());

        let accepted = validate_hydration_settings(
            &current,
            HydrationSettingsUpdate {
                goal_ml: Some(2000.0),
                reminder_minutes: Some(60.0),
            },
        )
        .unwrap();
        assert_eq!(accepted.goal_ml, 2000);
        assert_eq!(accepted.reminder_minutes, Some(60));
    }

    #[test]
    fn hydration_event_must_be_positive() {
        let draft = RecordDraft::HydrationEvent(HydrationEventDraft { amount_ml: -250.0 });
        assert!(validate_draft(draft).is_err());

        let draft = RecordDraft::HydrationEvent(HydrationEventDraft { amount_ml: 250.0 });
        let fields = validate_draft(draft).unwrap();
        assert_eq!(fields.kind(), StoreKind::HydrationIntake);
    }
}
