use crate::metrics::{
    self, AdherenceTrend, DAILY_CALORIE_GOAL, adherence_rate, adherence_trend, goal_progress,
};
use crate::records::{
    DoseStatus, GoalKind, Mood, Record, RecordFields, RecordId, SleepQuality, StoreKind,
};
use crate::store::StoreSet;
use chrono::{DateTime, Local, NaiveTime};
use serde::Serialize;

/// Medicines at or below this many days of supply raise a refill alert.
pub const REFILL_THRESHOLD_DAYS: u32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    pub id: RecordId,
    pub created_at: i64,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreView {
    pub store: StoreKind,
    pub columns: Vec<&'static str>,
    pub rows: Vec<RowView>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingDose {
    pub time: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefillAlert {
    pub name: String,
    pub supply_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Summary {
    Medicines {
        count: usize,
        refill_alerts: Vec<RefillAlert>,
        upcoming_doses: Vec<UpcomingDose>,
    },
    Adherence {
        rate: f64,
        trend: AdherenceTrend,
    },
    Fitness {
        count: usize,
        latest_progress: Option<f64>,
    },
    Sleep {
        count: usize,
        last_duration_hours: Option<f64>,
        last_quality: Option<SleepQuality>,
    },
    Mood {
        count: usize,
        average_stress: Option<f64>,
    },
    Calories {
        total: f64,
        goal: f64,
        progress: f64,
        over_limit: bool,
    },
    Invites {
        count: usize,
    },
    Hydration {
        intake_ml: u64,
        goal_ml: u32,
        progress: f64,
        goal_reached: bool,
    },
}

pub fn columns(kind: StoreKind) -> &'static [&'static str] {
    match kind {
        StoreKind::Medicines => &["Name", "Dosage", "Frequency", "Times", "Supply (days)", "Notes"],
        StoreKind::DoseHistory => &["Date", "Time", "Medicine", "Dosage", "Status", "Notes"],
        StoreKind::FitnessLogs => &[
            "Date",
            "Steps",
            "Duration (min)",
            "Goal",
            "Progress %",
            "Notes",
        ],
        StoreKind::SleepEntries => &["Start", "Wake", "Duration (h)", "Quality", "Notes"],
        StoreKind::MoodLogs => &["Logged", "Mood", "Stress", "Activities", "Notes"],
        StoreKind::CalorieData => &[
            "Food",
            "Calories per Serving",
            "Servings",
            "Total Calories",
        ],
        StoreKind::CaregiverInvites => &[
            "Name",
            "Email",
            "Relation",
            "Shared Trackers",
            "Access Duration",
            "Message",
        ],
        StoreKind::HydrationIntake => &["Amount (ml)", "Logged"],
    }
}

fn timestamp_label(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn number_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn status_label(status: DoseStatus) -> &'static str {
    match status {
        DoseStatus::Taken => "Taken",
        DoseStatus::Skipped => "Skipped",
    }
}

fn mood_label(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "Happy",
        Mood::Neutral => "Neutral",
        Mood::Stressed => "Stressed",
        Mood::Sad => "Sad",
        Mood::Angry => "Angry",
    }
}

fn quality_label(quality: SleepQuality) -> &'static str {
    match quality {
        SleepQuality::Excellent => "Excellent",
        SleepQuality::Good => "Good",
        SleepQuality::Fair => "Fair",
        SleepQuality::Poor => "Poor",
    }
}

fn goal_kind_label(kind: GoalKind) -> &'static str {
    match kind {
        GoalKind::Steps => "steps",
        GoalKind::Duration => "duration",
        GoalKind::Calories => "calories",
    }
}

/// One record projected into display cells, in the column order of its
/// store. Shared by the view-model rows and the CSV exporter.
pub fn record_cells(record: &Record) -> Vec<String> {
    match &record.fields {
        RecordFields::Medicine(med) => vec![
            med.name.clone(),
            med.dosage.clone(),
            med.frequency.clone(),
            med.times.join(", "),
            med.supply_days.to_string(),
            med.notes.clone(),
        ],
        RecordFields::DoseEvent(event) => vec![
            event.date.clone(),
            event.time.clone(),
            event.medicine.clone(),
            event.dosage.clone(),
            status_label(event.status).to_string(),
            event.notes.clone(),
        ],
        RecordFields::FitnessLog(log) => vec![
            log.date.clone(),
            log.steps.to_string(),
            log.duration_min.to_string(),
            format!(
                "{} ({})",
                number_label(log.goal_value),
                goal_kind_label(log.goal_kind)
            ),
            format!("{:.0}", log.progress_percent),
            log.notes.clone(),
        ],
        RecordFields::SleepEntry(entry) => vec![
            entry.start.clone(),
            entry.end.clone(),
            format!("{:.1}", entry.duration_hours),
            quality_label(entry.quality).to_string(),
            entry.notes.clone(),
        ],
        RecordFields::MoodEntry(entry) => vec![
            timestamp_label(record.created_at),
            mood_label(entry.mood).to_string(),
            entry.stress.to_string(),
            entry.activities.join(", "),
            entry.notes.clone(),
        ],
        RecordFields::CalorieItem(item) => vec![
            item.name.clone(),
            number_label(item.cal_per_serving),
            number_label(item.servings),
            format!("{:.1}", item.total),
        ],
        RecordFields::CaregiverInvite(invite) => vec![
            invite.name.clone(),
            invite.email.clone(),
            invite.relation.clone(),
            invite.shared_trackers.join(", "),
            invite.access_duration.clone(),
            invite.message.clone(),
        ],
        RecordFields::HydrationEvent(event) => vec![
            event.amount_ml.to_string(),
            timestamp_label(record.created_at),
        ],
    }
}

fn summarize(set: &StoreSet, kind: StoreKind, now: NaiveTime) -> Summary {
    let records = set.get(kind).all();
    match kind {
        StoreKind::Medicines => {
            let mut refill_alerts = Vec::new();
            let mut upcoming_doses = Vec::new();
            for record in records {
                let RecordFields::Medicine(med) = &record.fields else {
                    continue;
                };
                if med.supply_days <= REFILL_THRESHOLD_DAYS {
                    refill_alerts.push(RefillAlert {
                        name: med.name.clone(),
                        supply_days: med.supply_days,
                    });
                }
                for time in &med.times {
                    let Ok(dose_time) = NaiveTime::parse_from_str(time, "%H:%M") else {
                        continue;
                    };
                    if dose_time >= now {
                        upcoming_doses.push(UpcomingDose {
                            time: time.clone(),
                            label: format!("{} ({})", med.name, med.dosage),
                        });
                    }
                }
            }
            upcoming_doses.sort_by(|a, b| a.time.cmp(&b.time));
            Summary::Medicines {
                count: records.len(),
                refill_alerts,
                upcoming_doses,
            }
        }
        StoreKind::DoseHistory => {
            let rate = adherence_rate(records.iter().filter_map(|record| match &record.fields {
                RecordFields::DoseEvent(event) => Some(event.status),
                _ => None,
            }));
            Summary::Adherence {
                rate,
                trend: adherence_trend(rate),
            }
        }
        StoreKind::FitnessLogs => Summary::Fitness {
            count: records.len(),
            latest_progress: records.last().and_then(|record| match &record.fields {
                RecordFields::FitnessLog(log) => Some(log.progress_percent),
                _ => None,
            }),
        },
        StoreKind::SleepEntries => {
            let last = records.last().and_then(|record| match &record.fields {
                RecordFields::SleepEntry(entry) => Some((entry.duration_hours, entry.quality)),
                _ => None,
            });
            Summary::Sleep {
                count: records.len(),
                last_duration_hours: last.map(|(hours, _)| hours),
                last_quality: last.map(|(_, quality)| quality),
            }
        }
        StoreKind::MoodLogs => {
            let stresses: Vec<f64> = records
                .iter()
                .filter_map(|record| match &record.fields {
                    RecordFields::MoodEntry(entry) => Some(f64::from(entry.stress)),
                    _ => None,
                })
                .collect();
            let average = if stresses.is_empty() {
                None
            } else {
                Some(metrics::round1(
                    stresses.iter().sum::<f64>() / stresses.len() as f64,
                ))
            };
            Summary::Mood {
                count: records.len(),
                average_stress: average,
            }
        }
        StoreKind::CalorieData => {
            let total: f64 = records
                .iter()
                .filter_map(|record| match &record.fields {
                    RecordFields::CalorieItem(item) => Some(item.total),
                    _ => None,
                })
                .sum();
            let total = metrics::round1(total);
            Summary::Calories {
                total,
                goal: DAILY_CALORIE_GOAL,
                progress: goal_progress(total, DAILY_CALORIE_GOAL),
                over_limit: total > DAILY_CALORIE_GOAL,
            }
        }
        StoreKind::CaregiverInvites => Summary::Invites {
            count: records.len(),
        },
        StoreKind::HydrationIntake => {
            let intake: u64 = records
                .iter()
                .filter_map(|record| match &record.fields {
                    RecordFields::HydrationEvent(event) => Some(u64::from(event.amount_ml)),
                    _ => None,
                })
                .sum();
            let goal = set.hydration_settings.goal_ml;
            Summary::Hydration {
                intake_ml: intake,
                goal_ml: goal,
                progress: goal_progress(intake as f64, f64::from(goal)),
                goal_reached: intake >= u64::from(goal),
            }
        }
    }
}

/// Projects one store into its view-model. Pure over the store contents and
/// the supplied time of day, so repeated calls with unchanged state yield
/// identical views.
pub fn render_store_at(set: &StoreSet, kind: StoreKind, now: NaiveTime) -> StoreView {
    let records = set.get(kind).all();
    let mut rows: Vec<RowView> = records
        .iter()
        .map(|record| RowView {
            id: record.id,
            created_at: record.created_at,
            cells: record_cells(record),
        })
        .collect();
    if kind.newest_first() {
        rows.reverse();
    }
    StoreView {
        store: kind,
        columns: columns(kind).to_vec(),
        rows,
        summary: summarize(set, kind, now),
    }
}

pub fn render_store(set: &StoreSet, kind: StoreKind) -> StoreView {
    render_store_at(set, kind, Local::now().time())
}

pub fn render_overview_at(set: &StoreSet, now: NaiveTime) -> Vec<StoreView> {
    StoreKind::ALL
        .iter()
        .map(|kind| render_store_at(set, *kind, now))
        .collect()
}

pub fn render_overview(set: &StoreSet) -> Vec<StoreView> {
    render_overview_at(set, Local::now().time())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{CalorieItem, FitnessLog, HydrationEvent, Medicine};
    use crate::store::RecordStore;

    fn time(value: &str) -> NaiveTime {
        NaiveTime::parse_from_str(value, "%H:%M").unwrap()
    }

    fn set_with(store: RecordStore) -> StoreSet {
        let mut set = StoreSet::new();
        set.insert(store);
        set
    }

    fn medicine(name: &str, times: &[&str], supply_days: u32) -> RecordFields {
        RecordFields::Medicine(Medicine {
            name: name.to_string(),
            dosage: "500mg".to_string(),
            frequency: "daily".to_string(),
            times: times.iter().map(|t| t.to_string()).collect(),
            supply_days,
            notes: String::new(),
        })
    }

    #[test]
    fn rendering_is_idempotent() {
        let mut store = RecordStore::new(StoreKind::CalorieData);
        store.add(
            RecordFields::CalorieItem(CalorieItem {
                name: "Oatmeal".to_string(),
                cal_per_serving: 150.0,
                servings: 2.0,
                total: 300.0,
            }),
            1,
        );
        let set = set_with(store);

        let first = render_store_at(&set, StoreKind::CalorieData, time("12:00"));
        let second = render_store_at(&set, StoreKind::CalorieData, time("12:00"));
        assert_eq!(first, second);
    }

    #[test]
    fn log_stores_render_newest_first() {
        let mut store = RecordStore::new(StoreKind::FitnessLogs);
        for (i, date) in ["2026-01-01", "2026-01-02"].iter().enumerate() {
            store.add(
                RecordFields::FitnessLog(FitnessLog {
                    date: date.to_string(),
                    steps: 1000,
                    duration_min: 30,
                    goal_kind: GoalKind::Steps,
                    goal_value: 2000.0,
                    progress_percent: 50.0,
                    notes: String::new(),
                }),
                i as i64 + 1,
            );
        }
        let set = set_with(store);

        let view = render_store_at(&set, StoreKind::FitnessLogs, time("12:00"));
        assert_eq!(view.rows[0].cells[0], "2026-01-02");
        assert_eq!(view.rows[1].cells[0], "2026-01-01");
    }

    #[test]
    fn calorie_summary_totals_and_limit() {
        let mut store = RecordStore::new(StoreKind::CalorieData);
        for total in [800.0, 700.0, 900.0] {
            store.add(
                RecordFields::CalorieItem(CalorieItem {
                    name: "Meal".to_string(),
                    cal_per_serving: total,
                    servings: 1.0,
                    total,
                }),
                1,
            );
        }
        let set = set_with(store);

        let view = render_store_at(&set, StoreKind::CalorieData, time("12:00"));
        let Summary::Calories {
            total,
            progress,
            over_limit,
            ..
        } = view.summary
        else {
            panic!("wrong summary");
        };
        assert_eq!(total, 2400.0);
        assert_eq!(progress, 100.0);
        assert!(over_limit);
    }

    #[test]
    fn medicine_summary_flags_refills_and_upcoming_doses() {
        let mut store = RecordStore::new(StoreKind::Medicines);
        store.add(medicine("Metformin", &["08:00", "20:00"], 5), 1);
        store.add(medicine("Lisinopril", &["09:30"], 30), 2);
        let set = set_with(store);

        let view = render_store_at(&set, StoreKind::Medicines, time("12:00"));
        let Summary::Medicines {
            count,
            refill_alerts,
            upcoming_doses,
        } = view.summary
        else {
            panic!("wrong summary");
        };
        assert_eq!(count, 2);
        assert_eq!(refill_alerts.len(), 1);
        assert_eq!(refill_alerts[0].name, "Metformin");
        // Only the 20:00 dose is still ahead of a 12:00 reference time.
        assert_eq!(upcoming_doses.len(), 1);
        assert_eq!(upcoming_doses[0].time, "20:00");
    }

    #[test]
    fn hydration_summary_tracks_goal() {
        let mut store = RecordStore::new(StoreKind::HydrationIntake);
        for amount in [500, 750] {
            store.add(
                RecordFields::HydrationEvent(HydrationEvent { amount_ml: amount }),
                1,
            );
        }
        let mut set = set_with(store);
        set.hydration_settings.goal_ml = 2500;

        let view = render_store_at(&set, StoreKind::HydrationIntake, time("12:00"));
        let Summary::Hydration {
            intake_ml,
            goal_ml,
            progress,
            goal_reached,
        } = view.summary
        else {
            panic!("wrong summary");
        };
        assert_eq!(intake_ml, 1250);
        assert_eq!(goal_ml, 2500);
        assert_eq!(progress, 50.0);
        assert!(!goal_reached);
    }
}
