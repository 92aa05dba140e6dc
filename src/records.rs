use serde::{Deserialize, Serialize};

pub type RecordId = i64;

/// The eight tracker stores. Serialized names double as storage keys and
/// URL path segments, matching the persisted layout of the original site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    #[serde(rename = "medicines")]
    Medicines,
    #[serde(rename = "doseHistory")]
    DoseHistory,
    #[serde(rename = "fitnessLogs")]
    FitnessLogs,
    #[serde(rename = "sleepEntries")]
    SleepEntries,
    #[serde(rename = "moodLogs")]
    MoodLogs,
    #[serde(rename = "calorieData")]
    CalorieData,
    #[serde(rename = "caregiverInvites")]
    CaregiverInvites,
    #[serde(rename = "hydrationIntake")]
    HydrationIntake,
}

impl StoreKind {
    pub const ALL: [StoreKind; 8] = [
        StoreKind::Medicines,
        StoreKind::DoseHistory,
        StoreKind::FitnessLogs,
        StoreKind::SleepEntries,
        StoreKind::MoodLogs,
        StoreKind::CalorieData,
        StoreKind::CaregiverInvites,
        StoreKind::HydrationIntake,
    ];

    pub fn storage_key(self) -> &'static str {
        match self {
            StoreKind::Medicines => "medicines",
            StoreKind::DoseHistory => "doseHistory",
            StoreKind::FitnessLogs => "fitnessLogs",
            StoreKind::SleepEntries => "sleepEntries",
            StoreKind::MoodLogs => "moodLogs",
            StoreKind::CalorieData => "calorieData",
            StoreKind::CaregiverInvites => "caregiverInvites",
            StoreKind::HydrationIntake => "hydrationIntake",
        }
    }

    /// Log-style stores display most recent first; table-style stores keep
    /// insertion order.
    pub fn newest_first(self) -> bool {
        matches!(
            self,
            StoreKind::FitnessLogs
                | StoreKind::SleepEntries
                | StoreKind::MoodLogs
                | StoreKind::HydrationIntake
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoseStatus {
    Taken,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalKind {
    Steps,
    Duration,
    Calories,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Stressed,
    Sad,
    Angry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Dose times of day as `HH:MM`.
    pub times: Vec<String>,
    pub supply_days: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseEvent {
    pub medicine: String,
    pub dosage: String,
    pub date: String,
    pub time: String,
    pub status: DoseStatus,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessLog {
    pub date: String,
    pub steps: u32,
    pub duration_min: u32,
    pub goal_kind: GoalKind,
    pub goal_value: f64,
    pub progress_percent: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
    pub start: String,
    pub end: String,
    pub duration_hours: f64,
    pub quality: SleepQuality,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub mood: Mood,
    pub stress: u8,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieItem {
    pub name: String,
    pub cal_per_serving: f64,
    pub servings: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverInvite {
    pub name: String,
    pub email: String,
    pub relation: String,
    #[serde(default)]
    pub shared_trackers: Vec<String>,
    pub access_duration: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationEvent {
    pub amount_ml: u32,
}

/// Closed union over everything a store can hold. The tag keeps snapshot
/// parsing unambiguous across variants that share field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum RecordFields {
    Medicine(Medicine),
    DoseEvent(DoseEvent),
    FitnessLog(FitnessLog),
    SleepEntry(SleepEntry),
    MoodEntry(MoodEntry),
    CalorieItem(CalorieItem),
    CaregiverInvite(CaregiverInvite),
    HydrationEvent(HydrationEvent),
}

impl RecordFields {
    pub fn kind(&self) -> StoreKind {
        match self {
            RecordFields::Medicine(_) => StoreKind::Medicines,
            RecordFields::DoseEvent(_) => StoreKind::DoseHistory,
            RecordFields::FitnessLog(_) => StoreKind::FitnessLogs,
            RecordFields::SleepEntry(_) => StoreKind::SleepEntries,
            RecordFields::MoodEntry(_) => StoreKind::MoodLogs,
            RecordFields::CalorieItem(_) => StoreKind::CalorieData,
            RecordFields::CaregiverInvite(_) => StoreKind::CaregiverInvites,
            RecordFields::HydrationEvent(_) => StoreKind::HydrationIntake,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    pub created_at: i64,
    pub fields: RecordFields,
}

/// Untrusted per-variant input as submitted by the client. Numbers arrive
/// as `f64` so the validator can check finiteness and bounds before
/// narrowing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum RecordDraft {
    Medicine(MedicineDraft),
    DoseEvent(DoseEventDraft),
    FitnessLog(FitnessLogDraft),
    SleepEntry(SleepEntryDraft),
    MoodEntry(MoodEntryDraft),
    CalorieItem(CalorieItemDraft),
    CaregiverInvite(CaregiverInviteDraft),
    HydrationEvent(HydrationEventDraft),
}

impl RecordDraft {
    pub fn kind(&self) -> StoreKind {
        match self {
            RecordDraft::Medicine(_) => StoreKind::Medicines,
            RecordDraft::DoseEvent(_) => StoreKind::DoseHistory,
            RecordDraft::FitnessLog(_) => StoreKind::FitnessLogs,
            RecordDraft::SleepEntry(_) => StoreKind::SleepEntries,
            RecordDraft::MoodEntry(_) => StoreKind::MoodLogs,
            RecordDraft::CalorieItem(_) => StoreKind::CalorieData,
            RecordDraft::CaregiverInvite(_) => StoreKind::CaregiverInvites,
            RecordDraft::HydrationEvent(_) => StoreKind::HydrationIntake,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineDraft {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: Vec<String>,
    pub supply_days: Option<f64>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoseEventDraft {
    pub medicine: String,
    pub dosage: String,
    pub date: String,
    pub time: String,
    pub status: DoseStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessLogDraft {
    pub date: String,
    pub steps: f64,
    pub duration_min: f64,
    pub goal_kind: GoalKind,
    pub goal_value: f64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntryDraft {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntryDraft {
    pub mood: Mood,
    pub stress: f64,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieItemDraft {
    pub name: String,
    pub cal_per_serving: f64,
    pub servings: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverInviteDraft {
    pub name: String,
    pub email: String,
    pub relation: String,
    #[serde(default)]
    pub shared_trackers: Vec<String>,
    pub access_duration: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationEventDraft {
    pub amount_ml: f64,
}

/// Hydration goal and reminder preferences, persisted separately from the
/// intake log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationSettings {
    pub goal_ml: u32,
    pub reminder_minutes: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HydrationSettingsUpdate {
    pub goal_ml: Option<f64>,
    pub reminder_minutes: Option<f64>,
}

impl Default for HydrationSettings {
    fn default() -> Self {
        Self {
            goal_ml: 2000,
            reminder_minutes: None,
        }
    }
}
