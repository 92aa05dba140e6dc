use crate::records::{DoseStatus, GoalKind, SleepQuality};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Approximate kcal burned per step, taken over unchanged from the fitness
/// tracker.
pub const KCAL_PER_STEP: f64 = 0.04;

/// Default daily calorie budget used by the calorie summary.
pub const DAILY_CALORIE_GOAL: f64 = 2000.0;

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReading {
    pub value: f64,
    pub category: BmiCategory,
}

/// Body mass index from height in centimeters and weight in kilograms.
/// Thresholds 18.5 / 25.0 / 30.0; the category is decided on the exact
/// value, the reported value is rounded to one decimal.
pub fn bmi(height_cm: f64, weight_kg: f64) -> BmiReading {
    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    let category = if value < 18.5 {
        BmiCategory::Underweight
    } else if value < 25.0 {
        BmiCategory::Normal
    } else if value < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };
    BmiReading {
        value: round1(value),
        category,
    }
}

/// Progress toward a goal as a percentage clamped to [0, 100]. A missing
/// or non-positive goal reads as no progress.
pub fn goal_progress(achieved: f64, goal: f64) -> f64 {
    if goal <= 0.0 || !goal.is_finite() || !achieved.is_finite() {
        return 0.0;
    }
    (achieved / goal * 100.0).clamp(0.0, 100.0)
}

pub fn calories_from_steps(steps: u32) -> f64 {
    f64::from(steps) * KCAL_PER_STEP
}

pub fn fitness_progress(steps: u32, duration_min: u32, goal_kind: GoalKind, goal_value: f64) -> f64 {
    let achieved = match goal_kind {
        GoalKind::Steps => f64::from(steps),
        GoalKind::Duration => f64::from(duration_min),
        GoalKind::Calories => calories_from_steps(steps),
    };
    goal_progress(achieved, goal_value)
}

/// Hours slept between two times of day, rounded to one decimal. A wake
/// time before the start is read as crossing midnight; equal times are
/// zero hours, not a full day.
pub fn sleep_duration_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    round1(minutes as f64 / 60.0)
}

pub fn sleep_quality(hours: f64) -> SleepQuality {
    if hours >= 8.0 {
        SleepQuality::Excellent
    } else if hours >= 6.0 {
        SleepQuality::Good
    } else if hours >= 4.0 {
        SleepQuality::Fair
    } else {
        SleepQuality::Poor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdherenceTrend {
    Excellent,
    Moderate,
    Low,
}

/// Taken doses over total doses as a percentage rounded to one decimal;
/// zero when no doses were recorded.
pub fn adherence_rate<I>(statuses: I) -> f64
where
    I: IntoIterator<Item = DoseStatus>,
{
    let mut taken = 0u32;
    let mut total = 0u32;
    for status in statuses {
        total += 1;
        if status == DoseStatus::Taken {
            taken += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    round1(f64::from(taken) / f64::from(total) * 100.0)
}

pub fn adherence_trend(rate: f64) -> AdherenceTrend {
    if rate >= 90.0 {
        AdherenceTrend::Excellent
    } else if rate >= 70.0 {
        AdherenceTrend::Moderate
    } else {
        AdherenceTrend::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietGoal {
    WeightLoss,
    MuscleGain,
    Maintain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DietType {
    Vegetarian,
    NonVegetarian,
    Vegan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub bmi: BmiReading,
    pub goal: DietGoal,
    pub diet: DietType,
    pub activity: ActivityLevel,
    pub caloric_strategy: String,
    pub macro_focus: String,
    pub meal_examples: String,
    pub takeaway: String,
}

/// Deterministic plan text keyed on goal, diet preference, and the BMI
/// reading. No external service is involved.
pub fn build_diet_plan(
    goal: DietGoal,
    diet: DietType,
    activity: ActivityLevel,
    bmi: BmiReading,
) -> DietPlan {
    let (goal_text, caloric_strategy, macro_focus) = match goal {
        DietGoal::WeightLoss => (
            "weight loss",
            "Aim for a 500-750 kcal daily deficit to promote healthy fat loss.",
            "Prioritize high-fiber vegetables and lean protein (2.0 g/kg body weight).",
        ),
        DietGoal::MuscleGain => (
            "muscle gain",
            "Aim for a 300-500 kcal daily surplus, especially post-workout.",
            "High protein intake (2.2 g/kg body weight) with complex carbohydrates to fuel training.",
        ),
        DietGoal::Maintain => (
            "maintenance",
            "Maintain your current caloric intake, focusing on nutrient-dense foods.",
            "Balance your intake: 30% protein, 40% carbohydrates, 30% healthy fats.",
        ),
    };
    let meal_examples = match diet {
        DietType::Vegetarian => {
            "Breakfast: oatmeal with nuts and berries. Lunch: lentil soup and whole-wheat bread. Dinner: paneer and vegetable curry."
        }
        DietType::NonVegetarian => {
            "Breakfast: scrambled eggs and spinach. Lunch: grilled chicken salad. Dinner: salmon with quinoa and steamed broccoli."
        }
        DietType::Vegan => {
            "Breakfast: tofu scramble with nutritional yeast. Lunch: chickpea and avocado sandwich. Dinner: black bean burgers on a whole-wheat bun."
        }
    };
    let takeaway = format!(
        "Stay hydrated and aim for consistency. Given your BMI of {:.1}, this plan supports your {goal_text} goal while focusing on nutrient quality.",
        bmi.value
    );
    DietPlan {
        bmi,
        goal,
        diet,
        activity,
        caloric_strategy: caloric_strategy.to_string(),
        macro_focus: macro_focus.to_string(),
        meal_examples: meal_examples.to_string(),
        takeaway,
    }
}
