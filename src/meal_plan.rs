use serde::{Deserialize, Deserializer, Serialize};

/// A full one-day meal plan as returned by the model.
///
/// Field names and nesting mirror the JSON schema the prompt demands, so
/// these structs both deserialize the model output and serialize exports
/// with the original key names in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanData {
    #[serde(rename = "TDEE_Calculation")]
    pub tdee_calculation: TdeeCalculation,
    #[serde(rename = "Daily_Macro_Targets_Grams")]
    pub daily_macro_targets_grams: DailyMacroTargets,
    #[serde(rename = "Meal_Plan")]
    pub meal_plan: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdeeCalculation {
    #[serde(rename = "estimated_TDEE_kcal", default, deserialize_with = "lenient_f64")]
    pub estimated_tdee_kcal: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_deficit_kcal: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_calorie_intake_kcal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMacroTargets {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub protein: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fat: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub carbohydrates: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    #[serde(default)]
    pub meal_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub estimated_calories_kcal: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<MealItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealItem {
    #[serde(default)]
    pub food: String,
    #[serde(default)]
    pub portion: String,
}

impl MealPlanData {
    /// Sum of the per-meal calorie estimates (may differ from the target
    /// intake; the model's arithmetic is not trusted).
    pub fn total_estimated_calories(&self) -> f64 {
        self.meal_plan
            .iter()
            .map(|meal| meal.estimated_calories_kcal)
            .sum()
    }
}

/// Accept a JSON number or a numeric string. The model sometimes quotes
/// numbers ("protein": "150"); null and absent fields fall back to 0 via
/// `#[serde(default)]`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("number out of f64 range")),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, got {text:?}"))),
        serde_json::Value::Null => Ok(0.0),
        other => Err(D::Error::custom(format!("expected a number, got {other}"))),
    }
}
