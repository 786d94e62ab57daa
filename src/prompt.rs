use crate::profile::UserProfile;

const REQUIRED_SCHEMA: &str = r#"Required JSON Schema:
{
  "TDEE_Calculation": {
    "estimated_TDEE_kcal": "[Number]",
    "target_deficit_kcal": "[Number]",
    "target_calorie_intake_kcal": "[Number]"
  },
  "Daily_Macro_Targets_Grams": {
    "protein": "[Number]",
    "fat": "[Number]",
    "carbohydrates": "[Number]"
  },
  "Meal_Plan": [
    {
      "meal_name": "[String: e.g., 'Breakfast', 'Lunch', 'Dinner', 'Snack']",
      "estimated_calories_kcal": "[Number]",
      "description": "[String: A brief summary of the meal]",
      "items": [
        {
          "food": "[String: e.g., 'Oatmeal']",
          "portion": "[String: e.g., '1/2 cup dry', '1 whole']"
        }
      ]
    }
  ]
}"#;

const OUTPUT_RULES: &str = r#"IMPORTANT:
- Replace ALL placeholder text ([Number], [String]) with actual values
- Do NOT include any explanatory text before or after the JSON
- Do NOT use markdown code blocks
- The response must be parseable as valid JSON
- Include exactly 4 meals: Breakfast, Lunch, Dinner, Snack"#;

/// Render the meal-plan instruction for a validated profile.
///
/// Deterministic by construction: the same profile always produces a
/// byte-identical prompt, so tests can assert on literal text.
pub fn build_meal_plan_prompt(profile: &UserProfile) -> String {
    let dietary = profile.dietary_preferences.as_deref().unwrap_or("None");
    let mut prompt = format!(
        "CRITICAL: You MUST respond with ONLY valid JSON, no other text, no explanations, no markdown formatting.\n\
         \n\
         MEAL PLAN GENERATION PROMPT\n\
         \n\
         I am a {gender}, {age} years old.\n\
         My height is {height} cm, and my weight is {weight} lbs.\n\
         My daily activity level is {activity}.\n\
         \n\
         Goal and Deficit:\n\
         My primary goal is to establish a daily {deficit} calorie deficit.\n\
         \n\
         Dietary Requirements & Preferences:\n\
         I have the following specific dietary restrictions, allergies, or preferences: {dietary}.\n\
         \n\
         OUTPUT REQUEST: Generate the entire response as a single, valid JSON object, strictly following the schema below.\n\
         \n\
         The JSON object must contain three top-level keys: TDEE_Calculation, Daily_Macro_Targets_Grams, and Meal_Plan.\n\
         \n\
         TDEE Calculation: Calculate my estimated Total Daily Energy Expenditure (TDEE), target deficit, and final target calorie intake.\n\
         \n\
         Meal Plan: Create a detailed, one-day meal plan (Breakfast, Lunch, Dinner, and one Snack) that hits the target calorie deficit.\n\
         \n\
         Macro Targets: Provide the estimated daily total grams for Protein, Fat, and Carbohydrates for the entire meal plan.\n\
         \n",
        gender = profile.gender.as_str(),
        age = profile.age,
        height = format_centimeters(profile.height_cm),
        weight = profile.weight_lbs,
        activity = profile.activity_level.as_str(),
        deficit = profile.calorie_deficit_kcal,
        dietary = dietary,
    );
    prompt.push_str(REQUIRED_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_RULES);
    prompt
}

/// One canonical rendering of a height so the prompt stays deterministic:
/// one decimal place, with a trailing `.0` trimmed.
pub fn format_centimeters(centimeters: f64) -> String {
    let rendered = format!("{centimeters:.1}");
    match rendered.strip_suffix(".0") {
        Some(trimmed) => trimmed.to_string(),
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{ActivityLevel, Gender};

    fn sample_profile() -> UserProfile {
        UserProfile {
            gender: Gender::Male,
            age: 30,
            height_cm: 177.8,
            weight_lbs: 180,
            activity_level: ActivityLevel::ModeratelyActive,
            calorie_deficit_kcal: 500,
            dietary_preferences: Some("Vegetarian".to_string()),
        }
    }

    #[test]
    fn identical_profiles_produce_identical_prompts() {
        assert_eq!(
            build_meal_plan_prompt(&sample_profile()),
            build_meal_plan_prompt(&sample_profile())
        );
    }

    #[test]
    fn prompt_names_the_required_top_level_keys() {
        let prompt = build_meal_plan_prompt(&sample_profile());
        assert!(prompt.contains("TDEE_Calculation"));
        assert!(prompt.contains("Daily_Macro_Targets_Grams"));
        assert!(prompt.contains("Meal_Plan"));
        assert!(prompt.contains("Include exactly 4 meals: Breakfast, Lunch, Dinner, Snack"));
    }

    #[test]
    fn prompt_interpolates_the_profile() {
        let prompt = build_meal_plan_prompt(&sample_profile());
        assert!(prompt.contains("I am a Male, 30 years old."));
        assert!(prompt.contains("My height is 177.8 cm, and my weight is 180 lbs."));
        assert!(prompt.contains("My daily activity level is Moderately Active."));
        assert!(prompt.contains("daily 500 calorie deficit"));
        assert!(prompt.contains("preferences: Vegetarian."));
    }

    #[test]
    fn missing_preferences_render_as_none() {
        let mut profile = sample_profile();
        profile.dietary_preferences = None;
        let prompt = build_meal_plan_prompt(&profile);
        assert!(prompt.contains("preferences: None."));
    }

    #[test]
    fn centimeter_rendering_trims_whole_values() {
        assert_eq!(format_centimeters(170.0), "170");
        assert_eq!(format_centimeters(177.8), "177.8");
        assert_eq!(format_centimeters(182.88), "182.9");
    }
}
