/// Validated user input, only ever constructed by a successful form
/// submission.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub weight_lbs: u32,
    pub activity_level: ActivityLevel,
    pub calorie_deficit_kcal: u32,
    pub dietary_preferences: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    HeavilyActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::HeavilyActive => "Heavily Active",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sedentary" => Some(ActivityLevel::Sedentary),
            "lightly active" => Some(ActivityLevel::LightlyActive),
            "moderately active" => Some(ActivityLevel::ModeratelyActive),
            "heavily active" => Some(ActivityLevel::HeavilyActive),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!(Gender::parse(" FEMALE "), Some(Gender::Female));
        assert_eq!(
            ActivityLevel::parse("moderately active"),
            Some(ActivityLevel::ModeratelyActive)
        );
        assert_eq!(ActivityLevel::parse("couch potato"), None);
    }
}
