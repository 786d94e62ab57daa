//! The form validation state machine.
//!
//! Every event (change, blur, submit) marks fields touched and recomputes
//! the entire error map from the current values, so the reported state can
//! never drift out of sync with what the user typed. Errors are only
//! *shown* for touched fields; submission looks at all of them.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{FieldError, FieldErrorKind};
use crate::profile::{ActivityLevel, Gender, UserProfile};
use crate::validation::{
    self, AGE_MAX, AGE_MIN, DEFICIT_MAX_KCAL, DEFICIT_MIN_KCAL, HEIGHT_MAX_CM, HEIGHT_MIN_CM,
    WEIGHT_MAX_LBS, WEIGHT_MIN_LBS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Gender,
    Age,
    Height,
    Weight,
    ActivityLevel,
    CalorieDeficit,
    DietaryPreferences,
}

impl Field {
    pub const REQUIRED: [Field; 6] = [
        Field::Gender,
        Field::Age,
        Field::Height,
        Field::Weight,
        Field::ActivityLevel,
        Field::CalorieDeficit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Gender => "Gender",
            Field::Age => "Age",
            Field::Height => "Height",
            Field::Weight => "Weight",
            Field::ActivityLevel => "Activity level",
            Field::CalorieDeficit => "Calorie deficit",
            Field::DietaryPreferences => "Dietary preferences",
        }
    }
}

#[derive(Debug)]
pub struct FormState {
    values: BTreeMap<Field, String>,
    touched: BTreeSet<Field>,
    errors: BTreeMap<Field, FieldError>,
}

impl Default for FormState {
    fn default() -> Self {
        // Same defaults as the form presents to the user.
        let mut values = BTreeMap::new();
        values.insert(Field::Gender, "Male".to_string());
        values.insert(Field::ActivityLevel, "Moderately Active".to_string());
        values.insert(Field::CalorieDeficit, "500".to_string());
        let mut state = Self {
            values,
            touched: BTreeSet::new(),
            errors: BTreeMap::new(),
        };
        state.revalidate();
        state
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// The user edited a field. Marks it touched and revalidates everything.
    pub fn field_changed(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.touched.insert(field);
        self.revalidate();
    }

    /// Focus left a field without necessarily changing it.
    pub fn field_blurred(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate();
    }

    /// True when no field (touched or not) has a validation error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors the user should currently see: only for touched fields.
    pub fn visible_errors(&self) -> BTreeMap<Field, &FieldError> {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(*field))
            .map(|(field, error)| (*field, error))
            .collect()
    }

    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field)
    }

    /// Force-touch every required field (surfacing hidden errors),
    /// revalidate, and hand back the typed profile only when the error set
    /// is empty. Values are never auto-corrected.
    pub fn submit(&mut self) -> Result<UserProfile, BTreeMap<Field, FieldError>> {
        for field in Field::REQUIRED {
            self.touched.insert(field);
        }
        let result = evaluate(&self.values);
        self.errors = match &result {
            Ok(_) => BTreeMap::new(),
            Err(errors) => errors.clone(),
        };
        result
    }

    fn revalidate(&mut self) {
        self.errors = match evaluate(&self.values) {
            Ok(_) => BTreeMap::new(),
            Err(errors) => errors,
        };
    }
}

/// Validate every field from scratch. Returns the typed profile when all
/// required fields pass, otherwise the full error map.
fn evaluate(
    values: &BTreeMap<Field, String>,
) -> Result<UserProfile, BTreeMap<Field, FieldError>> {
    let mut errors = BTreeMap::new();
    let get = |field: Field| values.get(&field).map(String::as_str).unwrap_or("");

    let gender = check(&mut errors, Field::Gender, parse_gender(get(Field::Gender)));
    let age = check(
        &mut errors,
        Field::Age,
        validation::validate_integer_field(get(Field::Age), AGE_MIN, AGE_MAX),
    );
    let height_cm = check(
        &mut errors,
        Field::Height,
        validation::validate_height(get(Field::Height)),
    );
    let weight_lbs = check(
        &mut errors,
        Field::Weight,
        validation::validate_integer_field(get(Field::Weight), WEIGHT_MIN_LBS, WEIGHT_MAX_LBS),
    );
    let activity_level = check(
        &mut errors,
        Field::ActivityLevel,
        parse_activity(get(Field::ActivityLevel)),
    );
    let calorie_deficit = check(
        &mut errors,
        Field::CalorieDeficit,
        validation::validate_integer_field(
            get(Field::CalorieDeficit),
            DEFICIT_MIN_KCAL,
            DEFICIT_MAX_KCAL,
        ),
    );

    let dietary_preferences = {
        let raw = get(Field::DietaryPreferences).trim();
        if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    };

    match (
        gender,
        age,
        height_cm,
        weight_lbs,
        activity_level,
        calorie_deficit,
    ) {
        (
            Some(gender),
            Some(age),
            Some(height_cm),
            Some(weight_lbs),
            Some(activity_level),
            Some(calorie_deficit),
        ) if errors.is_empty() => Ok(UserProfile {
            gender,
            age: age as u32,
            height_cm,
            weight_lbs: weight_lbs as u32,
            activity_level,
            calorie_deficit_kcal: calorie_deficit as u32,
            dietary_preferences,
        }),
        _ => Err(errors),
    }
}

fn check<T>(
    errors: &mut BTreeMap<Field, FieldError>,
    field: Field,
    result: Result<T, FieldErrorKind>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(kind) => {
            errors.insert(field, FieldError::new(kind, message_for(field, kind)));
            None
        }
    }
}

fn parse_gender(raw: &str) -> Result<Gender, FieldErrorKind> {
    if raw.trim().is_empty() {
        return Err(FieldErrorKind::Required);
    }
    Gender::parse(raw).ok_or(FieldErrorKind::InvalidFormat)
}

fn parse_activity(raw: &str) -> Result<ActivityLevel, FieldErrorKind> {
    if raw.trim().is_empty() {
        return Err(FieldErrorKind::Required);
    }
    ActivityLevel::parse(raw).ok_or(FieldErrorKind::InvalidFormat)
}

fn message_for(field: Field, kind: FieldErrorKind) -> String {
    match kind {
        FieldErrorKind::Required => format!("{} is required", field.label()),
        FieldErrorKind::NegativeValue => format!("{} cannot be negative", field.label()),
        FieldErrorKind::InvalidFormat => match field {
            Field::Height => "Enter height like 5'10\", 170cm or 1.70m".to_string(),
            Field::Gender => "Choose Male or Female".to_string(),
            Field::ActivityLevel => {
                "Choose Sedentary, Lightly Active, Moderately Active or Heavily Active".to_string()
            }
            _ => format!("{} must be a whole number", field.label()),
        },
        FieldErrorKind::OutOfRange => match field {
            Field::Age => format!("Age must be between {AGE_MIN} and {AGE_MAX}"),
            Field::Weight => {
                format!("Weight must be between {WEIGHT_MIN_LBS} and {WEIGHT_MAX_LBS} lbs")
            }
            Field::CalorieDeficit => format!(
                "Calorie deficit must be between {DEFICIT_MIN_KCAL} and {DEFICIT_MAX_KCAL} kcal"
            ),
            Field::Height => format!(
                "Height must be between {HEIGHT_MIN_CM:.0}cm and {HEIGHT_MAX_CM:.0}cm"
            ),
            _ => format!("{} is out of range", field.label()),
        },
    }
}
