use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::agents::PipelineHandle;
use crate::config::Config;
use crate::profile::{
    validate_and_compute_bmi, BmiResult, DietPreference, ExperienceLevel, FitnessGoal, Gender,
    NumericInput, ProfileError, UserProfile, WorkoutTime,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: PipelineHandle,
}

fn none_text() -> String {
    "None".to_string()
}

/// Body of `POST /generate_plan`, as submitted by the form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PlanRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: u32,
    pub gender: Gender,
    pub weight: NumericInput,
    pub height: NumericInput,
    pub goal: FitnessGoal,
    pub experience: ExperienceLevel,
    pub workout_time: WorkoutTime,
    pub diet_preference: DietPreference,
    #[serde(default = "none_text")]
    pub allergies: String,
    #[serde(default = "none_text")]
    pub health_conditions: String,
}

impl PlanRequest {
    /// Validate the request into a profile and its BMI.
    ///
    /// Weight and height are checked first so their messages take
    /// precedence over the remaining field checks.
    pub fn into_profile(self) -> Result<(UserProfile, BmiResult), ProfileError> {
        let bmi = validate_and_compute_bmi(&self.weight, &self.height)?;
        self.validate()
            .map_err(|e| ProfileError::InvalidField(e.to_string()))?;

        let profile = UserProfile {
            name: self.name.trim().to_string(),
            age: self.age,
            gender: self.gender,
            weight_kg: self.weight.parse()?,
            height_cm: self.height.parse()?,
            goal: self.goal,
            experience: self.experience,
            workout_time: self.workout_time,
            diet_preference: self.diet_preference,
            allergies: self.allergies,
            health_conditions: self.health_conditions,
        };

        Ok((profile, bmi))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: String,
    pub bmi: f64,
    pub bmi_category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub llm_provider: String,
    /// "enabled" when a Tavily key is configured
    pub search: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::BmiCategory;
    use serde_json::json;

    fn request(overrides: serde_json::Value) -> PlanRequest {
        let mut body = json!({
            "name": "Asha",
            "age": 29,
            "gender": "Female",
            "weight": 60,
            "height": "165",
            "goal": "Lose Fat",
            "experience": "Beginner",
            "workout_time": "Morning",
            "diet_preference": "Vegetarian"
        });
        if let (Some(base), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
            for (k, v) in extra {
                base.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_defaults_and_mixed_numeric_input() {
        let (profile, bmi) = request(json!({})).into_profile().unwrap();
        assert_eq!(profile.allergies, "None");
        assert_eq!(profile.health_conditions, "None");
        assert_eq!(profile.height_cm, 165.0);
        assert_eq!(bmi.bmi(), 22.04);
        assert_eq!(bmi.category(), BmiCategory::NormalWeight);
    }

    #[test]
    fn test_bmi_errors_come_first() {
        let err = request(json!({"height": 0, "name": ""})).into_profile().unwrap_err();
        assert_eq!(err, ProfileError::InvalidHeight);

        let err = request(json!({"weight": "sixty"})).into_profile().unwrap_err();
        assert_eq!(err, ProfileError::InvalidNumberFormat);
    }

    #[test]
    fn test_field_validation() {
        let err = request(json!({"age": 0})).into_profile().unwrap_err();
        assert!(
            matches!(err, ProfileError::InvalidField(msg) if msg.contains("Age must be between"))
        );

        let err = request(json!({"name": ""})).into_profile().unwrap_err();
        assert!(matches!(err, ProfileError::InvalidField(_)));
    }

    #[test]
    fn test_snake_case_enum_aliases() {
        let (profile, _) = request(json!({"goal": "build_muscle", "workout_time": "evening"}))
            .into_profile()
            .unwrap();
        assert_eq!(profile.goal, FitnessGoal::BuildMuscle);
        assert_eq!(profile.workout_time, WorkoutTime::Evening);
    }
}
