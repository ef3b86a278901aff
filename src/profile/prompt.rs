use super::{BmiResult, UserProfile};

const EMPTY_PLACEHOLDER: &str = "None";

fn or_none(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        EMPTY_PLACEHOLDER
    } else {
        trimmed
    }
}

/// Render the single seed message handed to the supervisor.
///
/// Field order is fixed and every field is present; blank text renders as `None`.
/// Weight, height and BMI always carry a decimal point (`64.0`, `22.0`).
pub fn build_seed_prompt(profile: &UserProfile, bmi: &BmiResult) -> String {
    format!(
        "User details:\n\
         Name: {name}\n\
         Age: {age}\n\
         Gender: {gender}\n\
         Weight: {weight:?} kg\n\
         Height: {height:?} cm\n\
         BMI: {bmi:?} ({category})\n\
         Goal: {goal}\n\
         Experience: {experience}\n\
         Workout Time: {workout_time}\n\
         Diet Preference: {diet}\n\
         Allergies: {allergies}\n\
         Health Conditions: {conditions}",
        name = or_none(&profile.name),
        age = profile.age,
        gender = profile.gender,
        weight = profile.weight_kg,
        height = profile.height_cm,
        bmi = bmi.bmi(),
        category = bmi.category(),
        goal = profile.goal,
        experience = profile.experience,
        workout_time = profile.workout_time,
        diet = profile.diet_preference,
        allergies = or_none(&profile.allergies),
        conditions = or_none(&profile.health_conditions),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        validate_and_compute_bmi, DietPreference, ExperienceLevel, FitnessGoal, Gender, WorkoutTime,
    };

    fn sample_profile() -> UserProfile {
        UserProfile {
            name: "Asha".to_string(),
            age: 21,
            gender: Gender::Female,
            weight_kg: 64.0,
            height_cm: 180.0,
            goal: FitnessGoal::BuildMuscle,
            experience: ExperienceLevel::Beginner,
            workout_time: WorkoutTime::Morning,
            diet_preference: DietPreference::Vegetarian,
            allergies: "Peanuts".to_string(),
            health_conditions: "None".to_string(),
        }
    }

    #[test]
    fn test_prompt_layout() {
        let profile = sample_profile();
        let bmi = validate_and_compute_bmi(&64.0.into(), &180.0.into()).unwrap();
        let prompt = build_seed_prompt(&profile, &bmi);

        let expected = "User details:\n\
                        Name: Asha\n\
                        Age: 21\n\
                        Gender: Female\n\
                        Weight: 64.0 kg\n\
                        Height: 180.0 cm\n\
                        BMI: 19.75 (Normal weight)\n\
                        Goal: Build Muscle\n\
                        Experience: Beginner\n\
                        Workout Time: Morning\n\
                        Diet Preference: Vegetarian\n\
                        Allergies: Peanuts\n\
                        Health Conditions: None";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_measurements_keep_decimal_point() {
        let mut profile = sample_profile();
        profile.weight_kg = 72.5;
        profile.height_cm = 175.0;
        let bmi = validate_and_compute_bmi(&72.5.into(), &175.0.into()).unwrap();
        let prompt = build_seed_prompt(&profile, &bmi);

        assert!(prompt.contains("\nWeight: 72.5 kg\n"));
        assert!(prompt.contains("\nHeight: 175.0 cm\n"));

        let bmi = validate_and_compute_bmi(&88.0.into(), &200.0.into()).unwrap();
        assert!(build_seed_prompt(&profile, &bmi).contains("\nBMI: 22.0 (Normal weight)\n"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let profile = sample_profile();
        let bmi = validate_and_compute_bmi(&64.0.into(), &180.0.into()).unwrap();
        assert_eq!(build_seed_prompt(&profile, &bmi), build_seed_prompt(&profile.clone(), &bmi));
    }

    #[test]
    fn test_blank_fields_render_placeholder() {
        let mut profile = sample_profile();
        profile.name = String::new();
        profile.allergies = "   ".to_string();
        profile.health_conditions = String::new();
        let bmi = validate_and_compute_bmi(&64.0.into(), &180.0.into()).unwrap();
        let prompt = build_seed_prompt(&profile, &bmi);

        assert!(prompt.contains("Name: None\n"));
        assert!(prompt.contains("Allergies: None\n"));
        assert!(prompt.ends_with("Health Conditions: None"));
        assert_eq!(prompt.lines().count(), 13);
    }
}
