//! Profile Normalizer
//!
//! Turns raw user input into a validated [`UserProfile`], derives its
//! [`BmiResult`] and renders the seed prompt handed to the agent pipeline.

pub mod bmi;
pub mod prompt;

pub use bmi::{validate_and_compute_bmi, BmiCategory, BmiResult, NumericInput, ProfileError};
pub use prompt::build_seed_prompt;

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(alias = "male")]
    Male,
    #[serde(alias = "female")]
    Female,
    #[serde(alias = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[serde(rename = "Build Muscle", alias = "build_muscle")]
    BuildMuscle,
    #[serde(rename = "Lose Fat", alias = "lose_fat")]
    LoseFat,
    #[serde(rename = "Improve Endurance", alias = "improve_endurance")]
    ImproveEndurance,
    #[serde(rename = "General Fitness", alias = "general_fitness")]
    GeneralFitness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(alias = "beginner")]
    Beginner,
    #[serde(alias = "intermediate")]
    Intermediate,
    #[serde(alias = "advanced")]
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutTime {
    #[serde(alias = "morning")]
    Morning,
    #[serde(alias = "afternoon")]
    Afternoon,
    #[serde(alias = "evening")]
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietPreference {
    #[serde(alias = "omnivore")]
    Omnivore,
    #[serde(alias = "vegetarian")]
    Vegetarian,
    #[serde(alias = "vegan")]
    Vegan,
    #[serde(alias = "keto")]
    Keto,
    #[serde(alias = "paleo")]
    Paleo,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl fmt::Display for FitnessGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitnessGoal::BuildMuscle => write!(f, "Build Muscle"),
            FitnessGoal::LoseFat => write!(f, "Lose Fat"),
            FitnessGoal::ImproveEndurance => write!(f, "Improve Endurance"),
            FitnessGoal::GeneralFitness => write!(f, "General Fitness"),
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceLevel::Beginner => write!(f, "Beginner"),
            ExperienceLevel::Intermediate => write!(f, "Intermediate"),
            ExperienceLevel::Advanced => write!(f, "Advanced"),
        }
    }
}

impl fmt::Display for WorkoutTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutTime::Morning => write!(f, "Morning"),
            WorkoutTime::Afternoon => write!(f, "Afternoon"),
            WorkoutTime::Evening => write!(f, "Evening"),
        }
    }
}

impl fmt::Display for DietPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DietPreference::Omnivore => write!(f, "Omnivore"),
            DietPreference::Vegetarian => write!(f, "Vegetarian"),
            DietPreference::Vegan => write!(f, "Vegan"),
            DietPreference::Keto => write!(f, "Keto"),
            DietPreference::Paleo => write!(f, "Paleo"),
        }
    }
}

/// A validated user profile. Weight and height are always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub goal: FitnessGoal,
    pub experience: ExperienceLevel,
    pub workout_time: WorkoutTime,
    pub diet_preference: DietPreference,
    pub allergies: String,
    pub health_conditions: String,
}
