use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a logged workout, derived from the creation timestamp in
/// milliseconds and strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(pub u64);

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of workout categories offered by the type selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    #[default]
    Cardio,
    Strength,
    Flexibility,
}

impl ActivityType {
    /// All types in the order the selector displays them.
    pub const ALL: [ActivityType; 3] = [
        ActivityType::Cardio,
        ActivityType::Strength,
        ActivityType::Flexibility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityType::Cardio => "Cardio",
            ActivityType::Strength => "Strength",
            ActivityType::Flexibility => "Flexibility",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ActivityType::Cardio => 0,
            ActivityType::Strength => 1,
            ActivityType::Flexibility => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next type in selector order, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous type in selector order, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three free-text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Duration,
    Calories,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Duration, FormField::Calories];

    /// Placeholder text shown in the empty input, also used in messages.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Workout Name",
            FormField::Duration => "Duration (minutes)",
            FormField::Calories => "Calories Burned",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged exercise session. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: WorkoutId,
    pub name: String,
    pub duration_minutes: u32,
    pub calories_burned: u32,
    pub activity_type: ActivityType,
    pub logged_at: DateTime<Local>,
}

impl WorkoutRecord {
    /// The lines shown for this record in the workout list.
    pub fn display_lines(&self) -> [String; 4] {
        [
            format!("Name: {}", self.name),
            format!("Duration: {} minutes", self.duration_minutes),
            format!("Calories: {}", self.calories_burned),
            format!("Type: {}", self.activity_type),
        ]
    }
}

/// Transient form input, held only until the next successful submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub duration: String,
    pub calories: String,
    pub activity_type: ActivityType,
}

impl FormState {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Duration => &self.duration,
            FormField::Calories => &self.calories,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Duration => &mut self.duration,
            FormField::Calories => &mut self.calories,
        }
    }

    /// Fields that are still empty. Whitespace counts as content.
    pub fn missing_fields(&self) -> Vec<FormField> {
        FormField::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_empty())
            .collect()
    }

    /// Empties the text inputs; the selected activity type is kept.
    pub fn clear_text(&mut self) {
        self.name.clear();
        self.duration.clear();
        self.calories.clear();
    }
}
