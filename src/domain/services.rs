//! The workout recorder: form input in, validated records out.
//!
//! [`WorkoutRecorder`] owns the transient [`FormState`] together with the
//! append-only collection of [`WorkoutRecord`]s for the session. A submit
//! either appends exactly one fully-populated record and clears the text
//! inputs, or fails with a [`DomainError`] and leaves everything untouched.

use super::errors::{DomainError, DomainResult};
use super::models::{ActivityType, FormField, FormState, WorkoutId, WorkoutRecord};
use super::parser::NumericParsing;
use chrono::{DateTime, Local, Utc};
use tracing::{debug, info, warn};

/// Aggregate figures over every recorded workout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkoutTotals {
    pub count: usize,
    pub minutes: u64,
    pub calories: u64,
}

/// Holds the form and the ordered session log of workouts.
///
/// # Examples
///
/// ```
/// use fitlog::domain::{ActivityType, WorkoutRecorder};
///
/// let mut recorder = WorkoutRecorder::default();
/// recorder.set_name("Run");
/// recorder.set_duration("30");
/// recorder.set_calories("250");
/// recorder.select_activity_type(ActivityType::Cardio);
///
/// let record = recorder.submit().unwrap();
/// assert_eq!(record.duration_minutes, 30);
/// assert_eq!(recorder.len(), 1);
/// assert!(recorder.form().name.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkoutRecorder {
    form: FormState,
    records: Vec<WorkoutRecord>,
    last_id: Option<WorkoutId>,
    parsing: NumericParsing,
}

impl WorkoutRecorder {
    pub fn new(parsing: NumericParsing) -> Self {
        Self {
            parsing,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.form.name = value.into();
    }

    pub fn set_duration(&mut self, value: impl Into<String>) {
        self.form.duration = value.into();
    }

    pub fn set_calories(&mut self, value: impl Into<String>) {
        self.form.calories = value.into();
    }

    /// Chooses the activity type attached to the next submitted record.
    pub fn select_activity_type(&mut self, activity_type: ActivityType) {
        debug!(activity_type = %activity_type, "activity type selected");
        self.form.activity_type = activity_type;
    }

    pub fn records(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn totals(&self) -> WorkoutTotals {
        self.records
            .iter()
            .fold(WorkoutTotals::default(), |totals, record| WorkoutTotals {
                count: totals.count + 1,
                minutes: totals.minutes.saturating_add(u64::from(record.duration_minutes)),
                calories: totals.calories.saturating_add(u64::from(record.calories_burned)),
            })
    }

    /// The session's workouts as a pretty-printed JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.records)
    }

    /// Validates the form and appends a record stamped with the current time.
    pub fn submit(&mut self) -> DomainResult<&WorkoutRecord> {
        self.submit_at(Utc::now())
    }

    /// Validates the form and appends a record whose id derives from `now`.
    ///
    /// # Errors
    ///
    /// * [`DomainError::MissingFields`] if any text input is empty.
    /// * [`DomainError::InvalidNumber`] if duration or calories does not parse
    ///   under the configured [`NumericParsing`].
    ///
    /// On error neither the form nor the collection changes.
    pub fn submit_at(&mut self, now: DateTime<Utc>) -> DomainResult<&WorkoutRecord> {
        let missing = self.form.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "submit rejected: empty fields");
            return Err(DomainError::MissingFields { fields: missing });
        }

        let duration_minutes = self.parse_field(FormField::Duration)?;
        let calories_burned = self.parse_field(FormField::Calories)?;

        let id = self.next_id(now);
        let record = WorkoutRecord {
            id,
            name: self.form.name.clone(),
            duration_minutes,
            calories_burned,
            activity_type: self.form.activity_type,
            logged_at: now.with_timezone(&Local),
        };
        info!(
            %id,
            activity_type = %record.activity_type,
            duration_minutes,
            calories_burned,
            "workout recorded"
        );

        self.records.push(record);
        self.form.clear_text();

        Ok(&self.records[self.records.len() - 1])
    }

    fn parse_field(&self, field: FormField) -> DomainResult<u32> {
        let input = self.form.field(field);
        self.parsing.parse(input).map_err(|reason| {
            warn!(%field, input, %reason, "submit rejected: invalid number");
            DomainError::InvalidNumber {
                field,
                input: input.to_string(),
                reason,
            }
        })
    }

    /// Millisecond timestamp, bumped past the previous id when the clock has
    /// not advanced (or went backwards).
    fn next_id(&mut self, now: DateTime<Utc>) -> WorkoutId {
        let stamp = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match self.last_id {
            Some(WorkoutId(last)) if stamp <= last => WorkoutId(last + 1),
            _ => WorkoutId(stamp),
        };
        self.last_id = Some(id);
        id
    }
}
