//! Edit-form state for activities and tasks.
//!
//! A form opened with id `0` creates a new record; any other id updates the
//! record with that id.

use thiserror::Error;
use timetrack_client::{
    Activity, ActivityCreate, ActivityId, ActivityUpdate, Task, TaskCreate, TaskId, TaskUpdate,
};

use super::state::TextInput;

/// Id a form is opened with when it should create rather than update.
pub const NEW_RECORD_ID: i64 = 0;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be a number, got `{value}`")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityField {
    Name,
    OriginalEstimate,
    CompletedHours,
    PricePerHour,
    Finalized,
    MoneyReceived,
}

impl ActivityField {
    pub fn label(self) -> &'static str {
        match self {
            ActivityField::Name => "Name",
            ActivityField::OriginalEstimate => "Original estimate (h)",
            ActivityField::CompletedHours => "Completed hours",
            ActivityField::PricePerHour => "Price per hour",
            ActivityField::Finalized => "Finalized",
            ActivityField::MoneyReceived => "Money received",
        }
    }

    pub fn is_toggle(self) -> bool {
        matches!(self, ActivityField::Finalized | ActivityField::MoneyReceived)
    }
}

const NEW_ACTIVITY_FIELDS: &[ActivityField] = &[ActivityField::Name, ActivityField::OriginalEstimate];
const EXISTING_ACTIVITY_FIELDS: &[ActivityField] = &[
    ActivityField::Name,
    ActivityField::OriginalEstimate,
    ActivityField::CompletedHours,
    ActivityField::PricePerHour,
    ActivityField::Finalized,
    ActivityField::MoneyReceived,
];

#[derive(Debug, Clone, PartialEq)]
pub enum ActivitySubmission {
    Create(ActivityCreate),
    Update(ActivityId, ActivityUpdate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityForm {
    pub id: ActivityId,
    pub name: TextInput,
    pub original_estimate: TextInput,
    pub completed_hours: TextInput,
    pub price_per_hour: TextInput,
    pub finalized: bool,
    pub money_received: bool,
    pub focused: ActivityField,
}

impl Default for ActivityForm {
    fn default() -> Self {
        Self {
            id: NEW_RECORD_ID,
            name: TextInput::new(),
            original_estimate: TextInput::new(),
            completed_hours: TextInput::from_str("0"),
            price_per_hour: TextInput::new(),
            finalized: false,
            money_received: false,
            focused: ActivityField::Name,
        }
    }
}

impl ActivityForm {
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            id: activity.activity_id.unwrap_or(NEW_RECORD_ID),
            name: TextInput::from_str(&activity.name),
            original_estimate: TextInput::from_str(&activity.original_estimate.to_string()),
            completed_hours: TextInput::from_str(&activity.completed_hours.to_string()),
            price_per_hour: TextInput::from_str(
                &activity
                    .price_per_hour
                    .map(|p| p.to_string())
                    .unwrap_or_default(),
            ),
            finalized: activity.is_finalized(),
            money_received: activity.money_received.unwrap_or(false),
            focused: ActivityField::Name,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }

    /// Fields shown for this form; new activities only take a name and an
    /// estimate.
    pub fn fields(&self) -> &'static [ActivityField] {
        if self.is_new() {
            NEW_ACTIVITY_FIELDS
        } else {
            EXISTING_ACTIVITY_FIELDS
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = fields[(idx + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self) {
        let fields = self.fields();
        let idx = fields.iter().position(|f| *f == self.focused).unwrap_or(0);
        self.focused = fields[(idx + fields.len() - 1) % fields.len()];
    }

    pub fn input(&self, field: ActivityField) -> Option<&TextInput> {
        match field {
            ActivityField::Name => Some(&self.name),
            ActivityField::OriginalEstimate => Some(&self.original_estimate),
            ActivityField::CompletedHours => Some(&self.completed_hours),
            ActivityField::PricePerHour => Some(&self.price_per_hour),
            ActivityField::Finalized | ActivityField::MoneyReceived => None,
        }
    }

    /// The text input under focus; `None` when a toggle is focused.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            ActivityField::Name => Some(&mut self.name),
            ActivityField::OriginalEstimate => Some(&mut self.original_estimate),
            ActivityField::CompletedHours => Some(&mut self.completed_hours),
            ActivityField::PricePerHour => Some(&mut self.price_per_hour),
            ActivityField::Finalized | ActivityField::MoneyReceived => None,
        }
    }

    pub fn toggle(&self, field: ActivityField) -> Option<bool> {
        match field {
            ActivityField::Finalized => Some(self.finalized),
            ActivityField::MoneyReceived => Some(self.money_received),
            _ => None,
        }
    }

    pub fn toggle_focused(&mut self) {
        match self.focused {
            ActivityField::Finalized => self.finalized = !self.finalized,
            ActivityField::MoneyReceived => self.money_received = !self.money_received,
            _ => {}
        }
    }

    pub fn submission(&self) -> Result<ActivitySubmission, FormError> {
        let name = required_text(&self.name, ActivityField::Name.label())?;
        let original_estimate =
            required_number(&self.original_estimate, ActivityField::OriginalEstimate.label())?;

        if self.is_new() {
            return Ok(ActivitySubmission::Create(ActivityCreate {
                name,
                original_estimate,
            }));
        }

        let completed_hours =
            required_number(&self.completed_hours, ActivityField::CompletedHours.label())?;
        let price_per_hour =
            optional_number(&self.price_per_hour, ActivityField::PricePerHour.label())?
                .unwrap_or(0.0);

        Ok(ActivitySubmission::Update(
            self.id,
            ActivityUpdate {
                name,
                original_estimate,
                completed_hours,
                finalized: self.finalized,
                price_per_hour,
                money_received: self.money_received,
            },
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskSubmission {
    Create(TaskCreate),
    Update(TaskId, TaskUpdate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub id: TaskId,
    pub activity_id: ActivityId,
    pub name: TextInput,
}

impl TaskForm {
    pub fn new(activity_id: ActivityId) -> Self {
        Self {
            id: NEW_RECORD_ID,
            activity_id,
            name: TextInput::new(),
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.task_id.unwrap_or(NEW_RECORD_ID),
            activity_id: task.activity_id,
            name: TextInput::from_str(&task.name),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_RECORD_ID
    }

    pub fn submission(&self) -> Result<TaskSubmission, FormError> {
        let name = required_text(&self.name, "Name")?;
        if self.is_new() {
            Ok(TaskSubmission::Create(TaskCreate {
                activity_id: self.activity_id,
                name,
            }))
        } else {
            Ok(TaskSubmission::Update(self.id, TaskUpdate { name }))
        }
    }
}

fn required_text(input: &TextInput, field: &'static str) -> Result<String, FormError> {
    let value = input.value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

fn optional_number(input: &TextInput, field: &'static str) -> Result<Option<f64>, FormError> {
    let value = input.value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or_else(|| FormError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

fn required_number(input: &TextInput, field: &'static str) -> Result<f64, FormError> {
    optional_number(input, field)?.ok_or(FormError::Required(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: ActivityId) -> Activity {
        Activity {
            activity_id: Some(id),
            name: "Write report".to_string(),
            original_estimate: 5.0,
            remaining_hours: 4.0,
            completed_hours: 1.0,
            finalized: Some(false),
            price_per_hour: Some(80.0),
            money_received: None,
        }
    }

    #[test]
    fn zero_id_submits_create() {
        let mut form = ActivityForm::default();
        form.name = TextInput::from_str("Write report");
        form.original_estimate = TextInput::from_str("5");

        assert_eq!(
            form.submission(),
            Ok(ActivitySubmission::Create(ActivityCreate {
                name: "Write report".to_string(),
                original_estimate: 5.0,
            }))
        );
    }

    #[test]
    fn existing_id_submits_update_to_that_id() {
        let mut form = ActivityForm::from_activity(&activity(7));
        form.focused = ActivityField::Finalized;
        form.toggle_focused();

        match form.submission() {
            Ok(ActivitySubmission::Update(id, body)) => {
                assert_eq!(id, 7);
                assert!(body.finalized);
                assert_eq!(body.price_per_hour, 80.0);
                assert_eq!(body.completed_hours, 1.0);
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn blank_name_is_required() {
        let mut form = ActivityForm::default();
        form.original_estimate = TextInput::from_str("2");
        assert_eq!(form.submission(), Err(FormError::Required("Name")));
    }

    #[test]
    fn estimate_must_be_numeric() {
        let mut form = ActivityForm::default();
        form.name = TextInput::from_str("Write report");
        form.original_estimate = TextInput::from_str("five");
        assert!(matches!(
            form.submission(),
            Err(FormError::InvalidNumber { field: "Original estimate (h)", .. })
        ));
    }

    #[test]
    fn decimal_comma_is_accepted() {
        let mut form = ActivityForm::default();
        form.name = TextInput::from_str("Write report");
        form.original_estimate = TextInput::from_str("2,5");
        assert!(matches!(
            form.submission(),
            Ok(ActivitySubmission::Create(ActivityCreate { original_estimate, .. })) if original_estimate == 2.5
        ));
    }

    #[test]
    fn new_activity_form_cycles_two_fields() {
        let mut form = ActivityForm::default();
        form.focus_next();
        assert_eq!(form.focused, ActivityField::OriginalEstimate);
        form.focus_next();
        assert_eq!(form.focused, ActivityField::Name);
        form.focus_previous();
        assert_eq!(form.focused, ActivityField::OriginalEstimate);
    }

    #[test]
    fn task_form_create_and_update() {
        let mut form = TaskForm::new(3);
        form.name = TextInput::from_str("  Draft ");
        assert_eq!(
            form.submission(),
            Ok(TaskSubmission::Create(TaskCreate {
                activity_id: 3,
                name: "Draft".to_string(),
            }))
        );

        form.id = 11;
        assert_eq!(
            form.submission(),
            Ok(TaskSubmission::Update(
                11,
                TaskUpdate {
                    name: "Draft".to_string()
                }
            ))
        );
    }
}
