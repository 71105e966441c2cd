//! Questions and corrective messages shown to the user.

use crate::catalog::ApplianceCatalog;
use crate::error::ValidationError;

use super::field::Field;
use super::record::AnswerRecord;

/// First prompt of every session.
pub const WELCOME: &str = "Welcome to the energy chat bot! What is your name?";

/// Acknowledgement prepended to the summary when a session completes.
pub const THANKS: &str = "Thanks for completing the form!";

/// Build the question for `field`, personalized with earlier answers.
pub fn prompt_for(field: Field, record: &AnswerRecord, catalog: &ApplianceCatalog) -> String {
    match field {
        Field::Name => WELCOME.to_string(),
        Field::Motivation => match record.name.as_deref() {
            Some(name) => format!(
                "Hi {name}! How would alternative energy generation methods help your home?"
            ),
            None => "How would alternative energy generation methods help your home?".to_string(),
        },
        Field::Department => "What an interesting reason! Which department do you live in?".to_string(),
        Field::Municipality => match record.department.as_deref() {
            Some(department) => {
                format!("Perfect, now, which municipality in {department} do you live in?")
            }
            None => "Which municipality do you live in?".to_string(),
        },
        Field::OccupantCount => "Great, now, how many people live in your home?".to_string(),
        Field::ApplianceHours => appliance_hours_prompt(catalog),
        Field::IncomeStratum => {
            "Done! Now, please tell me your social stratum (a number between 1 and 7).".to_string()
        }
        Field::OffsetFraction => "Lastly, what percentage of your consumption would you like \
to save with solar panels? (Enter a number between 0 and 100)."
            .to_string(),
    }
}

/// The corrective message followed by the same question again.
pub fn corrective_prompt(
    error: &ValidationError,
    field: Field,
    record: &AnswerRecord,
    catalog: &ApplianceCatalog,
) -> String {
    format!("{error}\n\n{}", prompt_for(field, record, catalog))
}

fn appliance_hours_prompt(catalog: &ApplianceCatalog) -> String {
    let list = catalog
        .iter()
        .enumerate()
        .map(|(i, appliance)| format!("{}. {}", i + 1, appliance.name))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Perfect, next, give the hours of daily use for the most common appliances:\n\
{list}\n\
Please enter the {} hours of use in the order shown, separated by commas (for example: {}).",
        catalog.len(),
        catalog.example_answer()
    )
}
