use crate::domain::{PersonalDetails, Prompt, UserProfile};

/// Instruction block sent for every label. Order matters; the extracted text
/// is appended directly after the trailing "Here is the text: ".
pub const BASE_INSTRUCTIONS: &str = "Get the ingredients in this extracted nutrition label from AWS textract. \
Output each ingredient that could be harmful to someone consuming it \
and give a quick sentence on why it could be harmful. \
Look at the nutrition facts as well as the ingredients list. \
If something has 0 of it, for example 0g of trans fat, do not include it. \
Do not list ingredients if they don't have any harm. \
Do not say anything else. Only list the ingredients in the format I specified. \
Make sure to include every harmful ingredient. \
All of these rules are very important, follow them exactly. \
Here is the text: ";

/// Turns extracted label text plus the caller's profile into the user prompt.
///
/// Pure and deterministic. Profile values are interpolated verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build_prompt(&self, extracted_text: &str, profile: &UserProfile) -> Prompt {
        let base = format!("{BASE_INSTRUCTIONS}{extracted_text}");

        match profile.personal_details() {
            Some(details) => Prompt::new(Self::personalization_clause(&details) + &base),
            None => Prompt::new(base),
        }
    }

    fn personalization_clause(details: &PersonalDetails<'_>) -> String {
        format!(
            "Consider the individual's age ({} years), gender ({}), allergies ({}), and health concerns ({}). ",
            details.age, details.gender, details.allergies, details.health_concerns
        )
    }
}
