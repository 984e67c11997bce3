//! Prompt construction for detail extraction

/// Builds the extraction prompt sent to the generation service
pub struct PromptBuilder<'a> {
    content: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for the given document body
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            EXTRACTION_INSTRUCTIONS.len() + self.content.len() + OUTPUT_FORMAT_REMINDER.len() + 32,
        );

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\nDocument to analyze:\n");
        prompt.push_str(self.content);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

/// Keys the service is asked for, in display order
pub const CANONICAL_KEYS: &[&str] = &[
    "Document Type",
    "Party 1 Name",
    "Party 2 Name",
    "Date",
    "Property Address",
    "Consideration",
    "Governing Law",
];

const EXTRACTION_INSTRUCTIONS: &str = r#"Please analyze this legal document and extract the key details in the following JSON format:

{
  "Document Type": "type of document",
  "Party 1 Name": "first party name",
  "Party 2 Name": "second party name",
  "Date": "document date",
  "Property Address": "property address if applicable",
  "Consideration": "monetary amount if applicable",
  "Governing Law": "governing law if mentioned"
}"#;

const OUTPUT_FORMAT_REMINDER: &str =
    "Please respond with ONLY the JSON object containing the extracted details.";
