use common::types::Submission;

pub const REJECTION_MESSAGE: &str = "Please provide both name and email.";

/// Form fields of a `/submit` post. Either may be absent.
#[derive(Debug, Clone, Default)]
pub struct SubmissionInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SubmissionInput {
    pub fn new(name: Option<&str>, email: Option<&str>) -> Self {
        Self { name: name.map(str::to_string), email: email.map(str::to_string) }
    }

    /// Pick `name` and `email` out of decoded form pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        let first = |key: &str| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());
        Self { name: first("name"), email: first("email") }
    }

    /// The pair, when both fields are present and non-empty.
    pub fn complete(&self) -> Option<Submission> {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) if !name.is_empty() && !email.is_empty() => {
                Some(Submission::new(name, email))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded(Submission),
    Rejected,
}

impl RecordOutcome {
    /// Plain-text reply shown to the user.
    pub fn message(&self) -> String {
        match self {
            RecordOutcome::Recorded(s) => confirmation_message(s),
            RecordOutcome::Rejected => REJECTION_MESSAGE.to_string(),
        }
    }
}

pub fn confirmation_message(s: &Submission) -> String {
    format!("Thank you {}, your email {} has been recorded!", s.name, s.email)
}
