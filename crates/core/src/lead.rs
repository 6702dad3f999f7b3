use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The contact and interest details captured for one prospective customer.
///
/// Fields are filled in over the course of a call by the
/// `update_lead_profile` tool; nothing ever clears a field once it is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LeadProfile {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub use_case: Option<String>,
    pub team_size: Option<String>,
    pub timeline: Option<String>,
}

/// Arguments for capturing lead details mentioned by the caller.
///
/// Every field is optional; only the ones the caller actually provided
/// should be filled in.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct LeadUpdate {
    #[schemars(description = "Customer's name")]
    pub name: Option<String>,
    #[schemars(description = "Customer's company name")]
    pub company: Option<String>,
    #[schemars(description = "Customer's email address")]
    pub email: Option<String>,
    #[schemars(description = "Customer's job title")]
    pub role: Option<String>,
    #[schemars(description = "What they want to build, buy or learn")]
    pub use_case: Option<String>,
    #[schemars(description = "Number of people in their team")]
    pub team_size: Option<String>,
    #[schemars(description = "When they want to start (e.g., now, next month)")]
    pub timeline: Option<String>,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Values are stored exactly as supplied; only the empty string is skipped.
fn overwrite(slot: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        *slot = Some(v);
    }
}

impl LeadProfile {
    /// A lead is qualified once name, email and use case are all known.
    pub fn is_qualified(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Names of the required fields that are still empty.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("use_case", &self.use_case),
        ]
        .into_iter()
        .filter(|(_, value)| !present(value))
        .map(|(field, _)| field)
        .collect()
    }

    /// Merges an update into the profile. Empty or omitted fields are ignored.
    pub fn apply(&mut self, update: LeadUpdate) {
        overwrite(&mut self.name, update.name);
        overwrite(&mut self.company, update.company);
        overwrite(&mut self.email, update.email);
        overwrite(&mut self.role, update.role);
        overwrite(&mut self.use_case, update.use_case);
        overwrite(&mut self.team_size, update.team_size);
        overwrite(&mut self.timeline, update.timeline);
    }

    /// The line the agent reads back to the caller after the lead is saved.
    pub fn closing_line(&self) -> String {
        format!(
            "Lead saved. Summarize the call for the user: 'Thanks {}, I have your info regarding {}. We will email you at {}. Goodbye!'",
            self.name.as_deref().unwrap_or("there"),
            self.use_case.as_deref().unwrap_or("your request"),
            self.email.as_deref().unwrap_or("the address you shared"),
        )
    }
}

/// A lead as stored in the lead database: the flattened profile plus the
/// moment it was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(flatten)]
    pub profile: LeadProfile,
    pub timestamp: String,
}

impl LeadRecord {
    pub fn new(profile: LeadProfile, at: DateTime<Utc>) -> Self {
        Self {
            profile,
            timestamp: at.to_rfc3339(),
        }
    }
}
