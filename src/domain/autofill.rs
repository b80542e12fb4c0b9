//! Auto-fill: turns a flat JSON mapping into a normalized project form.
//!
//! Missing keys fall back to defaults, and so do keys set to `null`. Unknown
//! keys are ignored. A value of the wrong type for a known key, or a payload that is not a JSON object,
//! is a serialization error.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::records::{BidRecord, Contact, DossierRecord};

pub const DEFAULT_TERMS: [&str; 3] = [
    "50% due at rough-in, 50% upon final inspection",
    "Valid for 30 days from bid date",
    "Subject to change pending final site walk",
];

#[derive(Debug, Error)]
pub enum AutofillError {
    #[error("invalid project data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("project data must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Normalized form fields shared by the bid and the dossier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectForm {
    pub project_name: String,
    pub location: String,
    pub client_name: String,
    pub bid_total: Decimal,
    pub plumbing_fixtures: Vec<String>,
    pub terms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_date: Option<NaiveDate>,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            location: String::new(),
            client_name: String::new(),
            bid_total: Decimal::ZERO,
            plumbing_fixtures: Vec::new(),
            terms: DEFAULT_TERMS.iter().map(|t| (*t).to_string()).collect(),
            contact: None,
            signature_date: None,
            render_date: None,
        }
    }
}

fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Drops `null` object entries and array elements at every depth.
fn strip_nulls(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        serde_json::Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(strip_nulls);
        }
        _ => {}
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

impl ProjectForm {
    pub fn from_json(bytes: &[u8]) -> Result<Self, AutofillError> {
        let mut value: serde_json::Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(AutofillError::NotAnObject(kind(&value)));
        }
        strip_nulls(&mut value);
        let form: ProjectForm = serde_json::from_value(value)?;
        Ok(form.normalized())
    }

    /// Trims text, drops blank list entries and folds blank optionals to `None`.
    pub fn normalized(mut self) -> Self {
        self.project_name = self.project_name.trim().to_string();
        self.location = self.location.trim().to_string();
        self.client_name = self.client_name.trim().to_string();
        self.plumbing_fixtures = clean_list(self.plumbing_fixtures);
        self.terms = clean_list(self.terms);
        self.signature_date = self
            .signature_date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self.contact = self.contact.map(|c| Contact {
            name: c.name.trim().to_string(),
            role: c.role.trim().to_string(),
            phone: c.phone.trim().to_string(),
            email: c.email.trim().to_string(),
        });
        self
    }

    pub fn into_bid_record(self, logo: Option<Vec<u8>>) -> BidRecord {
        BidRecord {
            project_name: self.project_name,
            location: self.location,
            client_name: self.client_name,
            total_amount: self.bid_total,
            fixtures: self.plumbing_fixtures,
            terms: self.terms,
            signature_date: self.signature_date.unwrap_or_default(),
            logo,
        }
    }

    pub fn into_dossier_record(self, logo: Option<Vec<u8>>) -> DossierRecord {
        DossierRecord {
            project_name: self.project_name,
            location: self.location,
            client_name: self.client_name,
            fixtures: self.plumbing_fixtures,
            contact: self.contact,
            logo,
        }
    }
}
