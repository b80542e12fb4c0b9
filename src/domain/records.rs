use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything a bid proposal needs. Built fresh per request.
#[derive(Debug, Clone, Default)]
pub struct BidRecord {
    pub project_name: String,
    pub location: String,
    pub client_name: String,
    pub total_amount: Decimal,
    pub fixtures: Vec<String>,
    pub terms: Vec<String>,
    /// Date written into the authorized signature block; the render date
    /// is used when blank.
    pub signature_date: String,
    pub logo: Option<Vec<u8>>,
}

/// Project contact shown on the dossier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct DossierRecord {
    pub project_name: String,
    pub location: String,
    pub client_name: String,
    pub fixtures: Vec<String>,
    pub contact: Option<Contact>,
    pub logo: Option<Vec<u8>>,
}
