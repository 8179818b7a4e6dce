//! Identity document record models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// Structured fields recovered from one document.
///
/// Every field except `identifier` and `name` may be absent. A record with an
/// empty identifier or name is not usable; see [`CandidateRecord::require_complete`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Virtual ID, four space-separated groups of 4 digits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_id: Option<String>,

    /// 12-digit natural key rendered as `XXXX XXXX XXXX`.
    pub identifier: String,

    /// Name in Latin script.
    pub name: String,

    /// Name in Tamil script.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_tamil: Option<String>,

    /// Name following a S/O, D/O, W/O or C/O marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,

    /// Date of birth as `DD/MM/YYYY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    /// Address text with boilerplate removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Village/Town/City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_office: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// 6-digit postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,

    /// 10-digit phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CandidateRecord {
    /// Fail unless both mandatory fields were extracted.
    pub fn require_complete(self) -> Result<Self, ExtractionError> {
        if self.identifier.trim().is_empty() {
            return Err(ExtractionError::MissingField("identifier"));
        }
        if self.name.trim().is_empty() {
            return Err(ExtractionError::MissingField("name"));
        }
        Ok(self)
    }

    /// Names of fields that were not found, mandatory ones first.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let fields: [(&'static str, bool); 15] = [
            ("identifier", !self.identifier.is_empty()),
            ("name", !self.name.is_empty()),
            ("virtual_id", self.virtual_id.is_some()),
            ("name_tamil", self.name_tamil.is_some()),
            ("guardian_name", self.guardian_name.is_some()),
            ("date_of_birth", self.date_of_birth.is_some()),
            ("gender", self.gender.is_some()),
            ("address", self.address.is_some()),
            ("locality", self.locality.is_some()),
            ("post_office", self.post_office.is_some()),
            ("sub_district", self.sub_district.is_some()),
            ("district", self.district.is_some()),
            ("state", self.state.is_some()),
            ("pincode", self.pincode.is_some()),
            ("phone", self.phone.is_some()),
        ];

        fields
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Gender, normalized to a closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Transgender,
}

impl Gender {
    /// Map a full word or single-letter token, ignoring case.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Some(Self::Male),
            "f" | "female" => Some(Self::Female),
            "t" | "transgender" => Some(Self::Transgender),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Transgender => "Transgender",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| format!("unknown gender: {}", s))
    }
}

/// A record that passed validation. Only [`crate::validate::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedRecord(pub(crate) CandidateRecord);

impl ValidatedRecord {
    pub fn identifier(&self) -> &str {
        &self.0.identifier
    }

    pub fn record(&self) -> &CandidateRecord {
        &self.0
    }

    pub fn into_inner(self) -> CandidateRecord {
        self.0
    }
}

/// Partial update applied to a stored record.
///
/// Only `Some` fields are written; `None` leaves the stored value untouched.
/// The identifier is the lookup key and is never part of an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    pub virtual_id: Option<String>,
    pub name: Option<String>,
    pub name_tamil: Option<String>,
    pub guardian_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub locality: Option<String>,
    pub post_office: Option<String>,
    pub sub_district: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub phone: Option<String>,
}

impl RecordUpdate {
    /// Column/value pairs for every field that is set.
    pub fn assignments(&self) -> Vec<(&'static str, String)> {
        let fields: [(&'static str, Option<String>); 14] = [
            ("virtual_id", self.virtual_id.clone()),
            ("name", self.name.clone()),
            ("name_tamil", self.name_tamil.clone()),
            ("guardian_name", self.guardian_name.clone()),
            ("date_of_birth", self.date_of_birth.clone()),
            ("gender", self.gender.map(|g| g.as_str().to_string())),
            ("address", self.address.clone()),
            ("locality", self.locality.clone()),
            ("post_office", self.post_office.clone()),
            ("sub_district", self.sub_district.clone()),
            ("district", self.district.clone()),
            ("state", self.state.clone()),
            ("pincode", self.pincode.clone()),
            ("phone", self.phone.clone()),
        ];

        fields
            .into_iter()
            .filter_map(|(column, value)| value.map(|v| (column, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Apply the set fields onto an existing record.
    pub fn apply_to(&self, record: &mut CandidateRecord) {
        fn set(target: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value {
                *target = Some(v.clone());
            }
        }

        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(gender) = self.gender {
            record.gender = Some(gender);
        }
        set(&mut record.virtual_id, &self.virtual_id);
        set(&mut record.name_tamil, &self.name_tamil);
        set(&mut record.guardian_name, &self.guardian_name);
        set(&mut record.date_of_birth, &self.date_of_birth);
        set(&mut record.address, &self.address);
        set(&mut record.locality, &self.locality);
        set(&mut record.post_office, &self.post_office);
        set(&mut record.sub_district, &self.sub_district);
        set(&mut record.district, &self.district);
        set(&mut record.state, &self.state);
        set(&mut record.pincode, &self.pincode);
        set(&mut record.phone, &self.phone);
    }
}

impl From<&ValidatedRecord> for RecordUpdate {
    fn from(validated: &ValidatedRecord) -> Self {
        let r = validated.record();
        Self {
            virtual_id: r.virtual_id.clone(),
            name: Some(r.name.clone()).filter(|n| !n.is_empty()),
            name_tamil: r.name_tamil.clone(),
            guardian_name: r.guardian_name.clone(),
            date_of_birth: r.date_of_birth.clone(),
            gender: r.gender,
            address: r.address.clone(),
            locality: r.locality.clone(),
            post_office: r.post_office.clone(),
            sub_district: r.sub_district.clone(),
            district: r.district.clone(),
            state: r.state.clone(),
            pincode: r.pincode.clone(),
            phone: r.phone.clone(),
        }
    }
}

/// A record owned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    /// Surrogate id assigned by the store.
    pub id: i64,

    #[serde(flatten)]
    pub record: CandidateRecord,

    pub created_at: DateTime<Utc>,

    /// Set on the first update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PersistedRecord {
    pub fn identifier(&self) -> &str {
        &self.record.identifier
    }
}
