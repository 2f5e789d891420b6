//! User allergy profiles and the record store they are read from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::error::{EngineError, Result};

/// The allergy names a user has declared, in the order they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct UserAllergyProfile {
    allergies: Vec<String>,
}

impl UserAllergyProfile {
    /// Blank names are dropped: an empty name would relate to every allergen.
    pub fn new(allergies: Vec<String>) -> Self {
        Self {
            allergies: allergies
                .into_iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Parses the free-text symptoms/allergies field of a patient record.
    pub fn from_symptoms(symptoms: &str) -> Self {
        Self::new(symptoms.split(',').map(str::to_string).collect())
    }

    pub fn allergies(&self) -> &[String] {
        &self.allergies
    }

    pub fn is_empty(&self) -> bool {
        self.allergies.is_empty()
    }

    /// Comma-joined form used in prompts and messages.
    pub fn joined(&self) -> String {
        self.allergies.join(", ")
    }
}

impl From<Vec<String>> for UserAllergyProfile {
    fn from(allergies: Vec<String>) -> Self {
        Self::new(allergies)
    }
}

impl From<UserAllergyProfile> for Vec<String> {
    fn from(profile: UserAllergyProfile) -> Self {
        profile.allergies
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub symptoms: String,
}

/// Source of patient records; the production store is an external managed database.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_patient(&self, user_id: &str) -> Result<Option<PatientRecord>>;

    /// Resolves a user's allergy profile. Unknown users get an empty profile.
    async fn allergy_profile(&self, user_id: &str) -> Result<UserAllergyProfile> {
        Ok(self
            .fetch_patient(user_id)
            .await?
            .map(|patient| UserAllergyProfile::from_symptoms(&patient.symptoms))
            .unwrap_or_default())
    }
}

/// Patient records read from a JSON array on disk.
#[derive(Debug, Default)]
pub struct JsonProfileStore {
    patients: HashMap<String, PatientRecord>,
}

impl JsonProfileStore {
    pub fn from_records(records: Vec<PatientRecord>) -> Self {
        Self {
            patients: records.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EngineError::Profile(format!(
                "profile file not found at: {:?}",
                path
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        let records: Vec<PatientRecord> = serde_json::from_str(&raw)?;
        Ok(Self::from_records(records))
    }
}

#[async_trait]
impl ProfileStore for JsonProfileStore {
    async fn fetch_patient(&self, user_id: &str) -> Result<Option<PatientRecord>> {
        Ok(self.patients.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_symptoms_splits_and_trims() {
        let profile = UserAllergyProfile::from_symptoms(" milk , nuts,, ");
        assert_eq!(profile.allergies(), &["milk".to_string(), "nuts".to_string()]);
        assert_eq!(profile.joined(), "milk, nuts");
        assert!(UserAllergyProfile::from_symptoms("").is_empty());
    }

    #[test]
    fn test_deserialize_drops_blank_names() {
        let profile: UserAllergyProfile = serde_json::from_str(r#"["milk", "  ", "", " nuts "]"#).unwrap();
        assert_eq!(profile.allergies(), &["milk".to_string(), "nuts".to_string()]);
        assert_eq!(serde_json::to_string(&profile).unwrap(), r#"["milk","nuts"]"#);
    }

    #[tokio::test]
    async fn test_json_profile_store_lookup() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "p-1", "name": "Ada", "birthdate": "1990-01-01", "symptoms": "milk, eggs"}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let store = JsonProfileStore::load(file.path()).unwrap();
        let profile = store.allergy_profile("p-1").await.unwrap();
        assert_eq!(profile.allergies(), &["milk".to_string(), "eggs".to_string()]);

        let unknown = store.allergy_profile("p-404").await.unwrap();
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_json_profile_store_missing_file() {
        let err = JsonProfileStore::load(Path::new("no_such_profiles.json")).unwrap_err();
        assert!(err.to_string().contains("profile file not found"));
    }
}
