//! Session defaults: the school block and subject list a fresh or cleared
//! marksheet starts from.
//!
//! An optional JSON file overrides any subset of the built-in values:
//! ```json
//! {
//!   "school": {
//!     "name": "Greenfield High",
//!     "address": "4 Hill Road",
//!     "principalName": "Ms. Rao"
//!   },
//!   "defaultSubjects": ["English", "Mathematics"]
//! }
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

const DEFAULT_SCHOOL_NAME: &str = "ABC Public School";
const DEFAULT_SCHOOL_ADDRESS: &str = "123 Education Street, City - 123456";
const DEFAULT_PRINCIPAL_NAME: &str = "Dr. John Smith";
const DEFAULT_SUBJECTS: [&str; 6] = [
    "English",
    "Mathematics",
    "Science",
    "Social Studies",
    "Hindi",
    "Computer Science",
];

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DefaultsFile {
    #[serde(default)]
    school: SchoolFile,
    default_subjects: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SchoolFile {
    name: Option<String>,
    address: Option<String>,
    principal_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDefaults {
    pub school_name: String,
    pub school_address: String,
    pub principal_name: String,
    pub default_subjects: Vec<String>,
}

impl Default for SheetDefaults {
    fn default() -> Self {
        Self {
            school_name: DEFAULT_SCHOOL_NAME.to_string(),
            school_address: DEFAULT_SCHOOL_ADDRESS.to_string(),
            principal_name: DEFAULT_PRINCIPAL_NAME.to_string(),
            default_subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SheetDefaults {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading defaults file {}", path.display()))?;
        let defaults = Self::from_json(&raw)
            .with_context(|| format!("parsing defaults file {}", path.display()))?;
        info!(
            school = %defaults.school_name,
            subjects = defaults.default_subjects.len(),
            "loaded marksheet defaults"
        );
        Ok(defaults)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: DefaultsFile = serde_json::from_str(raw)?;
        let mut out = Self::default();
        if let Some(v) = file.school.name {
            out.school_name = v;
        }
        if let Some(v) = file.school.address {
            out.school_address = v;
        }
        if let Some(v) = file.school.principal_name {
            out.principal_name = v;
        }
        if let Some(subjects) = file.default_subjects {
            debug!(count = subjects.len(), "overriding default subjects");
            out.default_subjects = subjects;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_defaults() {
        let d = SheetDefaults::default();
        assert_eq!(d.school_name, "ABC Public School");
        assert_eq!(d.principal_name, "Dr. John Smith");
        assert_eq!(d.default_subjects.len(), 6);
        assert_eq!(d.default_subjects[3], "Social Studies");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let d = SheetDefaults::from_json(r#"{ "school": { "name": "Greenfield High" } }"#)
            .expect("parse");
        assert_eq!(d.school_name, "Greenfield High");
        assert_eq!(d.school_address, "123 Education Street, City - 123456");
        assert_eq!(d.default_subjects.len(), 6);
    }

    #[test]
    fn empty_subject_list_is_honoured() {
        let d = SheetDefaults::from_json(r#"{ "defaultSubjects": [] }"#).expect("parse");
        assert!(d.default_subjects.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(SheetDefaults::from_json(r#"{ "passingMarks": 40 }"#).is_err());
    }

    #[test]
    fn load_from_file_reads_json() {
        let mut f = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            f,
            r#"{{ "school": {{ "principalName": "Ms. Rao" }}, "defaultSubjects": ["Art"] }}"#
        )
        .expect("write");
        let d = SheetDefaults::load_from_file(f.path()).expect("load");
        assert_eq!(d.principal_name, "Ms. Rao");
        assert_eq!(d.default_subjects, vec!["Art".to_string()]);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SheetDefaults::load_from_file(Path::new("/nonexistent/marksheet.json"))
            .expect_err("should fail");
        assert!(format!("{err:#}").contains("/nonexistent/marksheet.json"));
    }
}
