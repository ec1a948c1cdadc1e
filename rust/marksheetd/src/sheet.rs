use crate::calc::{self, OverallResult, SubjectScore};
use crate::config::SheetDefaults;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SheetError {
    #[error("subject not found: {0}")]
    UnknownSubject(String),
    #[error("unknown detail field: {0}")]
    UnknownDetailField(String),
    #[error("detail field {0} must be a string or null")]
    BadDetailValue(String),
}

impl SheetError {
    pub fn code(&self) -> &'static str {
        match self {
            SheetError::UnknownSubject(_) => "not_found",
            SheetError::UnknownDetailField(_) | SheetError::BadDetailValue(_) => "bad_params",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    StudentName,
    RollNumber,
    Class,
    Section,
    AcademicYear,
    DateOfBirth,
    SchoolName,
    SchoolAddress,
    PrincipalName,
    IssueDate,
    Remarks,
}

impl DetailField {
    pub const ALL: [DetailField; 11] = [
        DetailField::StudentName,
        DetailField::RollNumber,
        DetailField::Class,
        DetailField::Section,
        DetailField::AcademicYear,
        DetailField::DateOfBirth,
        DetailField::SchoolName,
        DetailField::SchoolAddress,
        DetailField::PrincipalName,
        DetailField::IssueDate,
        DetailField::Remarks,
    ];

    /// Fields that must be filled in before the sheet can be printed.
    pub const REQUIRED_FOR_PRINT: [DetailField; 6] = [
        DetailField::StudentName,
        DetailField::RollNumber,
        DetailField::Class,
        DetailField::AcademicYear,
        DetailField::SchoolName,
        DetailField::IssueDate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DetailField::StudentName => "studentName",
            DetailField::RollNumber => "rollNumber",
            DetailField::Class => "class",
            DetailField::Section => "section",
            DetailField::AcademicYear => "academicYear",
            DetailField::DateOfBirth => "dateOfBirth",
            DetailField::SchoolName => "schoolName",
            DetailField::SchoolAddress => "schoolAddress",
            DetailField::PrincipalName => "principalName",
            DetailField::IssueDate => "issueDate",
            DetailField::Remarks => "remarks",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.key() == key)
    }

    /// Human label: the key split on capitals and lowercased.
    pub fn label(self) -> String {
        let mut out = String::new();
        for ch in self.key().chars() {
            if ch.is_ascii_uppercase() {
                out.push(' ');
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetDetails {
    values: [String; DetailField::ALL.len()],
}

impl SheetDetails {
    // Variants are declared in `DetailField::ALL` order.
    fn slot(field: DetailField) -> usize {
        field as usize
    }

    pub fn get(&self, field: DetailField) -> &str {
        &self.values[Self::slot(field)]
    }

    pub fn set(&mut self, field: DetailField, value: impl Into<String>) {
        self.values[Self::slot(field)] = value.into();
    }

    pub fn is_blank(&self, field: DetailField) -> bool {
        self.get(field).trim().is_empty()
    }

    pub fn to_json(&self) -> Value {
        let mut m = Map::new();
        for f in DetailField::ALL {
            m.insert(f.key().to_string(), Value::String(self.get(f).to_string()));
        }
        Value::Object(m)
    }

    /// Same shape as [`to_json`](Self::to_json) with blanks shown as `-`.
    pub fn to_preview_json(&self) -> Value {
        let mut m = Map::new();
        for f in DetailField::ALL {
            let v = self.get(f);
            let shown = if v.is_empty() { "-" } else { v };
            m.insert(f.key().to_string(), Value::String(shown.to_string()));
        }
        Value::Object(m)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectEntry {
    pub id: String,
    pub score: SubjectScore,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRow {
    pub subject_id: String,
    pub position: usize,
    pub name: String,
    pub display_name: String,
    pub theory_marks: u32,
    pub practical_marks: u32,
    pub total: u32,
    pub grade: &'static str,
    pub points: u32,
    pub grade_class: String,
}

impl SubjectRow {
    fn new(position: usize, entry: &SubjectEntry) -> Self {
        let band = entry.score.band();
        let display_name = if entry.score.name.is_empty() {
            format!("Subject {}", position)
        } else {
            entry.score.name.clone()
        };
        Self {
            subject_id: entry.id.clone(),
            position,
            name: entry.score.name.clone(),
            display_name,
            theory_marks: entry.score.theory_marks,
            practical_marks: entry.score.practical_marks,
            total: entry.score.total(),
            grade: band.label,
            points: band.points,
            grade_class: band.css_class(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub total_display: String,
    pub percentage_display: String,
    pub overall_grade: &'static str,
    pub result: calc::Outcome,
    pub result_class: String,
    pub overall: OverallResult,
}

impl From<OverallResult> for SummaryView {
    fn from(overall: OverallResult) -> Self {
        Self {
            total_display: format!("{}/{}", overall.total_obtained, overall.total_max),
            percentage_display: format!("{}%", overall.percentage_text()),
            overall_grade: overall.overall_grade,
            result: overall.result,
            result_class: overall.result.as_str().to_ascii_lowercase(),
            overall,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewModel {
    pub details: Value,
    pub rows: Vec<SubjectRow>,
    pub summary: SummaryView,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrintReadiness {
    pub ready: bool,
    pub missing_fields: Vec<String>,
    pub no_subjects: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Marksheet {
    details: SheetDetails,
    subjects: Vec<SubjectEntry>,
}

impl Marksheet {
    /// A session as it looks on first open or after a clear.
    pub fn fresh(defaults: &SheetDefaults, today: &str) -> Self {
        let mut sheet = Marksheet::default();
        sheet.details.set(DetailField::SchoolName, &defaults.school_name);
        sheet
            .details
            .set(DetailField::SchoolAddress, &defaults.school_address);
        sheet
            .details
            .set(DetailField::PrincipalName, &defaults.principal_name);
        sheet.details.set(DetailField::IssueDate, today);
        for name in &defaults.default_subjects {
            sheet.add_subject(name.clone());
        }
        sheet
    }

    pub fn clear(&mut self, defaults: &SheetDefaults, today: &str) {
        *self = Marksheet::fresh(defaults, today);
        debug!(subjects = self.subjects.len(), "marksheet cleared");
    }

    pub fn details(&self) -> &SheetDetails {
        &self.details
    }

    #[cfg(test)]
    pub fn subjects(&self) -> &[SubjectEntry] {
        &self.subjects
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    /// Applies a partial `{ key: string|null }` patch. Nothing is written
    /// unless every key is valid.
    pub fn update_details(&mut self, patch: &Map<String, Value>) -> Result<(), SheetError> {
        let mut staged = Vec::with_capacity(patch.len());
        for (key, value) in patch {
            let field = DetailField::from_key(key)
                .ok_or_else(|| SheetError::UnknownDetailField(key.clone()))?;
            let text = match value {
                Value::Null => String::new(),
                Value::String(s) => s.clone(),
                _ => return Err(SheetError::BadDetailValue(key.clone())),
            };
            staged.push((field, text));
        }
        for (field, text) in staged {
            self.details.set(field, text);
        }
        Ok(())
    }

    pub fn add_subject(&mut self, name: impl Into<String>) -> SubjectRow {
        let entry = SubjectEntry {
            id: Uuid::new_v4().to_string(),
            score: SubjectScore::new(name, 0, 0),
        };
        debug!(subject_id = %entry.id, "subject added");
        self.subjects.push(entry);
        let position = self.subjects.len();
        SubjectRow::new(position, &self.subjects[position - 1])
    }

    /// Patches the named fields of one subject; marks must already be
    /// normalized.
    pub fn update_subject(
        &mut self,
        subject_id: &str,
        name: Option<String>,
        theory_marks: Option<u32>,
        practical_marks: Option<u32>,
    ) -> Result<SubjectRow, SheetError> {
        let idx = self.index_of(subject_id)?;
        let score = &mut self.subjects[idx].score;
        if let Some(n) = name {
            score.name = n;
        }
        if let Some(t) = theory_marks {
            score.theory_marks = t;
        }
        if let Some(p) = practical_marks {
            score.practical_marks = p;
        }
        Ok(SubjectRow::new(idx + 1, &self.subjects[idx]))
    }

    pub fn remove_subject(&mut self, subject_id: &str) -> Result<(), SheetError> {
        let idx = self.index_of(subject_id)?;
        self.subjects.remove(idx);
        debug!(subject_id, "subject removed");
        Ok(())
    }

    fn index_of(&self, subject_id: &str) -> Result<usize, SheetError> {
        self.subjects
            .iter()
            .position(|s| s.id == subject_id)
            .ok_or_else(|| SheetError::UnknownSubject(subject_id.to_string()))
    }

    pub fn rows(&self) -> Vec<SubjectRow> {
        self.subjects
            .iter()
            .enumerate()
            .map(|(i, e)| SubjectRow::new(i + 1, e))
            .collect()
    }

    pub fn scores(&self) -> Vec<SubjectScore> {
        self.subjects.iter().map(|e| e.score.clone()).collect()
    }

    pub fn overall(&self) -> OverallResult {
        calc::compute_overall(&self.scores())
    }

    pub fn preview(&self) -> PreviewModel {
        PreviewModel {
            details: self.details.to_preview_json(),
            rows: self.rows(),
            summary: SummaryView::from(self.overall()),
        }
    }

    pub fn print_readiness(&self) -> PrintReadiness {
        let missing_fields: Vec<String> = DetailField::REQUIRED_FOR_PRINT
            .iter()
            .filter(|f| self.details.is_blank(**f))
            .map(|f| f.label())
            .collect();
        let no_subjects = self.subjects.is_empty();
        PrintReadiness {
            ready: missing_fields.is_empty() && !no_subjects,
            missing_fields,
            no_subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fresh() -> Marksheet {
        Marksheet::fresh(&SheetDefaults::default(), "2026-10-18")
    }

    fn patch(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("object")
    }

    #[test]
    fn fresh_sheet_has_defaults() {
        let s = fresh();
        assert_eq!(s.subject_count(), 6);
        assert_eq!(s.details().get(DetailField::SchoolName), "ABC Public School");
        assert_eq!(s.details().get(DetailField::IssueDate), "2026-10-18");
        assert_eq!(s.details().get(DetailField::StudentName), "");
        assert!(s.rows().iter().all(|r| r.grade == "F" && r.total == 0));
        assert_eq!(s.overall().total_max, 600);
    }

    #[test]
    fn subject_ids_are_unique() {
        let s = fresh();
        let mut ids: Vec<_> = s.subjects().iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn labels_split_camel_case() {
        assert_eq!(DetailField::StudentName.label(), "student name");
        assert_eq!(DetailField::Class.label(), "class");
        assert_eq!(DetailField::AcademicYear.label(), "academic year");
    }

    #[test]
    fn update_subject_recomputes_row() {
        let mut s = fresh();
        let id = s.subjects()[1].id.clone();
        let row = s
            .update_subject(&id, None, Some(70), Some(25))
            .expect("update");
        assert_eq!(row.position, 2);
        assert_eq!(row.name, "Mathematics");
        assert_eq!(row.total, 95);
        assert_eq!(row.grade, "A+");
        assert_eq!(row.points, 10);
        assert_eq!(row.grade_class, "grade-a-plus");

        // Only the supplied half changes.
        let row = s.update_subject(&id, None, None, Some(0)).expect("update");
        assert_eq!(row.theory_marks, 70);
        assert_eq!(row.total, 70);
        assert_eq!(row.grade, "B+");
    }

    #[test]
    fn unknown_subject_is_not_found() {
        let mut s = fresh();
        let e = s.remove_subject("nope").expect_err("missing");
        assert_eq!(e.code(), "not_found");
        let e = s
            .update_subject("nope", None, Some(1), None)
            .expect_err("missing");
        assert_eq!(e, SheetError::UnknownSubject("nope".to_string()));
    }

    #[test]
    fn blank_names_fall_back_to_position() {
        let mut s = fresh();
        let first = s.subjects()[0].id.clone();
        s.remove_subject(&first).expect("remove");
        let row = s.add_subject("");
        assert_eq!(row.position, 6);
        assert_eq!(row.display_name, "Subject 6");
        assert_eq!(s.rows()[0].display_name, "Mathematics");
    }

    #[test]
    fn details_patch_is_all_or_nothing() {
        let mut s = fresh();
        let e = s
            .update_details(&patch(json!({ "studentName": "Asha", "nickname": "A" })))
            .expect_err("unknown key");
        assert_eq!(e.code(), "bad_params");
        assert_eq!(s.details().get(DetailField::StudentName), "");

        s.update_details(&patch(json!({ "studentName": "Asha", "schoolName": null })))
            .expect("patch");
        assert_eq!(s.details().get(DetailField::StudentName), "Asha");
        assert!(s.details().is_blank(DetailField::SchoolName));

        let e = s
            .update_details(&patch(json!({ "rollNumber": 12 })))
            .expect_err("non-string");
        assert_eq!(e, SheetError::BadDetailValue("rollNumber".to_string()));
    }

    #[test]
    fn preview_shows_dash_for_blanks() {
        let s = fresh();
        let p = s.preview();
        assert_eq!(p.details["studentName"], "-");
        assert_eq!(p.details["schoolName"], "ABC Public School");
        assert_eq!(p.rows.len(), 6);
        assert_eq!(p.summary.total_display, "0/600");
        assert_eq!(p.summary.percentage_display, "0.00%");
        assert_eq!(p.summary.result_class, "fail");
    }

    #[test]
    fn print_readiness_reports_missing_fields() {
        let mut s = fresh();
        let r = s.print_readiness();
        assert!(!r.ready);
        assert_eq!(
            r.missing_fields,
            vec!["student name", "roll number", "class", "academic year"]
        );
        assert!(!r.no_subjects);

        s.update_details(&patch(json!({
            "studentName": "Asha",
            "rollNumber": "17",
            "class": "X",
            "academicYear": "2026-27",
            "issueDate": "   "
        })))
        .expect("patch");
        assert_eq!(s.print_readiness().missing_fields, vec!["issue date"]);

        s.update_details(&patch(json!({ "issueDate": "2026-10-18" })))
            .expect("patch");
        assert!(s.print_readiness().ready);

        let ids: Vec<_> = s.subjects().iter().map(|e| e.id.clone()).collect();
        for id in ids {
            s.remove_subject(&id).expect("remove");
        }
        let r = s.print_readiness();
        assert!(r.no_subjects);
        assert!(!r.ready);
    }

    #[test]
    fn clear_restores_fresh_state() {
        let mut s = fresh();
        s.update_details(&patch(json!({ "studentName": "Asha", "schoolName": "Other" })))
            .expect("patch");
        s.add_subject("Art");
        s.clear(&SheetDefaults::default(), "2026-10-19");
        assert_eq!(s.subject_count(), 6);
        assert!(s.details().is_blank(DetailField::StudentName));
        assert_eq!(s.details().get(DetailField::SchoolName), "ABC Public School");
        assert_eq!(s.details().get(DetailField::IssueDate), "2026-10-19");
    }
}
