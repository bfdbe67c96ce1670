use serde::{Deserialize, Serialize};

// Shown for any display field the upstream did not provide.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetails {
    pub name: String,
    pub branch: String,
    pub roll_number: String,
    pub college_code: String,
    pub father_name: String,
}

impl Default for StudentDetails {
    fn default() -> Self {
        Self {
            name: PLACEHOLDER.to_string(),
            branch: PLACEHOLDER.to_string(),
            roll_number: PLACEHOLDER.to_string(),
            college_code: PLACEHOLDER.to_string(),
            father_name: PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub code: String,
    pub name: String,
    pub internal_marks: String,
    pub external_marks: String,
    pub total_marks: String,
    /// Trimmed grade as published, e.g. "A+" or "7".
    pub grade: String,
    /// Never negative.
    pub credits: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Semester {
    pub name: String,
    /// Subjects of every exam attempt, in encounter order.
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CanonicalRecord {
    pub details: StudentDetails,
    pub semesters: Vec<Semester>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SemesterSummary {
    pub semester: String,
    pub total_credits: f64,
    pub total_weighted_points: f64,
    /// `None` when the semester has no contributing credits.
    pub sgpa: Option<f64>,
    pub backlog_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub semesters: Vec<SemesterSummary>,
    pub cgpa: Option<f64>,
    pub total_credits: f64,
    pub total_backlogs: u32,
}

// What the report layer renders: the normalized record plus its scores.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Report {
    pub details: StudentDetails,
    pub semesters: Vec<Semester>,
    pub summary: OverallSummary,
}
