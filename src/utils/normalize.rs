use log::debug;
use serde_json::{Map, Value};
use crate::error::NormalizationError;
use crate::models::{CanonicalRecord, Semester, StudentDetails, Subject, PLACEHOLDER};

// Alternate key names per logical field, most common first.
const NAME_KEYS: &[&str] = &["name", "NAME", "studentName", "student_name"];
const BRANCH_KEYS: &[&str] = &["branch", "BRANCH", "branchName"];
const ROLL_NUMBER_KEYS: &[&str] = &["rollNumber", "roll_number", "Roll_No", "ROLL_NO", "rollNo"];
const COLLEGE_CODE_KEYS: &[&str] = &["collegeCode", "college_code", "COLLEGE_CODE"];
const FATHER_NAME_KEYS: &[&str] = &["fatherName", "father_name", "FATHER_NAME"];

const SEMESTER_KEYS: &[&str] = &["semester", "semesterName", "semester_name", "name"];

const SUBJECT_CODE_KEYS: &[&str] = &["subjectCode", "subject_code", "code"];
const SUBJECT_NAME_KEYS: &[&str] = &["subjectName", "subject_name", "name"];
const INTERNAL_KEYS: &[&str] = &["internalMarks", "internal_marks", "subject_internal", "internal"];
const EXTERNAL_KEYS: &[&str] = &["externalMarks", "external_marks", "subject_external", "external"];
const TOTAL_KEYS: &[&str] = &["totalMarks", "total_marks", "subject_total", "total"];
const GRADE_KEYS: &[&str] = &["grades", "grade", "subject_grade"];
const CREDITS_KEYS: &[&str] = &["credits", "subject_credits", "credit"];

/// Upstream layouts the results API is known to produce.
///
/// `normalize` tries them in [`Shape::ORDER`], most specific first, and keeps
/// the first one that matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{ details, results: [ { semester, exams: [ { subjects } ] } ] }`
    Flat,
    /// `{ data: { details, results: [...] } }`
    Wrapped,
    /// `{ data: { Details, Results: { <semester>: { <courseId>: [ { <subjectKey>: {...} } ] } } } }`
    LegacyKeyed,
    /// Any object carrying `details` or `results`; the missing part is left empty.
    BestEffort,
}

impl Shape {
    pub const ORDER: [Shape; 4] = [Shape::Flat, Shape::Wrapped, Shape::LegacyKeyed, Shape::BestEffort];

    pub fn extract(self, raw: &Value) -> Option<CanonicalRecord> {
        match self {
            Shape::Flat => extract_flat(raw),
            Shape::Wrapped => raw.get("data").and_then(extract_flat),
            Shape::LegacyKeyed => extract_legacy(raw),
            Shape::BestEffort => extract_best_effort(raw),
        }
    }
}

/// Maps a raw results document onto the canonical record.
pub fn normalize(raw: &Value) -> Result<CanonicalRecord, NormalizationError> {
    Shape::ORDER
        .iter()
        .find_map(|shape| shape.extract(raw).map(|record| (*shape, record)))
        .map(|(shape, record)| {
            debug!("Results matched the {:?} layout with {} semester(s)", shape, record.semesters.len());
            record
        })
        .ok_or(NormalizationError::UnrecognizedShape)
}

fn extract_flat(raw: &Value) -> Option<CanonicalRecord> {
    let object = raw.as_object()?;
    let details = object.get("details")?.as_object()?;
    let results = object.get("results")?.as_array()?;

    Some(CanonicalRecord {
        details: parse_details(details),
        semesters: results.iter().map(parse_semester).collect(),
    })
}

fn extract_legacy(raw: &Value) -> Option<CanonicalRecord> {
    let data = raw.get("data")?.as_object()?;
    let results = data.get("Results")?.as_object()?;
    let details = data
        .get("Details")
        .and_then(Value::as_object)
        .map(parse_details)
        .unwrap_or_default();

    let semesters = results
        .iter()
        .map(|(name, courses)| {
            let mut subjects = Vec::new();
            collect_keyed_subjects(courses, &mut subjects);
            Semester { name: name.trim().to_string(), subjects }
        })
        .collect();

    Some(CanonicalRecord { details, semesters })
}

fn extract_best_effort(raw: &Value) -> Option<CanonicalRecord> {
    let object = raw.as_object()?;
    let details = present(object, "details");
    let results = present(object, "results");
    if details.is_none() && results.is_none() {
        return None;
    }

    Some(CanonicalRecord {
        details: details
            .and_then(Value::as_object)
            .map(parse_details)
            .unwrap_or_default(),
        semesters: results
            .and_then(Value::as_array)
            .map(|entries| entries.iter().map(parse_semester).collect())
            .unwrap_or_default(),
    })
}

fn parse_details(details: &Map<String, Value>) -> StudentDetails {
    StudentDetails {
        name: display_field(details, NAME_KEYS),
        branch: display_field(details, BRANCH_KEYS),
        roll_number: display_field(details, ROLL_NUMBER_KEYS),
        college_code: display_field(details, COLLEGE_CODE_KEYS),
        father_name: display_field(details, FATHER_NAME_KEYS),
    }
}

// Subjects from every exam attempt are concatenated; an entry without
// `exams` may carry its `subjects` directly.
fn parse_semester(entry: &Value) -> Semester {
    let Some(entry) = entry.as_object() else {
        return Semester { name: PLACEHOLDER.to_string(), subjects: Vec::new() };
    };

    let mut subjects: Vec<Subject> = Vec::new();
    match entry.get("exams").and_then(Value::as_array) {
        Some(exams) => {
            for exam in exams {
                subjects.extend(subject_list(exam.get("subjects")));
            }
        }
        None => subjects.extend(subject_list(entry.get("subjects"))),
    }

    Semester {
        name: display_field(entry, SEMESTER_KEYS),
        subjects,
    }
}

fn subject_list(node: Option<&Value>) -> Vec<Subject> {
    node.and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).map(parse_subject).collect())
        .unwrap_or_default()
}

// Walks the legacy course/subject maps, which may nest objects or arrays,
// and collects every object that looks like a subject.
fn collect_keyed_subjects(node: &Value, out: &mut Vec<Subject>) {
    match node {
        Value::Array(items) => items.iter().for_each(|item| collect_keyed_subjects(item, out)),
        Value::Object(map) if is_subject(map) => out.push(parse_subject(map)),
        Value::Object(map) => map.values().for_each(|value| collect_keyed_subjects(value, out)),
        _ => {}
    }
}

fn is_subject(map: &Map<String, Value>) -> bool {
    first_present(map, SUBJECT_CODE_KEYS).is_some() || first_present(map, GRADE_KEYS).is_some()
}

fn parse_subject(subject: &Map<String, Value>) -> Subject {
    Subject {
        code: display_field(subject, SUBJECT_CODE_KEYS),
        name: display_field(subject, SUBJECT_NAME_KEYS),
        internal_marks: display_field(subject, INTERNAL_KEYS),
        external_marks: display_field(subject, EXTERNAL_KEYS),
        total_marks: display_field(subject, TOTAL_KEYS),
        grade: display_field(subject, GRADE_KEYS),
        credits: credits_field(subject),
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| present(map, key))
}

fn display_field(map: &Map<String, Value>, keys: &[&str]) -> String {
    let text = match first_present(map, keys) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    };
    if text.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text
    }
}

// Credits may arrive as a number or a numeric string; anything else,
// including negative values, counts as zero.
fn credits_field(map: &Map<String, Value>) -> f64 {
    let credits = match first_present(map, CREDITS_KEYS) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    credits.filter(|c| c.is_finite() && *c > 0.0).unwrap_or(0.0)
}
