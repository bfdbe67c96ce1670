use anyhow::{Context, Result};
use serde_json::to_string_pretty;
use crate::models::{Report, Semester, SemesterSummary, PLACEHOLDER};
use crate::utils::score::MAX_GRADE_POINT;

const CHART_WIDTH: usize = 30;

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

fn format_gpa(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |gpa| format!("{:.2}", gpa))
}

fn backlog_marker(count: u32) -> String {
    match count {
        0 => "✅ No backlogs".to_string(),
        1 => "⚠️ 1 backlog".to_string(),
        n => format!("⚠️ {} backlogs", n),
    }
}

fn push_semester(message: &mut String, semester: &Semester, summary: &SemesterSummary) {
    message.push_str(&format!("📘 Semester {} | {}\n", semester.name, backlog_marker(summary.backlog_count)));
    message.push_str(&format!(
        "  {:<10} {:<40} {:>8} {:>8} {:>6} {:>6} {:>7}\n",
        "Code", "Subject", "Internal", "External", "Total", "Grade", "Credits"
    ));
    for subject in &semester.subjects {
        message.push_str(&format!(
            "  {:<10} {:<40} {:>8} {:>8} {:>6} {:>6} {:>7}\n",
            subject.code,
            subject.name,
            subject.internal_marks,
            subject.external_marks,
            subject.total_marks,
            subject.grade,
            format_number(subject.credits)
        ));
    }
    message.push_str(&format!(
        "  Credits: {} | SGPA: {}\n\n",
        format_number(summary.total_credits),
        format_gpa(summary.sgpa)
    ));
}

// One bar per semester, scaled against the top of the grade scale.
fn push_trend(message: &mut String, semesters: &[SemesterSummary]) {
    if semesters.is_empty() {
        return;
    }
    message.push_str("📈 SGPA trend\n");
    let label_width = semesters.iter().map(|s| s.semester.chars().count()).max().unwrap_or(0);
    for summary in semesters {
        let line = match summary.sgpa {
            Some(sgpa) => {
                let filled = ((sgpa / MAX_GRADE_POINT) * CHART_WIDTH as f64).round() as usize;
                format!("{} {:.2}", "█".repeat(filled.min(CHART_WIDTH)), sgpa)
            }
            None => "no credits".to_string(),
        };
        message.push_str(&format!("  {:<width$} │ {}\n", summary.semester, line, width = label_width));
    }
    message.push('\n');
}

/// Renders the report as a terminal-friendly text block.
pub fn render_text(report: &Report) -> String {
    let details = &report.details;
    let mut message = String::from("🎓 Academic Results 🎓\n\n");
    message.push_str(&format!("Name         : {}\n", details.name));
    message.push_str(&format!("Roll Number  : {}\n", details.roll_number));
    message.push_str(&format!("Branch       : {}\n", details.branch));
    message.push_str(&format!("College Code : {}\n", details.college_code));
    message.push_str(&format!("Father Name  : {}\n\n", details.father_name));

    if report.semesters.is_empty() {
        message.push_str("No semester results were published for this roll number.\n\n");
    }
    for (semester, summary) in report.semesters.iter().zip(&report.summary.semesters) {
        push_semester(&mut message, semester, summary);
    }

    push_trend(&mut message, &report.summary.semesters);

    message.push_str(&format!(
        "🏁 CGPA: {} | Credits: {} | {}\n",
        format_gpa(report.summary.cgpa),
        format_number(report.summary.total_credits),
        backlog_marker(report.summary.total_backlogs)
    ));
    message
}

pub fn render_json(report: &Report) -> Result<String> {
    to_string_pretty(report).context("Failed to serialize the report")
}
