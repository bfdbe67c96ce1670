use crate::models::{CanonicalRecord, OverallSummary, Semester, SemesterSummary};

pub const FAIL_GRADE: &str = "F";
pub const MAX_GRADE_POINT: f64 = 10.0;

/// Letter grade to grade point.
pub const GRADE_POINTS: [(&str, f64); 8] = [
    ("O", 10.0),
    ("A+", 9.0),
    ("A", 8.0),
    ("B+", 7.0),
    ("B", 6.0),
    ("C", 5.0),
    ("D", 4.0),
    ("F", 0.0),
];

/// Resolves a grade to its point value.
///
/// Letter grades come from [`GRADE_POINTS`]. Anything else is read as a literal
/// grade point, clamped to `0..=10`, and unparseable grades are worth 0.
pub fn grade_point(grade: &str) -> f64 {
    let grade = grade.trim();
    GRADE_POINTS
        .iter()
        .find(|(letter, _)| *letter == grade)
        .map(|(_, points)| *points)
        .or_else(|| {
            grade
                .parse::<f64>()
                .ok()
                .filter(|points| points.is_finite())
                .map(|points| points.clamp(0.0, MAX_GRADE_POINT))
        })
        .unwrap_or(0.0)
}

// points / credits to two decimals, half away from zero. Scaling before the
// division keeps exact ties such as 166.5 / 20 = 8.325 exact.
fn round_ratio(points: f64, credits: f64) -> f64 {
    ((points * 100.0) / credits).round() / 100.0
}

pub fn score_semester(semester: &Semester) -> SemesterSummary {
    let mut total_credits = 0.0;
    let mut total_weighted_points = 0.0;
    let mut backlog_count = 0;

    for subject in &semester.subjects {
        let failed = subject.grade.trim() == FAIL_GRADE;

        // Zero-credit courses never affect the GPA, but a failed one is still a backlog.
        if subject.credits <= 0.0 {
            if failed {
                backlog_count += 1;
            }
            continue;
        }

        let points = grade_point(&subject.grade);
        total_credits += subject.credits;
        total_weighted_points += points * subject.credits;
        if failed || points == 0.0 {
            backlog_count += 1;
        }
    }

    let sgpa = (total_credits > 0.0).then(|| round_ratio(total_weighted_points, total_credits));

    SemesterSummary {
        semester: semester.name.clone(),
        total_credits,
        total_weighted_points,
        sgpa,
        backlog_count,
    }
}

/// Scores every semester and derives the overall CGPA.
///
/// The CGPA is credit-weighted over semesters that have an SGPA and is computed
/// from the unrounded semester sums, so rounding happens once at the end.
pub fn score(record: &CanonicalRecord) -> OverallSummary {
    let semesters: Vec<SemesterSummary> = record.semesters.iter().map(score_semester).collect();

    let (graded_credits, graded_points) = semesters
        .iter()
        .filter(|summary| summary.sgpa.is_some())
        .fold((0.0, 0.0), |(credits, points), summary| {
            (credits + summary.total_credits, points + summary.total_weighted_points)
        });
    let cgpa = (graded_credits > 0.0).then(|| round_ratio(graded_points, graded_credits));

    OverallSummary {
        total_credits: semesters.iter().map(|s| s.total_credits).sum(),
        total_backlogs: semesters.iter().map(|s| s.backlog_count).sum(),
        cgpa,
        semesters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StudentDetails, Subject};
    use proptest::prelude::*;

    fn subject(grade: &str, credits: f64) -> Subject {
        Subject {
            code: "X".to_string(),
            name: "X".to_string(),
            internal_marks: "0".to_string(),
            external_marks: "0".to_string(),
            total_marks: "0".to_string(),
            grade: grade.to_string(),
            credits,
        }
    }

    fn semester(name: &str, subjects: Vec<Subject>) -> Semester {
        Semester { name: name.to_string(), subjects }
    }

    fn record(semesters: Vec<Semester>) -> CanonicalRecord {
        CanonicalRecord { details: StudentDetails::default(), semesters }
    }

    #[test]
    fn grade_point_table_and_numeric_fallback() {
        assert_eq!(grade_point("O"), 10.0);
        assert_eq!(grade_point("A+"), 9.0);
        assert_eq!(grade_point(" B+ "), 7.0);
        assert_eq!(grade_point("F"), 0.0);
        assert_eq!(grade_point("7.5"), 7.5);
        assert_eq!(grade_point("42"), 10.0);
        assert_eq!(grade_point("Ab"), 0.0);
        assert_eq!(grade_point("—"), 0.0);
        assert_eq!(grade_point("NaN"), 0.0);
    }

    #[test]
    fn mixed_semester_scores_and_counts_backlog() {
        let summary = score_semester(&semester(
            "1-1",
            vec![subject("O", 4.0), subject("A", 3.0), subject("F", 3.0)],
        ));

        assert_eq!(summary.total_credits, 10.0);
        assert_eq!(summary.total_weighted_points, 64.0);
        assert_eq!(summary.sgpa, Some(6.4));
        assert_eq!(summary.backlog_count, 1);
    }

    #[test]
    fn failed_subject_counts_its_credits() {
        let summary = score_semester(&semester("1-1", vec![subject("F", 4.0)]));

        assert_eq!(summary.total_credits, 4.0);
        assert_eq!(summary.total_weighted_points, 0.0);
        assert_eq!(summary.sgpa, Some(0.0));
        assert_eq!(summary.backlog_count, 1);
    }

    #[test]
    fn zero_credit_failure_is_a_backlog_without_sgpa() {
        let summary = score_semester(&semester("1-1", vec![subject("F", 0.0)]));

        assert_eq!(summary.total_credits, 0.0);
        assert_eq!(summary.sgpa, None);
        assert_eq!(summary.backlog_count, 1);
    }

    #[test]
    fn zero_credit_pass_is_ignored() {
        let summary = score_semester(&semester("1-1", vec![subject("O", 0.0), subject("A", 2.0)]));

        assert_eq!(summary.total_credits, 2.0);
        assert_eq!(summary.sgpa, Some(8.0));
        assert_eq!(summary.backlog_count, 0);
    }

    #[test]
    fn zero_grade_point_with_credits_is_a_backlog() {
        let summary = score_semester(&semester("1-1", vec![subject("0", 3.0), subject("Ab", 2.0), subject("B", 3.0)]));

        assert_eq!(summary.backlog_count, 2);
        assert_eq!(summary.total_credits, 8.0);
        assert_eq!(summary.sgpa, Some(2.25));
    }

    #[test]
    fn sgpa_rounds_half_away_from_zero() {
        // 8 * 1 + 7 * 2 + 6 * 5 = 52 over 8 credits = 6.5; 9 * 1 + 8 * 2 = 25 over 3 = 8.333..
        assert_eq!(score_semester(&semester("a", vec![subject("A", 1.0), subject("B+", 2.0), subject("B", 5.0)])).sgpa, Some(6.5));
        assert_eq!(score_semester(&semester("b", vec![subject("A+", 1.0), subject("A", 2.0)])).sgpa, Some(8.33));
        // 10 * 1 + 8 * 2 = 26 over 3 = 8.666..
        assert_eq!(score_semester(&semester("c", vec![subject("O", 1.0), subject("A", 2.0)])).sgpa, Some(8.67));
    }

    #[test]
    fn exact_ties_round_up_on_half_credit_labs() {
        let summary = score_semester(&semester(
            "2-1",
            vec![
                subject("O", 3.0),
                subject("A+", 3.0),
                subject("A+", 3.0),
                subject("A", 3.0),
                subject("A", 3.0),
                subject("D", 1.0),
                subject("C", 1.0),
                subject("B+", 1.5),
                subject("O", 1.5),
            ],
        ));

        assert_eq!(summary.total_credits, 20.0);
        assert_eq!(summary.total_weighted_points, 166.5);
        assert_eq!(summary.sgpa, Some(8.33));
    }

    #[test]
    fn every_tie_over_twenty_credits_rounds_up() {
        // Weighted points in half steps; each x.xx5 ratio must round away from zero.
        for half_steps in 0..=400u32 {
            let points = f64::from(half_steps) / 2.0;
            let expected_cents = (f64::from(half_steps) * 5.0 / 2.0).ceil();
            if f64::from(half_steps * 5) % 2.0 == 1.0 {
                assert_eq!(round_ratio(points, 20.0), expected_cents / 100.0, "{} / 20", points);
            }
        }
    }

    #[test]
    fn cgpa_ties_round_up() {
        // 164.5 over 20 credits = 8.225, and the audit semester carries no credits.
        let summary = score(&record(vec![
            semester("2-1", vec![subject("O", 3.0), subject("B+", 1.5), subject("A", 15.5)]),
            semester("audit", vec![subject("F", 0.0)]),
        ]));

        assert_eq!(summary.semesters[0].total_weighted_points, 164.5);
        assert_eq!(summary.cgpa, Some(8.23));
    }

    #[test]
    fn cgpa_is_credit_weighted_across_semesters() {
        let summary = score(&record(vec![
            semester("1-1", vec![subject("O", 4.0), subject("A", 3.0), subject("F", 3.0)]),
            semester("1-2", vec![subject("A+", 5.0)]),
            semester("audit", vec![subject("F", 0.0)]),
        ]));

        // (64 + 45) / 15 = 7.2666..
        assert_eq!(summary.cgpa, Some(7.27));
        assert_eq!(summary.total_credits, 15.0);
        assert_eq!(summary.total_backlogs, 2);
        assert_eq!(summary.semesters.len(), 3);
        assert_eq!(summary.semesters[2].sgpa, None);
    }

    #[test]
    fn empty_record_has_no_cgpa() {
        let summary = score(&record(Vec::new()));
        assert!(summary.semesters.is_empty());
        assert_eq!(summary.cgpa, None);
        assert_eq!(summary.total_backlogs, 0);
    }

    #[test]
    fn cgpa_absent_when_nothing_carries_credits() {
        let summary = score(&record(vec![semester("1-1", vec![subject("O", 0.0)])]));
        assert_eq!(summary.cgpa, None);
    }

    #[test]
    fn cgpa_stays_within_grade_scale() {
        let summary = score(&record(vec![
            semester("1-1", vec![subject("99", 3.0), subject("O", 2.0)]),
            semester("1-2", vec![subject("F", 4.0)]),
        ]));

        let cgpa = summary.cgpa.unwrap();
        assert!((0.0..=MAX_GRADE_POINT).contains(&cgpa));
    }

    fn any_grade() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(GRADE_POINTS.iter().map(|(letter, _)| letter.to_string()).collect::<Vec<_>>()),
            (0u32..=120).prop_map(|tenths| format!("{}", f64::from(tenths) / 10.0)),
            "[A-Za-z]{0,3}",
        ]
    }

    // Credits in half steps from 0 to 5.
    fn any_semester() -> impl Strategy<Value = Semester> {
        prop::collection::vec((any_grade(), 0u32..=10), 0..8).prop_map(|rows| Semester {
            name: "S".to_string(),
            subjects: rows
                .into_iter()
                .map(|(grade, half_credits)| subject(&grade, f64::from(half_credits) / 2.0))
                .collect(),
        })
    }

    proptest! {
        #[test]
        fn gpas_stay_on_the_grade_scale(semesters in prop::collection::vec(any_semester(), 0..6)) {
            let input = record(semesters);
            let summary = score(&input);

            let has_credits = summary.semesters.iter().any(|s| s.total_credits > 0.0);
            prop_assert_eq!(summary.cgpa.is_some(), has_credits);
            if let Some(cgpa) = summary.cgpa {
                prop_assert!((0.0..=MAX_GRADE_POINT).contains(&cgpa));
            }
            for semester in &summary.semesters {
                prop_assert_eq!(semester.sgpa.is_none(), semester.total_credits == 0.0);
                if let Some(sgpa) = semester.sgpa {
                    prop_assert!((0.0..=MAX_GRADE_POINT).contains(&sgpa));
                }
            }
            prop_assert_eq!(&score(&input), &summary);
        }
    }
}
