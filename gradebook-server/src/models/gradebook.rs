//! Composite student view
//!
//! A `GradebookStudent` joins one student with its three grade
//! collections. It is assembled on every read and owns no persisted
//! state: averages are always computed from the rows passed in.

use super::{Grade, Student, Subject};

/// Arithmetic mean of `values`, or `None` for an empty slice.
///
/// Finite inputs always give a finite mean, even when their sum would
/// overflow `f64`.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        return Some(sum / n);
    }
    Some(values.iter().map(|v| v / n).sum())
}

/// The grade collections of one student, in storage order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentGrades {
    pub math: Vec<Grade>,
    pub science: Vec<Grade>,
    pub history: Vec<Grade>,
}

impl StudentGrades {
    pub fn for_subject(&self, subject: Subject) -> &[Grade] {
        match subject {
            Subject::Math => &self.math,
            Subject::Science => &self.science,
            Subject::History => &self.history,
        }
    }

    pub fn for_subject_mut(&mut self, subject: Subject) -> &mut Vec<Grade> {
        match subject {
            Subject::Math => &mut self.math,
            Subject::Science => &mut self.science,
            Subject::History => &mut self.history,
        }
    }

    pub fn average(&self, subject: Subject) -> Option<f64> {
        let values: Vec<f64> = self.for_subject(subject).iter().map(|g| g.grade).collect();
        average(&values)
    }
}

/// A student's profile plus grades and per-subject averages
#[derive(Debug, Clone, PartialEq)]
pub struct GradebookStudent {
    pub student: Student,
    pub grades: StudentGrades,
    pub math_average: Option<f64>,
    pub science_average: Option<f64>,
    pub history_average: Option<f64>,
}

impl GradebookStudent {
    pub fn assemble(student: Student, grades: StudentGrades) -> Self {
        Self {
            math_average: grades.average(Subject::Math),
            science_average: grades.average(Subject::Science),
            history_average: grades.average(Subject::History),
            student,
            grades,
        }
    }

    pub fn full_name(&self) -> String {
        self.student.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            id: 1,
            firstname: "Mouloud".into(),
            lastname: "Dernoun".into(),
            email_address: "mouloud.dernoun@gmail.com".into(),
        }
    }

    fn grade(id: i32, subject: Subject, value: f64) -> Grade {
        Grade {
            id,
            student_id: 1,
            subject,
            grade: value,
        }
    }

    #[test]
    fn average_of_empty_is_none() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn average_is_arithmetic_mean() {
        assert_eq!(average(&[85.0]), Some(85.0));
        assert_eq!(average(&[80.0, 90.0, 70.0]), Some(80.0));
        assert_eq!(average(&[1.0, 2.0]), Some(1.5));
    }

    #[test]
    fn average_of_huge_grades_stays_finite() {
        assert_eq!(average(&[f64::MAX, f64::MAX]), Some(f64::MAX));
        assert_eq!(average(&[f64::MAX, -f64::MAX]), Some(0.0));
        assert_eq!(average(&[-f64::MAX, -f64::MAX]), Some(-f64::MAX));
    }

    #[test]
    fn assemble_computes_each_subject_independently() {
        let grades = StudentGrades {
            math: vec![grade(1, Subject::Math, 85.0), grade(2, Subject::Math, 95.0)],
            science: vec![grade(3, Subject::Science, 90.0)],
            history: vec![],
        };

        let view = GradebookStudent::assemble(student(), grades);

        assert_eq!(view.full_name(), "Mouloud Dernoun");
        assert_eq!(view.math_average, Some(90.0));
        assert_eq!(view.science_average, Some(90.0));
        assert_eq!(view.history_average, None);
        assert_eq!(view.grades.math.len(), 2);
    }

    #[test]
    fn student_without_grades_has_no_averages() {
        let view = GradebookStudent::assemble(student(), StudentGrades::default());
        for subject in Subject::all() {
            assert!(view.grades.for_subject(*subject).is_empty());
        }
        assert_eq!(view.math_average, None);
        assert_eq!(view.science_average, None);
        assert_eq!(view.history_average, None);
    }
}
