//! Grade records and grade values

use super::{Subject, ValidationError};

/// Grade record from storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grade {
    pub id: i32,
    pub student_id: i32,
    pub subject: Subject,
    pub grade: f64,
}

/// A grade value accepted for storage.
///
/// Grades are nominally on a 0-100 scale but the range is not enforced;
/// only NaN and infinities are rejected since they cannot be averaged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeValue(f64);

impl GradeValue {
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidNumber { field: "grade" });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_out_of_scale_values() {
        assert_eq!(GradeValue::new(85.0).unwrap().get(), 85.0);
        assert_eq!(GradeValue::new(-3.5).unwrap().get(), -3.5);
        assert_eq!(GradeValue::new(250.0).unwrap().get(), 250.0);
    }

    #[test]
    fn rejects_non_finite() {
        assert!(GradeValue::new(f64::NAN).is_err());
        assert!(GradeValue::new(f64::INFINITY).is_err());
        assert!(GradeValue::new(f64::NEG_INFINITY).is_err());
    }
}
