//! Student records and create-student input

use sqlx::FromRow;

use super::ValidationError;

/// Column width of the name and email columns
const MAX_FIELD_LEN: usize = 255;

/// Student record from storage
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Student {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email_address: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Validated input for creating a student.
///
/// Fields are trimmed and must be non-empty. The email is stored as given;
/// uniqueness is left to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    firstname: String,
    lastname: String,
    email_address: String,
}

impl NewStudent {
    /// # Example
    /// ```
    /// use gradebook_server::models::NewStudent;
    ///
    /// assert!(NewStudent::new("Oumnia", "tafer", "taferoumnia@gmail.com").is_ok());
    /// assert!(NewStudent::new("", "tafer", "taferoumnia@gmail.com").is_err());
    /// ```
    pub fn new(firstname: &str, lastname: &str, email_address: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            firstname: checked("firstname", firstname)?,
            lastname: checked("lastname", lastname)?,
            email_address: checked("email address", email_address)?,
        })
    }

    pub fn firstname(&self) -> &str {
        &self.firstname
    }

    pub fn lastname(&self) -> &str {
        &self.lastname
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }
}

fn checked(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_FIELD_LEN,
        });
    }
    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_fields() {
        let student = NewStudent::new(" Mouloud ", "Dernoun\n", " mouloud.dernoun@gmail.com").unwrap();
        assert_eq!(student.firstname(), "Mouloud");
        assert_eq!(student.lastname(), "Dernoun");
        assert_eq!(student.email_address(), "mouloud.dernoun@gmail.com");
    }

    #[test]
    fn rejects_blank_fields() {
        let err = NewStudent::new("Mouloud", "   ", "mouloud.dernoun@gmail.com").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "lastname" });

        let err = NewStudent::new("Mouloud", "Dernoun", "").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "email address" });
    }

    #[test]
    fn email_format_is_not_checked() {
        assert!(NewStudent::new("Mouloud", "Dernoun", "not-an-email").is_ok());
    }

    #[test]
    fn max_length() {
        let name_255 = "a".repeat(255);
        assert!(NewStudent::new(&name_255, "Dernoun", "m@d.com").is_ok());

        let name_256 = "a".repeat(256);
        let err = NewStudent::new(&name_256, "Dernoun", "m@d.com").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let student = Student {
            id: 1,
            firstname: "Mouloud".into(),
            lastname: "Dernoun".into(),
            email_address: "mouloud.dernoun@gmail.com".into(),
        };
        assert_eq!(student.full_name(), "Mouloud Dernoun");
    }
}
