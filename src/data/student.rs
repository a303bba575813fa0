use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, num::ParseIntError, str::FromStr};

pub const MIN_AGE: i64 = 10;
pub const MAX_AGE: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for StudentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A record as the students API hands it back. Nothing here is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default, deserialize_with = "text_or_null")]
    pub email: String,
    pub course: String,
    #[serde(deserialize_with = "whole_age")]
    pub age: i64,
}

/// A `null` shows up as the word, the same way the browser would print it.
fn text_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(|| "null".to_string()))
}

/// Ages arrive as JSON numbers (possibly fractional) or as query-string text.
/// Fractions are truncated towards zero.
fn whole_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    struct AgeVisitor;

    impl de::Visitor<'_> for AgeVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        #[allow(clippy::cast_possible_truncation)]
        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_finite() {
                Ok(v.trunc() as i64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            let v = v.trim();
            match v.parse::<i64>() {
                Ok(whole) => Ok(whole),
                Err(_) => v
                    .parse::<f64>()
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
                    .and_then(|f| self.visit_f64(f)),
            }
        }
    }

    deserializer.deserialize_any(AgeVisitor)
}

/// Body for creating or updating a record - the id only ever goes in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub email: String,
    pub course: String,
    pub age: i64,
}

/// The five inputs of the student form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub age: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    AgeOutOfRange,
    InvalidId,
}

impl ValidationError {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingFields => "All fields are required",
            Self::AgeOutOfRange => "Age must be between 10 and 100",
            Self::InvalidId => "Unknown student id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: Option<StudentId>,
    pub payload: StudentPayload,
}

impl StudentForm {
    pub fn is_editing(&self) -> bool {
        !self.id.trim().is_empty()
    }

    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let course = self.course.trim();

        let Some(age) = parse_leading_int(&self.age) else {
            return Err(ValidationError::MissingFields);
        };
        if name.is_empty() || email.is_empty() || course.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(ValidationError::AgeOutOfRange);
        }

        let id = if self.is_editing() {
            Some(
                self.id
                    .parse()
                    .map_err(|_| ValidationError::InvalidId)?,
            )
        } else {
            None
        };

        Ok(Submission {
            id,
            payload: StudentPayload {
                name: name.to_string(),
                email: email.to_string(),
                course: course.to_string(),
                age,
            },
        })
    }
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
            age: student.age.to_string(),
        }
    }
}

/// Reads an integer the forgiving way browsers do: leading whitespace and an optional sign,
/// then as many digits as there are. Anything after the digits is ignored.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    //only fails on overflow, which should still land outside any sensible range
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: &str, name: &str, email: &str, course: &str, age: &str) -> StudentForm {
        StudentForm {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            course: course.into(),
            age: age.into(),
        }
    }

    #[test]
    fn leading_int_parse() {
        assert_eq!(parse_leading_int("15"), Some(15));
        assert_eq!(parse_leading_int("  15"), Some(15));
        assert_eq!(parse_leading_int("15.7"), Some(15));
        assert_eq!(parse_leading_int("15abc"), Some(15));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+42"), Some(42));
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(
            parse_leading_int("99999999999999999999999"),
            Some(i64::MAX)
        );
    }

    #[test]
    fn blank_fields_are_rejected() {
        for bad in [
            form("", "  ", "b@x.com", "CS", "15"),
            form("", "Bo", "", "CS", "15"),
            form("", "Bo", "b@x.com", "\t", "15"),
            form("", "Bo", "b@x.com", "CS", "fifteen"),
            form("", "Bo", "b@x.com", "CS", ""),
        ] {
            assert_eq!(bad.validate(), Err(ValidationError::MissingFields), "{bad:?}");
        }
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert_eq!(
            form("", "Bo", "b@x.com", "CS", "9").validate(),
            Err(ValidationError::AgeOutOfRange)
        );
        assert_eq!(
            form("", "Bo", "b@x.com", "CS", "101").validate(),
            Err(ValidationError::AgeOutOfRange)
        );
        assert!(form("", "Bo", "b@x.com", "CS", "10").validate().is_ok());
        assert!(form("", "Bo", "b@x.com", "CS", "100").validate().is_ok());
    }

    #[test]
    fn fields_are_trimmed_and_id_picks_the_mode() {
        let created = form("", " Bo ", "b@x.com ", " CS", "15").validate().unwrap();
        assert_eq!(created.id, None);
        assert_eq!(
            created.payload,
            StudentPayload {
                name: "Bo".into(),
                email: "b@x.com".into(),
                course: "CS".into(),
                age: 15,
            }
        );

        let updated = form("4", "Bo", "b@x.com", "CS", "15").validate().unwrap();
        assert_eq!(updated.id, Some(StudentId(4)));

        assert_eq!(
            form("four", "Bo", "b@x.com", "CS", "15").validate(),
            Err(ValidationError::InvalidId)
        );
    }

    #[test]
    fn payload_never_carries_an_id() {
        let submission = form("9", "Bo", "b@x.com", "CS", "15").validate().unwrap();
        let json = serde_json::to_value(&submission.payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Bo", "email": "b@x.com", "course": "CS", "age": 15})
        );
    }

    #[test]
    fn loose_server_records_still_decode() {
        let students: Vec<Student> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "Ann", "email": "ann@x.com", "course": "Math", "age": 20},
                {"id": 2, "name": "Bo", "email": null, "course": "CS", "age": 20.0},
                {"id": 3, "name": "Cy", "course": "Art", "age": 17.9}
            ]"#,
        )
        .unwrap();

        assert_eq!(students.len(), 3);
        assert_eq!(students[1].email, "null");
        assert_eq!(students[1].age, 20);
        assert_eq!(students[2].email, "");
        assert_eq!(students[2].age, 17);
    }

    #[test]
    fn priming_from_a_record() {
        let student = Student {
            id: StudentId(1),
            name: "Ann".into(),
            email: "ann@x.com".into(),
            course: "Math".into(),
            age: 20,
        };
        let primed = StudentForm::from(&student);
        assert_eq!(primed, form("1", "Ann", "ann@x.com", "Math", "20"));
        assert!(primed.is_editing());
    }
}
