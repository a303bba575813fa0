use crate::data::student::{Student, parse_leading_int};
use serde::Deserialize;

/// The three filter inputs above the list, as typed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub course_filter: String,
    #[serde(default)]
    pub age_filter: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeLimit {
    AtMost(i64),
    /// Something was typed, but it isn't a number - nothing can be under it.
    Unparseable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    term: String,
    course: Option<String>,
    max_age: Option<AgeLimit>,
}

impl From<&FilterQuery> for FilterCriteria {
    fn from(query: &FilterQuery) -> Self {
        let course = Some(query.course_filter.to_lowercase()).filter(|c| !c.is_empty());
        let max_age = (!query.age_filter.is_empty()).then(|| {
            parse_leading_int(&query.age_filter).map_or(AgeLimit::Unparseable, AgeLimit::AtMost)
        });

        Self {
            term: query.search.to_lowercase(),
            course,
            max_age,
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, student: &Student) -> bool {
        let course = student.course.to_lowercase();

        let term_ok = student.name.to_lowercase().contains(&self.term) || course.contains(&self.term);
        let course_ok = self
            .course
            .as_ref()
            .is_none_or(|wanted| course.contains(wanted.as_str()));
        let age_ok = match self.max_age {
            None => true,
            Some(AgeLimit::AtMost(limit)) => student.age <= limit,
            Some(AgeLimit::Unparseable) => false,
        };

        term_ok && course_ok && age_ok
    }

    /// Keeps matching records, in the order they came in.
    pub fn apply(&self, students: Vec<Student>) -> Vec<Student> {
        students.into_iter().filter(|s| self.matches(s)).collect()
    }
}
