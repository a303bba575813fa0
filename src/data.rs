use crate::data::student::StudentId;
use serde::Deserialize;

pub mod student;

#[derive(Deserialize, Debug)]
pub struct IdForm {
    pub id: StudentId,
}
