//! Term marks and the student marks report.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::students::Student;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Marks {
    pub marks_id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub teacher_id: i32,
    pub marks: i32,
    pub term_year: String,
}

/// Records a mark. The recording teacher is taken from the caller's token.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateMarksDto {
    #[validate(range(min = 1))]
    pub student_id: i32,
    #[validate(range(min = 1))]
    pub subject_id: i32,
    #[validate(range(min = 0, message = "Marks must be a positive number"))]
    pub marks: i32,
    #[serde(alias = "Term_year")]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Term and year must be a string (max 50 chars)"
    ))]
    #[schema(example = "2024 Term 1")]
    pub term_year: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct MarksCreatedResponse {
    pub message: String,
    pub marks_id: i32,
    pub student_id: i32,
    pub subject_id: i32,
    pub term_year: String,
}

/// One mark inside a [`StudentReport`].
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MarkEntry {
    pub marks_id: i32,
    pub subject_id: i32,
    pub teacher_id: i32,
    pub term_year: String,
    pub marks: i32,
}

/// A student's profile, class, and every recorded mark.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentReport {
    #[serde(flatten)]
    pub student: Student,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub marks: Vec<MarkEntry>,
}
