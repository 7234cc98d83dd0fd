//! Student domain models and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A student profile as stored in the `student` table.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub student_id: i32,
    pub last_name: String,
    pub other_names: String,
    pub address: Option<String>,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub parent_name: Option<String>,
    pub gender: Option<String>,
    pub contact_number: Option<String>,
    pub parent_nic: Option<String>,
    pub user_name: String,
    pub index_number: String,
    pub class_id: Option<i32>,
}

/// A student joined with their class and login permission.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StudentListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub student: Student,
    pub grade: Option<String>,
    pub class_name: Option<String>,
    pub permission: bool,
}

/// Roster entry for a class.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassStudent {
    pub student_id: i32,
    pub index_number: String,
    pub last_name: String,
    pub other_names: String,
    pub grade: String,
    pub class_name: String,
}

/// DTO for enrolling a new student.
///
/// Creates the profile, the login row, and the subject enrolment. Subjects in
/// the mandatory category are always added to `selected_subjects`.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 200))]
    pub other_names: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub parent_name: Option<String>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(max = 20))]
    pub contact_number: Option<String>,
    #[validate(length(max = 20))]
    pub parent_nic: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub user_name: String,
    #[validate(length(min = 1, max = 20))]
    pub index_number: String,
    pub class_id: Option<i32>,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default = "default_permission")]
    pub permission: bool,
    #[serde(default)]
    pub selected_subjects: Vec<i32>,
}

/// DTO for updating a student.
///
/// Only provided fields are changed. A new `user_name` is also written to the
/// login row; a new `password` is re-hashed and ends the current session.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub other_names: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 200))]
    pub parent_name: Option<String>,
    #[validate(length(max = 20))]
    pub gender: Option<String>,
    #[validate(length(max = 20))]
    pub contact_number: Option<String>,
    #[validate(length(max = 20))]
    pub parent_nic: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub user_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub index_number: Option<String>,
    pub class_id: Option<i32>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

/// Sets the login permission flag of a student or teacher.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdatePermissionDto {
    pub permission: bool,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct StudentCreatedResponse {
    pub message: String,
    pub student_id: i32,
}

fn default_permission() -> bool {
    true
}
