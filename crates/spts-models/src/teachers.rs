//! Staff domain models and DTOs.
//!
//! Teachers, principals, and admins share the `teacher` table and differ only
//! by `role`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use spts_auth::Role;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Teacher {
    pub teacher_id: i32,
    pub last_name: String,
    pub other_names: String,
    pub address: Option<String>,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub personal_title: Option<String>,
    pub role: String,
    pub contact_number: Option<String>,
    pub user_name: String,
    pub nic_number: Option<String>,
    pub emp_id: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct TeacherListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub teacher: Teacher,
    pub permission: bool,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 200))]
    pub other_names: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub personal_title: Option<String>,
    #[validate(custom(function = "validate_staff_role"))]
    pub role: Role,
    #[validate(length(max = 20))]
    pub contact_number: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub user_name: String,
    #[validate(length(max = 20))]
    pub nic_number: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub emp_id: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[serde(default = "default_permission")]
    pub permission: bool,
}

/// DTO for updating a staff member. Only provided fields are changed.
#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct UpdateTeacherDto {
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub other_names: Option<String>,
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub personal_title: Option<String>,
    #[validate(custom(function = "validate_staff_role"))]
    pub role: Option<Role>,
    #[validate(length(max = 20))]
    pub contact_number: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub user_name: Option<String>,
    #[validate(length(max = 20))]
    pub nic_number: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TeacherCreatedResponse {
    pub message: String,
    pub teacher_id: i32,
}

fn validate_staff_role(role: &Role) -> Result<(), ValidationError> {
    if role.is_staff() {
        Ok(())
    } else {
        let mut error = ValidationError::new("staff_role");
        error.message = Some("role must be teacher, principal or admin".into());
        Err(error)
    }
}

fn default_permission() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto(role: &str) -> CreateTeacherDto {
        serde_json::from_value(serde_json::json!({
            "last_name": "Silva",
            "other_names": "Kamala",
            "email": "kamala@example.com",
            "role": role,
            "user_name": "kamala",
            "emp_id": "EMP-7",
            "password": "password123"
        }))
        .unwrap()
    }

    #[test]
    fn test_create_teacher_valid() {
        let dto = create_dto("principal");
        assert_eq!(dto.role, Role::Principal);
        assert!(dto.permission);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_teacher_rejects_student_role() {
        let dto = create_dto("student");
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_unknown_role_fails_to_deserialize() {
        let result: Result<CreateTeacherDto, _> = serde_json::from_value(serde_json::json!({
            "last_name": "Silva",
            "other_names": "Kamala",
            "email": "kamala@example.com",
            "role": "janitor",
            "user_name": "kamala",
            "emp_id": "EMP-7",
            "password": "password123"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_teacher_role_checked() {
        let dto: UpdateTeacherDto =
            serde_json::from_value(serde_json::json!({ "role": "student" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdateTeacherDto =
            serde_json::from_value(serde_json::json!({ "role": "admin" })).unwrap();
        assert!(dto.validate().is_ok());
    }
}
