//! Daily attendance.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub attendance_id: i32,
    pub student_id: i32,
    pub class_id: i32,
    pub date: NaiveDate,
    pub status: String,
    pub marked_by: i32,
}

/// Attendance for one student of a class on the requested date.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ClassAttendance {
    pub attendance_id: i32,
    pub student_id: i32,
    pub index_number: String,
    pub last_name: String,
    pub other_names: String,
    pub date: NaiveDate,
    pub status: String,
}

#[derive(Deserialize, Debug, ToSchema, Validate)]
pub struct CreateAttendanceDto {
    #[validate(range(min = 1))]
    pub student_id: i32,
    #[validate(range(min = 1))]
    pub class_id: i32,
    #[schema(value_type = String, format = Date, example = "2024-03-18")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceDateQuery {
    /// Day to list, `YYYY-MM-DD`
    #[param(value_type = String, format = Date)]
    pub date: NaiveDate,
}
