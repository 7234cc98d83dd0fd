//! # SPTS Models
//!
//! Row types and request/response DTOs for the SPTS API.
//!
//! # Modules
//!
//! - [`auth`]: login and token verification payloads
//! - [`students`]: student profiles, enrolment, and login permission
//! - [`teachers`]: staff profiles and login permission
//! - [`subjects`]: subject catalogue grouped by category
//! - [`marks`]: term marks and the per-student marks report
//! - [`attendance`]: daily attendance records
//!
//! Row types derive `sqlx::FromRow` and map one-to-one onto the columns the
//! services select. DTOs derive `validator::Validate` and are extracted with
//! `ValidatedJson` in the server crate.

pub mod attendance;
pub mod auth;
pub mod marks;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, VerifyTokenResponse};

pub use students::{
    ClassStudent, CreateStudentDto, Student, StudentCreatedResponse, StudentListItem,
    UpdatePermissionDto, UpdateStudentDto,
};

pub use teachers::{
    CreateTeacherDto, Teacher, TeacherCreatedResponse, TeacherListItem, UpdateTeacherDto,
};

pub use subjects::{MANDATORY_CATEGORY, Subject, SubjectsByCategory, group_by_category};

pub use marks::{CreateMarksDto, MarkEntry, Marks, MarksCreatedResponse, StudentReport};

pub use attendance::{
    AttendanceDateQuery, AttendanceRecord, AttendanceStatus, ClassAttendance, CreateAttendanceDto,
};
