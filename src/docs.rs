use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    AttendanceRecord, AttendanceStatus, ClassAttendance, CreateAttendanceDto,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AccountSummary, Claims, LoginRequest, LoginResponse, MessageResponse, VerifyTokenResponse,
};
use crate::modules::marks::model::{
    CreateMarksDto, MarkEntry, MarksCreatedResponse, StudentReport,
};
use crate::modules::students::model::{
    ClassStudent, CreateStudentDto, Student, StudentCreatedResponse, StudentListItem,
    UpdatePermissionDto, UpdateStudentDto,
};
use crate::modules::subjects::model::Subject;
use crate::modules::teachers::model::{
    CreateTeacherDto, Teacher, TeacherCreatedResponse, TeacherListItem, UpdateTeacherDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::verify_token,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::update_student_permission,
        crate::modules::students::controller::get_students_by_class,
        crate::modules::teachers::controller::get_teachers,
        crate::modules::teachers::controller::create_teacher,
        crate::modules::teachers::controller::get_teacher,
        crate::modules::teachers::controller::update_teacher,
        crate::modules::teachers::controller::update_teacher_permission,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::marks::controller::create_marks,
        crate::modules::marks::controller::get_student_report,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::get_class_attendance,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            VerifyTokenResponse,
            AccountSummary,
            Claims,
            MessageResponse,
            ErrorResponse,
            Student,
            StudentListItem,
            ClassStudent,
            CreateStudentDto,
            UpdateStudentDto,
            UpdatePermissionDto,
            StudentCreatedResponse,
            Teacher,
            TeacherListItem,
            CreateTeacherDto,
            UpdateTeacherDto,
            TeacherCreatedResponse,
            Subject,
            CreateMarksDto,
            MarksCreatedResponse,
            MarkEntry,
            StudentReport,
            AttendanceStatus,
            AttendanceRecord,
            ClassAttendance,
            CreateAttendanceDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and session token checks"),
        (name = "Students", description = "Student records and logins"),
        (name = "Teachers", description = "Staff records and logins"),
        (name = "Subjects", description = "Subject catalogue"),
        (name = "Marks", description = "Term marks and student reports"),
        (name = "Attendance", description = "Daily attendance")
    ),
    info(
        title = "SPTS API",
        version = "0.1.0",
        description = "School records backend with single-session JWT authentication."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
