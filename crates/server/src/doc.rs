use crate::{
    dtos::{
        allotment::{AllotRequest, AllotmentResponse},
        batch::{BatchResponse, CreateBatchRequest, UpdateBatchRequest},
        comment::{CommentResponse, CommentTextRequest, CreateCommentRequest},
        content::{ContentResponse, UploadContentRequest},
        notification::{NotificationResponse, SendNotificationRequest},
        payment::{PaymentResponse, PaymentStatusRequest, RecordPaymentRequest},
        schedule::{CreateScheduleRequest, ScheduleResponse},
        student::{EnrollRequest, EnrollmentResponse, StudentResponse, UpdateEnrollmentRequest},
        teacher::{TeacherRequest, TeacherResponse},
        timetable::{CreateSlotRequest, SlotResponse, UpdateSlotRequest},
        user::{RegisterRequest, RoleUpdateRequest, UserResponse},
    },
    error::ErrorBody,
    routes::{
        allotment, auth, batch, comment, content, health, notification, payment, root, student,
        teacher, timetable,
    },
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        root::root,
        health::health,
        auth::register,
        auth::me,
        auth::get_user,
        auth::set_role,
        batch::create_batch,
        batch::list_batches,
        batch::get_batch,
        batch::update_batch,
        batch::delete_batch,
        batch::list_schedules,
        batch::create_schedule,
        batch::delete_schedule,
        allotment::allot_teacher,
        allotment::list_allotments,
        allotment::delete_allotment,
        content::upload_content,
        content::list_contents,
        content::get_content,
        content::delete_content,
        content::list_comments,
        content::add_comment,
        content::delete_comment,
        comment::create_comment,
        comment::comments_for_content,
        comment::delete_comment,
        notification::send_notification,
        notification::my_notifications,
        notification::mark_read,
        notification::delete_notification,
        student::enroll_student,
        student::get_student,
        student::list_students,
        student::get_enrollment,
        student::update_enrollment,
        student::delete_enrollment,
        teacher::create_teacher,
        teacher::get_teacher_by_user,
        teacher::list_teachers,
        teacher::update_teacher,
        teacher::delete_teacher,
        timetable::create_slot,
        timetable::list_slots,
        timetable::get_slot,
        timetable::update_slot,
        timetable::delete_slot,
        payment::record_payment,
        payment::my_payments,
        payment::update_payment_status
    ),
    components(schemas(
        ErrorBody,
        UserResponse,
        RegisterRequest,
        RoleUpdateRequest,
        BatchResponse,
        CreateBatchRequest,
        UpdateBatchRequest,
        ScheduleResponse,
        CreateScheduleRequest,
        AllotmentResponse,
        AllotRequest,
        ContentResponse,
        UploadContentRequest,
        CommentResponse,
        CommentTextRequest,
        CreateCommentRequest,
        NotificationResponse,
        SendNotificationRequest,
        EnrollmentResponse,
        StudentResponse,
        EnrollRequest,
        UpdateEnrollmentRequest,
        TeacherResponse,
        TeacherRequest,
        SlotResponse,
        CreateSlotRequest,
        UpdateSlotRequest,
        PaymentResponse,
        RecordPaymentRequest,
        PaymentStatusRequest
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness endpoints"),
        (name = "Authentication", description = "Local account registration"),
        (name = "Users", description = "User lookup and role management"),
        (name = "Batches", description = "Class cohorts and their schedules"),
        (name = "Allotment", description = "Teacher to batch assignments"),
        (name = "Contents", description = "Uploaded learning material"),
        (name = "Comments", description = "Comments on content"),
        (name = "Notifications", description = "In-app notifications"),
        (name = "Students", description = "Enrollments"),
        (name = "Teachers", description = "Teacher profiles"),
        (name = "Timetable", description = "Weekly timetable slots"),
        (name = "Payments", description = "Fee payments"),
    ),
    info(
        title = "Cohort API",
        version = "1.0.0",
        description = "Educational platform backend",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
