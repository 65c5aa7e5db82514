// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{FromRequest, Path, Request, State as AxumState, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use turnus_api::{
    AddStudentRequest, ApiError, ClassInfo, CombineClassesRequest, CombineClassesResponse,
    CreateClassRequest, CreateTeacherRequest, GenerateCalendarRequest, GenerateCalendarResponse,
    GetRotationResponse, GroupRotationInput, HolidayInfo, HolidayInput, ImportStudentsCsvResponse,
    ListClassesResponse, ListHolidaysResponse, ListStudentsResponse, ListTeachersResponse,
    NotificationDispatcher, NotificationError, ReplaceRotationRequest, ReplaceRotationResponse,
    StudentInfo, TeacherInfo, add_student, combine_classes, create_class, create_holiday,
    create_teacher, generate_calendar, get_class, get_rotation, import_students_csv, list_classes,
    list_holidays, list_students, list_teachers, replace_rotation,
};
use turnus_persistence::{Persistence, TeacherData};

/// Turnus Server - HTTP server for class rotation scheduling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Base URL used in links sent to teachers
    #[arg(long, default_value = "http://localhost:3000")]
    public_base_url: String,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex so each request sees the
/// store exclusively for the duration of its operation.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    notifier: Arc<dyn NotificationDispatcher>,
    public_base_url: String,
}

/// Notifier that records each rotation notice in the log.
struct TracingNotifier;

impl NotificationDispatcher for TracingNotifier {
    fn notify(
        &self,
        recipient: &TeacherData,
        class_name: &str,
        link: &str,
    ) -> Result<(), NotificationError> {
        let Some(email) = recipient.email.as_deref() else {
            return Err(NotificationError::MissingAddress {
                teacher_id: recipient.teacher_id,
            });
        };
        info!(
            teacher_id = recipient.teacher_id,
            email, class_name, link, "Rotation notice sent"
        );
        Ok(())
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
struct GenerateCalendarApiRequest {
    start_date: String,
    end_date: String,
    /// 0 = Sunday through 6 = Saturday.
    weekday: u8,
    #[serde(default)]
    holidays: Option<Vec<HolidayInput>>,
    #[serde(default)]
    weeks_per_turn: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTeacherApiRequest {
    first_name: String,
    last_name: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateClassApiRequest {
    class_name: String,
    #[serde(default)]
    head_teacher_id: Option<i64>,
    #[serde(default)]
    lead_teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddStudentApiRequest {
    first_name: String,
    last_name: String,
    username: String,
    #[serde(default)]
    group_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ImportStudentsCsvApiRequest {
    csv_content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReplaceRotationApiRequest {
    turns: Vec<String>,
    #[serde(default)]
    am_rotation: Vec<GroupRotationInput>,
    #[serde(default)]
    pm_rotation: Vec<GroupRotationInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct CombineClassesApiRequest {
    first_class_id: i64,
    second_class_id: i64,
    new_class_name: String,
}

// ============================================================================
// Errors
// ============================================================================

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Stable machine-readable code.
    reason_code: String,
    message: String,
    /// Structured context, e.g. the offending field or the class counts.
    details: Value,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    reason_code: &'static str,
    message: String,
    details: Value,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            reason_code: self.reason_code.to_string(),
            message: self.message,
            details: self.details,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let reason_code: &'static str = err.reason_code();
        let message: String = err.to_string();
        let (status, details): (StatusCode, Value) = match err {
            ApiError::InvalidInput { field, rule, .. } => (
                StatusCode::BAD_REQUEST,
                json!({ "field": field, "rule": rule }),
            ),
            ApiError::ResourceNotFound {
                resource_type, id, ..
            } => (
                StatusCode::NOT_FOUND,
                json!({ "resource_type": resource_type, "id": id }),
            ),
            ApiError::Conflict { rule, .. } => (StatusCode::CONFLICT, json!({ "rule": rule })),
            ApiError::CapacityExceeded {
                first_class_count,
                second_class_count,
                total,
                limit,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "first_class_count": first_class_count,
                    "second_class_count": second_class_count,
                    "total": total,
                    "limit": limit,
                }),
            ),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, Value::Null)
            }
        };
        Self {
            status,
            reason_code,
            message,
            details,
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        let rule: &str = match rejection {
            JsonRejection::JsonDataError(_) => "invalid_body",
            JsonRejection::JsonSyntaxError(_) => "malformed_json",
            JsonRejection::MissingJsonContentType(_) => "missing_content_type",
            _ => "unreadable_body",
        };
        Self::from(ApiError::InvalidInput {
            field: String::from("body"),
            rule: String::from(rule),
            message: rejection.body_text(),
        })
    }
}

/// JSON body extractor whose rejections use the structured error body.
struct ApiJson<T>(T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

// ============================================================================
// Calendar & Holidays
// ============================================================================

/// Handler for POST `/calendar/weeks`.
async fn handle_generate_calendar(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<GenerateCalendarApiRequest>,
) -> Result<Json<GenerateCalendarResponse>, HttpError> {
    info!(
        start_date = %req.start_date,
        end_date = %req.end_date,
        weekday = req.weekday,
        "Handling generate_calendar request"
    );

    let request: GenerateCalendarRequest = GenerateCalendarRequest {
        start_date: req.start_date,
        end_date: req.end_date,
        weekday: req.weekday,
        holidays: req.holidays,
        weeks_per_turn: req.weeks_per_turn,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GenerateCalendarResponse = generate_calendar(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/holidays`.
async fn handle_create_holiday(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<HolidayInput>,
) -> Result<Json<HolidayInfo>, HttpError> {
    info!(name = %req.name, "Handling create_holiday request");

    let mut persistence = app_state.persistence.lock().await;
    let holiday: HolidayInfo = create_holiday(&mut persistence, &req)?;
    drop(persistence);

    Ok(Json(holiday))
}

/// Handler for GET `/holidays`.
async fn handle_list_holidays(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListHolidaysResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListHolidaysResponse = list_holidays(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Teachers, Classes & Students
// ============================================================================

/// Handler for POST `/teachers`.
async fn handle_create_teacher(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateTeacherApiRequest>,
) -> Result<Json<TeacherInfo>, HttpError> {
    info!(last_name = %req.last_name, "Handling create_teacher request");

    let request: CreateTeacherRequest = CreateTeacherRequest {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
    };

    let mut persistence = app_state.persistence.lock().await;
    let teacher: TeacherInfo = create_teacher(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(teacher))
}

/// Handler for GET `/teachers`.
async fn handle_list_teachers(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListTeachersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListTeachersResponse = list_teachers(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/classes`.
async fn handle_create_class(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<CreateClassApiRequest>,
) -> Result<Json<ClassInfo>, HttpError> {
    info!(class_name = %req.class_name, "Handling create_class request");

    let request: CreateClassRequest = CreateClassRequest {
        class_name: req.class_name,
        head_teacher_id: req.head_teacher_id,
        lead_teacher_id: req.lead_teacher_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let class: ClassInfo = create_class(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(class))
}

/// Handler for GET `/classes`.
async fn handle_list_classes(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListClassesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListClassesResponse = list_classes(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/classes/{class_id}`.
async fn handle_get_class(
    AxumState(app_state): AxumState<AppState>,
    Path(class_id): Path<i64>,
) -> Result<Json<ClassInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let class: ClassInfo = get_class(&mut persistence, class_id)?;
    drop(persistence);

    Ok(Json(class))
}

/// Handler for POST `/classes/{class_id}/students`.
async fn handle_add_student(
    AxumState(app_state): AxumState<AppState>,
    Path(class_id): Path<i64>,
    ApiJson(req): ApiJson<AddStudentApiRequest>,
) -> Result<Json<StudentInfo>, HttpError> {
    info!(class_id, username = %req.username, "Handling add_student request");

    let request: AddStudentRequest = AddStudentRequest {
        first_name: req.first_name,
        last_name: req.last_name,
        username: req.username,
        group_id: req.group_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let student: StudentInfo = add_student(&mut persistence, class_id, &request)?;
    drop(persistence);

    Ok(Json(student))
}

/// Handler for GET `/classes/{class_id}/students`.
async fn handle_list_students(
    AxumState(app_state): AxumState<AppState>,
    Path(class_id): Path<i64>,
) -> Result<Json<ListStudentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListStudentsResponse = list_students(&mut persistence, class_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/classes/{class_id}/students/import`.
///
/// Always answers 200 once the header row is accepted; per-row outcomes
/// are in the body.
async fn handle_import_students_csv(
    AxumState(app_state): AxumState<AppState>,
    Path(class_id): Path<i64>,
    ApiJson(req): ApiJson<ImportStudentsCsvApiRequest>,
) -> Result<Json<ImportStudentsCsvResponse>, HttpError> {
    info!(class_id, "Handling import_students_csv request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ImportStudentsCsvResponse =
        import_students_csv(&mut persistence, class_id, &req.csv_content)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Rotation & Merge
// ============================================================================

/// Handler for PUT `/classes/{class_id}/rotation`.
///
/// The body is the complete desired rotation of the class.
async fn handle_replace_rotation(
    AxumState(app_state): AxumState<AppState>,
    Path(class_id): Path<i64>,
    ApiJson(req): ApiJson<ReplaceRotationApiRequest>,
) -> Result<Json<ReplaceRotationResponse>, HttpError> {
    info!(
        class_id,
        turn_count = req.turns.len(),
        am_groups = req.am_rotation.len(),
        pm_groups = req.pm_rotation.len(),
        "Handling replace_rotation request"
    );

    let request: ReplaceRotationRequest = ReplaceRotationRequest {
        turns: req.turns,
        am_rotation: req.am_rotation,
        pm_rotation: req.pm_rotation,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ReplaceRotationResponse = replace_rotation(
        &mut persistence,
        class_id,
        &request,
        app_state.notifier.as_ref(),
        &app_state.public_base_url,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/classes/{class_id}/rotation`.
async fn handle_get_rotation(
    AxumState(app_state): AxumState<AppState>,
    Path(class_id): Path<i64>,
) -> Result<Json<GetRotationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GetRotationResponse = get_rotation(&mut persistence, class_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/classes/combine`.
async fn handle_combine_classes(
    AxumState(app_state): AxumState<AppState>,
    ApiJson(req): ApiJson<CombineClassesApiRequest>,
) -> Result<Json<CombineClassesResponse>, HttpError> {
    info!(
        first_class_id = req.first_class_id,
        second_class_id = req.second_class_id,
        new_class_name = %req.new_class_name,
        "Handling combine_classes request"
    );

    let request: CombineClassesRequest = CombineClassesRequest {
        first_class_id: req.first_class_id,
        second_class_id: req.second_class_id,
        new_class_name: req.new_class_name,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CombineClassesResponse = combine_classes(&mut persistence, &request)?;
    drop(persistence);

    info!(
        new_class_id = response.new_class.class_id,
        student_count = response.student_count,
        "Successfully combined classes"
    );

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/calendar/weeks", post(handle_generate_calendar))
        .route(
            "/holidays",
            post(handle_create_holiday).get(handle_list_holidays),
        )
        .route(
            "/teachers",
            post(handle_create_teacher).get(handle_list_teachers),
        )
        .route("/classes", post(handle_create_class).get(handle_list_classes))
        .route("/classes/combine", post(handle_combine_classes))
        .route("/classes/{class_id}", get(handle_get_class))
        .route(
            "/classes/{class_id}/students",
            post(handle_add_student).get(handle_list_students),
        )
        .route(
            "/classes/{class_id}/students/import",
            post(handle_import_students_csv),
        )
        .route(
            "/classes/{class_id}/rotation",
            get(handle_get_rotation).put(handle_replace_rotation),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Turnus Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier: Arc::new(TracingNotifier),
        public_base_url: args.public_base_url,
    };

    let app: Router = build_router(app_state);

    let listener = tokio::net::TcpListener::bind((args.bind.as_str(), args.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
