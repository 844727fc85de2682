//! In-process stand-in for the courses backend, served by axum on an
//! ephemeral port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tokio::task::JoinHandle;

use course_catalog::client::CourseHttpClient;
use course_catalog::config::ClientConfig;
use course_catalog::db;
use course_catalog::models::{Course, CourseUpdate, Lesson, LessonUpdate, NewCourse, NewLesson};
use course_catalog::state::AppState;

#[derive(Debug, Clone, PartialEq)]
pub struct ReceivedFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

#[derive(Debug, Default)]
pub struct Backend {
    pub courses: Vec<Course>,
    pub content: HashMap<String, Vec<Lesson>>,
    pub fail: bool,
    pub requests: Vec<String>,
    pub files: Vec<ReceivedFile>,
    pub form_fields: HashMap<String, String>,
    pub last_json: Option<serde_json::Value>,
}

pub type Shared = Arc<Mutex<Backend>>;

pub struct FakeBackend {
    pub state: Shared,
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = Shared::default();
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend stopped");
        });

        Self {
            state,
            base_url: format!("http://{}/api/courses", addr),
            handle,
        }
    }

    pub async fn app_state(&self) -> AppState {
        let config = ClientConfig::new(&self.base_url, "sqlite::memory:").expect("config");
        let api = CourseHttpClient::new(&config).expect("client");
        let db = db::connect(&config.storage_url)
            .await
            .expect("Failed to open storage");
        AppState::new(Arc::new(api), db)
    }

    pub fn seed_course(&self, course: Course) {
        let mut backend = self.state.lock().unwrap();
        backend.content.entry(course.id.clone()).or_default();
        backend.courses.push(course);
    }

    pub fn seed_lessons(&self, course_id: &str, lessons: Vec<Lesson>) {
        let mut backend = self.state.lock().unwrap();
        backend
            .content
            .entry(course_id.to_string())
            .or_default()
            .extend(lessons);
    }

    pub fn set_fail(&self, fail: bool) {
        self.state.lock().unwrap().fail = fail;
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn courses(&self) -> Vec<Course> {
        self.state.lock().unwrap().courses.clone()
    }

    pub fn lessons(&self, course_id: &str) -> Vec<Lesson> {
        self.state
            .lock()
            .unwrap()
            .content
            .get(course_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn course(id: &str, title: &str) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("All about {}", title),
        ..Default::default()
    }
}

pub fn lessons(n: usize) -> Vec<Lesson> {
    (0..n)
        .map(|i| Lesson {
            id: format!("lesson-{}", i + 1),
            title: format!("Lesson {}", i + 1),
            content_type: Some("text".to_string()),
            order: i as i32 + 1,
            ..Default::default()
        })
        .collect()
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/courses", get(list_courses).post(create_course))
        .route(
            "/api/courses/{id}",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route(
            "/api/courses/{id}/content",
            get(list_content).post(add_content),
        )
        .route(
            "/api/courses/{id}/content/{content_id}",
            put(update_content).delete(delete_content),
        )
        .route("/api/courses/{id}/generate-content", post(generate_content))
        .route(
            "/api/courses/{id}/content/{content_id}/video",
            post(upload_video),
        )
        .route(
            "/api/courses/{id}/content/{content_id}/resource",
            post(upload_resource),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

/// Logs every request and short-circuits with 500 while `fail` is set.
async fn record(State(state): State<Shared>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri().path());
    let fail = {
        let mut backend = state.lock().unwrap();
        backend.requests.push(line);
        backend.fail
    };
    if fail {
        return (StatusCode::INTERNAL_SERVER_ERROR, "simulated outage").into_response();
    }
    next.run(req).await
}

async fn list_courses(State(state): State<Shared>) -> Json<Vec<Course>> {
    Json(state.lock().unwrap().courses.clone())
}

async fn get_course(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Course>, StatusCode> {
    let backend = state.lock().unwrap();
    backend
        .courses
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn create_course(
    State(state): State<Shared>,
    req: Request,
) -> Result<(StatusCode, Json<Course>), StatusCode> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let mut course = if is_multipart {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        let mut course = Course::default();
        let mut fields = HashMap::new();
        let mut files = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let name = field.name().unwrap_or_default().to_string();
            if name == "image" {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                course.image_path = Some(format!("/uploads/{}", file_name));
                files.push(ReceivedFile {
                    field: name,
                    file_name,
                    content_type,
                    size: bytes.len(),
                });
                continue;
            }

            let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            match name.as_str() {
                "title" => course.title = text.clone(),
                "description" => course.description = text.clone(),
                "category" => course.category = Some(text.clone()),
                "duration" => course.duration = Some(text.clone()),
                "language" => course.language = Some(text.clone()),
                "level" => course.level = text.parse().ok(),
                "tags" => course.tags = serde_json::from_str(&text).unwrap_or_default(),
                _ => {}
            }
            fields.insert(name, text);
        }

        let mut backend = state.lock().unwrap();
        backend.form_fields = fields;
        backend.files.extend(files);
        course
    } else {
        let Json(body) = Json::<serde_json::Value>::from_request(req, &())
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?;
        let new: NewCourse =
            serde_json::from_value(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;
        state.lock().unwrap().last_json = Some(body);
        Course {
            title: new.title,
            description: new.description,
            category: new.category,
            level: new.level,
            language: new.language,
            duration: new.duration,
            tags: new.tags,
            ..Default::default()
        }
    };

    course.id = uuid::Uuid::new_v4().to_string();
    let mut backend = state.lock().unwrap();
    backend.content.insert(course.id.clone(), Vec::new());
    backend.courses.push(course.clone());
    Ok((StatusCode::CREATED, Json(course)))
}

async fn update_course(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Course>, StatusCode> {
    let update: CourseUpdate =
        serde_json::from_value(body.clone()).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut backend = state.lock().unwrap();
    backend.last_json = Some(body);

    let course = backend
        .courses
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    course.title = update.title.unwrap_or_default();
    course.description = update.description.unwrap_or_default();
    if update.category.is_some() {
        course.category = update.category;
    }
    if update.level.is_some() {
        course.level = update.level;
    }
    if update.language.is_some() {
        course.language = update.language;
    }
    if update.duration.is_some() {
        course.duration = update.duration;
    }
    if let Some(tags) = update.tags {
        course.tags = tags;
    }
    Ok(Json(course.clone()))
}

async fn delete_course(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut backend = state.lock().unwrap();
    let before = backend.courses.len();
    backend.courses.retain(|c| c.id != id);
    if backend.courses.len() == before {
        return StatusCode::NOT_FOUND;
    }
    backend.content.remove(&id);
    StatusCode::OK
}

async fn list_content(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Lesson>>, StatusCode> {
    let backend = state.lock().unwrap();
    backend
        .content
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn add_content(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(new): Json<NewLesson>,
) -> Result<(StatusCode, Json<Lesson>), StatusCode> {
    let mut backend = state.lock().unwrap();
    let lessons = backend.content.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    let lesson = Lesson {
        id: uuid::Uuid::new_v4().to_string(),
        title: new.title,
        lesson_type: Some(new.lesson_type),
        content_type: Some(new.content_type),
        duration: new.duration,
        video_url: new.video_url,
        resource_url: new.resource_url,
        quiz_link: new.quiz_link,
        content: new.content,
        preview_enabled: new.preview_enabled,
        order: new.order,
        ..Default::default()
    };
    lessons.push(lesson.clone());
    Ok((StatusCode::CREATED, Json(lesson)))
}

async fn update_content(
    State(state): State<Shared>,
    Path((id, content_id)): Path<(String, String)>,
    Json(update): Json<LessonUpdate>,
) -> Result<Json<Lesson>, StatusCode> {
    let mut backend = state.lock().unwrap();
    let lesson = backend
        .content
        .get_mut(&id)
        .and_then(|lessons| lessons.iter_mut().find(|l| l.id == content_id))
        .ok_or(StatusCode::NOT_FOUND)?;

    if let Some(title) = update.title {
        lesson.title = title;
    }
    if update.lesson_type.is_some() {
        lesson.lesson_type = update.lesson_type;
    }
    if update.duration.is_some() {
        lesson.duration = update.duration;
    }
    if update.content.is_some() {
        lesson.content = update.content;
    }
    if let Some(preview) = update.preview_enabled {
        lesson.preview_enabled = preview;
    }
    if let Some(order) = update.order {
        lesson.order = order;
    }
    Ok(Json(lesson.clone()))
}

async fn delete_content(
    State(state): State<Shared>,
    Path((id, content_id)): Path<(String, String)>,
) -> StatusCode {
    let mut backend = state.lock().unwrap();
    let Some(lessons) = backend.content.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    let before = lessons.len();
    lessons.retain(|l| l.id != content_id);
    if lessons.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn generate_content(
    State(state): State<Shared>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Lesson>>, StatusCode> {
    let mut backend = state.lock().unwrap();
    let title = backend
        .courses
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.title.clone())
        .ok_or(StatusCode::NOT_FOUND)?;

    let generated: Vec<Lesson> = [
        format!("Introduction to {}", title),
        "Course Overview".to_string(),
        format!("Key Concepts in {}", title),
        "Practice Exercises".to_string(),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, title)| Lesson {
        id: uuid::Uuid::new_v4().to_string(),
        title,
        content_type: Some("text".to_string()),
        content: Some("<p>generated</p>".to_string()),
        order: i as i32 + 1,
        ..Default::default()
    })
    .collect();

    backend
        .content
        .entry(id)
        .or_default()
        .extend(generated.iter().cloned());
    Ok(Json(generated))
}

async fn upload_video(
    State(state): State<Shared>,
    Path((id, content_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<Lesson>, StatusCode> {
    store_upload(state, id, content_id, "video", multipart).await
}

async fn upload_resource(
    State(state): State<Shared>,
    Path((id, content_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<Json<Lesson>, StatusCode> {
    store_upload(state, id, content_id, "resource", multipart).await
}

async fn store_upload(
    state: Shared,
    id: String,
    content_id: String,
    expected_field: &str,
    mut multipart: Multipart,
) -> Result<Json<Lesson>, StatusCode> {
    let mut received = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        if name == expected_field {
            received = Some(ReceivedFile {
                field: name,
                file_name,
                content_type,
                size: bytes.len(),
            });
        }
    }
    let file = received.ok_or(StatusCode::BAD_REQUEST)?;

    let mut backend = state.lock().unwrap();
    let lesson = backend
        .content
        .get_mut(&id)
        .and_then(|lessons| lessons.iter_mut().find(|l| l.id == content_id))
        .ok_or(StatusCode::NOT_FOUND)?;
    if expected_field == "video" {
        lesson.video_url = Some(format!("/uploads/videos/{}", file.file_name));
    } else {
        lesson.resource_url = Some(format!("/uploads/resources/{}", file.file_name));
    }
    let lesson = lesson.clone();
    backend.files.push(file);
    Ok(Json(lesson))
}
