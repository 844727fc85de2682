use thiserror::Error;

/// Backend operations exposed by [`crate::client::CourseApi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    ListCourses,
    GetCourse,
    CreateCourse,
    UpdateCourse,
    DeleteCourse,
    ListContent,
    AddContent,
    UpdateContent,
    DeleteContent,
    GenerateContent,
    UploadVideo,
    UploadResource,
}

impl ApiOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            ApiOperation::ListCourses => "Failed to fetch courses",
            ApiOperation::GetCourse => "Failed to fetch course data",
            ApiOperation::CreateCourse => "Failed to create course",
            ApiOperation::UpdateCourse => "Failed to update course",
            ApiOperation::DeleteCourse => "Failed to delete course",
            ApiOperation::ListContent => "Failed to fetch course content",
            ApiOperation::AddContent => "Failed to add course content",
            ApiOperation::UpdateContent => "Failed to update course content",
            ApiOperation::DeleteContent => "Failed to delete course content",
            ApiOperation::GenerateContent => "Failed to generate course content",
            ApiOperation::UploadVideo => "Failed to upload video",
            ApiOperation::UploadResource => "Failed to upload resource",
        }
    }
}

/// A failed backend call. Only the operation survives; status codes and
/// response bodies are logged and dropped at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .0.failure_message())]
pub struct ApiError(pub ApiOperation);

impl ApiError {
    pub fn operation(&self) -> ApiOperation {
        self.0
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Page has not been loaded")]
    NotLoaded,
}
