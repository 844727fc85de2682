use tracing::{info, warn};

use crate::client::CourseApi;
use crate::components::TagInput;
use crate::error::AppError;
use crate::models::{Course, Level, NewCourse, Upload};
use crate::state::AppState;
use crate::utils::non_blank;

pub const CREATE_FAILED: &str = "Failed to create course. Please try again.";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: String,
    pub language: String,
    pub level: Option<Level>,
    pub tags: TagInput,
    pub image: Option<Upload>,
}

impl CourseDraft {
    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.duration.trim().is_empty() {
            missing.push("duration");
        }
        if self.language.trim().is_empty() {
            missing.push("language");
        }
        if self.level.is_none() {
            missing.push("level");
        }
        missing
    }

    pub fn to_new_course(&self) -> NewCourse {
        NewCourse {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: non_blank(&self.category),
            level: self.level,
            language: non_blank(&self.language),
            duration: non_blank(&self.duration),
            tags: self.tags.tags().to_vec(),
        }
    }
}

/// Validates the draft and issues the create call; multipart when an image is attached.
pub async fn submit_draft(api: &dyn CourseApi, draft: &CourseDraft) -> Result<Course, AppError> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let course = api
        .create_course(&draft.to_new_course(), draft.image.as_ref())
        .await?;
    info!("created course {} ({})", course.id, course.title);
    Ok(course)
}

#[derive(Debug, Default)]
pub struct AddCoursePage {
    pub draft: CourseDraft,
    error: Option<String>,
}

impl AddCoursePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// On success the draft is cleared; on failure it is kept for resubmission.
    pub async fn submit(&mut self, app: &AppState) -> Result<Course, AppError> {
        self.error = None;
        match submit_draft(app.api.as_ref(), &self.draft).await {
            Ok(course) => {
                self.draft = CourseDraft::default();
                Ok(course)
            }
            Err(e) => {
                warn!("course creation failed: {}", e);
                self.error = Some(match &e {
                    AppError::InvalidInput(msg) => msg.clone(),
                    _ => CREATE_FAILED.to_string(),
                });
                Err(e)
            }
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
