use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{Course, CourseUpdate};
use crate::state::AppState;

pub const LOAD_FAILED: &str = "Failed to load course data. Please try again later.";
pub const UPDATE_FAILED: &str = "Failed to update course. Please try again.";

#[derive(Debug)]
pub struct EditCoursePage {
    course_id: String,
    course: Option<Course>,
    pub draft: CourseUpdate,
    error: Option<String>,
}

impl EditCoursePage {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            course: None,
            draft: CourseUpdate::default(),
            error: None,
        }
    }

    /// Fetches the course and seeds the draft from it.
    pub async fn load(&mut self, app: &AppState) -> Result<(), AppError> {
        match app.api.get_course(&self.course_id).await {
            Ok(course) => {
                self.draft = CourseUpdate::from(&course);
                self.course = Some(course);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("failed to load course {} for editing: {}", self.course_id, e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    /// Refused until a `load` has succeeded.
    pub async fn submit(&mut self, app: &AppState) -> Result<Course, AppError> {
        if self.course.is_none() {
            return Err(AppError::NotLoaded);
        }

        match app.api.update_course(&self.course_id, &self.draft).await {
            Ok(course) => {
                info!("updated course {}", course.id);
                self.course = Some(course.clone());
                self.error = None;
                Ok(course)
            }
            Err(e) => {
                warn!("failed to update course {}: {}", self.course_id, e);
                self.error = Some(UPDATE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
