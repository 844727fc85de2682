use tracing::{info, warn};

use crate::components::CourseCard;
use crate::error::AppError;
use crate::models::Course;
use crate::pages::add_course::{self, CourseDraft};
use crate::state::AppState;

pub const LOAD_FAILED: &str = "Failed to load courses. Please try again later.";
pub const DELETE_FAILED: &str = "Failed to delete course.";

/// Instructor view over all courses. Local changes follow successful calls only.
#[derive(Debug, Default)]
pub struct InstructorDashboard {
    courses: Vec<Course>,
    error: Option<String>,
}

impl InstructorDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &AppState) -> Result<(), AppError> {
        match app.api.list_courses().await {
            Ok(courses) => {
                self.courses = courses;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("dashboard load failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub async fn create(&mut self, app: &AppState, draft: &CourseDraft) -> Result<Course, AppError> {
        match add_course::submit_draft(app.api.as_ref(), draft).await {
            Ok(course) => {
                self.courses.push(course.clone());
                self.error = None;
                Ok(course)
            }
            Err(e) => {
                warn!("dashboard create failed: {}", e);
                self.error = Some(add_course::CREATE_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, app: &AppState, course_id: &str) -> Result<(), AppError> {
        match app.api.delete_course(course_id).await {
            Ok(()) => {
                info!("deleted course {}", course_id);
                self.courses.retain(|c| c.id != course_id);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("failed to delete course {}: {}", course_id, e);
                self.error = Some(DELETE_FAILED.to_string());
                Err(e.into())
            }
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn cards(&self) -> Vec<CourseCard> {
        self.courses.iter().map(CourseCard::from_course).collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
