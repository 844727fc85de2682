use tracing::{info, warn};

use crate::catalog::{available_languages, available_tags, CourseFilter};
use crate::components::CourseCard;
use crate::error::ApiError;
use crate::models::Course;
use crate::state::AppState;

pub const LOAD_FAILED: &str = "Failed to load courses. Please try again later.";

/// Browse page: the full course list plus the criteria that derive what is shown.
#[derive(Debug, Default)]
pub struct CourseListPage {
    courses: Vec<Course>,
    languages: Vec<String>,
    tags: Vec<String>,
    loaded: bool,
    error: Option<String>,
    pub filter: CourseFilter,
}

impl CourseListPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, state: &AppState) -> Result<(), ApiError> {
        match state.api.list_courses().await {
            Ok(courses) => {
                info!("loaded {} courses", courses.len());
                self.languages = available_languages(&courses);
                self.tags = available_tags(&courses);
                self.courses = courses;
                self.loaded = true;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("course list load failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Recomputed from scratch on every call.
    pub fn visible(&self) -> Vec<Course> {
        self.filter.apply(&self.courses)
    }

    pub fn cards(&self) -> Vec<CourseCard> {
        self.visible().iter().map(CourseCard::from_course).collect()
    }

    pub fn result_summary(&self) -> String {
        let n = self.visible().len();
        format!("{} {} found", n, if n == 1 { "course" } else { "courses" })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn available_languages(&self) -> &[String] {
        &self.languages
    }

    pub fn available_tags(&self) -> &[String] {
        &self.tags
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
