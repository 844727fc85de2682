use tracing::warn;

use crate::db::repository;
use crate::error::AppError;
use crate::models::Course;
use crate::state::AppState;

pub const LOAD_FAILED: &str = "Failed to load enrolled courses. Please try again later.";

/// Courses this client has enrolled in, per the local flags.
#[derive(Debug, Default)]
pub struct EnrolledCoursesPage {
    courses: Vec<Course>,
    error: Option<String>,
}

impl EnrolledCoursesPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, app: &AppState) -> Result<(), AppError> {
        let result = async {
            let enrolled = repository::enrolled_course_ids(&app.db).await?;
            let courses = app.api.list_courses().await?;
            Ok::<_, AppError>(
                courses
                    .into_iter()
                    .filter(|c| enrolled.contains(&c.id))
                    .collect::<Vec<_>>(),
            )
        }
        .await;

        match result {
            Ok(courses) => {
                self.courses = courses;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                warn!("enrolled courses load failed: {}", e);
                self.error = Some(LOAD_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
