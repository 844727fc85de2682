use tracing::{info, warn};

use crate::catalog::{self, ContentSection};
use crate::db::repository;
use crate::error::AppError;
use crate::models::{Course, Lesson};
use crate::state::AppState;

pub const LOAD_FAILED: &str = "Failed to load course data. Please try again later.";
pub const ENROLL_FAILED: &str = "Failed to enroll in this course. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    Error,
    LoadedUnenrolled,
    LoadedEnrolled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Content,
    Resources,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCourse {
    pub course: Course,
    pub lessons: Vec<Lesson>,
    pub enrolled: bool,
    pub active_lesson: Option<usize>,
    pub student_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
enum ViewState {
    Loading,
    Failed(String),
    Loaded(LoadedCourse),
}

/// Course detail page.
///
/// Starts in `Loading`; `load` moves to `Error` or one of the loaded phases.
/// `enroll` is the only transition between the loaded phases and keeps the
/// loaded data when it fails.
#[derive(Debug)]
pub struct CourseViewPage {
    course_id: String,
    state: ViewState,
    tab: Tab,
    banner: Option<String>,
}

impl CourseViewPage {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            state: ViewState::Loading,
            tab: Tab::default(),
            banner: None,
        }
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Fetches course and content concurrently; the first lesson becomes
    /// active only once both have arrived. A failed read of the local
    /// enrollment flag fails the load like a backend error.
    pub async fn load(&mut self, app: &AppState) -> Result<(), AppError> {
        self.state = ViewState::Loading;
        let id = self.course_id.as_str();

        let (course, lessons) = tokio::join!(app.api.get_course(id), app.api.list_content(id));
        let (course, lessons) = match (course, lessons) {
            (Ok(course), Ok(lessons)) => (course, lessons),
            (Err(e), _) | (_, Err(e)) => {
                warn!("failed to load course {}: {}", id, e);
                self.state = ViewState::Failed(LOAD_FAILED.to_string());
                return Err(e.into());
            }
        };

        let enrolled = match repository::is_enrolled(&app.db, id).await {
            Ok(enrolled) => enrolled,
            Err(e) => {
                warn!("could not read enrollment flag for {}: {}", id, e);
                self.state = ViewState::Failed(LOAD_FAILED.to_string());
                return Err(e.into());
            }
        };

        info!(
            "loaded course {} with {} lessons (enrolled: {})",
            id,
            lessons.len(),
            enrolled
        );

        self.state = ViewState::Loaded(LoadedCourse {
            active_lesson: if lessons.is_empty() { None } else { Some(0) },
            student_count: course.enrollment_count.unwrap_or(0),
            course,
            lessons,
            enrolled,
        });
        self.banner = None;
        Ok(())
    }

    /// Generates content on the backend, re-reads it, then stores the local
    /// enrollment flag.
    pub async fn enroll(&mut self, app: &AppState) -> Result<(), AppError> {
        let ViewState::Loaded(loaded) = &mut self.state else {
            return Err(AppError::NotLoaded);
        };
        if loaded.enrolled {
            info!("already enrolled in {}", self.course_id);
            return Ok(());
        }

        let id = self.course_id.as_str();
        let result = async {
            app.api.generate_content(id).await?;
            let lessons = app.api.list_content(id).await?;
            repository::set_enrolled(&app.db, id).await?;
            Ok::<_, AppError>(lessons)
        }
        .await;

        match result {
            Ok(lessons) => {
                info!("enrolled in {} ({} lessons)", self.course_id, lessons.len());
                loaded.active_lesson = if lessons.is_empty() { None } else { Some(0) };
                loaded.lessons = lessons;
                loaded.enrolled = true;
                loaded.student_count += 1;
                self.banner = None;
                Ok(())
            }
            Err(e) => {
                warn!("enrollment in {} failed: {}", self.course_id, e);
                self.banner = Some(ENROLL_FAILED.to_string());
                Err(e)
            }
        }
    }

    pub fn phase(&self) -> ViewPhase {
        match &self.state {
            ViewState::Loading => ViewPhase::Loading,
            ViewState::Failed(_) => ViewPhase::Error,
            ViewState::Loaded(l) if l.enrolled => ViewPhase::LoadedEnrolled,
            ViewState::Loaded(_) => ViewPhase::LoadedUnenrolled,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedCourse> {
        match &self.state {
            ViewState::Loaded(l) => Some(l),
            _ => None,
        }
    }

    pub fn is_accessible(&self, index: usize) -> bool {
        self.loaded()
            .and_then(|l| l.lessons.get(index).map(|lesson| (l.enrolled, lesson)))
            .is_some_and(|(enrolled, lesson)| catalog::is_previewable(index, lesson, enrolled))
    }

    pub fn accessible_indexes(&self) -> Vec<usize> {
        self.loaded()
            .map(|l| catalog::accessible_indexes(&l.lessons, l.enrolled))
            .unwrap_or_default()
    }

    /// Opens a lesson and switches to the content tab. Locked lessons are refused.
    pub fn select_lesson(&mut self, index: usize) -> Result<&Lesson, AppError> {
        if !self.is_accessible(index) {
            return Err(AppError::InvalidInput(format!(
                "lesson {} is locked or does not exist",
                index + 1
            )));
        }
        let ViewState::Loaded(loaded) = &mut self.state else {
            return Err(AppError::NotLoaded);
        };
        loaded.active_lesson = Some(index);
        self.tab = Tab::Content;
        loaded.lessons.get(index).ok_or(AppError::NotLoaded)
    }

    pub fn active_lesson(&self) -> Option<&Lesson> {
        let loaded = self.loaded()?;
        loaded.lessons.get(loaded.active_lesson?)
    }

    pub fn sections(&self) -> Vec<ContentSection<'_>> {
        self.loaded()
            .map(|l| catalog::sections(&l.lessons))
            .unwrap_or_default()
    }

    pub fn progress(&self) -> u8 {
        self.loaded()
            .map(|l| catalog::progress_percent(&l.lessons))
            .unwrap_or(0)
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Load failure message, or the dismissible banner from a failed action.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Failed(msg) => Some(msg),
            _ => self.banner.as_deref(),
        }
    }

    pub fn dismiss_error(&mut self) {
        self.banner = None;
    }
}
