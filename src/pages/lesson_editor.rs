use tracing::{info, warn};

use crate::error::AppError;
use crate::models::{Lesson, LessonType, LessonUpdate, NewLesson, Upload};
use crate::state::AppState;
use crate::utils::non_blank;

#[derive(Debug, Clone, PartialEq)]
pub struct LessonDraft {
    pub title: String,
    pub lesson_type: LessonType,
    pub duration: String,
    pub video_url: String,
    pub preview_enabled: bool,
    pub resource_url: String,
    pub quiz_link: String,
    pub content: String,
    pub order: i32,
}

impl LessonDraft {
    /// A blank video lesson placed at `index` (zero-based).
    pub fn at_index(index: usize) -> Self {
        Self {
            title: String::new(),
            lesson_type: LessonType::Video,
            duration: String::new(),
            video_url: String::new(),
            preview_enabled: false,
            resource_url: String::new(),
            quiz_link: String::new(),
            content: String::new(),
            order: i32::try_from(index + 1).unwrap_or(i32::MAX),
        }
    }

    pub fn to_new_lesson(&self) -> NewLesson {
        NewLesson {
            title: self.title.trim().to_string(),
            lesson_type: self.lesson_type,
            content_type: self.lesson_type.as_str().to_ascii_lowercase(),
            duration: non_blank(&self.duration),
            video_url: non_blank(&self.video_url),
            resource_url: non_blank(&self.resource_url),
            quiz_link: non_blank(&self.quiz_link),
            content: non_blank(&self.content),
            preview_enabled: self.preview_enabled,
            order: self.order,
        }
    }
}

/// Files attached to a lesson submission.
#[derive(Debug, Clone, Default)]
pub struct LessonFiles {
    pub video: Option<Upload>,
    pub resource: Option<Upload>,
}

/// Lesson authoring for one course.
#[derive(Debug)]
pub struct LessonEditor {
    course_id: String,
    lessons: Vec<Lesson>,
    error: Option<String>,
}

impl LessonEditor {
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            lessons: Vec::new(),
            error: None,
        }
    }

    pub async fn load(&mut self, app: &AppState) -> Result<(), AppError> {
        match app.api.list_content(&self.course_id).await {
            Ok(lessons) => {
                self.lessons = lessons;
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// A draft for the next lesson position.
    pub fn next_draft(&self) -> LessonDraft {
        LessonDraft::at_index(self.lessons.len())
    }

    /// Adds the lesson, then uploads any attached files against it. If an
    /// upload fails the lesson is still kept, as created.
    pub async fn add(
        &mut self,
        app: &AppState,
        draft: &LessonDraft,
        files: LessonFiles,
    ) -> Result<Lesson, AppError> {
        if draft.title.trim().is_empty() {
            return Err(self.fail(AppError::InvalidInput("lesson title is required".to_string())));
        }

        let added = app.api.add_content(&self.course_id, &draft.to_new_lesson()).await;
        let mut lesson = match added {
            Ok(lesson) => lesson,
            Err(e) => return Err(self.fail(e.into())),
        };
        info!("added lesson {} to course {}", lesson.id, self.course_id);
        self.lessons.push(lesson.clone());

        if let Some(video) = &files.video {
            let uploaded = app
                .api
                .upload_lesson_video(&self.course_id, &lesson.id, video)
                .await;
            match uploaded {
                Ok(updated) => lesson = updated,
                Err(e) => return Err(self.fail(e.into())),
            }
        }
        if let Some(resource) = &files.resource {
            let uploaded = app
                .api
                .upload_lesson_resource(&self.course_id, &lesson.id, resource)
                .await;
            match uploaded {
                Ok(updated) => lesson = updated,
                Err(e) => return Err(self.fail(e.into())),
            }
        }

        self.replace(lesson.clone());
        self.error = None;
        Ok(lesson)
    }

    pub async fn update(
        &mut self,
        app: &AppState,
        lesson_id: &str,
        update: &LessonUpdate,
    ) -> Result<Lesson, AppError> {
        match app.api.update_content(&self.course_id, lesson_id, update).await {
            Ok(lesson) => {
                self.replace(lesson.clone());
                self.error = None;
                Ok(lesson)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub async fn remove(&mut self, app: &AppState, lesson_id: &str) -> Result<(), AppError> {
        match app.api.delete_content(&self.course_id, lesson_id).await {
            Ok(()) => {
                self.lessons.retain(|l| l.id != lesson_id);
                self.error = None;
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn replace(&mut self, lesson: Lesson) {
        match self.lessons.iter_mut().find(|l| l.id == lesson.id) {
            Some(slot) => *slot = lesson,
            None => self.lessons.push(lesson),
        }
    }

    fn fail(&mut self, e: AppError) -> AppError {
        warn!("lesson editor for {}: {}", self.course_id, e);
        self.error = Some(e.to_string());
        e
    }
}
