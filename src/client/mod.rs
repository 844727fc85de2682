pub mod dto;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiOperation, AppError};
use crate::models::{Course, CourseUpdate, Lesson, LessonUpdate, NewCourse, NewLesson, Upload};

/// One method per backend operation. Every call issues exactly one request.
#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError>;
    async fn get_course(&self, id: &str) -> Result<Course, ApiError>;
    async fn create_course(
        &self,
        course: &NewCourse,
        image: Option<&Upload>,
    ) -> Result<Course, ApiError>;
    async fn update_course(&self, id: &str, update: &CourseUpdate) -> Result<Course, ApiError>;
    async fn delete_course(&self, id: &str) -> Result<(), ApiError>;

    async fn list_content(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError>;
    async fn add_content(&self, course_id: &str, lesson: &NewLesson) -> Result<Lesson, ApiError>;
    async fn update_content(
        &self,
        course_id: &str,
        content_id: &str,
        update: &LessonUpdate,
    ) -> Result<Lesson, ApiError>;
    async fn delete_content(&self, course_id: &str, content_id: &str) -> Result<(), ApiError>;
    async fn generate_content(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError>;

    async fn upload_lesson_video(
        &self,
        course_id: &str,
        lesson_id: &str,
        video: &Upload,
    ) -> Result<Lesson, ApiError>;
    async fn upload_lesson_resource(
        &self,
        course_id: &str,
        lesson_id: &str,
        resource: &Upload,
    ) -> Result<Lesson, ApiError>;
}

pub struct CourseHttpClient {
    client: Client,
    base_url: Url,
}

impl CourseHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, op: ApiOperation, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            debug!(?op, error = %e, "request failed");
            ApiError(op)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(?op, %status, %body, "backend returned error status");
            return Err(ApiError(op));
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        op: ApiOperation,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(op, request).await?;
        response.json::<T>().await.map_err(|e| {
            debug!(?op, error = %e, "failed to decode response body");
            ApiError(op)
        })
    }

    async fn upload(
        &self,
        op: ApiOperation,
        field: &'static str,
        course_id: &str,
        lesson_id: &str,
        file: &Upload,
    ) -> Result<Lesson, ApiError> {
        let url = self.endpoint(&[course_id, "content", lesson_id, field]);
        let form = dto::file_form(field, file).map_err(|e| {
            debug!(?op, error = %e, "failed to build upload form");
            ApiError(op)
        })?;

        debug!(?op, %url, file = %file.file_name, size = file.bytes.len(), "uploading file");
        self.fetch_json(op, self.client.post(url).multipart(form)).await
    }
}

#[async_trait]
impl CourseApi for CourseHttpClient {
    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        let url = self.endpoint(&[]);
        self.fetch_json(ApiOperation::ListCourses, self.client.get(url)).await
    }

    async fn get_course(&self, id: &str) -> Result<Course, ApiError> {
        let url = self.endpoint(&[id]);
        self.fetch_json(ApiOperation::GetCourse, self.client.get(url)).await
    }

    async fn create_course(
        &self,
        course: &NewCourse,
        image: Option<&Upload>,
    ) -> Result<Course, ApiError> {
        let op = ApiOperation::CreateCourse;
        let url = self.endpoint(&[]);

        let request = match image {
            Some(image) => {
                let form = dto::course_form(course, image).map_err(|e| {
                    debug!(?op, error = %e, "failed to build course form");
                    ApiError(op)
                })?;
                self.client.post(url).multipart(form)
            }
            None => self.client.post(url).json(course),
        };

        self.fetch_json(op, request).await
    }

    async fn update_course(&self, id: &str, update: &CourseUpdate) -> Result<Course, ApiError> {
        let url = self.endpoint(&[id]);
        self.fetch_json(ApiOperation::UpdateCourse, self.client.put(url).json(update))
            .await
    }

    async fn delete_course(&self, id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[id]);
        self.send(ApiOperation::DeleteCourse, self.client.delete(url)).await?;
        Ok(())
    }

    async fn list_content(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError> {
        let url = self.endpoint(&[course_id, "content"]);
        let lessons: Option<Vec<Lesson>> = self
            .fetch_json(ApiOperation::ListContent, self.client.get(url))
            .await?;
        Ok(lessons.unwrap_or_default())
    }

    async fn add_content(&self, course_id: &str, lesson: &NewLesson) -> Result<Lesson, ApiError> {
        let url = self.endpoint(&[course_id, "content"]);
        self.fetch_json(ApiOperation::AddContent, self.client.post(url).json(lesson))
            .await
    }

    async fn update_content(
        &self,
        course_id: &str,
        content_id: &str,
        update: &LessonUpdate,
    ) -> Result<Lesson, ApiError> {
        let url = self.endpoint(&[course_id, "content", content_id]);
        self.fetch_json(ApiOperation::UpdateContent, self.client.put(url).json(update))
            .await
    }

    async fn delete_content(&self, course_id: &str, content_id: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&[course_id, "content", content_id]);
        self.send(ApiOperation::DeleteContent, self.client.delete(url))
            .await?;
        Ok(())
    }

    async fn generate_content(&self, course_id: &str) -> Result<Vec<Lesson>, ApiError> {
        let url = self.endpoint(&[course_id, "generate-content"]);
        let lessons: Option<Vec<Lesson>> = self
            .fetch_json(ApiOperation::GenerateContent, self.client.post(url))
            .await?;
        Ok(lessons.unwrap_or_default())
    }

    async fn upload_lesson_video(
        &self,
        course_id: &str,
        lesson_id: &str,
        video: &Upload,
    ) -> Result<Lesson, ApiError> {
        self.upload(ApiOperation::UploadVideo, dto::VIDEO_FIELD, course_id, lesson_id, video)
            .await
    }

    async fn upload_lesson_resource(
        &self,
        course_id: &str,
        lesson_id: &str,
        resource: &Upload,
    ) -> Result<Lesson, ApiError> {
        self.upload(
            ApiOperation::UploadResource,
            dto::RESOURCE_FIELD,
            course_id,
            lesson_id,
            resource,
        )
        .await
    }
}
