use reqwest::multipart::{Form, Part};

use crate::models::{NewCourse, Upload};

pub const IMAGE_FIELD: &str = "image";
pub const VIDEO_FIELD: &str = "video";
pub const RESOURCE_FIELD: &str = "resource";

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("invalid mime type: {0}")]
    Mime(#[from] reqwest::Error),
    #[error("failed to encode tags: {0}")]
    Tags(#[from] serde_json::Error),
}

/// Multipart body for course creation with an image. Text fields mirror the
/// JSON payload; tags travel as a JSON array string.
pub fn course_form(course: &NewCourse, image: &Upload) -> Result<Form, FormError> {
    let tags = serde_json::to_string(&course.tags)?;

    let mut form = Form::new()
        .text("title", course.title.clone())
        .text("description", course.description.clone())
        .text("tags", tags);

    let optional = [
        ("category", course.category.clone()),
        ("duration", course.duration.clone()),
        ("language", course.language.clone()),
        ("level", course.level.map(|l| l.as_str().to_string())),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            form = form.text(name, value);
        }
    }

    Ok(form.part(IMAGE_FIELD, file_part(image)?))
}

pub fn file_form(field: &'static str, file: &Upload) -> Result<Form, FormError> {
    Ok(Form::new().part(field, file_part(file)?))
}

fn file_part(file: &Upload) -> Result<Part, FormError> {
    let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
    match &file.mime {
        Some(mime) => Ok(part.mime_str(mime)?),
        None => Ok(part),
    }
}
