use std::fmt;

use crate::models::Course;
use crate::utils::course_image;

const SHORT_DESCRIPTION_CHARS: usize = 100;

/// Display projection of a course for list and dashboard views.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseCard {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub category: String,
    pub level: Option<String>,
    pub language: Option<String>,
    pub duration: Option<String>,
    pub tags: Vec<String>,
    pub image_url: String,
}

impl CourseCard {
    pub fn from_course(course: &Course) -> Self {
        let category = course
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("General")
            .to_string();

        let image_url = course
            .image_path
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| course_image(course.category.as_deref()));

        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            summary: shorten(&course.description, SHORT_DESCRIPTION_CHARS),
            category,
            level: course.level.map(|l| l.to_string()),
            language: course.language.clone(),
            duration: course.duration.clone(),
            tags: course.tags.clone(),
            image_url,
        }
    }
}

impl fmt::Display for CourseCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.title, self.category)?;
        if let Some(level) = &self.level {
            write!(f, " - {}", level)?;
        }
        if let Some(language) = &self.language {
            write!(f, " - {}", language)?;
        }
        if !self.summary.is_empty() {
            write!(f, "\n    {}", self.summary)?;
        }
        if !self.tags.is_empty() {
            write!(f, "\n    tags: {}", self.tags.join(", "))?;
        }
        Ok(())
    }
}

fn shorten(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
