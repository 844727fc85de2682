use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonType {
    Video,
    Quiz,
    #[serde(rename = "PDF")]
    Pdf,
    Text,
}

impl LessonType {
    pub fn as_str(self) -> &'static str {
        match self {
            LessonType::Video => "Video",
            LessonType::Quiz => "Quiz",
            LessonType::Pdf => "PDF",
            LessonType::Text => "Text",
        }
    }
}

impl fmt::Display for LessonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LessonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(LessonType::Video),
            "quiz" => Ok(LessonType::Quiz),
            "pdf" => Ok(LessonType::Pdf),
            "text" => Ok(LessonType::Text),
            other => Err(format!("unknown lesson type: {}", other)),
        }
    }
}

fn lenient_lesson_type<'de, D>(deserializer: D) -> Result<Option<LessonType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_lesson_type")]
    pub lesson_type: Option<LessonType>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub resource_url: Option<String>,
    #[serde(default)]
    pub quiz_link: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub preview_enabled: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub completed: bool,
}

impl Lesson {
    /// Lessons without a recognised type display as text.
    pub fn kind(&self) -> LessonType {
        self.lesson_type.unwrap_or(LessonType::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    pub title: String,
    pub lesson_type: LessonType,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub preview_enabled: bool,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson_type: Option<LessonType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_uses_upper_case_wire_name() {
        let lesson: Lesson =
            serde_json::from_str(r#"{"id":"l1","title":"Slides","lessonType":"PDF"}"#)
                .expect("lesson json");
        assert_eq!(lesson.lesson_type, Some(LessonType::Pdf));
        assert!(!lesson.preview_enabled);
    }

    #[test]
    fn missing_type_displays_as_text() {
        let lesson: Lesson = serde_json::from_str(r#"{"id":"l2","title":"Intro","contentType":"text"}"#)
            .expect("lesson json");
        assert_eq!(lesson.kind(), LessonType::Text);
    }
}
