use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::models::{Course, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Popular,
    TopRated,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Newest => "Newest",
            SortKey::Popular => "Most Popular",
            SortKey::TopRated => "Top Rated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "newest" => Ok(SortKey::Newest),
            "popular" => Ok(SortKey::Popular),
            "toprated" => Ok(SortKey::TopRated),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Listing criteria. Empty fields pass everything through.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CourseFilter {
    pub query: String,
    pub category: String,
    pub level: Option<Level>,
    pub language: String,
    pub tags: Vec<String>,
    pub sort: SortKey,
}

impl CourseFilter {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
            || !self.category.is_empty()
            || self.level.is_some()
            || !self.language.is_empty()
            || !self.tags.is_empty()
    }

    /// Selects the tag if absent, deselects it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, course: &Course) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() {
            let in_title = course.title.to_lowercase().contains(&query);
            let in_tags = course
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query));
            if !in_title && !in_tags {
                return false;
            }
        }

        if !self.category.is_empty() {
            let same = course
                .category
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == self.category.to_lowercase());
            if !same {
                return false;
            }
        }

        if let Some(level) = self.level {
            if course.level != Some(level) {
                return false;
            }
        }

        if !self.language.is_empty() && course.language.as_deref() != Some(self.language.as_str()) {
            return false;
        }

        self.tags.iter().all(|tag| course.tags.contains(tag))
    }

    /// Derives the visible list: every active predicate must hold, then a
    /// stable descending sort on the selected key.
    pub fn apply(&self, courses: &[Course]) -> Vec<Course> {
        let mut result: Vec<Course> = courses
            .iter()
            .filter(|course| self.matches(course))
            .cloned()
            .collect();

        match self.sort {
            SortKey::Newest => result.sort_by(|a, b| b.id.cmp(&a.id)),
            SortKey::Popular => result.sort_by(|a, b| {
                b.enrollment_count
                    .unwrap_or(0)
                    .cmp(&a.enrollment_count.unwrap_or(0))
            }),
            SortKey::TopRated => result.sort_by(|a, b| {
                b.rating
                    .unwrap_or(0.0)
                    .total_cmp(&a.rating.unwrap_or(0.0))
            }),
        }

        result
    }
}

/// Distinct non-empty languages in first-seen order.
pub fn available_languages(courses: &[Course]) -> Vec<String> {
    unique_in_order(courses.iter().filter_map(|c| c.language.as_deref()))
}

/// Distinct tags in first-seen order.
pub fn available_tags(courses: &[Course]) -> Vec<String> {
    unique_in_order(courses.iter().flat_map(|c| c.tags.iter().map(String::as_str)))
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
