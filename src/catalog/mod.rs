pub mod content;
pub mod filter;

pub use content::{accessible_indexes, is_previewable, progress_percent, sections, ContentSection};
pub use filter::{available_languages, available_tags, CourseFilter, SortKey};
