pub mod course;
pub mod lesson;
pub mod upload;

pub use course::{Course, CourseUpdate, Level, NewCourse};
pub use lesson::{Lesson, LessonType, LessonUpdate, NewLesson};
pub use upload::Upload;
