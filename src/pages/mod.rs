pub mod add_course;
pub mod course_list;
pub mod course_view;
pub mod dashboard;
pub mod edit_course;
pub mod enrolled_courses;
pub mod lesson_editor;

pub use add_course::{AddCoursePage, CourseDraft};
pub use course_list::CourseListPage;
pub use course_view::{CourseViewPage, LoadedCourse, Tab, ViewPhase};
pub use dashboard::InstructorDashboard;
pub use edit_course::EditCoursePage;
pub use enrolled_courses::EnrolledCoursesPage;
pub use lesson_editor::{LessonDraft, LessonEditor, LessonFiles};
