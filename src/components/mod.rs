pub mod course_card;
pub mod tag_input;

pub use course_card::CourseCard;
pub use tag_input::TagInput;
