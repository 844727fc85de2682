pub mod images;
pub mod text;

pub use images::course_image;
pub use text::non_blank;
