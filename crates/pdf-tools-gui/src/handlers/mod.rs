pub mod compose;
pub mod extract;
pub mod images;
pub mod output;
