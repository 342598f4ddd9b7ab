mod enums;

pub use enums::{InputType, Tag};
