pub mod format;
pub mod time;

pub use format::format_bytes;
pub use time::{format_relative, from_now};
