pub mod discover;
pub mod recording;
