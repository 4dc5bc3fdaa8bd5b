mod audio;
mod chat;
mod error;
mod health;
mod image;

pub use audio::audio_handler;
pub use chat::{SKIPPED_FILES_HEADER, chat_handler};
pub use error::ApiError;
pub use health::health_handler;
pub use image::{ImageParams, image_handler};
