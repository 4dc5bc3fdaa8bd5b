mod openai_image_generator;

pub use openai_image_generator::OpenAiImageGenerator;
