mod analyze_image;
mod chat;
mod error;
mod interpret;
mod root;

pub use analyze_image::analyze_image_handler;
pub use chat::chat_handler;
pub use error::{ErrorResponse, error_response};
pub use interpret::{interpret_full_handler, interpret_handler};
pub use root::{health_handler, root_handler};
