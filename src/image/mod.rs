pub mod editor;
pub mod gateway;

pub use editor::ImageEditor;
pub use gateway::{EditRequest, EditResult, ImageEditGateway};
