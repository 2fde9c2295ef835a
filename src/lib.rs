pub mod certificate;
pub mod config;
pub mod error;
pub mod handlers;
pub mod image;
pub mod quiz;
pub mod view;
