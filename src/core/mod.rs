pub mod command;
pub mod display;
pub mod error;
pub mod file_manager;
pub mod image_format;
pub mod image_loader_factory;
pub mod page_controller;
pub mod pagination;
