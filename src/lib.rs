//! Page through directories of DICOM and bitmap images in a thumbnail grid.
//!
//! [`core::file_manager::FileManager`] builds the file list once,
//! [`core::page_controller::PageController`] owns the page index and pushes
//! each rendered page into a [`core::display::DisplaySurface`]: the egui
//! window in [`ui::viewer`] or the text prompt in [`ui::console`].

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod i18n;
pub mod ui;
