use std::io;

use crate::config::config::*;
use crate::core::error::BrowseError;
use crate::core::file_manager::{FileList, FileManager};
use crate::core::image_loader_factory::ImageLoaderFactory;
use crate::core::page_controller::PageController;
use crate::ui::console::{run_prompt, ConsoleSurface};
use crate::ui::viewer::{BrowserApp, EguiSurface};

/// List the files, then page through them until the user quits.
pub fn run(config: BrowseConfig) -> Result<(), BrowseError> {
    let files = FileManager::list(&config.file_path, &config.list_options())?;
    if files.is_empty() {
        return Err(BrowseError::NoFiles {
            path: config.file_path,
        });
    }

    // A single file is always shown on its own.
    let grid = if config.file_path.is_file() {
        Grid::default()
    } else {
        config.grid
    };
    tracing::info!(files = files.len(), grid = %grid, "starting session");

    let loaders = ImageLoaderFactory::new(config.list_dicom);
    if config.console {
        run_console(files, grid, loaders)
    } else {
        run_window(files, grid, loaders)
    }
}

fn run_console(
    files: FileList,
    grid: Grid,
    loaders: ImageLoaderFactory,
) -> Result<(), BrowseError> {
    let surface = ConsoleSurface::new(io::stdout());
    let mut controller = PageController::new(files, grid.page_size(), loaders, surface);
    run_prompt(&mut controller, io::stdin().lock()).map_err(BrowseError::Console)
}

fn run_window(files: FileList, grid: Grid, loaders: ImageLoaderFactory) -> Result<(), BrowseError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size(grid.window_size())
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let surface = EguiSurface::new(cc.egui_ctx.clone());
            let controller = PageController::new(files, grid.page_size(), loaders, surface);
            Ok(Box::new(BrowserApp::new(controller, grid)))
        }),
    )
    .map_err(|e| BrowseError::Display {
        message: e.to_string(),
    })
}
