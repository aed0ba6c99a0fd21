use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::core::command::{Command, Flow};
use crate::core::display::{DisplaySurface, PageView, Slot, Thumbnail};
use crate::core::file_manager::FileList;
use crate::core::image_loader_factory::ImageLoaderFactory;
use crate::core::pagination::PaginationState;

/// Pages through a [`FileList`] and keeps a [`DisplaySurface`] in sync with
/// the current page.
pub struct PageController<S: DisplaySurface> {
    files: FileList,
    state: PaginationState,
    loaders: ImageLoaderFactory,
    surface: S,
}

impl<S: DisplaySurface> PageController<S> {
    /// Build the controller and draw page 1.
    pub fn new(files: FileList, page_size: usize, loaders: ImageLoaderFactory, surface: S) -> Self {
        let state = PaginationState::new(files.len(), page_size);
        let mut controller = Self {
            files,
            state,
            loaders,
            surface,
        };
        controller.render();
        controller
    }

    /// Paths on the current page; never more than `page_size`.
    pub fn current_page(&self) -> &[PathBuf] {
        &self.files.as_slice()[self.state.page_range()]
    }

    pub fn next(&mut self) -> bool {
        let moved = self.state.next();
        if moved {
            self.render();
        }
        moved
    }

    pub fn prev(&mut self) -> bool {
        let moved = self.state.previous();
        if moved {
            self.render();
        }
        moved
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::Next => {
                self.next();
                Flow::Continue
            }
            Command::Prev => {
                self.prev();
                Flow::Continue
            }
            Command::Quit => Flow::Quit,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn current_index(&self) -> usize {
        self.state.current()
    }

    pub fn page_size(&self) -> usize {
        self.state.page_size()
    }

    pub fn can_go_next(&self) -> bool {
        self.state.can_go_next()
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.can_go_previous()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Decode the current page and hand it to the surface.
    ///
    /// Files decode in parallel but the surface only sees the finished page,
    /// in list order, with short pages padded by empty slots.
    pub fn render(&mut self) {
        let paths = self.current_page().to_vec();
        let loaders = &self.loaders;
        let results: Vec<_> = paths.par_iter().map(|path| loaders.load(path)).collect();

        let mut slots = Vec::with_capacity(self.page_size());
        for (path, result) in paths.iter().zip(results) {
            let caption = caption_for(path);
            match result {
                Ok(loaded) => {
                    if !loaded.metadata.is_empty() {
                        self.surface.show_metadata(path, &loaded.metadata);
                    }
                    slots.push(Slot::Image(Thumbnail {
                        caption,
                        width: loaded.width,
                        height: loaded.height,
                        image: loaded.thumbnail,
                    }));
                }
                Err(e) => {
                    if !e.metadata().is_empty() {
                        self.surface.show_metadata(path, e.metadata());
                    }
                    tracing::warn!(path = %path.display(), error = %e, "failed to load image");
                    slots.push(Slot::Failed {
                        caption,
                        message: e.to_string(),
                    });
                }
            }
        }
        slots.resize(self.page_size(), Slot::Empty);

        tracing::info!(
            page = self.current_index(),
            total = self.total_pages(),
            files = paths.len(),
            "showing page"
        );
        self.surface.draw(PageView {
            page: self.current_index(),
            total_pages: self.total_pages(),
            slots,
        });
    }
}

fn caption_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
