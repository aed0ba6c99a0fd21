//! The rendering seam between the page controller and a concrete surface.

use std::path::Path;

use image::RgbaImage;

/// A decoded image ready to be shown in one cell.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// File basename shown above the image.
    pub caption: String,
    /// Full-resolution width, shown as the x-axis label.
    pub width: u32,
    /// Full-resolution height, shown as the y-axis label.
    pub height: u32,
    pub image: RgbaImage,
}

/// Content of one grid cell.
#[derive(Debug, Clone)]
pub enum Slot {
    Image(Thumbnail),
    /// The file could not be decoded; the rest of the page is unaffected.
    Failed { caption: String, message: String },
    /// Cleared cell on a short last page.
    Empty,
}

impl Slot {
    pub fn caption(&self) -> Option<&str> {
        match self {
            Slot::Image(thumb) => Some(&thumb.caption),
            Slot::Failed { caption, .. } => Some(caption),
            Slot::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// Everything a surface needs to redraw the grid.
#[derive(Debug, Clone)]
pub struct PageView {
    /// 1-based index of the page shown.
    pub page: usize,
    pub total_pages: usize,
    /// Always exactly one entry per grid cell.
    pub slots: Vec<Slot>,
}

pub trait DisplaySurface {
    /// Replace whatever is on screen with `view`.
    fn draw(&mut self, view: PageView);

    /// Called for each displayed file that carries metadata.
    fn show_metadata(&mut self, path: &Path, lines: &[String]) {
        println!("{}", path.display());
        for line in lines {
            println!("  {}", line);
        }
    }
}
