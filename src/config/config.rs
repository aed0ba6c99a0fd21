use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::core::error::BrowseError;
use crate::core::file_manager::ListOptions;

pub const APP_NAME: &str = "Image Browser";

/// Longest edge of a decoded thumbnail, in pixels.
pub const THUMBNAIL_MAX_EDGE: u32 = 512;

/// On-screen size of one grid cell before the window is resized.
pub const CELL_WIDTH: f32 = 300.0;
pub const CELL_HEIGHT: f32 = 240.0;
pub const TOOLBAR_HEIGHT: f32 = 80.0;

pub const DEFAULT_SHUFFLE_SEED: u64 = 11;

/// Longest element value printed by the DICOM metadata listing.
pub const METADATA_VALUE_MAX_CHARS: usize = 64;

/// Upper bound on rows × cols for one page.
pub const MAX_GRID_CELLS: usize = 64;

/// Rows and columns of display slots shown per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BrowseError> {
        Self::validate(rows, cols).map_err(|reason| BrowseError::InvalidGrid {
            value: format!("{},{}", rows, cols),
            reason,
        })?;
        Ok(Self { rows, cols })
    }

    fn validate(rows: usize, cols: usize) -> Result<(), String> {
        if rows == 0 || cols == 0 {
            return Err("rows and columns must be at least 1".to_string());
        }
        match rows.checked_mul(cols) {
            Some(cells) if cells <= MAX_GRID_CELLS => Ok(()),
            _ => Err(format!("at most {} cells per page", MAX_GRID_CELLS)),
        }
    }

    pub fn page_size(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// Initial window size, scaled from the cell dimensions.
    pub fn window_size(&self) -> [f32; 2] {
        [
            self.cols as f32 * CELL_WIDTH,
            self.rows as f32 * CELL_HEIGHT + TOOLBAR_HEIGHT,
        ]
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self { rows: 1, cols: 1 }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.rows, self.cols)
    }
}

impl FromStr for Grid {
    type Err = BrowseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| BrowseError::InvalidGrid {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.split(',').map(str::trim);
        let (Some(rows), Some(cols), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid("expected \"rows,cols\""));
        };

        let rows = rows.parse::<usize>().map_err(|_| invalid("rows is not a number"))?;
        let cols = cols.parse::<usize>().map_err(|_| invalid("cols is not a number"))?;
        Self::validate(rows, cols).map_err(|reason| invalid(&reason))?;
        Ok(Self { rows, cols })
    }
}

/// Validated runtime configuration for one browsing session.
#[derive(Debug, Clone)]
pub struct BrowseConfig {
    pub file_path: PathBuf,
    pub pattern: Option<String>,
    pub grid: Grid,
    pub list_dicom: bool,
    pub random: bool,
    pub seed: u64,
    pub filter_to_images: bool,
    pub console: bool,
}

impl BrowseConfig {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            pattern: None,
            grid: Grid::default(),
            list_dicom: false,
            random: false,
            seed: DEFAULT_SHUFFLE_SEED,
            filter_to_images: true,
            console: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.grid.page_size()
    }

    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            pattern: self.pattern.clone(),
            filter_to_images: self.filter_to_images,
            shuffle_seed: self.random.then_some(self.seed),
        }
    }
}
