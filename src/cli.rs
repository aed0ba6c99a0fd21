use std::path::PathBuf;

use clap::Parser;

use crate::config::config::{BrowseConfig, Grid, DEFAULT_SHUFFLE_SEED};

#[derive(Debug, Parser)]
#[command(
    name = "img-browse",
    version,
    about = "Browse DICOM and bitmap images in a paged thumbnail grid"
)]
pub struct Cli {
    /// File or directory to process
    #[arg(long = "file_path")]
    pub file_path: PathBuf,

    /// Unix-style wildcard file pattern, applied to directory entries
    #[arg(long = "glob_str")]
    pub glob_str: Option<String>,

    /// Image display grid "rows,cols"
    #[arg(long, default_value = "1,1")]
    pub grid: Grid,

    /// Print the content of DICOM files as they are displayed
    #[arg(long = "list_dicom")]
    pub list_dicom: bool,

    /// Shuffle the images before paging
    #[arg(long)]
    pub random: bool,

    /// Seed used by --random
    #[arg(long, default_value_t = DEFAULT_SHUFFLE_SEED)]
    pub seed: u64,

    /// Keep files without a recognised image extension
    #[arg(long = "all_files")]
    pub all_files: bool,

    /// Page with a typed n/b/q prompt instead of a window
    #[arg(long)]
    pub console: bool,
}

impl Cli {
    pub fn into_config(self) -> BrowseConfig {
        BrowseConfig {
            file_path: self.file_path,
            pattern: self.glob_str,
            grid: self.grid,
            list_dicom: self.list_dicom,
            random: self.random,
            seed: self.seed,
            filter_to_images: !self.all_files,
            console: self.console,
        }
    }
}
