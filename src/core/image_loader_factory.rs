use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use dicom_core::value::Value;
use dicom_core::Tag;
use dicom_object::file::{OpenFileOptions, ReadPreamble};
use dicom_object::{DefaultDicomObject, InMemDicomObject};
use dicom_pixeldata::PixelDecoder;
use image::{DynamicImage, RgbaImage};

use crate::config::config::{METADATA_VALUE_MAX_CHARS, THUMBNAIL_MAX_EDGE};
use crate::core::error::LoadError;
use crate::core::image_format::{ImageFormat, MedicalFormat};

const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// A decoded file, reduced to what one grid cell needs.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Downscaled RGBA raster for display.
    pub thumbnail: RgbaImage,
    /// Width of the full-resolution image.
    pub width: u32,
    /// Height of the full-resolution image.
    pub height: u32,
    /// Human-readable metadata, one element per line. Empty for bitmaps.
    pub metadata: Vec<String>,
}

impl LoadedImage {
    pub fn from_dynamic(img: DynamicImage, metadata: Vec<String>) -> Self {
        let (width, height) = (img.width(), img.height());

        let img = if width > THUMBNAIL_MAX_EDGE || height > THUMBNAIL_MAX_EDGE {
            img.resize(
                THUMBNAIL_MAX_EDGE,
                THUMBNAIL_MAX_EDGE,
                image::imageops::FilterType::Triangle,
            )
        } else {
            img
        };

        Self {
            thumbnail: img.to_rgba8(),
            width,
            height,
            metadata,
        }
    }
}

pub trait ImageLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<LoadedImage, LoadError>;
}

pub struct RasterImageLoader;

impl ImageLoader for RasterImageLoader {
    fn load(&self, path: &Path) -> Result<LoadedImage, LoadError> {
        let img = image::ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        Ok(LoadedImage::from_dynamic(img, Vec::new()))
    }
}

pub struct DicomImageLoader {
    collect_metadata: bool,
}

impl DicomImageLoader {
    pub fn new(collect_metadata: bool) -> Self {
        Self { collect_metadata }
    }
}

impl ImageLoader for DicomImageLoader {
    fn load(&self, path: &Path) -> Result<LoadedImage, LoadError> {
        // Files without the 128-byte preamble are still accepted.
        let obj = OpenFileOptions::new()
            .read_preamble(ReadPreamble::Auto)
            .open_file(path)
            .map_err(|e| LoadError::Decode(e.to_string()))?;

        let metadata = if self.collect_metadata {
            metadata_lines(&obj)
        } else {
            Vec::new()
        };

        let img = match obj
            .decode_pixel_data()
            .and_then(|pixels| pixels.to_dynamic_image(0))
        {
            Ok(img) => img,
            Err(e) => {
                return Err(LoadError::Pixels {
                    message: e.to_string(),
                    metadata,
                })
            }
        };

        tracing::debug!(
            path = %path.display(),
            width = img.width(),
            height = img.height(),
            "decoded DICOM pixel data"
        );
        Ok(LoadedImage::from_dynamic(img, metadata))
    }
}

/// One line per data element, sequence items nested and indented, pixel
/// data left out.
fn metadata_lines(obj: &DefaultDicomObject) -> Vec<String> {
    let transfer_syntax = obj.meta().transfer_syntax().trim_end_matches('\0');
    let mut lines = vec![format!("Transfer Syntax: {}", transfer_syntax)];
    push_elements(obj, 0, &mut lines);
    lines
}

fn push_elements(obj: &InMemDicomObject, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);

    for elem in obj.iter() {
        let header = elem.header();
        if header.tag == PIXEL_DATA {
            continue;
        }

        match elem.value() {
            Value::Primitive(v) => {
                let value = truncate(&v.to_str());
                lines.push(format!("{}{} {} {}", indent, header.tag, header.vr, value));
            }
            Value::Sequence(seq) => {
                lines.push(format!(
                    "{}{} {} <{} item(s)>",
                    indent,
                    header.tag,
                    header.vr,
                    seq.items().len()
                ));
                for (i, item) in seq.items().iter().enumerate() {
                    lines.push(format!("{}  Item {}", indent, i + 1));
                    push_elements(item, depth + 2, lines);
                }
            }
            Value::PixelSequence(seq) => {
                lines.push(format!(
                    "{}{} {} <{} fragment(s)>",
                    indent,
                    header.tag,
                    header.vr,
                    seq.fragments().len()
                ));
            }
        }
    }
}

fn truncate(value: &str) -> String {
    let value = value.trim_end_matches(&['\0', ' '][..]);
    if value.chars().count() > METADATA_VALUE_MAX_CHARS {
        let head: String = value.chars().take(METADATA_VALUE_MAX_CHARS).collect();
        format!("{}...", head)
    } else {
        value.to_string()
    }
}

/// Lookup table from image format to the decoder that handles it.
#[derive(Clone)]
pub struct ImageLoaderFactory {
    loaders: HashMap<ImageFormat, Arc<dyn ImageLoader>>,
}

impl ImageLoaderFactory {
    /// Raster formats through `image`, DICOM through `dicom-pixeldata`.
    pub fn new(collect_dicom_metadata: bool) -> Self {
        let raster: Arc<dyn ImageLoader> = Arc::new(RasterImageLoader);
        let dicom: Arc<dyn ImageLoader> = Arc::new(DicomImageLoader::new(collect_dicom_metadata));

        let mut factory = Self::empty();
        for format in ImageFormat::ALL {
            let loader = match format {
                ImageFormat::Raster(_) => Arc::clone(&raster),
                ImageFormat::Medical(MedicalFormat::Dicom) => Arc::clone(&dicom),
            };
            factory.register(format, loader);
        }
        factory
    }

    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    pub fn register(&mut self, format: ImageFormat, loader: Arc<dyn ImageLoader>) {
        self.loaders.insert(format, loader);
    }

    pub fn with_loader(mut self, format: ImageFormat, loader: impl ImageLoader + 'static) -> Self {
        self.register(format, Arc::new(loader));
        self
    }

    pub fn supports(&self, format: &ImageFormat) -> bool {
        self.loaders.contains_key(format)
    }

    pub fn load(&self, path: &Path) -> Result<LoadedImage, LoadError> {
        let unsupported = || LoadError::UnsupportedFormat {
            extension: path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        let format = ImageFormat::from_path(path).ok_or_else(unsupported)?;
        let loader = self.loaders.get(&format).ok_or_else(unsupported)?;
        loader.load(path)
    }
}

impl Default for ImageLoaderFactory {
    fn default() -> Self {
        Self::new(false)
    }
}
