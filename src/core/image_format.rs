use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Raster(RasterFormat),
    Medical(MedicalFormat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Jpeg,
    Png,
    Tiff,
    Bmp,
    Gif,
    Webp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MedicalFormat {
    Dicom,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 7] = [
        ImageFormat::Raster(RasterFormat::Jpeg),
        ImageFormat::Raster(RasterFormat::Png),
        ImageFormat::Raster(RasterFormat::Tiff),
        ImageFormat::Raster(RasterFormat::Bmp),
        ImageFormat::Raster(RasterFormat::Gif),
        ImageFormat::Raster(RasterFormat::Webp),
        ImageFormat::Medical(MedicalFormat::Dicom),
    ];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Raster(RasterFormat::Jpeg)),
            "png" => Some(ImageFormat::Raster(RasterFormat::Png)),
            "tiff" | "tif" => Some(ImageFormat::Raster(RasterFormat::Tiff)),
            "bmp" => Some(ImageFormat::Raster(RasterFormat::Bmp)),
            "gif" => Some(ImageFormat::Raster(RasterFormat::Gif)),
            "webp" => Some(ImageFormat::Raster(RasterFormat::Webp)),
            "dcm" | "dicom" => Some(ImageFormat::Medical(MedicalFormat::Dicom)),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }

    pub fn get_supported_extensions() -> Vec<&'static str> {
        vec![
            "jpg", "jpeg", "png", "tif", "tiff", "bmp", "gif", "webp", "dcm", "dicom",
        ]
    }
}
