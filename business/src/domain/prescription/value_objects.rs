use super::errors::PrescriptionError;

/// Image formats accepted by the text recognition service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMediaType {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
}

impl ImageMediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            ImageMediaType::Jpeg => "image/jpeg",
            ImageMediaType::Png => "image/png",
            ImageMediaType::Gif => "image/gif",
            ImageMediaType::Webp => "image/webp",
            ImageMediaType::Bmp => "image/bmp",
            ImageMediaType::Tiff => "image/tiff",
        }
    }
}

impl std::fmt::Display for ImageMediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mime())
    }
}

impl std::str::FromStr for ImageMediaType {
    type Err = PrescriptionError;

    /// Parses a MIME type, ignoring case and any `;`-separated parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Ok(ImageMediaType::Jpeg),
            "image/png" => Ok(ImageMediaType::Png),
            "image/gif" => Ok(ImageMediaType::Gif),
            "image/webp" => Ok(ImageMediaType::Webp),
            "image/bmp" => Ok(ImageMediaType::Bmp),
            "image/tiff" => Ok(ImageMediaType::Tiff),
            _ => Err(PrescriptionError::UnsupportedMediaType(s.to_string())),
        }
    }
}
