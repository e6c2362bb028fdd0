use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, ImageFormat};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// URL prefix under which stored images are served
pub const PUBLIC_PREFIX: &str = "/uploads";

pub const DEFAULT_MAX_DIMENSION: u32 = 1920;

const JPEG_QUALITY: u8 = 85;

/// Validates, downsizes and persists uploaded images on the local filesystem
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    max_dimension: u32,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, max_dimension: u32) -> Self {
        Self {
            root: root.into(),
            max_dimension,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Saves an uploaded image under `subfolder` and returns its public reference
    ///
    /// Images whose longest side exceeds the configured bound are scaled down
    /// with Lanczos3, keeping aspect ratio. Undecodable input is rejected.
    pub async fn save(
        &self,
        bytes: Vec<u8>,
        original_filename: Option<&str>,
        subfolder: &str,
    ) -> AppResult<String> {
        if bytes.is_empty() {
            return Err(AppError::InvalidInput("Uploaded file is empty".to_string()));
        }
        let subfolder = sanitize_relative(subfolder)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid upload folder: {}", subfolder)))?;

        let requested_format = original_filename
            .and_then(|name| Path::new(name).extension())
            .and_then(ImageFormat::from_extension);
        let max_dimension = self.max_dimension;

        // Decoding, resizing and encoding are CPU-bound
        let (encoded, format) = tokio::task::spawn_blocking(move || {
            process_image(&bytes, requested_format, max_dimension)
        })
        .await
        .map_err(|e| AppError::Internal(format!("Image processing task failed: {}", e)))??;

        let extension = format.extensions_str().first().copied().unwrap_or("img");
        let filename = format!("{}.{}", Uuid::new_v4(), extension);

        let folder = self.root.join(&subfolder);
        tokio::fs::create_dir_all(&folder).await?;
        tokio::fs::write(folder.join(&filename), &encoded).await?;

        let reference = format!(
            "{}/{}/{}",
            PUBLIC_PREFIX,
            subfolder.to_string_lossy().replace('\\', "/"),
            filename
        );

        tracing::info!(
            reference = %reference,
            bytes = encoded.len(),
            format = ?format,
            "Stored uploaded image"
        );

        Ok(reference)
    }

    /// Maps a public reference back to a path inside the upload root
    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let relative = reference
            .strip_prefix(PUBLIC_PREFIX)?
            .trim_start_matches('/');
        let relative = sanitize_relative(relative)?;
        Some(self.root.join(relative))
    }

    /// Deletes a stored image; returns whether a file was removed
    pub async fn delete(&self, reference: &str) -> bool {
        let Some(path) = self.resolve(reference) else {
            tracing::warn!(reference = %reference, "Refusing to delete image outside upload root");
            return false;
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Error deleting image");
                false
            }
        }
    }
}

/// Accepts only plain relative paths (no `..`, no root, no prefixes)
fn sanitize_relative(path: &str) -> Option<PathBuf> {
    let path = Path::new(path);
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if clean.as_os_str().is_empty() {
        None
    } else {
        Some(clean)
    }
}

/// Decodes, bounds and re-encodes an image
fn process_image(
    bytes: &[u8],
    requested_format: Option<ImageFormat>,
    max_dimension: u32,
) -> AppResult<(Vec<u8>, ImageFormat)> {
    let sniffed = image::guess_format(bytes)
        .map_err(|_| AppError::InvalidInput("Uploaded file is not a recognized image".to_string()))?;
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AppError::InvalidInput(format!("Uploaded file is not a valid image: {}", e)))?;

    let resized = bound_dimensions(decoded, max_dimension);

    let format = requested_format
        .filter(|f| f.writing_enabled())
        .or_else(|| Some(sniffed).filter(|f| f.writing_enabled()))
        .unwrap_or(ImageFormat::Png);

    let mut encoded = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)
                .map_err(|e| AppError::Internal(format!("Failed to encode image: {}", e)))?;
        }
        other => {
            resized
                .write_to(&mut Cursor::new(&mut encoded), other)
                .map_err(|e| AppError::Internal(format!("Failed to encode image: {}", e)))?;
        }
    }

    Ok((encoded, format))
}

/// Scales the image down so its longest side is at most `max_dimension`
fn bound_dimensions(image: DynamicImage, max_dimension: u32) -> DynamicImage {
    if image.width().max(image.height()) <= max_dimension {
        return image;
    }
    image.resize(max_dimension, max_dimension, FilterType::Lanczos3)
}
