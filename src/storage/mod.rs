use std::io;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, Rgb, RgbImage};
use uuid::Uuid;

use crate::error::ApiError;

/// File extensions accepted for portfolio uploads.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Maximum accepted upload size: 16 MiB.
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Filesystem store for portfolio images.
///
/// Images live flat in one shared directory, addressed by their stored
/// filename. Stored names are always a random hex prefix plus a sanitized
/// original name, so they never collide and never contain path separators.
pub struct ImageStore {
    base_dir: PathBuf,
}

impl ImageStore {
    /// Open (creating if needed) the store rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        std::fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Whether `filename` carries an accepted image extension.
    pub fn allowed_file(filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                ALLOWED_EXTENSIONS.contains(&ext.as_str())
            })
    }

    /// Full path of a stored name, or `None` if the name could escape the
    /// store directory.
    pub fn resolve(&self, stored_name: &str) -> Option<PathBuf> {
        if stored_name.is_empty()
            || stored_name.contains('/')
            || stored_name.contains('\\')
            || stored_name.contains("..")
        {
            return None;
        }
        Some(self.base_dir.join(stored_name))
    }

    /// Validate and persist an upload; returns the generated stored name.
    pub async fn save(&self, bytes: &[u8], suggested_name: &str) -> Result<String, ApiError> {
        if !Self::allowed_file(suggested_name) {
            return Err(ApiError::InvalidMediaType(suggested_name.to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ApiError::PayloadTooLarge(bytes.len()));
        }

        let stored_name = format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            sanitize_filename(suggested_name)
        );
        let path = self.base_dir.join(&stored_name);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(file = %stored_name, "saved portfolio image");
        Ok(stored_name)
    }

    /// Remove a stored image. `Ok(false)` when the file was already gone.
    pub async fn delete(&self, stored_name: &str) -> io::Result<bool> {
        let Some(path) = self.resolve(stored_name) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn exists(&self, stored_name: &str) -> bool {
        match self.resolve(stored_name) {
            Some(path) => tokio::fs::metadata(&path).await.is_ok(),
            None => false,
        }
    }

    /// Read a stored image. `Ok(None)` when missing.
    pub async fn read(&self, stored_name: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(path) = self.resolve(stored_name) else {
            return Ok(None);
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write bytes under an exact stored name, used to materialize
    /// synthesized placeholders so later requests hit the disk copy.
    pub async fn persist(&self, stored_name: &str, bytes: &[u8]) -> io::Result<()> {
        let Some(path) = self.resolve(stored_name) else {
            return Err(io::Error::other(format!(
                "refusing to persist unsafe filename: {stored_name}"
            )));
        };
        tokio::fs::write(&path, bytes).await
    }
}

/// Reduce a client-supplied filename to a safe flat name: final path
/// component only, restricted to `[A-Za-z0-9._-]`, no leading dots.
fn sanitize_filename(name: &str) -> String {
    let last = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "image".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Synthesize a 400x250 placeholder JPEG for a missing portfolio image.
///
/// Solid fill with a white border, colored by service keywords in the
/// requested filename: printing → red, seo → green, otherwise blue.
pub fn placeholder_jpeg(filename: &str) -> Result<Vec<u8>, image::ImageError> {
    const WIDTH: u32 = 400;
    const HEIGHT: u32 = 250;
    const INSET: u32 = 10;
    const BORDER: u32 = 5;
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    let lower = filename.to_lowercase();
    let fill = if lower.contains("print") {
        Rgb([200, 50, 50])
    } else if lower.contains("seo") {
        Rgb([50, 150, 50])
    } else {
        Rgb([50, 50, 200])
    };

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, fill);

    // Border frame from (10,10) to (389,239), 5px thick.
    let (left, right) = (INSET, WIDTH - INSET - 1);
    let (top, bottom) = (INSET, HEIGHT - INSET - 1);
    for x in left..=right {
        for t in 0..BORDER {
            img.put_pixel(x, top + t, WHITE);
            img.put_pixel(x, bottom - t, WHITE);
        }
    }
    for y in top..=bottom {
        for t in 0..BORDER {
            img.put_pixel(left + t, y, WHITE);
            img.put_pixel(right - t, y, WHITE);
        }
    }

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg)?;
    Ok(buf.into_inner())
}
