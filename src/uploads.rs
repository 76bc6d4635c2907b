use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use chrono::Utc;
use tracing::{error, warn};

use crate::{Error, Result};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

/// An image read out of a multipart field, validated but not yet written to disk.
#[derive(Debug)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub extension: String,
}

pub fn is_allowed_type(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}

/// Extension of the client-supplied filename, dot included. Empty when the
/// name has none; the stored filename then carries no extension either.
pub fn extension_for(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

/// Reads and validates the `image` part of a post form.
pub async fn read_image_field(field: Field<'_>) -> Result<ImageUpload> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    if !is_allowed_type(&content_type) {
        return Err(Error::BadRequest(
            "Only images (JPG, PNG, GIF) are allowed".to_string(),
        ));
    }

    let extension = extension_for(field.file_name().unwrap_or_default());

    let data = field
        .bytes()
        .await
        .map_err(|_| Error::BadRequest("Invalid form data".to_string()))?;

    if data.len() > MAX_IMAGE_BYTES {
        return Err(Error::BadRequest("Image must be 5MB or smaller".to_string()));
    }

    Ok(ImageUpload {
        data: data.to_vec(),
        extension,
    })
}

/// Writes the upload under `dir` with a timestamp-derived name and returns the
/// bare filename stored on the post record.
pub async fn save_image(dir: &str, upload: &ImageUpload) -> Result<String> {
    let filename = format!("{}{}", Utc::now().timestamp_millis(), upload.extension);
    let path = PathBuf::from(dir).join(&filename);

    tokio::fs::create_dir_all(dir).await.map_err(|err| {
        error!("Failed to create uploads directory {dir}: {err}");
        Error::InternalServerError
    })?;

    tokio::fs::write(&path, &upload.data).await.map_err(|err| {
        error!("Failed to write image {}: {err}", path.display());
        Error::InternalServerError
    })?;

    Ok(filename)
}

/// Removes a stored image. A missing file is not an error; the record and the
/// file are not updated atomically, so the file may already be gone.
pub async fn delete_image(dir: &str, filename: &str) {
    let path = PathBuf::from(dir).join(filename);
    if let Err(err) = tokio::fs::remove_file(&path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to delete image {}: {err}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_only_the_three_image_types() {
        assert!(is_allowed_type("image/jpeg"));
        assert!(is_allowed_type("image/png"));
        assert!(is_allowed_type("image/gif"));
        assert!(!is_allowed_type("image/webp"));
        assert!(!is_allowed_type("application/pdf"));
        assert!(!is_allowed_type(""));
    }

    #[test]
    fn derives_the_extension_from_the_original_name() {
        assert_eq!(extension_for("photo.png"), ".png");
        assert_eq!(extension_for("archive.tar.gz"), ".gz");
        assert_eq!(extension_for("no_extension"), "");
        assert_eq!(extension_for(""), "");
    }

    #[tokio::test]
    async fn saves_and_deletes_an_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();

        let upload = ImageUpload {
            data: vec![0xFF, 0xD8, 0xFF],
            extension: ".jpg".to_string(),
        };

        let filename = save_image(dir_str, &upload).await.unwrap();
        assert!(filename.ends_with(".jpg"));

        let path = dir.path().join(&filename);
        assert_eq!(tokio::fs::read(&path).await.unwrap(), upload.data);

        delete_image(dir_str, &filename).await;
        assert!(!path.exists());

        // deleting again is a no-op
        delete_image(dir_str, &filename).await;
    }
}
