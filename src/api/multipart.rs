use crate::api::ApiError;
use crate::models::PropertyDraft;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::debug;

/// An image attached to a new listing
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self {
            mime: guess_mime(&file_name),
            file_name,
            bytes,
        })
    }
}

fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Everything a create request carries besides the listing itself
#[derive(Debug, Clone)]
pub struct NewListing {
    pub draft: PropertyDraft,
    pub owner_id: i64,
    pub lister_id: i64,
    pub images: Vec<ImageFile>,
}

/// The listing as a JSON-typed `property` part
fn property_part(draft: &PropertyDraft) -> Result<Part, ApiError> {
    let json = serde_json::to_string(draft)?;
    Ok(Part::text(json).mime_str("application/json")?)
}

/// `property` + `ownerId` + `listerId` + zero or more `files`
pub fn create_form(listing: &NewListing) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .part("property", property_part(&listing.draft)?)
        .text("ownerId", listing.owner_id.to_string())
        .text("listerId", listing.lister_id.to_string());

    for image in &listing.images {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(image.mime)?;
        form = form.part("files", part);
    }

    Ok(form)
}

/// Updates send only the `property` part
pub fn update_form(draft: &PropertyDraft) -> Result<Form, ApiError> {
    Ok(Form::new().part("property", property_part(draft)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(guess_mime("salon.JPG"), "image/jpeg");
        assert_eq!(guess_mime("plan.png"), "image/png");
        assert_eq!(guess_mime("notes"), "application/octet-stream");
    }

    #[tokio::test]
    async fn reads_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mutfak.webp");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let image = ImageFile::from_path(&path).await.unwrap();

        assert_eq!(image.file_name, "mutfak.webp");
        assert_eq!(image.mime, "image/webp");
        assert_eq!(image.bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn missing_image_is_a_file_error() {
        let err = ImageFile::from_path(Path::new("/nonexistent/photo.jpg"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::File { .. }));
    }
}
