//! Disk storage for uploaded files.

use campus_config::UploadConfig;
use campus_core::{CrmError, CrmResult};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Modules that accept file uploads.
pub const UPLOAD_MODULES: [&str; 2] = ["document", "institute"];

/// Writes uploads under `<root>/<module>/` with generated names.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
    max_file_bytes: usize,
    allowed_mime_types: Vec<String>,
}

impl UploadStore {
    #[must_use]
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root_dir),
            max_file_bytes: config.max_file_bytes,
            allowed_mime_types: config.allowed_mime_types.clone(),
        }
    }

    /// Directory served under `/uploads`.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub const fn max_file_bytes(&self) -> usize {
        self.max_file_bytes
    }

    /// Rejects files of a type or size the store does not accept.
    pub fn check(&self, content_type: &str, len: usize) -> CrmResult<()> {
        if !self
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(content_type))
        {
            return Err(CrmError::validation(format!(
                "file: Unsupported file type '{content_type}'"
            )));
        }
        if len > self.max_file_bytes {
            return Err(CrmError::validation(format!(
                "file: File exceeds the {} byte limit",
                self.max_file_bytes
            )));
        }
        Ok(())
    }

    /// Stores `bytes` and returns the public path of the file.
    pub async fn save(
        &self,
        module: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> CrmResult<String> {
        if !UPLOAD_MODULES.contains(&module) {
            return Err(CrmError::not_found("Upload module", module));
        }
        self.check(content_type, bytes.len())?;

        let dir = self.root.join(module);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| CrmError::internal(format!("create {}: {e}", dir.display())))?;

        let stored = stored_name(file_name);
        let path = dir.join(&stored);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CrmError::internal(format!("write {}: {e}", path.display())))?;

        info!(module, file = %stored, size = bytes.len(), "Stored upload");
        Ok(format!("/uploads/{module}/{stored}"))
    }
}

/// `<24 hex><unix millis><.ext>`; the client's name only contributes its
/// extension.
fn stored_name(file_name: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{}{}{}", &random[..24], Utc::now().timestamp_millis(), ext)
}
