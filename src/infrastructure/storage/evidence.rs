use std::path::{Path, PathBuf};
use tokio::fs;

use crate::constants::ALLOWED_EVIDENCE_EXTENSIONS;
use crate::errors::AppError;

const MAX_STEM_LEN: usize = 180;

/// Whether `filename` carries an allow-listed evidence extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EVIDENCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Reduces a client-supplied filename to a safe `stem.ext` form: directory
/// components dropped, stem slugified, extension lowercased.
pub fn secure_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();
    let (stem, ext) = base.rsplit_once('.')?;

    let ext = ext.to_lowercase();
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }

    // Stored reference column holds at most 200 chars
    let stem = slug::slugify(stem);
    let stem = stem.get(..MAX_STEM_LEN).unwrap_or(&stem).trim_end_matches('-').to_string();
    let stem = if stem.is_empty() { "evidence".to_string() } else { stem };

    Some(format!("{stem}.{ext}"))
}

/// Best-effort content type: magic bytes first, then the extension.
pub fn content_type_for(filename: &str, bytes: &[u8]) -> &'static str {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type();
    }

    match filename.rsplit_once('.').map(|(_, ext)| ext) {
        Some("txt") => "text/plain; charset=utf-8",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// The shared upload directory. Files are stored flat under their sanitized
/// name, so a later upload with the same name replaces the earlier file.
#[derive(Debug, Clone)]
pub struct EvidenceStore {
    dir: PathBuf,
}

impl EvidenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        EvidenceStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Copies an uploaded temp file into the store. Returns the stored name,
    /// or `None` when there is no file or its extension is not allowed.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        source: &Path,
    ) -> Result<Option<String>, AppError> {
        let Some(original_name) = original_name.filter(|n| !n.trim().is_empty()) else {
            return Ok(None);
        };

        if !allowed_file(original_name) {
            tracing::warn!(file = original_name, "Ignoring evidence file with disallowed extension");
            return Ok(None);
        }

        let Some(filename) = secure_filename(original_name) else {
            tracing::warn!(file = original_name, "Ignoring evidence file with unusable name");
            return Ok(None);
        };

        fs::copy(source, self.dir.join(&filename)).await?;
        tracing::info!(file = %filename, "Stored evidence file");

        Ok(Some(filename))
    }

    /// Reads a stored file back. Only names that are already in sanitized
    /// form resolve, which keeps lookups inside the upload directory.
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        let not_found = || AppError::NotFound("File not found".to_string());

        if secure_filename(filename).as_deref() != Some(filename) || !allowed_file(filename) {
            return Err(not_found());
        }

        match fs::read(self.dir.join(filename)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found()),
            Err(e) => Err(e.into()),
        }
    }
}
