use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const DEFAULT_DEPARTMENTS: &[&str] = &[
    "Computer Science",
    "Electronics",
    "Mechanical",
    "Civil Engineering",
    "Chemical Engineering",
    "Information Technology",
];

/// Evidence file extensions accepted on upload, lowercase.
pub const ALLOWED_EVIDENCE_EXTENSIONS: &[&str] = &["txt", "pdf", "png", "jpg", "jpeg", "gif"];
