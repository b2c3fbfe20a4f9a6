use std::path::PathBuf;

/// Only copy these file names (case-insensitive match)
pub const TARGET_FILES: &[&str] = &["merged.jpg", "primary.jpg", "secondary.jpg", "video.mp4"];

pub fn is_target_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    TARGET_FILES.contains(&lower.as_str())
}

/// A target file found inside an accepted timestamp folder.
#[derive(Debug, Clone)]
pub struct MediaFile {
    /// Full path of the source file
    pub source: PathBuf,
    /// Name of the timestamp folder it came from
    pub folder_name: String,
    /// Just the filename, original case
    pub filename: String,
}

impl MediaFile {
    pub fn new(source: PathBuf, folder_name: String, filename: String) -> Self {
        Self {
            source,
            folder_name,
            filename,
        }
    }

    /// `<folder-name>-<original-filename>`
    pub fn dest_filename(&self) -> String {
        format!("{}-{}", self.folder_name, self.filename)
    }
}
