pub mod error;
pub mod folder_name;
pub mod media;
pub mod metadata;
pub mod timestamp;
pub mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

use crate::media::MediaFile;
use crate::metadata::MetadataWriter;
use crate::timestamp::ZoneMode;

pub use error::FolderNameError;

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Directory holding the timestamp-named folders
    pub source: PathBuf,
    /// Flat output directory, created if missing
    pub dest: PathBuf,
    /// Interpret folder times as UTC instead of the host's current offset
    pub use_utc: bool,
    /// Also rewrite embedded EXIF capture times
    pub write_exif: bool,
    /// Abort the whole run on the first copy/timestamp error
    pub fail_fast: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    pub copied: u64,
    pub skipped_folders: u64,
    /// Files whose copy or timestamp write failed (skip-and-continue mode)
    pub failed_files: u64,
    pub exif_updated: u64,
    /// Resolved destination directory
    pub dest: PathBuf,
}

/// Type alias for progress callback: (stage, current, total, message)
pub type ProgressCallback<'a> = dyn Fn(&str, u64, u64, &str) + Send + Sync + 'a;

/// Everything fixed for the duration of one run.
struct RunContext {
    dest: PathBuf,
    zone: ZoneMode,
    metadata: Box<dyn MetadataWriter>,
    fail_fast: bool,
}

/// Entries of `dir` sorted by file name.
fn sorted_entries(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

/// Target files directly inside an accepted folder.
fn collect_media(folder: &Path, folder_name: &str) -> anyhow::Result<Vec<MediaFile>> {
    let mut media = Vec::new();
    for child in sorted_entries(folder)? {
        if !child.is_file() {
            continue;
        }
        let Some(filename) = child.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !media::is_target_file(filename) {
            continue;
        }
        let filename = filename.to_string();
        media.push(MediaFile::new(child, folder_name.to_string(), filename));
    }
    Ok(media)
}

/// Copy one file and restamp it. Returns the destination and whether EXIF was updated.
fn process_file(
    ctx: &RunContext,
    m: &MediaFile,
    dt: &DateTime<FixedOffset>,
) -> anyhow::Result<(PathBuf, bool)> {
    let out_path = writer::unique_path(&ctx.dest.join(m.dest_filename()));

    writer::transfer(&m.source, &out_path).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            m.source.display(),
            out_path.display()
        )
    })?;
    writer::set_fs_times(&out_path, dt)
        .with_context(|| format!("Failed to set timestamps on {}", out_path.display()))?;

    let exif_updated = ctx.metadata.write_capture_time(&out_path, dt);
    Ok((out_path, exif_updated))
}

/// Copy the target files of every timestamp folder under `options.source`
/// into `options.dest`, stamping each copy with its folder's time.
pub fn process(
    options: &ProcessOptions,
    progress_callback: &ProgressCallback<'_>,
) -> anyhow::Result<ProcessResult> {
    if !options.source.is_dir() {
        anyhow::bail!(
            "Source directory does not exist or is not a directory: {}",
            options.source.display()
        );
    }
    let source = fs::canonicalize(&options.source)
        .with_context(|| format!("Failed to resolve {}", options.source.display()))?;

    fs::create_dir_all(&options.dest)
        .with_context(|| format!("Failed to create {}", options.dest.display()))?;
    let dest = fs::canonicalize(&options.dest)
        .with_context(|| format!("Failed to resolve {}", options.dest.display()))?;

    let ctx = RunContext {
        dest,
        zone: ZoneMode::from_utc_flag(options.use_utc),
        metadata: metadata::detect(options.write_exif),
        fail_fast: options.fail_fast,
    };
    tracing::info!(
        source = %source.display(),
        dest = %ctx.dest.display(),
        zone = ?ctx.zone,
        metadata = ctx.metadata.name(),
        "Collecting media"
    );

    let mut result = ProcessResult {
        dest: ctx.dest.clone(),
        ..ProcessResult::default()
    };

    let entries = sorted_entries(&source)?;
    let total = entries.len() as u64;

    for (i, entry) in entries.iter().enumerate() {
        let name = entry
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        progress_callback("copy", i as u64, total, &name);

        if !entry.is_dir() {
            continue;
        }

        let stamp = match entry
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| FolderNameError::PatternMismatch(name.clone()))
            .and_then(folder_name::parse_folder_name)
        {
            Ok(stamp) => stamp,
            Err(e) => {
                tracing::debug!(folder = %entry.display(), "Skipping folder: {}", e);
                result.skipped_folders += 1;
                continue;
            }
        };
        let dt = timestamp::resolve(&stamp, ctx.zone);

        for m in collect_media(entry, &name)? {
            match process_file(&ctx, &m, &dt) {
                Ok((out_path, exif_updated)) => {
                    tracing::debug!(
                        source = %m.source.display(),
                        dest = %out_path.display(),
                        exif_updated,
                        "Copied"
                    );
                    if exif_updated {
                        result.exif_updated += 1;
                    }
                    result.copied += 1;
                }
                Err(e) if !ctx.fail_fast => {
                    tracing::warn!("{:#}", e);
                    result.failed_files += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    progress_callback("copy", total, total, "done");
    tracing::info!(
        copied = result.copied,
        skipped_folders = result.skipped_folders,
        failed_files = result.failed_files,
        exif_updated = result.exif_updated,
        "Finished"
    );

    Ok(result)
}
