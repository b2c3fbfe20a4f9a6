//! Best-effort rewriting of capture-time tags embedded in copied files.

#[cfg(feature = "exif")]
mod exif_date;
#[cfg(feature = "exif")]
mod jpeg;

use std::path::Path;

use chrono::{DateTime, FixedOffset};

#[cfg(feature = "exif")]
pub use exif_date::ExifDateWriter;

/// Writes a capture time into a file's embedded metadata.
///
/// Implementations never fail loudly: `false` means "not updated" for any
/// reason, and the caller carries on.
pub trait MetadataWriter {
    fn name(&self) -> &'static str;

    fn write_capture_time(&self, path: &Path, dt: &DateTime<FixedOffset>) -> bool;
}

/// Stand-in used when metadata writing is off or unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWriter;

impl MetadataWriter for NoopWriter {
    fn name(&self) -> &'static str {
        "none"
    }

    fn write_capture_time(&self, _path: &Path, _dt: &DateTime<FixedOffset>) -> bool {
        false
    }
}

/// Pick the metadata writer for this run.
pub fn detect(enabled: bool) -> Box<dyn MetadataWriter> {
    if !enabled {
        return Box::new(NoopWriter);
    }

    #[cfg(feature = "exif")]
    {
        Box::new(ExifDateWriter::new())
    }

    #[cfg(not(feature = "exif"))]
    {
        tracing::warn!("built without the `exif` feature; embedded dates will not be updated");
        Box::new(NoopWriter)
    }
}
