use thiserror::Error;

/// Why a top-level directory name was not accepted as a capture timestamp.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolderNameError {
    #[error("folder name does not match YYYY-MM-DD-HH-MM-SS: {0}")]
    PatternMismatch(String),

    #[error("folder name is not a valid calendar date/time: {0}")]
    InvalidDateTime(String),
}

/// Failure while rewriting the EXIF block of a copied file.
///
/// Never leaves the metadata module: the writer reports these through
/// `tracing` and answers `false`.
#[derive(Error, Debug)]
pub enum ExifWriteError {
    #[error("not a JPEG file")]
    NotJpeg,

    #[error("malformed JPEG: {0}")]
    MalformedJpeg(&'static str),

    #[error("EXIF block of {0} bytes does not fit in an APP1 segment")]
    TooLarge(usize),

    #[cfg(feature = "exif")]
    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
