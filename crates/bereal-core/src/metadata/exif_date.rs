use std::fs;
use std::io::Cursor;
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use exif::experimental::Writer;
use exif::{Exif, Field, In, Reader, Tag, Value};

use super::jpeg;
use super::MetadataWriter;
use crate::error::ExifWriteError;
use crate::timestamp::exif_datetime_string;

/// Capture-time tags rewritten on every file.
/// DateTime lives in the 0th IFD, the other two in the Exif IFD.
const DATE_TAGS: [Tag; 3] = [Tag::DateTime, Tag::DateTimeOriginal, Tag::DateTimeDigitized];

/// Offsets and pointers that the writer lays out itself.
const LAYOUT_TAGS: &[Tag] = &[
    Tag::ExifIFDPointer,
    Tag::GPSInfoIFDPointer,
    Tag::InteropIFDPointer,
    Tag::JPEGInterchangeFormat,
    Tag::JPEGInterchangeFormatLength,
    Tag::StripOffsets,
    Tag::StripByteCounts,
    Tag::TileOffsets,
    Tag::TileByteCounts,
];

/// Rewrites the EXIF capture time of JPEG files in place.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifDateWriter;

impl ExifDateWriter {
    pub fn new() -> Self {
        Self
    }

    fn rewrite(&self, path: &Path, dt: &DateTime<FixedOffset>) -> Result<(), ExifWriteError> {
        let data = fs::read(path)?;
        let existing = match jpeg::find_exif(&data)? {
            Some(tiff) => Some(Reader::new().read_raw(tiff.to_vec())?),
            None => None,
        };

        let stamp = exif_datetime_string(dt).into_bytes();
        let tiff = build_tiff(existing.as_ref(), &stamp)?;
        let out = jpeg::replace_exif(&data, &tiff)?;
        fs::write(path, out)?;
        Ok(())
    }
}

impl MetadataWriter for ExifDateWriter {
    fn name(&self) -> &'static str {
        "exif"
    }

    fn write_capture_time(&self, path: &Path, dt: &DateTime<FixedOffset>) -> bool {
        match self.rewrite(path, dt) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "EXIF not updated");
                false
            }
        }
    }
}

fn keep_field(field: &Field) -> bool {
    let in_known_ifd = field.ifd_num == In::PRIMARY || field.ifd_num == In::THUMBNAIL;
    let replaced = field.ifd_num == In::PRIMARY && DATE_TAGS.contains(&field.tag);
    in_known_ifd && !replaced && !LAYOUT_TAGS.contains(&field.tag)
}

fn thumbnail_jpeg(exif: &Exif) -> Option<&[u8]> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    let len = exif
        .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)?
        .value
        .get_uint(0)? as usize;
    exif.buf().get(offset..offset.checked_add(len)?)
}

/// Serialise a TIFF block with the date tags set to `stamp`, keeping every
/// other primary and thumbnail field of `existing`.
fn build_tiff(existing: Option<&Exif>, stamp: &[u8]) -> Result<Vec<u8>, ExifWriteError> {
    let mut fields: Vec<Field> = existing
        .map(|e| e.fields().filter(|f| keep_field(f)).cloned().collect())
        .unwrap_or_default();
    for tag in DATE_TAGS {
        fields.push(Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![stamp.to_vec()]),
        });
    }

    let thumbnail = existing.and_then(thumbnail_jpeg);
    let little_endian = existing.map_or(false, |e| e.little_endian());

    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    if let Some(jpeg) = thumbnail {
        writer.set_jpeg(jpeg, In::THUMBNAIL);
    }

    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, little_endian)?;
    Ok(buf.into_inner())
}
