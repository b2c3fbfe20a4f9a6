//! Just enough JPEG marker parsing to swap the EXIF APP1 segment.

use crate::error::ExifWriteError;

pub const SOI: [u8; 2] = [0xFF, 0xD8];
const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;
const EXIF_HEADER: &[u8] = b"Exif\0\0";

/// A header segment, `start` at its 0xFF byte, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    marker: u8,
    start: usize,
    end: usize,
}

impl Segment {
    fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        // standalone markers have no length field
        data.get(self.start + 4..self.end).unwrap_or(&[])
    }

    fn is_exif(&self, data: &[u8]) -> bool {
        self.marker == APP1 && self.payload(data).starts_with(EXIF_HEADER)
    }
}

/// Segments between SOI and the start of scan (or EOI).
fn header_segments(data: &[u8]) -> Result<Vec<Segment>, ExifWriteError> {
    if !data.starts_with(&SOI) {
        return Err(ExifWriteError::NotJpeg);
    }

    let mut segments = Vec::new();
    let mut pos = SOI.len();
    loop {
        if pos + 2 > data.len() {
            return Err(ExifWriteError::MalformedJpeg("truncated before start of scan"));
        }
        if data[pos] != 0xFF {
            return Err(ExifWriteError::MalformedJpeg("expected marker"));
        }
        // fill bytes
        while pos + 2 < data.len() && data[pos + 1] == 0xFF {
            pos += 1;
        }
        let start = pos;
        let marker = data[pos + 1];
        match marker {
            SOS | EOI => return Ok(segments),
            0x01 | 0xD0..=0xD7 => {
                segments.push(Segment { marker, start, end: pos + 2 });
                pos += 2;
            }
            _ => {
                if pos + 4 > data.len() {
                    return Err(ExifWriteError::MalformedJpeg("truncated segment length"));
                }
                let len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
                if len < 2 {
                    return Err(ExifWriteError::MalformedJpeg("invalid segment length"));
                }
                let end = pos + 2 + len;
                if end > data.len() {
                    return Err(ExifWriteError::MalformedJpeg("segment runs past end of file"));
                }
                segments.push(Segment { marker, start, end });
                pos = end;
            }
        }
    }
}

/// Raw TIFF bytes of the first EXIF APP1 segment, if there is one.
pub fn find_exif(data: &[u8]) -> Result<Option<&[u8]>, ExifWriteError> {
    let segments = header_segments(data)?;
    Ok(segments
        .iter()
        .find(|s| s.is_exif(data))
        .map(|s| &s.payload(data)[EXIF_HEADER.len()..]))
}

/// Rebuild `data` with a single EXIF segment holding `tiff`.
///
/// The new segment takes the place of the first existing EXIF segment; any
/// further EXIF segments are dropped. Without one it goes right after
/// SOI, or after a leading APP0 (JFIF) segment.
pub fn replace_exif(data: &[u8], tiff: &[u8]) -> Result<Vec<u8>, ExifWriteError> {
    let segments = header_segments(data)?;

    let seg_len = 2 + EXIF_HEADER.len() + tiff.len();
    if seg_len > u16::MAX as usize {
        return Err(ExifWriteError::TooLarge(tiff.len()));
    }

    let exif_segments: Vec<&Segment> = segments.iter().filter(|s| s.is_exif(data)).collect();
    let insert_at = match (exif_segments.first(), segments.first()) {
        (Some(s), _) => s.start,
        (None, Some(s)) if s.marker == APP0 => s.end,
        _ => SOI.len(),
    };

    let mut out = Vec::with_capacity(data.len() + seg_len + 2);
    out.extend_from_slice(&data[..insert_at]);
    out.extend_from_slice(&[0xFF, APP1]);
    out.extend_from_slice(&(seg_len as u16).to_be_bytes());
    out.extend_from_slice(EXIF_HEADER);
    out.extend_from_slice(tiff);

    let mut pos = insert_at;
    for s in exif_segments {
        out.extend_from_slice(&data[pos..s.start]);
        pos = s.end;
    }
    out.extend_from_slice(&data[pos..]);
    Ok(out)
}
