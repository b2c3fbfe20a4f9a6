use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};

use crate::folder_name::FolderStamp;

/// How folder wall-clock times are anchored to an absolute instant.
///
/// `Local` carries the host offset captured once when the run starts. The
/// offset that was in effect at the folder's own date is not looked up, so a
/// folder from the other side of a DST change is off by the DST delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneMode {
    Utc,
    Local(FixedOffset),
}

impl ZoneMode {
    /// Capture the host's current UTC offset.
    pub fn local() -> Self {
        ZoneMode::Local(Local::now().offset().fix())
    }

    pub fn from_utc_flag(use_utc: bool) -> Self {
        if use_utc {
            ZoneMode::Utc
        } else {
            ZoneMode::local()
        }
    }

    pub fn offset(&self) -> FixedOffset {
        match self {
            ZoneMode::Utc => Utc.fix(),
            ZoneMode::Local(offset) => *offset,
        }
    }
}

/// Interpret the folder's wall-clock fields in the given zone mode.
pub fn resolve(stamp: &FolderStamp, mode: ZoneMode) -> DateTime<FixedOffset> {
    // A fixed offset has exactly one mapping for every wall-clock time
    mode.offset().from_utc_datetime(&(stamp.naive() - mode.offset()))
}

/// Wall-clock time in EXIF's `YYYY:MM:DD HH:MM:SS` form.
pub fn exif_datetime_string(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y:%m:%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::folder_name::parse_folder_name;

    #[test]
    fn test_resolve_utc() {
        let stamp = parse_folder_name("2022-11-07-15-09-47").unwrap();
        let dt = resolve(&stamp, ZoneMode::Utc);
        assert_eq!(dt, Utc.with_ymd_and_hms(2022, 11, 7, 15, 9, 47).unwrap());
        assert_eq!(dt.timestamp(), 1_667_833_787);
    }

    #[test]
    fn test_resolve_fixed_local_offset() {
        let stamp = parse_folder_name("2022-11-07-15-09-47").unwrap();
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let dt = resolve(&stamp, ZoneMode::Local(tokyo));
        assert_eq!(dt.naive_local(), stamp.naive());
        assert_eq!(dt.timestamp(), 1_667_833_787 - 9 * 3600);

        let west = FixedOffset::west_opt(5 * 3600 + 1800).unwrap();
        let dt = resolve(&stamp, ZoneMode::Local(west));
        assert_eq!(dt.timestamp(), 1_667_833_787 + 5 * 3600 + 1800);
    }

    #[test]
    fn test_local_mode_uses_current_offset() {
        let ZoneMode::Local(offset) = ZoneMode::from_utc_flag(false) else {
            panic!("expected local mode");
        };
        assert_eq!(offset, Local::now().offset().fix());
        assert_eq!(ZoneMode::from_utc_flag(true), ZoneMode::Utc);
    }

    #[test]
    fn test_exif_datetime_string() {
        let stamp = parse_folder_name("2022-01-02-03-04-05").unwrap();
        let dt = resolve(&stamp, ZoneMode::Local(FixedOffset::east_opt(3600).unwrap()));
        assert_eq!(exif_datetime_string(&dt), "2022:01:02 03:04:05");
    }
}
