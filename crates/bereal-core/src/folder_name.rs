use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::FolderNameError;

/// Folder name format: YYYY-MM-DD-HH-MM-SS (ASCII digits only)
static FOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})-([0-9]{2})-([0-9]{2})-([0-9]{2})$").unwrap()
});

/// The six calendar fields decoded from a timestamp folder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolderStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    naive: NaiveDateTime,
}

impl FolderStamp {
    /// Wall-clock date/time with no zone attached.
    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }
}

/// Decode a folder name like `2022-11-07-15-09-47`.
pub fn parse_folder_name(name: &str) -> Result<FolderStamp, FolderNameError> {
    let caps = FOLDER_RE
        .captures(name)
        .ok_or_else(|| FolderNameError::PatternMismatch(name.to_string()))?;

    // Every group is fixed-width ASCII digits, so these parses cannot overflow
    let field = |i: usize| -> u32 { caps[i].parse().unwrap_or(u32::MAX) };
    let (year, month, day) = (field(1) as i32, field(2), field(3));
    let (hour, minute, second) = (field(4), field(5), field(6));

    // Year 0 exists in the proleptic calendar but not as a folder date
    let naive = Some(year)
        .filter(|y| *y >= 1)
        .and_then(|y| NaiveDate::from_ymd_opt(y, month, day))
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .ok_or_else(|| FolderNameError::InvalidDateTime(name.to_string()))?;

    Ok(FolderStamp {
        year,
        month,
        day,
        hour,
        minute,
        second,
        naive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_folder_name() {
        let stamp = parse_folder_name("2022-11-07-15-09-47").unwrap();
        assert_eq!(
            (stamp.year, stamp.month, stamp.day, stamp.hour, stamp.minute, stamp.second),
            (2022, 11, 7, 15, 9, 47)
        );
        assert_eq!(
            stamp.naive(),
            NaiveDate::from_ymd_opt(2022, 11, 7).unwrap().and_hms_opt(15, 9, 47).unwrap()
        );
        assert!(parse_folder_name("2024-02-29-00-00-00").is_ok());
        assert!(parse_folder_name("1999-12-31-23-59-59").is_ok());
        assert_eq!(parse_folder_name("0001-01-01-00-00-00").unwrap().year, 1);
    }

    #[test]
    fn test_pattern_mismatch() {
        for name in [
            "badname",
            "",
            "2022-11-07",
            "2022-11-07-15-09",
            "2022-1-07-15-09-47",
            "22022-11-07-15-09-47",
            "2022-11-07-15-09-47-1",
            " 2022-11-07-15-09-47",
            "2022_11_07_15_09_47",
            "2022-11-07-15-09-4a",
            "２０２２-11-07-15-09-47",
        ] {
            assert_eq!(
                parse_folder_name(name),
                Err(FolderNameError::PatternMismatch(name.to_string())),
                "{name}"
            );
        }
    }

    #[test]
    fn test_invalid_calendar_fields() {
        for name in [
            "2022-13-01-00-00-00",
            "2022-00-10-00-00-00",
            "2022-04-31-12-00-00",
            "2023-02-29-12-00-00",
            "2022-11-07-24-00-00",
            "2022-11-07-12-60-00",
            "2022-11-07-12-00-60",
            "0000-01-01-00-00-00",
            "0000-12-31-23-59-59",
        ] {
            assert_eq!(
                parse_folder_name(name),
                Err(FolderNameError::InvalidDateTime(name.to_string())),
                "{name}"
            );
        }
    }
}
