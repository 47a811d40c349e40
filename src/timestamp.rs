use crate::error::GoesFetchError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

const START_MARKER: &str = "_s";
const END_MARKER: &str = "_e";
const TOKEN_LEN: usize = 14;

/// Parse the scan start time out of a GOES-R object key.
///
/// Keys look like `.../OR_ABI-L1b-RadC-M3C01_G16_s20172331602189_e20172331604563_c....nc`. The
/// digits between `_s` and `_e` are `YYYYDDDHHMMSSf`, where `DDD` is the 1-based day of the year
/// and `f` is tenths of a second. The result is interpreted as UTC.
pub fn extract_timestamp(key: &str) -> Result<DateTime<Utc>, GoesFetchError> {
    let malformed = |reason| GoesFetchError::MalformedKey {
        key: key.to_owned(),
        reason,
    };

    if key.is_empty() {
        return Err(malformed("empty key"));
    }

    let token = find_start_token(key).ok_or_else(|| malformed("no start time token"))?;

    let field = |range: std::ops::Range<usize>| -> u32 {
        token[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };

    let year = field(0..4) as i32;
    let day_of_year = field(4..7);
    let hour = field(7..9);
    let minute = field(9..11);
    let second = field(11..13);
    let tenths = field(13..14);

    if day_of_year == 0 || day_of_year > 366 {
        return Err(malformed("day of year out of range"));
    }

    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| malformed("invalid year"))?;
    let date = jan_first + Duration::days(i64::from(day_of_year) - 1);

    let time = NaiveTime::from_hms_milli_opt(hour, minute, second, tenths * 100)
        .ok_or_else(|| malformed("invalid time of day"))?;

    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Render an instant as a start time token, the inverse of [`extract_timestamp`] to tenths of a
/// second.
pub fn format_start_token(time: &DateTime<Utc>) -> String {
    format!(
        "{}{}",
        time.format("%Y%j%H%M%S"),
        time.timestamp_subsec_millis() / 100
    )
}

fn find_start_token(key: &str) -> Option<&str> {
    key.match_indices(START_MARKER).find_map(|(i, _)| {
        let rest = &key[(i + START_MARKER.len())..];
        let end = rest.find(END_MARKER)?;
        let token = &rest[..end];

        if token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_digit()) {
            Some(token)
        } else {
            None
        }
    })
}
