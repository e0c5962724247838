use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{BlogError, Result};

pub const DEFAULT_DATE_FORMAT: &str = "DD-MM-YYYY";

#[derive(Debug, Clone, Copy, PartialEq)]
enum DatePart {
    Day,
    Month,
    Year,
}

/// A compiled `DD`/`MM`/`YYYY` style pattern. Anything else in the format is matched literally.
struct DatePattern {
    regex: Regex,
    parts: Vec<DatePart>,
}

impl DatePattern {
    fn compile(format: &str) -> Result<DatePattern> {
        let mut patt = String::from("^");
        let mut parts = vec![];
        let mut rest = format;

        while let Some(c) = rest.chars().next() {
            if rest.starts_with("YYYY") {
                patt.push_str(r"(\d{4})");
                parts.push(DatePart::Year);
                rest = &rest[4..];
            } else if rest.starts_with("MM") {
                patt.push_str(r"(\d{1,2})");
                parts.push(DatePart::Month);
                rest = &rest[2..];
            } else if rest.starts_with("DD") {
                patt.push_str(r"(\d{1,2})");
                parts.push(DatePart::Day);
                rest = &rest[2..];
            } else {
                patt.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
                rest = &rest[c.len_utf8()..];
            }
        }
        patt.push('$');

        for part in [DatePart::Day, DatePart::Month, DatePart::Year] {
            if parts.iter().filter(|p| **p == part).count() != 1 {
                return Err(BlogError::invalid_date(format, "format must contain DD, MM and YYYY exactly once"));
            }
        }

        let regex = Regex::new(&patt).map_err(|e| BlogError::invalid_date(format, e))?;
        Ok(DatePattern { regex, parts })
    }

    fn parse(&self, buf: &str) -> Result<NaiveDate> {
        let Some(caps) = self.regex.captures(buf) else {
            return Err(BlogError::invalid_date(buf, "does not match the date format"));
        };

        let (mut y, mut m, mut d) = (0i32, 0u32, 0u32);
        for (i, part) in self.parts.iter().enumerate() {
            // Group 0 is the whole match
            let num_str = &caps[i + 1];
            match part {
                DatePart::Year => y = to_int(num_str, buf)?,
                DatePart::Month => m = to_int(num_str, buf)?,
                DatePart::Day => d = to_int(num_str, buf)?,
            }
        }

        NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| BlogError::invalid_date(buf, "not a calendar date"))
    }
}

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T> {
    num_str
        .parse::<T>()
        .map_err(|_| BlogError::invalid_date(date_str, format!("error parsing {}", num_str)))
}

/// Parses a date written as `format` (`DD-MM-YYYY` when `None`).
/// Empty input and malformed input are both reported as `InvalidDateInput`.
pub fn str_to_date(buf: &str, format: Option<&str>) -> Result<NaiveDate> {
    lazy_static! {
        static ref DEFAULT_PATTERN: Option<DatePattern> = DatePattern::compile(DEFAULT_DATE_FORMAT).ok();
    }

    let buf = buf.trim();
    if buf.is_empty() {
        return Err(BlogError::invalid_date(buf, "date cannot be empty"));
    }

    match format {
        None | Some(DEFAULT_DATE_FORMAT) => match DEFAULT_PATTERN.as_ref() {
            Some(pattern) => pattern.parse(buf),
            None => DatePattern::compile(DEFAULT_DATE_FORMAT)?.parse(buf),
        },
        Some(format) => DatePattern::compile(format)?.parse(buf),
    }
}

/// Writes `date` back using the same `DD`/`MM`/`YYYY` tokens [`str_to_date`] understands.
pub fn format_date(date: &NaiveDate, format: Option<&str>) -> String {
    let chrono_fmt = format
        .unwrap_or(DEFAULT_DATE_FORMAT)
        .replace('%', "%%")
        .replace("YYYY", "%Y")
        .replace("MM", "%m")
        .replace("DD", "%d");
    date.format(&chrono_fmt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = str_to_date("03-02-2024", None).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());

        let date = str_to_date("3-2-2024", None).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());

        let date = str_to_date("2024/02/03", Some("YYYY/MM/DD")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
    }

    #[test]
    fn test_round_trip() {
        for buf in ["01-01-2020", "29-02-2024", "31-12-1999", "15-07-2023"] {
            let date = str_to_date(buf, None).unwrap();
            assert_eq!(format_date(&date, None), buf);
        }

        let date = str_to_date("2023.07.15", Some("YYYY.MM.DD")).unwrap();
        assert_eq!(format_date(&date, Some("YYYY.MM.DD")), "2023.07.15");
    }

    #[test]
    fn test_invalid_dates() {
        assert!(matches!(str_to_date("", None), Err(BlogError::InvalidDateInput { .. })));
        assert!(matches!(str_to_date("   ", None), Err(BlogError::InvalidDateInput { .. })));
        assert!(matches!(str_to_date("2024-02-03", None), Err(BlogError::InvalidDateInput { .. })));
        assert!(matches!(str_to_date("30-02-2024", None), Err(BlogError::InvalidDateInput { .. })));
        assert!(matches!(str_to_date("03-02-2024 10:00", None), Err(BlogError::InvalidDateInput { .. })));
        assert!(matches!(str_to_date("03-02-2024", Some("DD-MM")), Err(BlogError::InvalidDateInput { .. })));
    }
}
