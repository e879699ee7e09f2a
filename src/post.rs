use fmt::Display;
use std::fmt;
use std::fmt::Formatter;
use std::path::{Component, Path};

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_REGEX: Regex = Regex::new(r"^#\s+(?P<title>.+)$").unwrap();
    static ref DATE_REGEX: Regex = Regex::new(
        r"^\*\*(?P<year>[0-9]{4})-(?P<month>[0-9]{2})-(?P<day>[0-9]{2})\*\*$"
    ).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub title: String,
    pub date: NaiveDate,
    /// Path relative to the scanned root, always with forward slashes
    pub relative_path: String,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}  ({})", self.date.format("%Y-%m-%d"), self.title, self.relative_path)
    }
}

/// A wiki page is a post when it starts with
///
/// # Title
/// **YYYY-MM-DD**
///
/// Blank lines are allowed before the title and between the two lines.
impl Post {
    pub fn from_string(content: &str, relative_path: &str) -> Option<Post> {
        let mut lines = content.split(is_line_break);

        let title = Self::extract_title(next_non_blank(&mut lines)?)?;
        let date = Self::extract_date(next_non_blank(&mut lines)?)?;

        Some(Post {
            title,
            date,
            relative_path: relative_path.to_string(),
        })
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    fn extract_title(line: &str) -> Option<String> {
        let caps = TITLE_REGEX.captures(line.trim())?;
        let title = caps.name("title")?.as_str().trim();
        if title.is_empty() {
            return None;
        }
        Some(title.to_string())
    }

    fn extract_date(line: &str) -> Option<NaiveDate> {
        let caps = DATE_REGEX.captures(line.trim())?;

        // The regex guarantees digits, the calendar check is left to chrono
        let y: i32 = caps.name("year")?.as_str().parse().ok()?;
        let m: u32 = caps.name("month")?.as_str().parse().ok()?;
        let d: u32 = caps.name("day")?.as_str().parse().ok()?;

        NaiveDate::from_ymd_opt(y, m, d)
    }
}

/// Same line breaks as Unicode line splitting: `\r\n` leaves an empty piece which is skipped
/// like any blank line.
fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

fn next_non_blank<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Option<&'a str> {
    lines.find(|line| !line.trim().is_empty())
}

/// Builds the forward-slash relative path of `path` inside `root`.
/// Returns None if `path` is outside of `root` or is not valid UTF-8.
pub fn normalize_relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = vec![];
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => continue,
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
