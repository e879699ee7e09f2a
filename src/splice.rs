use clap::ValueEnum;
use serde::Deserialize;

use crate::config::Config;

const TOP_LEVEL_HEADING: &str = "# ";

#[derive(Deserialize, ValueEnum, Debug, Copy, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SpliceMode {
    /// Replace only the generated section, keep the rest of the document
    #[default]
    Section,
    /// Throw the existing document away and write only the generated section
    WholeDocument,
}

/// Merges a freshly rendered section into an existing markdown document.
///
/// The managed region starts at the first line equal to the sentinel and runs
/// until the next top level heading (or the end of the document). Everything outside
/// that region is kept, only blank lines at the boundaries are normalized, so running
/// it twice with the same section gives the same bytes.
pub struct Splicer {
    pub sentinel: String,
    pub mode: SpliceMode,
}

impl Splicer {
    pub fn new(sentinel: &str, mode: SpliceMode) -> Splicer {
        Splicer {
            sentinel: sentinel.trim().to_string(),
            mode,
        }
    }

    pub fn for_config(config: &Config) -> Splicer {
        Self::new(&config.index.sentinel_heading, config.index.mode)
    }

    pub fn splice(&self, existing: Option<&str>, section: &str) -> String {
        let section = self.section_with_sentinel(section);

        let existing = match (self.mode, existing) {
            (SpliceMode::WholeDocument, _) | (_, None) => return finish(&section),
            (SpliceMode::Section, Some(doc)) if doc.trim().is_empty() => return finish(&section),
            (SpliceMode::Section, Some(doc)) => doc,
        };

        let lines: Vec<&str> = existing.lines().collect();
        let outside = lines_outside_fences(&lines);

        let Some(start) = outside.iter().copied().find(|&i| lines[i].trim_end() == self.sentinel) else {
            let mut res = lines.join("\n").trim_end().to_string();
            res.push_str("\n\n");
            res.push_str(&section);
            res.push('\n');
            return res;
        };
        let end = outside.iter().copied()
            .find(|&i| i > start && lines[i].starts_with(TOP_LEVEL_HEADING))
            .unwrap_or(lines.len());

        let before = lines[..start].join("\n");
        let before = before.trim_end();
        let after = lines[end..].join("\n");
        let after = after.trim_end();

        let mut res = String::new();
        if !before.is_empty() {
            res.push_str(before);
            res.push_str("\n\n");
        }
        res.push_str(&section);
        res.push('\n');
        if !after.is_empty() {
            res.push('\n');
            res.push_str(after);
            res.push('\n');
        }
        res
    }

    /// Trimmed section, guaranteed to open with the sentinel so the next run finds it again
    fn section_with_sentinel(&self, section: &str) -> String {
        let mut lines: Vec<&str> = section.trim().lines().collect();
        let opens_with_sentinel = lines.first().map(|first| first.trim_end() == self.sentinel);
        match opens_with_sentinel {
            Some(true) => lines[0] = self.sentinel.as_str(),
            Some(false) => {
                lines.insert(0, "");
                lines.insert(0, self.sentinel.as_str());
            }
            None => lines.push(self.sentinel.as_str()),
        }
        lines.join("\n")
    }
}

fn finish(section: &str) -> String {
    let mut res = section.to_string();
    res.push('\n');
    res
}

/// Indexes of the lines that are not part of a fenced code block
fn lines_outside_fences(lines: &[&str]) -> Vec<usize> {
    let mut outside = vec![];
    let mut fence: Option<&str> = None;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        match fence {
            Some(marker) => {
                if trimmed.starts_with(marker) {
                    fence = None;
                }
            }
            None if trimmed.starts_with("```") => fence = Some("```"),
            None if trimmed.starts_with("~~~") => fence = Some("~~~"),
            None => outside.push(i),
        }
    }

    outside
}
