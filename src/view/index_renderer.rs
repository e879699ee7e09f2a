use std::collections::BTreeMap;
use std::fmt::Write;

use crate::config::Config;
use crate::post::Post;
use crate::post_list::is_markdown_file;

pub struct IndexRenderer {
    pub base_url: String,
    pub heading: String,
    pub subtitle: String,
}

impl IndexRenderer {
    pub fn new(base_url: &str, heading: &str, subtitle: &str) -> IndexRenderer {
        IndexRenderer {
            base_url: base_url.trim_end_matches('/').to_string(),
            heading: heading.trim().to_string(),
            subtitle: subtitle.trim().to_string(),
        }
    }

    pub fn for_config(config: &Config) -> IndexRenderer {
        Self::new(&config.index.base_url, &config.index.sentinel_heading, &config.index.subtitle)
    }

    /// Public URL of a wiki page.
    /// `dir/README.md` is served as `dir`, `dir/page.md` as `dir/page`.
    pub fn link_for(&self, relative_path: &str) -> String {
        let (parent, file_name) = match relative_path.rsplit_once('/') {
            Some((parent, file_name)) => (Some(parent), file_name),
            None => (None, relative_path),
        };

        if file_name.eq_ignore_ascii_case("README.md") {
            return match parent {
                None => self.base_url.clone(),
                Some(parent) => format!("{}/{}", self.base_url, parent),
            };
        }

        if is_markdown_file(file_name) {
            let without_ext = &relative_path[..relative_path.len() - ".md".len()];
            return format!("{}/{}", self.base_url, without_ext);
        }

        format!("{}/{}", self.base_url, relative_path)
    }

    /// Renders the posts, already sorted newest first, grouped by year
    pub fn render(&self, posts: &[Post]) -> String {
        let mut buf = String::new();

        let _ = writeln!(&mut buf, "{}", self.heading);
        let _ = writeln!(&mut buf);
        if !self.subtitle.is_empty() {
            let _ = writeln!(&mut buf, "{}", self.subtitle);
            let _ = writeln!(&mut buf);
        }

        let mut posts_by_year: BTreeMap<i32, Vec<&Post>> = BTreeMap::new();
        for post in posts {
            posts_by_year.entry(post.year()).or_default().push(post);
        }

        for (year, posts) in posts_by_year.iter().rev() {
            let _ = writeln!(&mut buf, "## {}", year);
            for post in posts {
                let _ = writeln!(&mut buf, "- [{}]({})", post.title, self.link_for(&post.relative_path));
            }
            let _ = writeln!(&mut buf);
        }

        let mut rendered = buf.trim_end().to_string();
        rendered.push('\n');
        rendered
    }
}
