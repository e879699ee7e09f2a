use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;

pub(crate) const CONFIG_SAMPLE: &str = r#"# For the file locations, If you want it to be relative to the executable directory
# use ${exe_dir}/location
[paths]
scan_root = "wiki"
destination_path = "README.md"
# Set to true to leave out directories starting with a dot (.git, .drafts)
skip_hidden = false

[index]
base_url = "https://8hantanu.net/wiki"
# The generated section starts with this heading. It is also how the
# section is found again in an existing README.
sentinel_heading = "# Shantanu's blog"
subtitle = "**Collection of the latest and greatest pages from the wiki**"
# section: replace only the generated section
# whole-document: rewrite the destination with the blog index only
mode = "section"

# Optional. Without it, logs go to the console
# [log]
# level = "Info"
# log_to_console = true
# location = "${exe_dir}/log/wikiblog.log"
"#;

pub(crate) fn write_sample_cfg(file_path: &Path) -> io::Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(file_path)?;
    file.write_all(CONFIG_SAMPLE.as_bytes())
}

#[cfg(test)]
mod tests {
    use wikiblog::config::{parse_config, Config};

    use super::*;

    #[test]
    fn test_sample_matches_defaults() {
        let cfg = parse_config(CONFIG_SAMPLE).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
