use std::ffi::OsString;
use std::fs;
use std::io;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use spdlog::debug;

use crate::config::Config;
use crate::error::IndexError;
use crate::post_list::{collect, ContentSource, DirSource};
use crate::splice::{SpliceMode, Splicer};
use crate::view::index_renderer::IndexRenderer;

#[derive(Debug, Default, Clone, Copy)]
pub struct GenerateOptions {
    /// Compute the document but never touch the destination
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub post_count: usize,
    pub destination: PathBuf,
    /// The computed document differs from what is on disk
    pub changed: bool,
    pub written: bool,
    pub document: String,
}

/// Reads the current destination. A missing file is not an error.
pub fn read_existing(destination: &Path) -> Result<Option<String>, IndexError> {
    match fs::read_to_string(destination) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IndexError::io(destination, e)),
    }
}

/// Replaces the destination in one step: the content goes to a sibling temp file
/// which is then renamed over the destination.
pub fn write_atomically(destination: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = OsString::from(".");
    tmp_name.push(destination.file_name().unwrap_or_else(|| destination.as_os_str()));
    tmp_name.push(".tmp");
    let tmp_path = destination.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;
    if let Err(e) = fs::rename(&tmp_path, destination) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

pub fn build_document<S: ContentSource + ?Sized>(config: &Config, source: &S, existing: Option<&str>) -> io::Result<(usize, String)> {
    let posts = collect(source)?;
    let section = IndexRenderer::for_config(config).render(&posts);
    let document = Splicer::for_config(config).splice(existing, &section);
    Ok((posts.len(), document))
}

pub fn generate(config: &Config, options: GenerateOptions) -> Result<Summary, IndexError> {
    let scan_root = &config.paths.scan_root;
    let destination = &config.paths.destination_path;

    // Fails before anything is scanned or written
    let source = DirSource::open(scan_root, config.paths.skip_hidden)?;
    debug!("Scanning {}", scan_root.display());

    let existing = match read_existing(destination) {
        // the old content is thrown away anyway
        Err(e) if config.index.mode == SpliceMode::WholeDocument => {
            debug!("Ignoring unreadable destination: {}", e);
            None
        }
        res => res?,
    };
    if existing.is_none() {
        debug!("{} does not exist yet", destination.display());
    }

    let (post_count, document) = build_document(config, &source, existing.as_deref())
        .map_err(|e| IndexError::io(scan_root, e))?;
    let changed = existing.as_deref() != Some(document.as_str());

    let written = if options.dry_run {
        debug!("Dry run, not writing {}", destination.display());
        false
    } else if !changed {
        debug!("{} is up to date", destination.display());
        false
    } else {
        write_atomically(destination, &document).map_err(|e| IndexError::io(destination, e))?;
        true
    };

    Ok(Summary {
        post_count,
        destination: destination.clone(),
        changed,
        written,
        document,
    })
}
