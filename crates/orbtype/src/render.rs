use crate::layout::{self, PathId};
use crate::showcase::{Dirty, Showcase};
use crate::specimen;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SPECIMEN_FILE: &str = "specimens.svg";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub fn path_file(id: PathId) -> String {
    format!("{}.svg", id)
}

fn write(path: PathBuf, contents: String) -> Result<PathBuf, RenderError> {
    match fs_err::write(&path, contents) {
        Ok(()) => Ok(path),
        Err(source) => Err(RenderError::Write { path, source }),
    }
}

/// Renders the dirty outputs of `showcase` into `dir` and returns the files
/// written.
pub fn write_outputs(
    showcase: &Showcase,
    dir: &Path,
    dirty: &Dirty,
) -> Result<Vec<PathBuf>, RenderError> {
    fs_err::create_dir_all(dir).map_err(|source| RenderError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();

    for &id in &dirty.paths {
        let (Some(state), Some(path_layout)) = (showcase.path(id), showcase.layout_path(id)) else {
            log::debug!("{} is not configured, skipping", id);
            continue;
        };
        let document = layout::draw(&path_layout, &state.stroke_paths, showcase.style());
        written.push(write(dir.join(path_file(id)), document.to_string())?);
    }

    if dirty.specimens {
        let document = specimen::draw(
            &showcase.charset,
            &showcase.specimens,
            &showcase.alternates,
            showcase.style(),
        );
        written.push(write(dir.join(SPECIMEN_FILE), document.to_string())?);
    }

    for path in &written {
        log::debug!("Wrote {}", path.display());
    }
    Ok(written)
}
