//! Writing rendered files under an output root

use std::path::{Component, Path};

use super::RenderedFile;
use crate::error::{Error, Result};

// External imports (alphabetized)
use tokio::fs;

/// Write every file under `output_dir`, creating directories as needed.
///
/// Each file is written to a sibling temporary file and renamed into place,
/// so an interrupted run never leaves a half-written source file behind.
pub async fn write_files(output_dir: &Path, files: &[RenderedFile]) -> Result<()> {
    for file in files {
        if file
            .path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(Error::render(
                file.unit.clone(),
                format!("output path {} must be relative", file.path.display()),
            ));
        }

        let target = output_dir.join(&file.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut staging = target.clone().into_os_string();
        staging.push(".tmp");
        fs::write(&staging, &file.contents).await?;
        if let Err(e) = fs::rename(&staging, &target).await {
            if let Err(cleanup) = fs::remove_file(&staging).await {
                log::warn!("Could not remove {}: {}", Path::new(&staging).display(), cleanup);
            }
            return Err(e.into());
        }
        log::debug!("Wrote {}", target.display());
    }

    log::info!("Wrote {} file(s) to {}", files.len(), output_dir.display());
    Ok(())
}
