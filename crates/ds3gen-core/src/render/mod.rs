//! Turning generation units into source files.
//!
//! The engine never renders anything itself. A [`UnitRenderer`] maps each unit
//! to a [`RenderedFile`], and [`write_files`] puts those files on disk.
//! [`TemplateRenderer`] is the Tera-backed implementation used by the CLI.

// Internal imports (std, crate)
use std::path::PathBuf;

use crate::{
    error::{ContractErrors, Error, Result, UnitError, UnitId},
    unit::GenerationUnit,
};

mod dir;
mod manager;
mod manifest;
mod writer;

pub use dir::{TemplateDir, TEMPLATE_DIR_ENV};
pub use manager::TemplateRenderer;
pub use manifest::{ShapeOverride, TemplateManifest, TemplateSet};
pub use writer::write_files;

/// One generated source file, relative to the output root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// The unit the file was rendered from
    pub unit: UnitId,
    pub path: PathBuf,
    pub contents: String,
}

/// Renders generation units into files
pub trait UnitRenderer {
    fn render(&self, unit: &GenerationUnit) -> Result<RenderedFile>;

    /// Every file one unit produces; a single file unless overridden
    fn render_files(&self, unit: &GenerationUnit) -> Result<Vec<RenderedFile>> {
        Ok(vec![self.render(unit)?])
    }

    /// Render every unit in order.
    ///
    /// All units are attempted; failures come back together as
    /// [`Error::Contract`], each attributed to its unit.
    fn render_all(&self, units: &[GenerationUnit]) -> Result<Vec<RenderedFile>> {
        let mut files = Vec::with_capacity(units.len());
        let mut errors = Vec::new();
        for unit in units {
            match self.render_files(unit) {
                Ok(rendered) => files.extend(rendered),
                Err(error) => errors.push(UnitError {
                    unit: unit.id(),
                    error,
                }),
            }
        }

        if errors.is_empty() {
            Ok(files)
        } else {
            Err(Error::Contract(ContractErrors(errors)))
        }
    }
}
