//! Unified handling of template directory resolution

use std::io;
use std::path::{Path, PathBuf};

use crate::target::TargetLanguage;

/// Environment variable naming a directory that holds per-target template sets
pub const TEMPLATE_DIR_ENV: &str = "DS3GEN_TEMPLATE_DIR";

/// A resolved template directory for one target language
#[derive(Debug, Clone)]
pub struct TemplateDir {
    /// Root directory containing one template set per target
    root_dir: PathBuf,
    /// Path to this target's template set (root_dir/target)
    template_path: PathBuf,
    target: TargetLanguage,
}

impl TemplateDir {
    pub fn new(root_dir: PathBuf, template_path: PathBuf, target: TargetLanguage) -> Self {
        Self {
            root_dir,
            template_path,
            target,
        }
    }

    /// Returns a displayable version of the template path
    pub fn display(&self) -> std::path::Display<'_> {
        self.template_path.display()
    }

    /// Resolve the template set for `target`.
    ///
    /// `custom_dir` may point either at a root holding per-target directories
    /// or directly at the target's own directory.
    pub fn discover(target: TargetLanguage, custom_dir: Option<&Path>) -> io::Result<Self> {
        let root_dir = match custom_dir {
            Some(dir) => {
                if !dir.exists() {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("Template directory not found: {}", dir.display()),
                    ));
                }
                if dir.file_name().and_then(|n| n.to_str()) == Some(target.as_str()) {
                    let root = dir.parent().unwrap_or(dir).to_path_buf();
                    return Ok(Self::new(root, dir.to_path_buf(), target));
                }
                dir.to_path_buf()
            }
            None => Self::find_template_base_dir().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "Could not find template directory in any standard location",
                )
            })?,
        };

        let template_path = root_dir.join(target.as_str());
        if !template_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Template directory not found: {}", template_path.display()),
            ));
        }

        Ok(Self::new(root_dir, template_path, target))
    }

    /// Find the directory holding per-target template sets
    fn find_template_base_dir() -> Option<PathBuf> {
        // 1. Environment variable
        if let Ok(dir) = std::env::var(TEMPLATE_DIR_ENV) {
            let path = PathBuf::from(dir);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Workspace templates/ (for development)
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let found = Path::new(&manifest_dir)
                .ancestors()
                .map(|dir| dir.join("templates"))
                .find(|dir| dir.is_dir());
            if found.is_some() {
                return found;
            }
        }

        // 3. Current directory
        let local = PathBuf::from("templates");
        if local.is_dir() {
            return Some(local);
        }

        // 4. User's home directory
        if let Some(home_dir) = dirs::home_dir() {
            let templates_dir = home_dir.join(".ds3gen").join("templates");
            if templates_dir.is_dir() {
                return Some(templates_dir);
            }
        }

        None
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn target(&self) -> TargetLanguage {
        self.target
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }
}
