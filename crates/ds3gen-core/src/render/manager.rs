//! Tera-backed rendering of generation units

// Internal imports (std, crate)
use std::{collections::HashMap, io, path::PathBuf, sync::Arc};

use crate::{
    error::{Error, Result},
    target::TargetLanguage,
    unit::GenerationUnit,
    utils::{to_lower_camel_case, to_snake_case, to_upper_camel_case},
};

use super::{RenderedFile, TemplateDir, TemplateManifest, UnitRenderer};

// External imports (alphabetized)
use tera::{Context, Tera, Value};

/// Renders units through one target's template set
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    /// Cached Tera template engine instance
    tera: Arc<Tera>,
    template_dir: TemplateDir,
    manifest: TemplateManifest,
}

impl TemplateRenderer {
    /// Load the template set for `target`.
    ///
    /// `template_dir` may name the root of all template sets or the target's
    /// own directory; when absent the standard locations are searched.
    pub async fn new(target: TargetLanguage, template_dir: Option<PathBuf>) -> Result<Self> {
        let template_dir = TemplateDir::discover(target, template_dir.as_deref())?;
        let template_path = template_dir.template_path();
        let template_dir_str = template_path.to_str().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "Template path contains invalid UTF-8",
            )
        })?;

        let manifest = TemplateManifest::load_from_dir(template_path).await?;

        let mut tera = Tera::new(&format!("{}/**/*.tera", template_dir_str)).map_err(|e| {
            Error::template(format!(
                "Failed to parse templates in {}: {}",
                template_dir.display(),
                describe(&e)
            ))
        })?;
        tera.register_filter("snake_case", snake_case_filter);
        tera.register_filter("upper_camel", upper_camel_filter);
        tera.register_filter("lower_camel", lower_camel_filter);

        if let Some(missing) = manifest
            .template_names()
            .find(|name| tera.get_template(name).is_err())
        {
            return Err(Error::template(format!(
                "Template '{}' named in the manifest is missing from {}",
                missing,
                template_dir.display()
            )));
        }

        if target.profile().type_matcher_suffix.is_some() && manifest.templates.matcher.is_none() {
            return Err(Error::template(format!(
                "Template set in {} must name a matcher template for {}",
                template_dir.display(),
                target
            )));
        }

        log::debug!(
            "Loaded {} template(s) for {} from {}",
            tera.get_template_names().count(),
            target,
            template_dir.display()
        );

        Ok(Self {
            tera: Arc::new(tera),
            template_dir,
            manifest,
        })
    }

    pub fn target(&self) -> TargetLanguage {
        self.template_dir.target()
    }

    pub fn template_dir(&self) -> &TemplateDir {
        &self.template_dir
    }

    pub fn manifest(&self) -> &TemplateManifest {
        &self.manifest
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template(name).is_ok()
    }

    fn context(&self, unit: &GenerationUnit) -> Context {
        let mut context = Context::new();
        context.insert("unit", unit);
        context.insert("name", unit.name());
        context.insert("shape", unit.shape_name());
        context.insert("target", self.target().as_str());
        if let GenerationUnit::Operation(op) = unit {
            context.insert("path", &op.path.to_string());
        }
        context
    }

    fn render_with(&self, unit: &GenerationUnit, template: &str, path: PathBuf) -> Result<RenderedFile> {
        let contents = self
            .tera
            .render(template, &self.context(unit))
            .map_err(|e| {
                Error::render(
                    unit.id(),
                    format!("template '{}' failed: {}", template, describe(&e)),
                )
            })?;

        log::debug!("Rendered {} with {}", unit.name(), template);
        Ok(RenderedFile {
            unit: unit.id(),
            path,
            contents,
        })
    }
}

impl UnitRenderer for TemplateRenderer {
    fn render(&self, unit: &GenerationUnit) -> Result<RenderedFile> {
        let path = self.target().profile().output_path(unit);
        self.render_with(unit, self.manifest.template_for(unit), path)
    }

    /// The unit's file, followed by its matcher on targets that write one
    fn render_files(&self, unit: &GenerationUnit) -> Result<Vec<RenderedFile>> {
        let mut files = vec![self.render(unit)?];
        let matcher = self.target().profile().matcher_path(unit);
        if let (Some(path), Some(template)) = (matcher, self.manifest.templates.matcher.as_deref()) {
            files.push(self.render_with(unit, template, path)?);
        }
        Ok(files)
    }
}

/// Tera hides the useful part of an error in its source chain
fn describe(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn apply_case(value: &Value, filter: &str, convert: fn(&str) -> String) -> tera::Result<Value> {
    value
        .as_str()
        .map(|s| Value::String(convert(s)))
        .ok_or_else(|| tera::Error::msg(format!("Filter `{}` expects a string", filter)))
}

fn snake_case_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    apply_case(value, "snake_case", to_snake_case)
}

fn upper_camel_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    apply_case(value, "upper_camel", to_upper_camel_case)
}

fn lower_camel_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    apply_case(value, "lower_camel", to_lower_camel_case)
}
