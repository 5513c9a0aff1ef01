//! Manifest file format for ds3gen template sets.
//!
//! A manifest (`manifest.yaml` or `manifest.toml`) names the default request,
//! type and enum templates for one target and may route particular shapes to
//! other templates.

use std::path::Path;

use crate::classify::TypeShape;
use crate::unit::GenerationUnit;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_value::Value as SerdeValue;
use tokio::fs;

/// The root manifest structure for a template set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// The target language the templates emit
    pub language: String,

    pub templates: TemplateSet,

    /// Shape-specific templates, checked in order before the defaults
    #[serde(default)]
    pub overrides: Vec<ShapeOverride>,
}

/// Default template per unit kind, relative to the template directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateSet {
    pub request: String,
    #[serde(rename = "type")]
    pub type_template: String,
    #[serde(rename = "enum")]
    pub enum_template: String,
    /// Companion rendered next to every type, for targets that write one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeOverride {
    /// One shape name or a list of them, e.g. `bulk_get`
    #[serde(deserialize_with = "deserialize_shapes")]
    pub shapes: Vec<String>,
    pub template: String,
}

impl TemplateManifest {
    /// Load `manifest.yaml`, or `manifest.toml` when there is no YAML manifest
    pub async fn load_from_dir(template_dir: &Path) -> crate::Result<Self> {
        let yaml_path = template_dir.join("manifest.yaml");
        let toml_path = template_dir.join("manifest.toml");

        if yaml_path.exists() {
            let content = fs::read_to_string(&yaml_path).await?;
            serde_yaml::from_str(&content).map_err(|e| {
                crate::Error::template(format!(
                    "Invalid YAML in template manifest at {}: {}",
                    yaml_path.display(),
                    e
                ))
            })
        } else if toml_path.exists() {
            let content = fs::read_to_string(&toml_path).await?;
            toml::from_str(&content).map_err(|e| {
                crate::Error::template(format!(
                    "Invalid TOML in template manifest at {}: {}",
                    toml_path.display(),
                    e
                ))
            })
        } else {
            Err(crate::Error::template(format!(
                "No manifest.yaml or manifest.toml in {}",
                template_dir.display()
            )))
        }
    }

    /// The template that renders `unit`
    pub fn template_for(&self, unit: &GenerationUnit) -> &str {
        let shape = unit.shape_name();
        if let Some(o) = self
            .overrides
            .iter()
            .find(|o| o.shapes.iter().any(|s| s == shape))
        {
            return &o.template;
        }
        match unit {
            GenerationUnit::Operation(_) => &self.templates.request,
            GenerationUnit::Type(t) if t.shape == TypeShape::Enum => &self.templates.enum_template,
            GenerationUnit::Type(_) => &self.templates.type_template,
        }
    }

    /// Every template the manifest refers to
    pub fn template_names(&self) -> impl Iterator<Item = &str> {
        [
            self.templates.request.as_str(),
            self.templates.type_template.as_str(),
            self.templates.enum_template.as_str(),
        ]
        .into_iter()
        .chain(self.templates.matcher.as_deref())
        .chain(self.overrides.iter().map(|o| o.template.as_str()))
    }
}

/// Accept either a single shape name or a list of shape names
fn deserialize_shapes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(vec![s]),
        SerdeValue::Seq(seq) => seq
            .into_iter()
            .map(|item| match item {
                SerdeValue::String(s) => Ok(s),
                _ => Err(serde::de::Error::custom(
                    "Expected string or array of strings",
                )),
            })
            .collect(),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}
