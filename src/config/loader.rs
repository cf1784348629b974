//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine options
//! and a read-only catalog of salary templates from disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryTemplate;

use super::types::EngineOptions;

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Engine options (may be `{}`)
/// └── templates/
///     ├── standard.yaml    # One salary template per file
///     └── contract.json    # JSON is accepted as well
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let template = loader.get_template("tpl_standard").unwrap();
/// println!("Template: {}", template.name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    options: EngineOptions,
    templates: BTreeMap<String, SalaryTemplate>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `engine.yaml` or the `templates` directory is missing
    /// - Any file contains invalid YAML or JSON
    /// - Two template files declare the same template id
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let options = Self::load_file::<EngineOptions>(&path.join("engine.yaml"))?;
        let templates = Self::load_templates(&path.join("templates"))?;

        debug!(
            path = %path.display(),
            templates = templates.len(),
            "Loaded salary engine configuration"
        );

        Ok(Self { options, templates })
    }

    /// Builds a loader from values already in memory.
    ///
    /// Later templates replace earlier ones with the same id.
    pub fn from_parts(options: EngineOptions, templates: Vec<SalaryTemplate>) -> Self {
        let templates = templates.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self { options, templates }
    }

    /// Loads and parses a YAML or JSON file, chosen by extension.
    fn load_file<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let parsed = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str::<T>(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<T>(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })
    }

    /// Loads every template file from the templates directory.
    fn load_templates(dir: &Path) -> EngineResult<BTreeMap<String, SalaryTemplate>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml" || ext == "json")
            {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent.
        paths.sort();

        let mut templates = BTreeMap::new();
        for path in paths {
            let template = Self::load_file::<SalaryTemplate>(&path)?;
            if templates.contains_key(&template.id) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate template id '{}'", template.id),
                });
            }
            templates.insert(template.id.clone(), template);
        }

        Ok(templates)
    }

    /// Returns the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Gets a template by its id.
    ///
    /// # Returns
    ///
    /// Returns the template if found, or `TemplateNotFound` error.
    pub fn get_template(&self, id: &str) -> EngineResult<&SalaryTemplate> {
        self.templates
            .get(id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    /// Iterates over all templates in id order.
    pub fn templates(&self) -> impl Iterator<Item = &SalaryTemplate> {
        self.templates.values()
    }
}
