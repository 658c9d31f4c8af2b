//! The demo script: an ordered, immutable list of step records.
//!
//! The built-in walkthrough is bundled from `assets/demo_script.toml`; an
//! alternative script with the same schema can be loaded from disk.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ScriptError;
use super::form::FormPatch;

const BUILTIN_SCRIPT: &str = include_str!("../../assets/demo_script.toml");

/// One stop of the walkthrough.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub id: usize,
    /// Legacy code shown on the "before" side.
    pub source_code: String,
    /// Modern code shown on the "after" side.
    pub target_code: String,
    pub explanation: String,
    /// Full legacy terminal transcript at this step.
    pub terminal_output: String,
    #[serde(default)]
    pub ui_updates: FormPatch,
    #[serde(default)]
    pub callout: Option<Callout>,
    /// Status line the form shows from this step onwards.
    #[serde(default)]
    pub status: Option<String>,
}

/// Educational note attached to a step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Callout {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Entry of the customer lookup dropdown in the form pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSuggestion {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default = "default_source_label")]
    pub source_label: String,
    #[serde(default = "default_target_label")]
    pub target_label: String,
    /// Lines printed above the transcript in the legacy terminal pane.
    #[serde(default)]
    pub terminal_banner: Vec<String>,
    #[serde(default)]
    pub customer_suggestions: Vec<CustomerSuggestion>,
    pub steps: Vec<Step>,
}

fn default_source_label() -> String {
    "Legacy".to_string()
}

fn default_target_label() -> String {
    "Modern".to_string()
}

impl Script {
    /// The bundled UniBasic → C# walkthrough.
    pub fn builtin() -> Result<Self, ScriptError> {
        Self::from_toml_str(BUILTIN_SCRIPT, "<builtin>")
    }

    /// Load and validate a script from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_toml_str(&contents, &path.display().to_string())?;
        log::info!(
            "Loaded script '{}' ({} steps) from {}",
            script.title,
            script.steps.len(),
            path.display()
        );
        Ok(script)
    }

    /// Parse and validate a script; `origin` names the source in errors.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ScriptError> {
        let script: Script = toml::from_str(contents).map_err(|source| ScriptError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::Empty {
                title: self.title.clone(),
            });
        }
        for (index, step) in self.steps.iter().enumerate() {
            if step.id != index {
                return Err(ScriptError::IdMismatch { index, id: step.id });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step record at `index`, or `None` past the end of the script.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Status messages of every step in `0..=index`, oldest first.
    pub fn statuses_through(&self, index: usize) -> impl Iterator<Item = &str> {
        self.steps
            .iter()
            .take(index.saturating_add(1))
            .filter_map(|s| s.status.as_deref())
    }
}
