use base64::Engine;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::Result;

/// A decoded GitHub Actions workflow file.
///
/// Only the parts needed to correlate definitions with run telemetry are
/// kept. Job order follows the file, which matters for tie-breaking when two
/// jobs match a recorded job name equally well.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Jobs keyed by their identifier, in file order
    pub jobs: IndexMap<String, JobDefinition>,
}

/// A job as declared in the workflow file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobDefinition {
    /// Declared display name, possibly containing `${{ }}` expressions
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
    /// Declared steps in order (absent for reusable-workflow jobs)
    #[serde(default)]
    pub steps: Vec<StepDefinition>,
}

/// A step as declared in the workflow file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Action reference such as `actions/checkout@v4`
    #[serde(default)]
    pub uses: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name: Option<String>,
}

/// YAML reads `name: 2024` or `name: true` as a number or boolean; names are
/// compared as text, so any scalar is accepted.
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a name, found {other:?}"
        ))),
    }
}

impl JobDefinition {
    /// Name compared against recorded job names: the declared name, or the
    /// job identifier when none is declared.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(id)
    }
}

impl WorkflowDefinition {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Decodes the base64 payload returned by the GitHub contents API.
    ///
    /// GitHub wraps the encoded content at 60 columns, so whitespace is
    /// stripped before decoding.
    pub fn from_base64_contents(content: &str) -> Result<Self> {
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
        let yaml = String::from_utf8(bytes).map_err(|e| {
            crate::error::ActPerfError::Decode(format!("workflow file is not UTF-8: {e}"))
        })?;
        Self::from_yaml(&yaml)
    }
}
