//! Engine initialization options.
//!
//! Field names follow the Mermaid configuration schema so that user supplied
//! overrides can be written exactly as they would be for Mermaid itself.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Global engine configuration applied once per process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    /// Whether the engine scans the page for diagrams on load.
    pub start_on_load: bool,
    /// Theme name (`default`, `forest`, `dark`, `neutral`, `base`).
    pub theme: String,
    /// Security level (`strict`, `loose`, `antiscript`, `sandbox`).
    pub security_level: String,
    /// Flowchart layout options.
    pub flowchart: FlowchartOptions,
    /// Sequence diagram layout options.
    pub sequence: SequenceOptions,
}

/// Flowchart layout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FlowchartOptions {
    pub use_max_width: bool,
    pub html_labels: bool,
    /// Edge interpolation curve.
    pub curve: String,
}

impl Default for FlowchartOptions {
    fn default() -> Self {
        Self {
            use_max_width: true,
            html_labels: true,
            curve: "basis".to_owned(),
        }
    }
}

/// Sequence diagram layout options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SequenceOptions {
    pub use_max_width: bool,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self {
            use_max_width: true,
        }
    }
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            start_on_load: false,
            theme: "default".to_owned(),
            security_level: "loose".to_owned(),
            flowchart: FlowchartOptions::default(),
            sequence: SequenceOptions::default(),
        }
    }
}

impl InitOptions {
    /// Merge caller overrides over the defaults.
    ///
    /// The merge is shallow: each top-level key of `overrides` replaces the
    /// default value for that key entirely. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `overrides` is not an object or a replaced value
    /// has the wrong shape.
    pub fn with_overrides(overrides: &Value) -> Result<Self, serde_json::Error> {
        let Value::Object(overrides) = overrides else {
            return Err(serde::de::Error::custom("diagram config must be an object"));
        };

        let mut merged = serde_json::to_value(Self::default())?;
        if let Value::Object(base) = &mut merged {
            for (key, value) in overrides {
                base.insert(key.clone(), value.clone());
            }
        }

        serde_json::from_value(merged)
    }

    /// Flatten the options into Kroki diagram-option pairs.
    ///
    /// Nested keys are joined with `_` (`flowchart.curve` → `flowchart_curve`).
    #[must_use]
    pub fn kroki_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("theme".to_owned(), self.theme.clone()),
            ("securityLevel".to_owned(), self.security_level.clone()),
            (
                "flowchart_useMaxWidth".to_owned(),
                self.flowchart.use_max_width.to_string(),
            ),
            (
                "flowchart_htmlLabels".to_owned(),
                self.flowchart.html_labels.to_string(),
            ),
            ("flowchart_curve".to_owned(), self.flowchart.curve.clone()),
            (
                "sequence_useMaxWidth".to_owned(),
                self.sequence.use_max_width.to_string(),
            ),
        ];
        pairs.retain(|(_, value)| !value.is_empty());
        pairs
    }
}
