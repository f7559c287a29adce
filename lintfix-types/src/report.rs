use crate::summary::RunSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable record of a run, printed with `--format json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub summary: RunSummary,
}

impl RunReport {
    pub fn new(tool: ToolInfo, run: RunInfo, summary: RunSummary) -> Self {
        Self {
            schema: crate::schema::LINTFIX_RUN_V1.to_string(),
            tool,
            run,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,

    /// True when no file was written.
    #[serde(default)]
    pub dry_run: bool,

    /// Project root the reported paths are relative to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<String>,
}
