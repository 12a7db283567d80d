//! Build metadata loaded from a properties file.
//!
//! An external build-stamping step writes a flat `build-info.properties`
//! file; this module maps its canonical keys to a stable nested JSON shape
//! so consumers never parse flattened property names:
//!
//! ```text
//! build.version=1.4.2        =>  {"version":"1.4.2",
//! git.branch=main                 "git":{"branch":"main"}}
//! ```

use std::path::Path;

use serde::Serialize;

use crate::error::{Result, ServiceError};

/// Structured build metadata. Absent keys are omitted from the JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildInfo {
    /// Stamped version string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Build timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// User that produced the build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Host that produced the build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Git details, omitted entirely when no git key was stamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git: Option<GitInfo>,
}

/// Git details within [`BuildInfo`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct GitInfo {
    /// Branch name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Abbreviated commit id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,

    /// Working-tree state at build time, "clean" or "dirty".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirty: Option<String>,
}

impl GitInfo {
    fn is_empty(&self) -> bool {
        self.branch.is_none() && self.commit.is_none() && self.dirty.is_none()
    }
}

impl BuildInfo {
    /// Read and parse a properties file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ServiceError::BuildInfo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::parse(&contents))
    }

    /// Parse properties-file contents.
    ///
    /// Lines starting with `#` or `!` and blank lines are ignored; lines
    /// without `=` are ignored as well. Unknown keys are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut info = BuildInfo::default();
        let mut git = GitInfo::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim().to_string();

            match key.trim() {
                "build.version" => info.version = Some(value),
                "build.time" => info.time = Some(value),
                "build.user" => info.user = Some(value),
                "build.host" => info.host = Some(value),
                "git.branch" => git.branch = Some(value),
                "git.commit.id.abbrev" => git.commit = Some(value),
                "git.dirty" => git.dirty = Some(value),
                _ => {}
            }
        }

        if !git.is_empty() {
            info.git = Some(git);
        }
        info
    }
}
