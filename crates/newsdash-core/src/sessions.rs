use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// One session token bound to a company.
///
/// Only the SHA-256 digest of the token is stored, as lowercase hex.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionEntry {
    pub company_id: String,
    pub token_sha256: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionsFile {
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
}

/// Load and validate the session registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sessions(path: &Path) -> Result<SessionsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SessionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sessions(&content)
}

fn parse_sessions(content: &str) -> Result<SessionsFile, ConfigError> {
    let sessions_file: SessionsFile = serde_yaml::from_str(content)?;
    validate_sessions(&sessions_file)?;
    Ok(sessions_file)
}

fn validate_sessions(sessions_file: &SessionsFile) -> Result<(), ConfigError> {
    let mut seen_digests = HashSet::new();

    for entry in &sessions_file.sessions {
        if entry.company_id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "session company_id must be non-empty".to_string(),
            ));
        }

        let digest = &entry.token_sha256;
        if digest.len() != 64 || !digest.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
            return Err(ConfigError::Validation(format!(
                "session for company '{}' has an invalid token_sha256; expected 64 lowercase hex chars",
                entry.company_id
            )));
        }

        if !seen_digests.insert(digest.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate token_sha256 for company '{}'",
                entry.company_id
            )));
        }
    }

    Ok(())
}
