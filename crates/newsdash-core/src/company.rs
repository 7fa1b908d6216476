use serde::{Deserialize, Serialize};

/// Opaque company identifier bound to an authenticated session.
///
/// Identifiers are compared as plain strings; no case folding or trimming is
/// applied, so `"C1"` and `"c1"` are different companies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompanyId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for CompanyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Identifies one immutable captured snapshot.
///
/// The timestamp is opaque: it is forwarded verbatim to the analytics service
/// and only ever compared for equality or ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub company_id: CompanyId,
    pub timestamp: String,
}

impl ReportKey {
    pub fn new(company_id: CompanyId, timestamp: impl Into<String>) -> Self {
        Self {
            company_id,
            timestamp: timestamp.into(),
        }
    }
}
