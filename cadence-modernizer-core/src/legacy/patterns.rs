// pattern model - the plain data produced by detection and consumed everywhere else

use serde::{Deserialize, Serialize};

/// the syntactic family a legacy construct belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternType {
    AccessModifier,
    StorageApi,
    InterfaceConformance,
    FunctionSignature,
    ImportStatement,
    EventDeclaration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Critical,
    Warning,
    Suggestion,
}

/// where a match sits in the original text.
///
/// `line` and `column` are 1-based and count characters, `start_index` and
/// `end_index` are 0-based byte offsets with `end_index` exclusive, so
/// `&source[start_index..end_index]` is always the matched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub start_index: usize,
    pub end_index: usize,
}

/// one occurrence of a legacy construct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPattern {
    /// name of the catalog rule that produced this match
    pub rule: String,
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub severity: Severity,
    pub description: String,
    pub suggested_fix: String,
    pub original_text: String,
    pub modern_replacement: String,
    pub category: String,
    pub location: SourceLocation,
}

impl LegacyPattern {
    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}
