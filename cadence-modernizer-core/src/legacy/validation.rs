// validation module - the single entry point that ties detection and guidance together

use super::detector::detect_legacy_patterns;
use super::patterns::LegacyPattern;
use super::suggestions::{
    aggregate_confidence, educational_content, generate_suggestions, EducationalContent,
    ModernizationSuggestion,
};
use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub has_legacy_patterns: bool,
    pub patterns: Vec<LegacyPattern>,
    pub suggestions: Vec<ModernizationSuggestion>,
    pub education: Vec<EducationalContent>,
    /// milliseconds spent validating
    pub validation_time: f64,
    pub confidence: f64,
}

impl ValidationResult {
    fn degraded(validation_time: f64) -> Self {
        Self {
            is_valid: false,
            has_legacy_patterns: false,
            patterns: Vec::new(),
            suggestions: Vec::new(),
            education: Vec::new(),
            validation_time,
            confidence: 0.0,
        }
    }

    pub fn critical_count(&self) -> usize {
        self.patterns.iter().filter(|p| p.is_critical()).count()
    }
}

/// validate generated code, never failing.
///
/// async only so it slots into async pipelines; there is no await point
/// inside and the work finishes before the call returns.
pub async fn validate_cadence_code(source: Option<&str>) -> ValidationResult {
    validate_source(source.unwrap_or_default())
}

/// synchronous form of [`validate_cadence_code`]
pub fn validate_source(source: &str) -> ValidationResult {
    let started = Instant::now();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| run_pipeline(source)));
    let elapsed = started.elapsed().as_secs_f64() * 1000.0;

    match outcome {
        Ok((patterns, suggestions, education, confidence)) => ValidationResult {
            is_valid: !patterns.iter().any(LegacyPattern::is_critical),
            has_legacy_patterns: !patterns.is_empty(),
            patterns,
            suggestions,
            education,
            validation_time: elapsed,
            confidence,
        },
        Err(_) => {
            error!(source_len = source.len(), "legacy syntax validation failed, returning degraded result");
            ValidationResult::degraded(elapsed)
        }
    }
}

type PipelineOutput = (
    Vec<LegacyPattern>,
    Vec<ModernizationSuggestion>,
    Vec<EducationalContent>,
    f64,
);

fn run_pipeline(source: &str) -> PipelineOutput {
    let patterns = detect_legacy_patterns(source);
    let suggestions = generate_suggestions(&patterns);
    let education = educational_content(&patterns);
    let confidence = aggregate_confidence(&patterns);
    (patterns, suggestions, education, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_code_is_valid() {
        let result = validate_source("access(all) fun f() {}");
        assert!(result.is_valid);
        assert!(!result.has_legacy_patterns);
        assert_eq!(result.confidence, 1.0);
        assert!(result.validation_time >= 0.0);
    }

    #[test]
    fn warnings_alone_keep_code_valid() {
        let result = validate_source("resource Vault: Provider, Receiver");
        assert!(result.is_valid);
        assert!(result.has_legacy_patterns);
        assert_eq!(result.critical_count(), 0);
    }

    #[test]
    fn degraded_result_shape() {
        let result = ValidationResult::degraded(1.5);
        assert!(!result.is_valid);
        assert!(result.patterns.is_empty());
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.validation_time, 1.5);
    }

    #[tokio::test]
    async fn missing_source_is_empty_source() {
        let result = validate_cadence_code(None).await;
        assert!(result.is_valid);
        assert!(result.patterns.is_empty());
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(validate_source("pub fun f() {}")).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["hasLegacyPatterns"], true);
        assert_eq!(json["patterns"][0]["type"], "access-modifier");
        assert_eq!(json["patterns"][0]["severity"], "critical");
        assert_eq!(json["patterns"][0]["location"]["startIndex"], 0);
        assert_eq!(json["suggestions"][0]["autoFixable"], true);
    }
}
