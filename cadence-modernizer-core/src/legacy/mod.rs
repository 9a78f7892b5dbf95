// legacy module - organises detection, guidance, planning and rewriting of legacy cadence syntax

pub mod detector;
pub mod modernizer;
pub mod patterns;
pub mod planner;
pub mod rules;
pub mod suggestions;
pub mod validation;

// re-export key public items for convenient access
pub use detector::detect_legacy_patterns;
pub use modernizer::{auto_modernize, AutoModernizationOptions, ModernizationResult};
pub use patterns::{LegacyPattern, PatternType, Severity, SourceLocation};
pub use planner::{create_fix_plan, Effort, FixPlan, Impact, PrioritizedFix, RiskLevel};
pub use suggestions::{EducationalContent, ModernizationSuggestion};
pub use validation::{validate_cadence_code, validate_source, ValidationResult};
