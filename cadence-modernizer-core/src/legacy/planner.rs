// fix planning module - categorises, prioritises and scores remediation work

use super::patterns::{LegacyPattern, PatternType, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    fn rank(self) -> u8 {
        match self {
            Impact::High => 3,
            Impact::Medium => 2,
            Impact::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Effort {
    Easy,
    Moderate,
    Complex,
}

impl Effort {
    fn ease(self) -> u8 {
        match self {
            Effort::Easy => 3,
            Effort::Moderate => 2,
            Effort::Complex => 1,
        }
    }

    pub fn minutes(self) -> u32 {
        match self {
            Effort::Easy => 2,
            Effort::Moderate => 5,
            Effort::Complex => 15,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub priority: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedFix {
    pub pattern: LegacyPattern,
    pub impact: Impact,
    pub effort: Effort,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixPlan {
    pub patterns: Vec<LegacyPattern>,
    pub categories: Vec<CategorySummary>,
    pub prioritized_fixes: Vec<PrioritizedFix>,
    pub estimated_time_minutes: u32,
    pub risk_level: RiskLevel,
}

const COMPLEX_RULES: &[&str] = &["account_link", "comma_interface_conformance"];

const MODERATE_RULES: &[&str] = &[
    "pub_set_modifier",
    "get_capability",
    "auth_account_type",
    "restricted_type",
];

pub fn effort_for_rule(rule_name: &str) -> Effort {
    if COMPLEX_RULES.contains(&rule_name) {
        Effort::Complex
    } else if MODERATE_RULES.contains(&rule_name) {
        Effort::Moderate
    } else {
        Effort::Easy
    }
}

fn severity_weight(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 10,
        Severity::Warning => 5,
        Severity::Suggestion => 1,
    }
}

fn impact_for(severity: Severity) -> Impact {
    match severity {
        Severity::Critical => Impact::High,
        Severity::Warning => Impact::Medium,
        Severity::Suggestion => Impact::Low,
    }
}

/// group by category, highest priority first; equal priorities keep first-seen order
pub fn categorize_patterns(patterns: &[LegacyPattern]) -> Vec<CategorySummary> {
    let mut categories: Vec<CategorySummary> = Vec::new();

    for pattern in patterns {
        let weight = severity_weight(pattern.severity);
        match categories.iter_mut().find(|c| c.category == pattern.category) {
            Some(summary) => {
                summary.priority += weight;
                summary.count += 1;
            }
            None => categories.push(CategorySummary {
                category: pattern.category.clone(),
                priority: weight,
                count: 1,
            }),
        }
    }

    // stable sort keeps first-seen order on ties
    categories.sort_by(|a, b| b.priority.cmp(&a.priority));
    categories
}

/// every pattern as a fix, highest impact first and easiest first within a tier
pub fn prioritize_fixes(patterns: &[LegacyPattern]) -> Vec<PrioritizedFix> {
    let mut fixes: Vec<PrioritizedFix> = patterns
        .iter()
        .map(|pattern| PrioritizedFix {
            pattern: pattern.clone(),
            impact: impact_for(pattern.severity),
            effort: effort_for_rule(&pattern.rule),
            order: 0,
        })
        .collect();

    fixes.sort_by(|a, b| {
        b.impact
            .rank()
            .cmp(&a.impact.rank())
            .then_with(|| b.effort.ease().cmp(&a.effort.ease()))
    });

    for (i, fix) in fixes.iter_mut().enumerate() {
        fix.order = i + 1;
    }

    fixes
}

pub fn estimate_minutes(fixes: &[PrioritizedFix]) -> u32 {
    fixes.iter().map(|f| f.effort.minutes()).sum()
}

/// threshold risk over the whole pattern list
pub fn assess_risk(patterns: &[LegacyPattern]) -> RiskLevel {
    let critical = patterns.iter().filter(|p| p.is_critical()).count();
    let structural = patterns
        .iter()
        .filter(|p| {
            matches!(
                p.pattern_type,
                PatternType::StorageApi | PatternType::InterfaceConformance
            )
        })
        .count();

    if critical > 10 || structural > 5 {
        RiskLevel::High
    } else if critical > 5 || structural > 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn create_fix_plan(patterns: &[LegacyPattern]) -> FixPlan {
    let prioritized_fixes = prioritize_fixes(patterns);
    FixPlan {
        patterns: patterns.to_vec(),
        categories: categorize_patterns(patterns),
        estimated_time_minutes: estimate_minutes(&prioritized_fixes),
        risk_level: assess_risk(patterns),
        prioritized_fixes,
    }
}
