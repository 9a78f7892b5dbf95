// report module - human-facing rendering of engine results

use crate::legacy::{FixPlan, ModernizationResult, RiskLevel, Severity, ValidationResult};
use crate::utils::truncate_with_ellipsis;
use console::style;
use std::fmt::Write;

fn severity_label(severity: Severity) -> String {
    match severity {
        Severity::Critical => style("critical").red().bold().to_string(),
        Severity::Warning => style("warning").yellow().bold().to_string(),
        Severity::Suggestion => style("suggestion").cyan().to_string(),
    }
}

/// patterns, suggestions and education for one file
pub fn render_validation(file: &str, result: &ValidationResult) -> String {
    let mut out = String::new();

    if !result.has_legacy_patterns {
        let _ = writeln!(out, "{} {}", style("✅").green(), style(file).bold());
        return out;
    }

    let marker = if result.is_valid { "⚠️ " } else { "❌" };
    let _ = writeln!(
        out,
        "{} {} - {} legacy pattern{} ({} critical, confidence {:.2})",
        marker,
        style(file).bold(),
        result.patterns.len(),
        if result.patterns.len() == 1 { "" } else { "s" },
        result.critical_count(),
        result.confidence
    );

    for suggestion in &result.suggestions {
        let p = &suggestion.pattern;
        let _ = writeln!(
            out,
            "  {}:{}:{} {} {}",
            file,
            p.location.line,
            p.location.column,
            severity_label(p.severity),
            p.description
        );
        let _ = writeln!(
            out,
            "      {} `{}` -> `{}`{}",
            style("fix:").dim(),
            truncate_with_ellipsis(&p.original_text, 60),
            truncate_with_ellipsis(&suggestion.modern_replacement, 60),
            if suggestion.auto_fixable { "" } else { " (manual review)" }
        );
    }

    if !result.education.is_empty() {
        let _ = writeln!(out, "\n  {}", style("📚 why modernise:").cyan().bold());
        for entry in &result.education {
            let _ = writeln!(out, "  - {}: {}", style(&entry.title).bold(), entry.why_modernize);
            if let Some(url) = &entry.learn_more_url {
                let _ = writeln!(out, "    {}", style(url).dim());
            }
        }
    }

    out
}

fn risk_label(risk: RiskLevel) -> String {
    match risk {
        RiskLevel::High => style("high").red().bold().to_string(),
        RiskLevel::Medium => style("medium").yellow().bold().to_string(),
        RiskLevel::Low => style("low").green().to_string(),
    }
}

pub fn render_plan(file: &str, plan: &FixPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "📋 {} - {} fix{}, ~{} min, risk {}",
        style(file).bold(),
        plan.prioritized_fixes.len(),
        if plan.prioritized_fixes.len() == 1 { "" } else { "es" },
        plan.estimated_time_minutes,
        risk_label(plan.risk_level)
    );

    for category in &plan.categories {
        let _ = writeln!(
            out,
            "  {} (priority {}, {} pattern{})",
            style(&category.category).cyan(),
            category.priority,
            category.count,
            if category.count == 1 { "" } else { "s" }
        );
    }

    for fix in &plan.prioritized_fixes {
        let _ = writeln!(
            out,
            "  {:>3}. line {}: {} [impact {:?}, effort {:?}]",
            fix.order,
            fix.pattern.location.line,
            fix.pattern.suggested_fix,
            fix.impact,
            fix.effort
        );
    }

    out
}

pub fn render_modernization(file: &str, result: &ModernizationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "🔧 {} - {} applied, {} skipped, confidence {:.2}",
        style(file).bold(),
        result.transformations.len(),
        result.warnings.len(),
        result.confidence
    );
    for transformation in &result.transformations {
        let _ = writeln!(out, "  {} {}", style("+").green(), transformation);
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "  {} {}", style("!").yellow(), warning);
    }
    out
}
