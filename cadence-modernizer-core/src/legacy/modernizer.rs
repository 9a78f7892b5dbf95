// auto-modernization module - rewrites eligible matches in place, back to front

use super::patterns::{LegacyPattern, Severity};
use super::rules::is_auto_fixable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::{debug, warn};

/// which matches the transformer is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutoModernizationOptions {
    pub auto_fix_critical: bool,
    pub auto_fix_warnings: bool,
    pub preserve_comments: bool,
    pub add_explanation_comments: bool,
}

impl Default for AutoModernizationOptions {
    fn default() -> Self {
        Self {
            auto_fix_critical: true,
            auto_fix_warnings: false,
            preserve_comments: true,
            add_explanation_comments: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernizationResult {
    pub modernized_code: String,
    pub transformations: Vec<String>,
    pub confidence: f64,
    pub requires_manual_review: bool,
    pub warnings: Vec<String>,
}

/// a pending splice against the text being rewritten
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    Replace { range: Range<usize>, text: String },
    Insert { at: usize, text: String },
}

impl TextEdit {
    fn offset(&self) -> usize {
        match self {
            TextEdit::Replace { range, .. } => range.start,
            TextEdit::Insert { at, .. } => *at,
        }
    }

    // at equal offsets replacements go first so an insertion lands in front of them
    fn tie_rank(&self) -> u8 {
        match self {
            TextEdit::Replace { .. } => 0,
            TextEdit::Insert { .. } => 1,
        }
    }
}

/// apply edits from the highest offset down, each step producing a new buffer.
///
/// every edit only changes text at or after its own offset, so offsets of
/// edits still to come stay valid. callers must not pass overlapping
/// replacements.
pub fn apply_edits_reverse(source: &str, mut edits: Vec<TextEdit>) -> String {
    edits.sort_by(|a, b| {
        b.offset()
            .cmp(&a.offset())
            .then_with(|| a.tie_rank().cmp(&b.tie_rank()))
    });

    edits.into_iter().fold(source.to_string(), |buffer, edit| match edit {
        TextEdit::Replace { range, text } => {
            let mut next = String::with_capacity(buffer.len() + text.len());
            next.push_str(&buffer[..range.start]);
            next.push_str(&text);
            next.push_str(&buffer[range.end..]);
            next
        }
        TextEdit::Insert { at, text } => {
            let mut next = String::with_capacity(buffer.len() + text.len());
            next.push_str(&buffer[..at]);
            next.push_str(&text);
            next.push_str(&buffer[at..]);
            next
        }
    })
}

fn tier_enabled(severity: Severity, options: &AutoModernizationOptions) -> bool {
    match severity {
        Severity::Critical => options.auto_fix_critical,
        Severity::Warning => options.auto_fix_warnings,
        Severity::Suggestion => false,
    }
}

pub fn is_eligible(pattern: &LegacyPattern, options: &AutoModernizationOptions) -> bool {
    tier_enabled(pattern.severity, options) && is_auto_fixable(&pattern.rule)
}

/// rewrite `source` using the eligible subset of `patterns`.
///
/// `patterns` must come from detection over this same `source`.
pub fn auto_modernize(
    source: &str,
    patterns: &[LegacyPattern],
    options: &AutoModernizationOptions,
) -> ModernizationResult {
    let comments = if options.preserve_comments {
        comment_spans(source)
    } else {
        Vec::new()
    };

    let mut warnings = Vec::new();
    let mut eligible: Vec<&LegacyPattern> = Vec::new();

    for pattern in patterns {
        if !is_valid_span(source, pattern) {
            warn!(rule = %pattern.rule, "pattern location does not match source, skipping");
            warnings.push(format!(
                "manual review required: {} at line {} (location out of date)",
                pattern.description, pattern.location.line
            ));
            continue;
        }
        if in_comment(&comments, pattern.location.start_index) {
            debug!(rule = %pattern.rule, line = pattern.location.line, "match inside comment left untouched");
            continue;
        }
        if is_eligible(pattern, options) {
            eligible.push(pattern);
        } else {
            warnings.push(format!(
                "manual review required: {} at line {}",
                pattern.description, pattern.location.line
            ));
        }
    }

    // highest start first; the lowest applied start bounds what may still be edited
    eligible.sort_by(|a, b| b.location.start_index.cmp(&a.location.start_index));

    let mut edits = Vec::new();
    let mut transformations = Vec::new();
    let mut applied_ranges: Vec<Range<usize>> = Vec::new();
    let mut explanations: Vec<(usize, &str)> = Vec::new();
    let mut boundary = usize::MAX;

    for pattern in eligible {
        let loc = pattern.location;
        if loc.end_index > boundary {
            warn!(rule = %pattern.rule, line = loc.line, "overlapping edit skipped");
            warnings.push(format!(
                "manual review required: overlapping edit skipped for {} at line {}",
                pattern.description, loc.line
            ));
            continue;
        }
        boundary = loc.start_index;

        edits.push(TextEdit::Replace {
            range: loc.start_index..loc.end_index,
            text: pattern.modern_replacement.clone(),
        });
        transformations.push(format!(
            "line {}: `{}` -> `{}` ({})",
            loc.line, pattern.original_text, pattern.modern_replacement, pattern.description
        ));

        applied_ranges.push(loc.start_index..loc.end_index);
        explanations.push((loc.start_index, pattern.suggested_fix.as_str()));
    }

    if options.add_explanation_comments {
        for (line_start, fixes) in explanation_lines(source, &applied_ranges, explanations) {
            let indent = leading_whitespace(&source[line_start..]);
            edits.push(TextEdit::Insert {
                at: line_start,
                text: format!("{indent}// cadence 1.0: {}\n", fixes.join("; ")),
            });
        }
    }

    // report in source order
    transformations.reverse();

    let applied = transformations.len();
    let skipped = warnings.len();
    let confidence = if applied + skipped == 0 {
        1.0
    } else {
        (applied as f64 / (applied + skipped) as f64).max(0.1)
    };

    ModernizationResult {
        modernized_code: apply_edits_reverse(source, edits),
        transformations,
        confidence,
        requires_manual_review: skipped > 0,
        warnings,
    }
}

fn is_valid_span(source: &str, pattern: &LegacyPattern) -> bool {
    let loc = pattern.location;
    source.get(loc.start_index..loc.end_index) == Some(pattern.original_text.as_str())
}

fn line_start_of(source: &str, offset: usize) -> usize {
    source[..offset].rfind('\n').map_or(0, |i| i + 1)
}

/// group fixes by the line their comment goes above, in source order.
///
/// a line that starts inside a multi-line replacement has no line start left
/// after the splice, so its fixes move up to the line where that replacement
/// begins.
fn explanation_lines<'a>(
    source: &str,
    applied: &[Range<usize>],
    explanations: Vec<(usize, &'a str)>,
) -> BTreeMap<usize, Vec<&'a str>> {
    let mut lines: BTreeMap<usize, Vec<(usize, &'a str)>> = BTreeMap::new();

    for (start, fix) in explanations {
        let mut line_start = line_start_of(source, start);
        while let Some(range) = applied
            .iter()
            .find(|r| r.start < line_start && line_start < r.end)
        {
            line_start = line_start_of(source, range.start);
        }
        lines.entry(line_start).or_default().push((start, fix));
    }

    lines
        .into_iter()
        .map(|(line_start, mut fixes)| {
            fixes.sort_by_key(|(start, _)| *start);
            (line_start, fixes.into_iter().map(|(_, fix)| fix).collect())
        })
        .collect()
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn in_comment(comments: &[Range<usize>], offset: usize) -> bool {
    comments.iter().any(|c| c.contains(&offset))
}

/// byte ranges of `//` and (nested) `/* */` comments, skipping string literals
pub fn comment_spans(source: &str) -> Vec<Range<usize>> {
    let bytes = source.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                i += 1;
                while i < bytes.len() && bytes[i] != b'"' && bytes[i] != b'\n' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                spans.push(start..i);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let start = i;
                let mut depth = 0usize;
                while i < bytes.len() {
                    if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
                        depth += 1;
                        i += 2;
                    } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                        depth -= 1;
                        i += 2;
                        if depth == 0 {
                            break;
                        }
                    } else {
                        i += 1;
                    }
                }
                spans.push(start..i.min(bytes.len()));
            }
            _ => i += 1,
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::detector::detect_legacy_patterns;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn everything() -> AutoModernizationOptions {
        AutoModernizationOptions {
            auto_fix_critical: true,
            auto_fix_warnings: true,
            preserve_comments: false,
            add_explanation_comments: false,
        }
    }

    fn modernize(source: &str, options: &AutoModernizationOptions) -> ModernizationResult {
        auto_modernize(source, &detect_legacy_patterns(source), options)
    }

    #[test]
    fn rewrites_multiple_patterns_on_one_line() {
        let result = modernize("pub fun f(a: AuthAccount) { a.save(1) }", &everything());
        assert_eq!(
            result.modernized_code,
            "access(all) fun f(a: auth(Storage, Capabilities) &Account) { a.save(1) }"
        );
        assert_eq!(result.transformations.len(), 2);
        assert!(result.transformations[0].starts_with("line 1: `pub fun`"));
    }

    #[test]
    fn modern_code_is_returned_unchanged() {
        let source = "access(all) fun f() {}\n";
        let result = modernize(source, &everything());
        assert_eq!(result.modernized_code, source);
        assert!(result.transformations.is_empty());
        assert_eq!(result.confidence, 1.0);
        assert!(!result.requires_manual_review);
    }

    #[test]
    fn deny_listed_rules_become_warnings() {
        let source = "signer.link<&V>(/public/v, target: /storage/v)\npub fun f() {}";
        let result = modernize(source, &everything());
        assert!(result.modernized_code.contains("signer.link<&V>"));
        assert!(result.modernized_code.contains("access(all) fun f"));
        assert!(result.requires_manual_review);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("manual review required:"));
        assert!(result.warnings[0].ends_with("at line 1"));
        assert_eq!(result.confidence, 0.5);
    }

    #[test]
    fn disabled_tiers_are_not_applied() {
        let source = "let r: &V{I} = x\npub fun f() {}";
        let options = AutoModernizationOptions {
            auto_fix_warnings: false,
            ..everything()
        };
        let result = modernize(source, &options);
        assert_eq!(result.modernized_code, "let r: &V{I} = x\naccess(all) fun f() {}");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn suggestions_are_never_applied() {
        let result = modernize("import A from 0x01", &everything());
        assert_eq!(result.modernized_code, "import A from 0x01");
        assert!(result.requires_manual_review);
    }

    #[test]
    fn overlapping_eligible_edits_are_skipped() {
        let source = "abcdef";
        let mut patterns = detect_legacy_patterns("pub fun f() {}");
        assert_eq!(patterns.len(), 1);
        // two fabricated matches over the same text, the second overlapping the first
        let mut first = patterns.remove(0);
        first.original_text = "abcd".into();
        first.modern_replacement = "ABCD".into();
        first.location.start_index = 0;
        first.location.end_index = 4;
        let mut second = first.clone();
        second.original_text = "cdef".into();
        second.modern_replacement = "CDEF".into();
        second.location.start_index = 2;
        second.location.end_index = 6;

        let result = auto_modernize(source, &[first, second], &everything());
        assert_eq!(result.modernized_code, "abCDEF");
        assert_eq!(result.transformations.len(), 1);
        assert!(result.warnings[0].contains("overlapping"));
        assert!(result.requires_manual_review);
    }

    #[test]
    fn comments_are_preserved_when_asked() {
        let source = indoc! {r#"
            // pub fun old() was the legacy form
            /* pub var x: Int */
            let s = "// pub fun not a comment"
            pub fun f() {}
        "#};
        let options = AutoModernizationOptions {
            preserve_comments: true,
            ..everything()
        };
        let result = modernize(source, &options);
        let expected = indoc! {r#"
            // pub fun old() was the legacy form
            /* pub var x: Int */
            let s = "// access(all) fun not a comment"
            access(all) fun f() {}
        "#};
        assert_eq!(result.modernized_code, expected);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn explanation_comments_are_inserted_once_per_line() {
        let source = indoc! {r#"
            access(all) contract C {
                pub fun f(a: AuthAccount) {}
                pub var x: Int
            }
        "#};
        let options = AutoModernizationOptions {
            add_explanation_comments: true,
            ..everything()
        };
        let result = modernize(source, &options);
        let expected = indoc! {r#"
            access(all) contract C {
                // cadence 1.0: replace `pub fun` with `access(all) fun`; take `auth(Storage, Capabilities) &Account` and narrow the entitlements to what is used
                access(all) fun f(a: auth(Storage, Capabilities) &Account) {}
                // cadence 1.0: replace `pub let`/`pub var` with `access(all) let`/`access(all) var`
                access(all) var x: Int
            }
        "#};
        assert_eq!(result.modernized_code, expected);
    }

    #[test]
    fn explanation_comment_on_first_line() {
        let options = AutoModernizationOptions {
            add_explanation_comments: true,
            ..everything()
        };
        let result = modernize("pub fun f() {}", &options);
        assert_eq!(
            result.modernized_code,
            "// cadence 1.0: replace `pub fun` with `access(all) fun`\naccess(all) fun f() {}"
        );
    }

    #[test]
    fn explanation_for_a_line_inside_a_multiline_match_moves_up() {
        let options = AutoModernizationOptions {
            add_explanation_comments: true,
            ..everything()
        };
        let result = modernize("pub\nfun f(a: AuthAccount) {}", &options);
        assert_eq!(
            result.modernized_code,
            "// cadence 1.0: replace `pub fun` with `access(all) fun`; \
             take `auth(Storage, Capabilities) &Account` and narrow the entitlements to what is used\n\
             access(all) fun f(a: auth(Storage, Capabilities) &Account) {}"
        );
        assert_eq!(result.transformations.len(), 2);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn reverse_order_is_required_for_length_changing_edits() {
        let source = "pub fun a() {}\npub fun b() {}";
        let patterns = detect_legacy_patterns(source);
        let expected = "access(all) fun a() {}\naccess(all) fun b() {}";

        let reverse = apply_edits_reverse(
            source,
            patterns
                .iter()
                .map(|p| TextEdit::Replace {
                    range: p.location.start_index..p.location.end_index,
                    text: p.modern_replacement.clone(),
                })
                .collect(),
        );
        assert_eq!(reverse, expected);

        // forward application with the original offsets drifts after the first edit
        let mut forward = source.to_string();
        for p in &patterns {
            forward.replace_range(
                p.location.start_index..p.location.end_index,
                &p.modern_replacement,
            );
        }
        assert_ne!(forward, expected);
    }

    #[test]
    fn confidence_has_a_floor() {
        let source = "import A from 0x01\n".repeat(20);
        let result = modernize(&source, &everything());
        assert_eq!(result.confidence, 0.1);
    }

    #[test]
    fn stale_locations_are_reported_not_applied() {
        let patterns = detect_legacy_patterns("pub fun f() {}");
        let result = auto_modernize("fun f() {}", &patterns, &everything());
        assert_eq!(result.modernized_code, "fun f() {}");
        assert!(result.requires_manual_review);
    }
}
