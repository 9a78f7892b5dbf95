// pattern detection module - runs the rule catalog over raw source text

use super::patterns::{LegacyPattern, SourceLocation};
use super::rules::{catalog, DetectionRule};
use tracing::{debug, warn};

/// find every legacy construct in `source`.
///
/// every rule contributes independently, so two rules may report the same
/// or overlapping spans. the result is ordered by line; matches on the same
/// line keep rule order, then match order.
pub fn detect_legacy_patterns(source: &str) -> Vec<LegacyPattern> {
    let mut patterns = Vec::new();

    if source.is_empty() {
        return patterns;
    }

    for rule in catalog() {
        let before = patterns.len();
        collect_rule_matches(rule, source, &mut patterns);
        let found = patterns.len() - before;
        if found > 0 {
            debug!(rule = rule.name, matches = found, "legacy pattern rule matched");
        }
    }

    // stable, so ties keep insertion order
    patterns.sort_by_key(|p| p.location.line);
    patterns
}

fn collect_rule_matches(rule: &DetectionRule, source: &str, out: &mut Vec<LegacyPattern>) {
    let Some(matches) = rule.find_iter(source) else {
        warn!(rule = rule.name, "rule has no usable matcher, skipping");
        return;
    };

    // matches arrive in ascending order, so the tracker only ever walks forward
    let mut tracker = LocationTracker::new(source);

    for m in matches {
        if m.as_str().is_empty() {
            continue;
        }
        let location = tracker.locate(m.start(), m.end());
        out.push(LegacyPattern {
            rule: rule.name.to_string(),
            pattern_type: rule.pattern_type,
            severity: rule.severity,
            description: rule.description.to_string(),
            suggested_fix: rule.suggested_fix.to_string(),
            original_text: m.as_str().to_string(),
            modern_replacement: rule.modernize(m.as_str()),
            category: rule.category.to_string(),
            location,
        });
    }
}

/// converts byte offsets into 1-based line/column pairs by walking the text once
pub struct LocationTracker<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> LocationTracker<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// location of `[start, end)`. offsets must be char boundaries and must
    /// not go backwards between calls; a smaller start restarts the walk.
    pub fn locate(&mut self, start: usize, end: usize) -> SourceLocation {
        if start < self.offset {
            *self = Self::new(self.source);
        }

        for ch in self.source[self.offset..start].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = start;

        SourceLocation {
            line: self.line,
            column: self.column,
            start_index: start,
            end_index: end,
        }
    }
}
