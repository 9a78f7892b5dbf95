// rule catalog - one entry per legacy construct, built once and shared read-only

use super::patterns::{PatternType, Severity};
use lazy_static::lazy_static;
use regex::{Matches, Regex};
use tracing::warn;

/// a single legacy construct: how to find it, how to describe it, how to rewrite it
pub struct DetectionRule {
    pub name: &'static str,
    pub pattern_type: PatternType,
    pub severity: Severity,
    pub description: &'static str,
    pub suggested_fix: &'static str,
    pub category: &'static str,
    matcher: Option<Regex>,
    transform: fn(&str) -> String,
}

impl DetectionRule {
    fn new(
        name: &'static str,
        pattern: &str,
        pattern_type: PatternType,
        severity: Severity,
        description: &'static str,
        suggested_fix: &'static str,
        category: &'static str,
        transform: fn(&str) -> String,
    ) -> Self {
        // a rule that cannot compile stays in the catalog but never matches
        let matcher = match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(rule = name, error = %e, "rule matcher failed to compile, rule disabled");
                None
            }
        };

        Self {
            name,
            pattern_type,
            severity,
            description,
            suggested_fix,
            category,
            matcher,
            transform,
        }
    }

    /// non-overlapping matches across the whole text, empty when the matcher is unusable
    pub fn find_iter<'r, 't>(&'r self, text: &'t str) -> Option<Matches<'r, 't>> {
        self.matcher.as_ref().map(|m| m.find_iter(text))
    }

    /// modern form of a substring this rule matched
    pub fn modernize(&self, matched: &str) -> String {
        (self.transform)(matched)
    }
}

/// whether a rule's rewrite may be applied without a human looking at it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixability {
    AutoFix,
    ManualReview,
    Unlisted,
}

// rewrites derivable from the matched text alone
const AUTO_FIXABLE_RULES: &[&str] = &[
    "pub_fun",
    "pub_field",
    "pub_composite",
    "priv_modifier",
    "pub_event",
    "account_storage_call",
    "account_unlink",
    "get_capability",
    "auth_account_type",
    "public_account_type",
    "restricted_type",
];

// the modern form depends on context the match does not contain
const MANUAL_REVIEW_RULES: &[&str] = &[
    "account_link",
    "comma_interface_conformance",
    "pub_set_modifier",
];

pub fn fixability(rule_name: &str) -> Fixability {
    if MANUAL_REVIEW_RULES.contains(&rule_name) {
        Fixability::ManualReview
    } else if AUTO_FIXABLE_RULES.contains(&rule_name) {
        Fixability::AutoFix
    } else {
        Fixability::Unlisted
    }
}

pub fn is_auto_fixable(rule_name: &str) -> bool {
    fixability(rule_name) == Fixability::AutoFix
}

lazy_static! {
    static ref CATALOG: Vec<DetectionRule> = build_catalog();
}

/// the full rule catalog in evaluation order
pub fn catalog() -> &'static [DetectionRule] {
    &CATALOG
}

pub fn find_rule(name: &str) -> Option<&'static DetectionRule> {
    catalog().iter().find(|rule| rule.name == name)
}

fn build_catalog() -> Vec<DetectionRule> {
    use PatternType::*;
    use Severity::*;

    vec![
        DetectionRule::new(
            "pub_fun",
            r"\bpub\s+fun\b",
            AccessModifier,
            Critical,
            "`pub fun` was removed in Cadence 1.0",
            "replace `pub fun` with `access(all) fun`",
            "access-control",
            replace_pub_keyword,
        ),
        DetectionRule::new(
            "pub_field",
            r"\bpub\s+(?:let|var)\b",
            AccessModifier,
            Critical,
            "`pub` field declarations were removed in Cadence 1.0",
            "replace `pub let`/`pub var` with `access(all) let`/`access(all) var`",
            "access-control",
            replace_pub_keyword,
        ),
        DetectionRule::new(
            "pub_composite",
            r"\bpub\s+(?:resource|struct|contract|enum)\b",
            AccessModifier,
            Critical,
            "`pub` composite declarations were removed in Cadence 1.0",
            "declare the type with `access(all)` instead of `pub`",
            "access-control",
            replace_pub_keyword,
        ),
        DetectionRule::new(
            "priv_modifier",
            r"\bpriv\s+(?:fun|let|var)\b",
            AccessModifier,
            Critical,
            "`priv` was removed in Cadence 1.0",
            "replace `priv` with `access(self)`",
            "access-control",
            replace_priv_keyword,
        ),
        DetectionRule::new(
            "pub_set_modifier",
            r"\bpub\(set\)\s+var\b",
            AccessModifier,
            Critical,
            "`pub(set)` public setters no longer exist in Cadence 1.0",
            "use `access(all) var` and expose an explicit setter function",
            "access-control",
            replace_pub_set,
        ),
        DetectionRule::new(
            "pub_event",
            r"\bpub\s+event\b",
            EventDeclaration,
            Critical,
            "`pub event` declarations were removed in Cadence 1.0",
            "declare events with `access(all) event`",
            "events",
            replace_pub_keyword,
        ),
        DetectionRule::new(
            "account_storage_call",
            r"\b(?:self\.account|authAccount|signer|account|acct|admin|owner)\.(?:save|load|copy|borrow|type|check)\b",
            StorageApi,
            Critical,
            "storage functions moved off the account object into `account.storage`",
            "call storage functions through `.storage`, e.g. `signer.storage.save(...)`",
            "storage",
            insert_storage_member,
        ),
        DetectionRule::new(
            "account_link",
            r"\.link\s*<[^\n(]*?>\s*\(",
            StorageApi,
            Critical,
            "link-based capabilities were replaced by capability controllers",
            "issue a capability with `capabilities.storage.issue<T>(storagePath)` and publish it with `capabilities.publish`",
            "capabilities",
            replace_link_call,
        ),
        DetectionRule::new(
            "account_unlink",
            r"\.unlink\s*\(",
            StorageApi,
            Critical,
            "`unlink` was replaced by unpublishing capabilities",
            "use `capabilities.unpublish(path)`",
            "capabilities",
            replace_unlink_call,
        ),
        DetectionRule::new(
            "get_capability",
            r"\.getCapability\b",
            StorageApi,
            Warning,
            "`getCapability` moved to the account capabilities API",
            "use `capabilities.get<T>(path)`",
            "capabilities",
            replace_get_capability,
        ),
        DetectionRule::new(
            "auth_account_type",
            r"\bAuthAccount\b",
            FunctionSignature,
            Critical,
            "`AuthAccount` was replaced by entitled `&Account` references",
            "take `auth(Storage, Capabilities) &Account` and narrow the entitlements to what is used",
            "account-types",
            |_| "auth(Storage, Capabilities) &Account".to_string(),
        ),
        DetectionRule::new(
            "public_account_type",
            r"\bPublicAccount\b",
            FunctionSignature,
            Critical,
            "`PublicAccount` was replaced by the unentitled `&Account` reference",
            "use `&Account`",
            "account-types",
            |_| "&Account".to_string(),
        ),
        DetectionRule::new(
            "comma_interface_conformance",
            r"\b(?:resource|struct|contract)(?:[ \t]+interface)?[ \t]+[A-Za-z_]\w*[ \t]*:[ \t]*[A-Za-z_][\w.]*(?:[ \t]*,[ \t]*[A-Za-z_][\w.]*)+",
            InterfaceConformance,
            Warning,
            "comma-separated interface conformance lists are legacy syntax",
            "join conformances with `&`",
            "type-system",
            join_conformances,
        ),
        DetectionRule::new(
            "restricted_type",
            r"[@&][A-Za-z_][\w.]*\{[A-Za-z_][\w.]*(?:[ \t]*,[ \t]*[A-Za-z_][\w.]*)*\}",
            InterfaceConformance,
            Warning,
            "restricted types `T{I}` were replaced by intersection types",
            "use the intersection type `{I}` without the outer type",
            "type-system",
            drop_restricted_outer_type,
        ),
        DetectionRule::new(
            "address_import",
            r"\bimport\s+[A-Za-z_]\w*\s+from\s+0x[0-9a-fA-F]+\b",
            ImportStatement,
            Suggestion,
            "address imports tie the code to one network",
            "use a string import `import \"Name\"` resolved by the project configuration",
            "imports",
            string_import,
        ),
    ]
}

// `pub <rest>` -> `access(all) <rest>`
fn replace_pub_keyword(matched: &str) -> String {
    let rest = matched.strip_prefix("pub").unwrap_or(matched).trim_start();
    format!("access(all) {rest}")
}

fn replace_priv_keyword(matched: &str) -> String {
    let rest = matched.strip_prefix("priv").unwrap_or(matched).trim_start();
    format!("access(self) {rest}")
}

fn replace_pub_set(matched: &str) -> String {
    let rest = matched.strip_prefix("pub(set)").unwrap_or(matched).trim_start();
    format!("access(all) {rest}")
}

fn insert_storage_member(matched: &str) -> String {
    match matched.rsplit_once('.') {
        Some((receiver, function)) => format!("{receiver}.storage.{function}"),
        None => matched.to_string(),
    }
}

fn replace_link_call(matched: &str) -> String {
    let rest = matched.strip_prefix(".link").unwrap_or(matched).trim_start();
    format!(".capabilities.storage.issue{rest}")
}

fn replace_unlink_call(_matched: &str) -> String {
    ".capabilities.unpublish(".to_string()
}

fn replace_get_capability(_matched: &str) -> String {
    ".capabilities.get".to_string()
}

fn join_conformances(matched: &str) -> String {
    match matched.split_once(':') {
        Some((head, conformances)) => {
            let joined = conformances
                .split(',')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(" & ");
            format!("{head}: {joined}")
        }
        None => matched.to_string(),
    }
}

// `&Vault{Receiver}` -> `&{Receiver}`
fn drop_restricted_outer_type(matched: &str) -> String {
    match (matched.chars().next(), matched.find('{')) {
        (Some(sigil), Some(brace)) => format!("{sigil}{}", &matched[brace..]),
        _ => matched.to_string(),
    }
}

fn string_import(matched: &str) -> String {
    match matched.split_whitespace().nth(1) {
        Some(name) => format!("import \"{name}\""),
        None => matched.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(rule: &str, matched: &str) -> String {
        find_rule(rule).expect("rule exists").modernize(matched)
    }

    #[test]
    fn every_rule_compiles() {
        for rule in catalog() {
            assert!(rule.find_iter("").is_some(), "{} failed to compile", rule.name);
        }
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<_> = catalog().iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn access_rewrites() {
        assert_eq!(rewrite("pub_fun", "pub fun"), "access(all) fun");
        assert_eq!(rewrite("pub_fun", "pub   fun"), "access(all) fun");
        assert_eq!(rewrite("pub_field", "pub var"), "access(all) var");
        assert_eq!(rewrite("pub_composite", "pub resource"), "access(all) resource");
        assert_eq!(rewrite("priv_modifier", "priv let"), "access(self) let");
        assert_eq!(rewrite("pub_set_modifier", "pub(set) var"), "access(all) var");
        assert_eq!(rewrite("pub_event", "pub event"), "access(all) event");
    }

    #[test]
    fn storage_rewrites() {
        assert_eq!(rewrite("account_storage_call", "signer.save"), "signer.storage.save");
        assert_eq!(
            rewrite("account_storage_call", "self.account.borrow"),
            "self.account.storage.borrow"
        );
        assert_eq!(
            rewrite("account_link", ".link<&Vault>("),
            ".capabilities.storage.issue<&Vault>("
        );
        assert_eq!(rewrite("account_unlink", ".unlink("), ".capabilities.unpublish(");
        assert_eq!(rewrite("get_capability", ".getCapability"), ".capabilities.get");
    }

    #[test]
    fn type_rewrites() {
        assert_eq!(
            rewrite("comma_interface_conformance", "resource Vault: Provider, Receiver"),
            "resource Vault: Provider & Receiver"
        );
        assert_eq!(
            rewrite("restricted_type", "&FungibleToken.Vault{FungibleToken.Receiver}"),
            "&{FungibleToken.Receiver}"
        );
        assert_eq!(rewrite("restricted_type", "@Vault{A, B}"), "@{A, B}");
        assert_eq!(
            rewrite("address_import", "import FungibleToken from 0xf233dcee88fe0abe"),
            "import \"FungibleToken\""
        );
    }

    #[test]
    fn fixability_lists_do_not_overlap() {
        for name in MANUAL_REVIEW_RULES {
            assert!(!AUTO_FIXABLE_RULES.contains(name));
        }
        assert_eq!(fixability("account_link"), Fixability::ManualReview);
        assert_eq!(fixability("pub_fun"), Fixability::AutoFix);
        assert_eq!(fixability("address_import"), Fixability::Unlisted);
    }

    #[test]
    fn storage_call_does_not_match_modern_form() {
        let rule = find_rule("account_storage_call").unwrap();
        let modern = "signer.storage.save(<-vault, to: /storage/vault)";
        assert_eq!(rule.find_iter(modern).unwrap().count(), 0);
    }
}
