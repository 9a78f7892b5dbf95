// suggestion and education module - turns matches into guidance for humans

use super::patterns::{LegacyPattern, PatternType, Severity};
use super::rules::{fixability, Fixability};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeExample {
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernizationSuggestion {
    pub pattern: LegacyPattern,
    pub modern_replacement: String,
    pub explanation: String,
    pub example: CodeExample,
    pub confidence: f64,
    pub auto_fixable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalContent {
    pub pattern_type: PatternType,
    pub title: String,
    pub description: String,
    pub why_modernize: String,
    pub benefits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learn_more_url: Option<String>,
}

struct EducationEntry {
    title: &'static str,
    description: &'static str,
    why_modernize: &'static str,
    benefits: &'static [&'static str],
    learn_more_url: Option<&'static str>,
}

/// one suggestion per pattern, in the same order
pub fn generate_suggestions(patterns: &[LegacyPattern]) -> Vec<ModernizationSuggestion> {
    patterns.iter().map(build_suggestion).collect()
}

fn build_suggestion(pattern: &LegacyPattern) -> ModernizationSuggestion {
    ModernizationSuggestion {
        pattern: pattern.clone(),
        modern_replacement: pattern.modern_replacement.clone(),
        explanation: explanation_for(pattern.pattern_type).to_string(),
        example: example_for(pattern),
        confidence: suggestion_confidence(pattern),
        auto_fixable: fixability(&pattern.rule) == Fixability::AutoFix,
    }
}

fn explanation_for(pattern_type: PatternType) -> &'static str {
    match pattern_type {
        PatternType::AccessModifier => {
            "Cadence 1.0 replaced `pub` and `priv` with explicit `access(...)` modifiers. \
             `access(all)` grants the same visibility `pub` did and `access(self)` replaces `priv`."
        }
        PatternType::StorageApi => {
            "account storage and capability functions moved behind the `storage` and \
             `capabilities` members of `Account`, and link-based capabilities were replaced \
             by capability controllers."
        }
        PatternType::InterfaceConformance => {
            "interface sets are now written as intersection types, and restricted types \
             `T{I}` no longer exist."
        }
        PatternType::FunctionSignature => {
            "`AuthAccount` and `PublicAccount` were replaced by references to `Account`; \
             authorised access is expressed with entitlements such as `auth(Storage) &Account`."
        }
        _ => "this syntax is obsolete; update it to the modern Cadence equivalent.",
    }
}

fn example_for(pattern: &LegacyPattern) -> CodeExample {
    let canned = match pattern.pattern_type {
        PatternType::AccessModifier => Some((
            "pub fun getBalance(): UFix64 { return self.balance }",
            "access(all) fun getBalance(): UFix64 { return self.balance }",
        )),
        PatternType::StorageApi => Some((
            "signer.save(<-vault, to: /storage/vault)\nsigner.link<&Vault>(/public/vault, target: /storage/vault)",
            "signer.storage.save(<-vault, to: /storage/vault)\nlet cap = signer.capabilities.storage.issue<&Vault>(/storage/vault)\nsigner.capabilities.publish(cap, at: /public/vault)",
        )),
        PatternType::InterfaceConformance => Some((
            "let receiver: &Vault{Receiver} = ...",
            "let receiver: &{Receiver} = ...",
        )),
        PatternType::FunctionSignature => Some((
            "prepare(signer: AuthAccount) { ... }",
            "prepare(signer: auth(Storage) &Account) { ... }",
        )),
        PatternType::EventDeclaration => Some((
            "pub event Deposit(amount: UFix64)",
            "access(all) event Deposit(amount: UFix64)",
        )),
        PatternType::ImportStatement => None,
    };

    match canned {
        Some((before, after)) => CodeExample {
            before: before.to_string(),
            after: after.to_string(),
        },
        // no canned example, show the match itself
        None => CodeExample {
            before: pattern.original_text.clone(),
            after: pattern.modern_replacement.clone(),
        },
    }
}

fn suggestion_confidence(pattern: &LegacyPattern) -> f64 {
    let base: f64 = match pattern.severity {
        Severity::Critical => 0.9,
        Severity::Warning => 0.7,
        Severity::Suggestion => 0.5,
    };
    let adjusted = match fixability(&pattern.rule) {
        Fixability::AutoFix => base + 0.1,
        Fixability::ManualReview => base - 0.2,
        Fixability::Unlisted => base,
    };
    adjusted.clamp(0.1, 1.0)
}

fn education_entry(pattern_type: PatternType) -> Option<EducationEntry> {
    let entry = match pattern_type {
        PatternType::AccessModifier => EducationEntry {
            title: "access control in Cadence 1.0",
            description: "every declaration states its access level with `access(...)`",
            why_modernize: "`pub` and `priv` no longer parse, so contracts using them cannot be deployed or updated",
            benefits: &[
                "code compiles on current Flow networks",
                "visibility is explicit at every declaration",
                "entitlements can narrow access beyond all-or-nothing",
            ],
            learn_more_url: Some("https://cadence-lang.org/docs/language/access-control"),
        },
        PatternType::StorageApi => EducationEntry {
            title: "account storage and capability controllers",
            description: "storage lives under `account.storage`, capabilities are issued and published through `account.capabilities`",
            why_modernize: "the old account functions and link-based capabilities were removed",
            benefits: &[
                "capabilities can be revoked individually",
                "storage access is gated by entitlements",
                "no dangling links after storage moves",
            ],
            learn_more_url: Some("https://cadence-lang.org/docs/language/capabilities"),
        },
        PatternType::InterfaceConformance => EducationEntry {
            title: "intersection types",
            description: "interface sets are expressed as intersection types such as `{Receiver, Balance}`",
            why_modernize: "restricted types were removed and mixed conformance syntax is ambiguous",
            benefits: &[
                "one syntax for interface sets",
                "clearer reference types",
            ],
            learn_more_url: Some("https://cadence-lang.org/docs/language/types-and-type-system/intersection-types"),
        },
        PatternType::FunctionSignature => EducationEntry {
            title: "account references and entitlements",
            description: "transactions receive `&Account` references authorised with only the entitlements they need",
            why_modernize: "`AuthAccount` and `PublicAccount` no longer exist",
            benefits: &[
                "least-privilege transactions",
                "signers can see exactly what a transaction may touch",
            ],
            learn_more_url: None,
        },
        PatternType::ImportStatement => EducationEntry {
            title: "string imports",
            description: "contracts are imported by name and resolved by the project configuration",
            why_modernize: "hard-coded addresses break when the same code runs on another network",
            benefits: &[
                "the same source works on emulator, testnet and mainnet",
            ],
            learn_more_url: None,
        },
        PatternType::EventDeclaration => return None,
    };
    Some(entry)
}

/// education entries for the pattern types present, first-seen order, no duplicates
pub fn educational_content(patterns: &[LegacyPattern]) -> Vec<EducationalContent> {
    let mut seen: Vec<PatternType> = Vec::new();
    let mut content = Vec::new();

    for pattern in patterns {
        if seen.contains(&pattern.pattern_type) {
            continue;
        }
        seen.push(pattern.pattern_type);

        if let Some(entry) = education_entry(pattern.pattern_type) {
            content.push(EducationalContent {
                pattern_type: pattern.pattern_type,
                title: entry.title.to_string(),
                description: entry.description.to_string(),
                why_modernize: entry.why_modernize.to_string(),
                benefits: entry.benefits.iter().map(|b| b.to_string()).collect(),
                learn_more_url: entry.learn_more_url.map(str::to_string),
            });
        }
    }

    content
}

fn type_confidence(pattern_type: PatternType) -> f64 {
    match pattern_type {
        PatternType::AccessModifier => 0.95,
        PatternType::StorageApi => 0.90,
        PatternType::InterfaceConformance => 0.85,
        PatternType::FunctionSignature => 0.70,
        _ => 0.60,
    }
}

/// mean per-type confidence, 1.0 when nothing was found
pub fn aggregate_confidence(patterns: &[LegacyPattern]) -> f64 {
    if patterns.is_empty() {
        return 1.0;
    }
    let total: f64 = patterns.iter().map(|p| type_confidence(p.pattern_type)).sum();
    total / patterns.len() as f64
}
