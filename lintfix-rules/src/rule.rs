use crate::select::glob_match;
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

/// How a rule decides what to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Literal or regex find/replace on every occurrence.
    Substitution,
    /// Escape characters inside markup text nodes.
    Escape,
    /// Rename a paired open/close tag.
    Retag,
    /// Guarded insertion of an import line after a ranked anchor.
    InsertImport,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Substitution => "substitution",
            RuleKind::Escape => "escape",
            RuleKind::Retag => "retag",
            RuleKind::InsertImport => "insert-import",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMeta {
    /// Stable dotted key, e.g. `syntax.duplicate_function_keyword`.
    pub key: &'static str,
    pub description: &'static str,
    pub kind: RuleKind,
}

/// A single text transformation.
///
/// `apply` must return `Cow::Borrowed` when nothing matched, so callers can
/// cheaply detect no-ops.
pub trait Rule {
    fn meta(&self) -> RuleMeta;

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str>;
}

/// Result of running a [`RuleSet`] over one file's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Keys of the rules that changed the text, in application order.
    pub hits: Vec<&'static str>,
}

impl Rewrite {
    pub fn changed(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Ordered list of rules. Later rules see the output of earlier ones.
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.rules.push(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn metas(&self) -> Vec<RuleMeta> {
        self.rules.iter().map(|r| r.meta()).collect()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.meta().key).collect()
    }

    /// Keep only rules allowed by the patterns, preserving order.
    ///
    /// A non-empty `allow` list restricts the set to matching keys; any key
    /// matching `deny` is dropped.
    pub fn select(self, allow: &[String], deny: &[String]) -> Self {
        let rules = self
            .rules
            .into_iter()
            .filter(|r| {
                let key = r.meta().key;
                if !allow.is_empty() && !allow.iter().any(|p| glob_match(p, key)) {
                    debug!(rule = key, "rule not in allowlist");
                    return false;
                }
                if deny.iter().any(|p| glob_match(p, key)) {
                    debug!(rule = key, "rule denied");
                    return false;
                }
                true
            })
            .collect();
        Self { rules }
    }

    pub fn apply(&self, original: &str) -> Rewrite {
        let mut current = original.to_string();
        let mut hits = Vec::new();

        for rule in &self.rules {
            let next = match rule.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(next) => next,
            };
            if next != current {
                let key = rule.meta().key;
                debug!(rule = key, "rule changed content");
                hits.push(key);
                current = next;
            }
        }

        Rewrite {
            content: current,
            hits,
        }
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.keys())
            .finish()
    }
}
