use crate::error::RuleError;
use crate::rule::{Rule, RuleKind, RuleMeta};
use regex::Regex;
use std::borrow::Cow;

/// What a [`Substitution`] looks for.
#[derive(Debug, Clone)]
pub enum Pattern {
    Literal(String),
    Regex(Regex),
}

/// Unconditional find/replace of every occurrence.
///
/// Regex replacements are templates and may refer to capture groups
/// (`$1`, `${name}`); literal replacements are inserted verbatim.
#[derive(Debug, Clone)]
pub struct Substitution {
    key: &'static str,
    description: &'static str,
    pattern: Pattern,
    replacement: String,
}

impl Substitution {
    pub fn literal(
        key: &'static str,
        description: &'static str,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            key,
            description,
            pattern: Pattern::Literal(from.into()),
            replacement: to.into(),
        }
    }

    pub fn regex(
        key: &'static str,
        description: &'static str,
        pattern: &str,
        template: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let re = Regex::new(pattern).map_err(|e| RuleError::invalid_pattern(key, e))?;
        Ok(Self {
            key,
            description,
            pattern: Pattern::Regex(re),
            replacement: template.into(),
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

impl Rule for Substitution {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            key: self.key,
            description: self.description,
            kind: RuleKind::Substitution,
        }
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Pattern::Literal(from) => {
                if from.is_empty() || !content.contains(from.as_str()) {
                    return Cow::Borrowed(content);
                }
                Cow::Owned(content.replace(from.as_str(), &self.replacement))
            }
            Pattern::Regex(re) => re.replace_all(content, self.replacement.as_str()),
        }
    }
}
