use crate::error::RuleError;
use crate::rule::{Rule, RuleKind, RuleMeta};
use regex::Regex;
use std::borrow::Cow;

/// A candidate insertion point. The new line goes right after the line on
/// which the pattern's match ends.
#[derive(Debug, Clone)]
pub struct Anchor {
    pub label: &'static str,
    pattern: Regex,
}

/// Ranked-fallback lookup: the first anchor (in list order) that matches
/// wins, and the byte offset just past its line is returned.
pub fn first_anchor<'a>(anchors: &'a [Anchor], content: &str) -> Option<(&'a Anchor, usize)> {
    anchors.iter().find_map(|anchor| {
        let m = anchor.pattern.find(content)?;
        Some((anchor, line_end_after(content, m.end())))
    })
}

fn line_end_after(content: &str, end: usize) -> usize {
    if end > 0 && content[..end].ends_with('\n') {
        return end;
    }
    match content[end..].find('\n') {
        Some(i) => end + i + 1,
        None => content.len(),
    }
}

/// Insert an import line when a file uses a name but does not import it.
///
/// Guarded twice: nothing happens unless `needed` matches, and nothing
/// happens if `present` already matches. The inserted line is required to
/// satisfy `present`, so a second pass is always a no-op.
#[derive(Debug, Clone)]
pub struct InsertImport {
    key: &'static str,
    description: &'static str,
    line: String,
    needed: Regex,
    present: Regex,
    anchors: Vec<Anchor>,
}

impl InsertImport {
    pub fn new(
        key: &'static str,
        description: &'static str,
        line: impl Into<String>,
        needed: &str,
        present: &str,
    ) -> Result<Self, RuleError> {
        let line = line.into();
        let needed = Regex::new(needed).map_err(|e| RuleError::invalid_pattern(key, e))?;
        let present = Regex::new(present).map_err(|e| RuleError::invalid_pattern(key, e))?;
        if !present.is_match(&line) {
            return Err(RuleError::UnguardedInsert { key });
        }
        Ok(Self {
            key,
            description,
            line,
            needed,
            present,
            anchors: Vec::new(),
        })
    }

    /// Append a fallback anchor; earlier anchors take precedence.
    pub fn with_anchor(mut self, label: &'static str, pattern: &str) -> Result<Self, RuleError> {
        let pattern = Regex::new(pattern).map_err(|e| RuleError::invalid_pattern(self.key, e))?;
        self.anchors.push(Anchor { label, pattern });
        Ok(self)
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }
}

impl Rule for InsertImport {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            key: self.key,
            description: self.description,
            kind: RuleKind::InsertImport,
        }
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if !self.needed.is_match(content) || self.present.is_match(content) {
            return Cow::Borrowed(content);
        }

        let mut out = String::with_capacity(content.len() + self.line.len() + 2);
        match first_anchor(&self.anchors, content) {
            Some((_, offset)) => {
                out.push_str(&content[..offset]);
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&self.line);
                out.push('\n');
                out.push_str(&content[offset..]);
            }
            None => {
                out.push_str(&self.line);
                out.push('\n');
                out.push_str(content);
            }
        }
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link_import() -> InsertImport {
        InsertImport::new(
            "t.link_import",
            "",
            "import Link from 'next/link';",
            r"<Link\b",
            r#"(?m)^\s*import\s+Link\b[^;\n]*\bfrom\s+['"]next/link['"]"#,
        )
        .expect("compiles")
        .with_anchor("react import", r#"(?m)^import\s[^;]*?\bfrom\s+['"]react['"];?"#)
        .expect("compiles")
        .with_anchor("use client", r#"(?m)^\s*['"]use client['"];?"#)
        .expect("compiles")
    }

    #[test]
    fn inserts_after_react_import() {
        let src = "'use client';\nimport React from 'react';\nimport x from 'y';\n\n<Link href=\"/\">a</Link>\n";
        let out = link_import().apply(src);
        assert_eq!(
            out,
            "'use client';\nimport React from 'react';\nimport Link from 'next/link';\nimport x from 'y';\n\n<Link href=\"/\">a</Link>\n"
        );
    }

    #[test]
    fn falls_back_to_use_client_directive() {
        let src = "\"use client\"\nexport default function P() { return <Link href=\"/\">a</Link>; }\n";
        let out = link_import().apply(src);
        assert_eq!(
            out,
            "\"use client\"\nimport Link from 'next/link';\nexport default function P() { return <Link href=\"/\">a</Link>; }\n"
        );
    }

    #[test]
    fn prepends_when_no_anchor_matches() {
        let src = "export const A = () => <Link href=\"/\">a</Link>;\n";
        let out = link_import().apply(src);
        assert_eq!(
            out,
            "import Link from 'next/link';\nexport const A = () => <Link href=\"/\">a</Link>;\n"
        );
    }

    #[test]
    fn anchor_on_last_line_without_newline() {
        let src = "<Link href=\"/\">a</Link>\nimport React from 'react';";
        let out = link_import().apply(src);
        assert_eq!(
            out,
            "<Link href=\"/\">a</Link>\nimport React from 'react';\nimport Link from 'next/link';\n"
        );
    }

    #[test]
    fn multi_line_react_import_anchors_on_closing_line() {
        let src = "import React, {\n  useState,\n} from 'react';\nconst a = <Link href=\"/\">a</Link>;\n";
        let out = link_import().apply(src);
        assert_eq!(
            out,
            "import React, {\n  useState,\n} from 'react';\nimport Link from 'next/link';\nconst a = <Link href=\"/\">a</Link>;\n"
        );
    }

    #[test]
    fn present_import_is_a_no_op() {
        let src = "import Link from \"next/link\";\n<Link href=\"/\">a</Link>\n";
        assert!(matches!(link_import().apply(src), Cow::Borrowed(_)));
    }

    #[test]
    fn unused_name_is_a_no_op() {
        let src = "import React from 'react';\n<a href=\"https://x.dev\">x</a>\n";
        assert!(matches!(link_import().apply(src), Cow::Borrowed(_)));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let rule = link_import();
        let once = rule.apply("<Link href=\"/\">a</Link>\n").into_owned();
        assert!(matches!(rule.apply(&once), Cow::Borrowed(_)));
    }

    #[test]
    fn first_anchor_prefers_list_order_over_position() {
        let rule = link_import();
        let src = "'use client';\nimport React from 'react';\n";
        let (anchor, offset) = first_anchor(rule.anchors(), src).expect("anchor");
        assert_eq!(anchor.label, "react import");
        assert_eq!(offset, src.len());
    }

    #[test]
    fn rejects_line_the_guard_does_not_recognise() {
        let err = InsertImport::new("t.bad", "", "import X from 'x';", "X", "never-matches")
            .expect_err("unguarded");
        assert!(matches!(err, RuleError::UnguardedInsert { key: "t.bad" }));
    }
}
