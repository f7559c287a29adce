//! The built-in rule list, in application order.

use crate::apostrophe::EscapeApostrophes;
use crate::error::RuleError;
use crate::import::InsertImport;
use crate::retag::RetagLinks;
use crate::rule::RuleSet;
use crate::substitution::Substitution;

/// Directories walked when no configuration overrides them.
pub const DEFAULT_ROOTS: &[&str] = &["app", "components", "src", "pages"];

/// File suffixes rewritten when no configuration overrides them.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".tsx", ".jsx"];

pub const LINK_IMPORT_LINE: &str = "import Link from 'next/link';";

/// Build the built-in rules.
///
/// Order matters: syntax repairs run first so the markup rules see clean
/// declarations, and the `Link` import runs after the retag rule that
/// creates the need for it.
pub fn builtin_rules() -> Result<RuleSet, RuleError> {
    let mut set = RuleSet::default();

    set.push(Substitution::regex(
        "syntax.duplicate_function_keyword",
        "Collapse `export function function name(` into `export function name(`",
        r"\bexport(\s+)function\s+function\s+",
        "export${1}function ",
    )?);
    set.push(Substitution::regex(
        "syntax.duplicate_default_function_keyword",
        "Collapse `export default function function` into `export default function`",
        r"\bexport(\s+)default(\s+)function\s+function\b",
        "export${1}default${2}function",
    )?);
    set.push(Substitution::regex(
        "syntax.duplicate_import_keyword",
        "Collapse `import import` at the start of a line into `import`",
        r"(?m)^([ \t]*)import\s+import\s+",
        "${1}import ",
    )?);
    set.push(Substitution::literal(
        "syntax.double_escaped_apostrophe",
        "Repair `&amp;apos;` left behind by an earlier escaping pass",
        "&amp;apos;",
        "&apos;",
    ));

    set.push(EscapeApostrophes::new(
        "jsx.escape_apostrophes",
        "Escape `'` as `&apos;` in markup text",
    )?);

    set.push(RetagLinks::new(
        "jsx.anchor_to_link",
        "Use `<Link>` for internal `<a href=\"/...\">` anchors and match close tags to open tags",
    ));

    set.push(
        InsertImport::new(
            "jsx.link_import",
            "Import `Link` from `next/link` in files that use `<Link>` without importing it",
            LINK_IMPORT_LINE,
            r"<Link\b",
            // Any import statement that binds the name `Link`, from any module.
            r#"(?m)^\s*import\s+(?:Link\b|\*\s*as\s+Link\b|[^;'"]*?[{,]\s*(?:[\w$]+\s+as\s+)?Link\s*[,}])"#,
        )?
        .with_anchor("react import", r#"(?m)^import\s[^;]*?\bfrom\s+['"]react['"];?"#)?
        .with_anchor("use client directive", r#"(?m)^\s*['"]use client['"];?"#)?,
    );

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_catalog_builds_in_documented_order() {
        let set = builtin_rules().expect("builtin rules compile");
        assert_eq!(
            set.keys(),
            vec![
                "syntax.duplicate_function_keyword",
                "syntax.duplicate_default_function_keyword",
                "syntax.duplicate_import_keyword",
                "syntax.double_escaped_apostrophe",
                "jsx.escape_apostrophes",
                "jsx.anchor_to_link",
                "jsx.link_import",
            ]
        );
    }

    #[test]
    fn keys_are_unique() {
        let set = builtin_rules().expect("builtin rules compile");
        let mut keys = set.keys();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), set.len());
    }

    #[test]
    fn duplicate_keywords_are_collapsed() {
        let set = builtin_rules().expect("builtin rules compile");
        let src = "export function function doThing(a) {}\n\
                   export default function function Page() {}\n\
                   import import x from 'y';\n";
        assert_eq!(
            set.apply(src).content,
            "export function doThing(a) {}\n\
             export default function Page() {}\n\
             import x from 'y';\n"
        );
    }
}
