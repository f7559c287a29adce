//! Rule explanations for the `lintfix explain` and `lintfix list-rules`
//! commands.

use lintfix_rules::RuleKind;

/// Information about a built-in rule.
#[derive(Debug, Clone)]
pub struct RuleExplanation {
    /// Stable rule key (e.g., "jsx.anchor_to_link").
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    pub kind: RuleKind,
    /// Detailed description of what the rule does.
    pub description: &'static str,
    /// Text the rule rewrites.
    pub before: &'static str,
    /// The same text after the rule ran.
    pub after: &'static str,
}

/// Registry of all rule explanations, in application order.
pub static RULE_REGISTRY: &[RuleExplanation] = &[
    RuleExplanation {
        key: "syntax.duplicate_function_keyword",
        title: "Duplicate function keyword",
        kind: RuleKind::Substitution,
        description: r#"Collapses a doubled `function` keyword after `export`.

Earlier automated edits sometimes prefixed an already exported function with a
second `function`, which no parser accepts. Whitespace between `export` and
`function` is kept as written."#,
        before: "export function function doThing(a, b) {",
        after: "export function doThing(a, b) {",
    },
    RuleExplanation {
        key: "syntax.duplicate_default_function_keyword",
        title: "Duplicate default function keyword",
        kind: RuleKind::Substitution,
        description: r#"Collapses `export default function function` into
`export default function`. Works for named and anonymous default exports."#,
        before: "export default function function Page() {",
        after: "export default function Page() {",
    },
    RuleExplanation {
        key: "syntax.duplicate_import_keyword",
        title: "Duplicate import keyword",
        kind: RuleKind::Substitution,
        description: r#"Collapses `import import` at the start of a line into a single `import`.
Indentation before the statement is kept."#,
        before: "import import React from 'react';",
        after: "import React from 'react';",
    },
    RuleExplanation {
        key: "syntax.double_escaped_apostrophe",
        title: "Double-escaped apostrophe",
        kind: RuleKind::Substitution,
        description: r#"Replaces `&amp;apos;` with `&apos;`.

An escaping pass that ran over already escaped text turns `&apos;` into
`&amp;apos;`, which renders literally as "&apos;" in the page."#,
        before: "<p>Tom&amp;apos;s page</p>",
        after: "<p>Tom&apos;s page</p>",
    },
    RuleExplanation {
        key: "jsx.escape_apostrophes",
        title: "Escape apostrophes in markup text",
        kind: RuleKind::Escape,
        description: r#"Replaces `'` with `&apos;` in markup text.

Markup text is whatever sits between one tag and the next; it may span lines.
Attribute values and `{...}` expressions are never touched, but the text
around an expression is. Text that reads like code rather than prose (it
contains `=`, `;`, double quotes, backticks, `&&`, `||`, a ternary or a quoted
call argument) is left alone, since a `<`/`>` pair can also come from
comparisons or type parameters."#,
        before: "<p>Don't worry, it's fine</p>",
        after: "<p>Don&apos;t worry, it&apos;s fine</p>",
    },
    RuleExplanation {
        key: "jsx.anchor_to_link",
        title: "Anchor to Link",
        kind: RuleKind::Retag,
        description: r#"Uses the framework `<Link>` component for internal navigation.

Every `<a ...>` and `<Link ...>` open tag is paired with its close tag,
nesting-aware across both names. An `<a>` whose `href` is a static internal
path (starts with `/` but not `//`) becomes `<Link>`; a `<Link>` stays a
`<Link>`. The close tag is rewritten to match its open tag, which also repairs
mismatched pairs such as `<a ...>...</Link>`. Anchors without an `href`, or
with a dynamic `href={...}`, keep their name."#,
        before: "<a href=\"/about\">About</a> <a href=\"https://example.com\">Example</Link>",
        after: "<Link href=\"/about\">About</Link> <a href=\"https://example.com\">Example</a>",
    },
    RuleExplanation {
        key: "jsx.link_import",
        title: "Missing Link import",
        kind: RuleKind::InsertImport,
        description: r#"Adds `import Link from 'next/link';` to files that use `<Link` without
importing it.

The line goes right after the first line importing from `react`; failing that,
right after a `'use client'` directive; failing that, at the top of the file.
Files where an import already binds `Link`, from any module, are left alone."#,
        before: "import React from 'react';\n\nconst Nav = () => <Link href=\"/\">Home</Link>;",
        after: "import React from 'react';\nimport Link from 'next/link';\n\nconst Nav = () => <Link href=\"/\">Home</Link>;",
    },
];

/// Find a rule by key.
///
/// Accepts the full key, or the part after the dot, case-insensitively and
/// with `-` in place of `_`.
pub fn lookup_rule(query: &str) -> Option<&'static RuleExplanation> {
    let normalized = query.to_lowercase().replace('-', "_");

    RULE_REGISTRY.iter().find(|rule| {
        rule.key == normalized || rule.key.ends_with(&format!(".{}", normalized))
    })
}

/// List all rule keys.
pub fn list_rule_keys() -> Vec<&'static str> {
    RULE_REGISTRY.iter().map(|r| r.key).collect()
}
