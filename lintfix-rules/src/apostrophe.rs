use crate::error::RuleError;
use crate::markup::{scan_tags, skip_braced};
use crate::rule::{Rule, RuleKind, RuleMeta};
use regex::Regex;
use std::borrow::Cow;
use std::ops::Range;

const ENTITY: &str = r"&(?:[A-Za-z]+|#[0-9]+|#[xX][0-9A-Fa-f]+);";
// A quote hugging a bracket or comma is a string literal, not a contraction.
const QUOTED_ARG: &str = r"[(\[]\s*'|'\s*[)\],]";
const CODE_MARKERS: &[&str] = &["=", ";", "\"", "`", "&&", "||"];

/// Replace `'` with `&apos;` inside markup text.
///
/// Text is whatever sits between the end of one scanned tag and the start of
/// the next; it may span lines. Balanced `{...}` expressions inside it are
/// skipped and the text around them is escaped. Text that looks like code
/// rather than prose (assignments, arrows, statements, string arguments,
/// ternaries, unbalanced braces) is skipped as a whole, since TypeScript
/// generics and comparisons also produce `<`/`>` pairs.
#[derive(Debug, Clone)]
pub struct EscapeApostrophes {
    key: &'static str,
    description: &'static str,
    entity: Regex,
    quoted_arg: Regex,
}

impl EscapeApostrophes {
    pub fn new(key: &'static str, description: &'static str) -> Result<Self, RuleError> {
        let compile = |p: &str| Regex::new(p).map_err(|e| RuleError::invalid_pattern(key, e));
        Ok(Self {
            key,
            description,
            entity: compile(ENTITY)?,
            quoted_arg: compile(QUOTED_ARG)?,
        })
    }

    fn looks_like_prose(&self, text: &str) -> bool {
        let plain = self.entity.replace_all(text, "");
        if !plain.chars().any(char::is_alphabetic) {
            return false;
        }
        if CODE_MARKERS.iter().any(|m| plain.contains(m)) || self.quoted_arg.is_match(&plain) {
            return false;
        }
        let ternary = plain.lines().any(|l| {
            let l = l.trim_start();
            l.starts_with('?') || l.starts_with(':')
        });
        !(ternary || (plain.contains(" ? ") && plain.contains(" : ")))
    }
}

/// Ranges of `text` outside balanced `{...}` expressions, or `None` when a
/// brace is unbalanced (the text straddles an expression boundary).
fn text_outside_braces(text: &str) -> Option<Vec<Range<usize>>> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                parts.push(start..i);
                i = skip_braced(bytes, i)?;
                start = i;
            }
            b'}' => return None,
            _ => i += 1,
        }
    }
    parts.push(start..bytes.len());
    Some(parts)
}

impl Rule for EscapeApostrophes {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            key: self.key,
            description: self.description,
            kind: RuleKind::Escape,
        }
    }

    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        if !content.contains('\'') {
            return Cow::Borrowed(content);
        }

        let tags = scan_tags(content);
        let mut quotes: Vec<usize> = Vec::new();
        for pair in tags.windows(2) {
            let offset = pair[0].span.end;
            let text = &content[offset..pair[1].span.start];
            if !text.contains('\'') {
                continue;
            }
            let Some(parts) = text_outside_braces(text) else {
                continue;
            };
            let prose: Vec<&str> = parts.iter().map(|r| &text[r.clone()]).collect();
            if !self.looks_like_prose(&prose.join(" ")) {
                continue;
            }
            for r in parts {
                quotes.extend(text[r.clone()].match_indices('\'').map(|(i, _)| offset + r.start + i));
            }
        }

        if quotes.is_empty() {
            return Cow::Borrowed(content);
        }

        let mut out = String::with_capacity(content.len() + quotes.len() * 5);
        let mut last = 0;
        for pos in quotes {
            out.push_str(&content[last..pos]);
            out.push_str("&apos;");
            last = pos + 1;
        }
        out.push_str(&content[last..]);
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rule() -> EscapeApostrophes {
        EscapeApostrophes::new("t.apos", "").expect("compiles")
    }

    #[test]
    fn escapes_contractions_in_text() {
        assert_eq!(
            rule().apply("<p>Don't stop, it's fine</p>"),
            "<p>Don&apos;t stop, it&apos;s fine</p>"
        );
    }

    #[test]
    fn escapes_each_text_node_around_inline_tags() {
        assert_eq!(
            rule().apply("<p>It's <b>Sam's</b> turn, isn't it?</p>"),
            "<p>It&apos;s <b>Sam&apos;s</b> turn, isn&apos;t it?</p>"
        );
    }

    #[test]
    fn escapes_multi_line_text_node() {
        assert_eq!(
            rule().apply("<p>\n  We're here (aren't we)\n</p>"),
            "<p>\n  We&apos;re here (aren&apos;t we)\n</p>"
        );
    }

    #[test]
    fn text_with_existing_entities_still_counts_as_prose() {
        assert_eq!(
            rule().apply("<p>Tom &amp; Jerry&apos;s friend's house</p>"),
            "<p>Tom &amp; Jerry&apos;s friend&apos;s house</p>"
        );
    }

    #[test]
    fn attribute_values_and_expressions_are_untouched() {
        let src = r#"<img alt='x' /><p>{"it's"}</p><input value='a' />"#;
        assert_eq!(rule().apply(src), src);
    }

    #[test]
    fn code_between_comparisons_is_untouched() {
        let src = "const ok = a > b && c < d ? 'x' : 'y';\nlet t = x > 0\n  ? 'yes'\n  : z < 1;\n";
        assert_eq!(rule().apply(src), src);
    }

    #[test]
    fn arrow_function_code_between_tags_is_untouched() {
        let src = "const n = items.filter((s) => s.includes('x')).length < limit;\n";
        assert_eq!(rule().apply(src), src);

        let src = "const a = <Item />;\nconst n = items.filter((s) => s.includes('x')).length < limit;\nconst b = <Other>ok</Other>;\n";
        assert_eq!(rule().apply(src), src);
    }

    #[test]
    fn comparison_and_generic_calls_are_untouched() {
        let src = "if (count >= 2 && <Badge />) {}\nconst [v, setV] = useState<string>('a')\nsetV('b')\nreturn <p>ok</p>\n";
        assert_eq!(rule().apply(src), src);
    }

    #[test]
    fn escapes_text_around_expressions() {
        assert_eq!(
            rule().apply("<p>Don't forget {name}</p>"),
            "<p>Don&apos;t forget {name}</p>"
        );
        assert_eq!(
            rule().apply("<p>Welcome back, {user.name}! We've missed you.</p>"),
            "<p>Welcome back, {user.name}! We&apos;ve missed you.</p>"
        );
    }

    #[test]
    fn quotes_inside_expressions_are_untouched() {
        let src = "<p>{cond ? <b>x</b> : 'y'}</p>";
        assert_eq!(rule().apply(src), src);

        let src = "<p>It's {ok ? 'on' : 'off'} now</p>";
        assert_eq!(rule().apply(src), "<p>It&apos;s {ok ? 'on' : 'off'} now</p>");
    }

    #[test]
    fn text_outside_the_outermost_tags_is_untouched() {
        let src = "// it's a page\n<p>hi</p>\n// that's all\n";
        assert_eq!(rule().apply(src), src);
    }

    #[test]
    fn no_apostrophe_borrows() {
        assert!(matches!(rule().apply("<p>hello</p>"), Cow::Borrowed(_)));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let once = rule().apply("<h1>Who's there?</h1>").into_owned();
        assert_eq!(rule().apply(&once), once);
    }
}
