/// Simple wildcard matcher: `*` and `?`.
///
/// Used for rule keys in allow/deny lists and for excluded directory names.
/// DP implementation to avoid recursion.
pub fn glob_match(pat: &str, text: &str) -> bool {
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

#[cfg(test)]
mod tests {
    use super::glob_match;

    #[test]
    fn star_matches_any_suffix() {
        assert!(glob_match("jsx.*", "jsx.anchor_to_link"));
        assert!(glob_match("*", ""));
        assert!(!glob_match("jsx.*", "syntax.duplicate_import_keyword"));
    }

    #[test]
    fn question_mark_matches_one_byte() {
        assert!(glob_match("a?c", "abc"));
        assert!(!glob_match("a?c", "ac"));
    }

    #[test]
    fn exact_key_matches_only_itself() {
        assert!(glob_match("jsx.link_import", "jsx.link_import"));
        assert!(!glob_match("jsx.link_import", "jsx.link_imports"));
    }
}
