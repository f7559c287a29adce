//! Property-based tests for the built-in rule set.
//!
//! These tests verify key invariants:
//! - Idempotence: a second pass over rewritten text changes nothing
//! - No-op on unrelated text: content no rule matches comes back unchanged
//! - Guarded insertion: a file that already imports `Link` never gets a second import

use lintfix_rules::{LINK_IMPORT_LINE, builtin_rules};
use proptest::prelude::*;

/// Lines a component file in the target tree might contain.
fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("import React from 'react';".to_string()),
        Just("'use client';".to_string()),
        Just("export function function doThing() {}".to_string()),
        Just("export default function function Page() {".to_string()),
        Just("import import x from './x';".to_string()),
        Just("  return <p>Don't panic, it's fine</p>;".to_string()),
        Just("  <p>Tom&amp;apos;s page</p>".to_string()),
        Just("  const big = a > b && c < d ? 'x' : 'y';".to_string()),
        Just("}".to_string()),
        Just(String::new()),
        prop::string::string_regex(r"/[a-z]{1,8}")
            .unwrap()
            .prop_map(|p| format!("  <a href=\"{}\">go</a>", p)),
        prop::string::string_regex(r"https://[a-z]{1,8}\.dev")
            .unwrap()
            .prop_map(|u| format!("  <a href=\"{}\">out</Link>", u)),
        prop::string::string_regex(r"[A-Za-z ]{0,20}")
            .unwrap()
            .prop_map(|t| format!("  <span>{}</span>", t)),
    ]
}

fn arb_file() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 0..12).prop_map(|lines| {
        let mut s = lines.join("\n");
        s.push('\n');
        s
    })
}

proptest! {
    #[test]
    fn second_pass_is_a_no_op(src in arb_file()) {
        let set = builtin_rules().expect("builtin rules compile");
        let once = set.apply(&src);
        let twice = set.apply(&once.content);
        prop_assert_eq!(&twice.content, &once.content);
        prop_assert!(twice.hits.is_empty(), "unexpected hits: {:?}", twice.hits);
    }

    #[test]
    fn unrelated_text_is_unchanged(src in prop::string::string_regex(r"[a-ln-wyz0-9 \n(){};=+]{0,200}").unwrap()) {
        let set = builtin_rules().expect("builtin rules compile");
        let out = set.apply(&src);
        prop_assert_eq!(&out.content, &src);
        prop_assert!(!out.changed());
    }

    #[test]
    fn present_import_is_never_duplicated(body in arb_file()) {
        let set = builtin_rules().expect("builtin rules compile");
        let src = format!("{}\n{}", LINK_IMPORT_LINE, body);
        let out = set.apply(&src);
        prop_assert!(!out.hits.contains(&"jsx.link_import"));
        prop_assert_eq!(out.content.matches(LINK_IMPORT_LINE).count(), 1);
    }
}
