//! Placeholder substitution over template HTML.
//!
//! Two passes: every `{{token}}` found in the replacement bag is replaced by
//! its value, then single-level `{{#field}}...{{/field}}` blocks are kept
//! (markers stripped) when the field has a non-blank value, dropped otherwise.
//! Tokens that are not in the bag stay as literal text.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeSet;

use super::placeholders::{is_vocabulary_token, ReplacementMap};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").unwrap();
    static ref BLOCK_OPEN: Regex = Regex::new(r"\{\{#([A-Za-z0-9_]+)\}\}").unwrap();
}

/// Full substitution: tokens first, then conditional blocks.
pub fn render_template(html: &str, replacements: &ReplacementMap) -> String {
    let substituted = apply_replacements(html, replacements);
    process_conditional_blocks(&substituted, replacements)
}

/// Replace every `{{token}}` whose name is in the bag. Single pass, so values
/// that happen to contain braces are not expanded again.
pub fn apply_replacements(html: &str, replacements: &ReplacementMap) -> String {
    TOKEN
        .replace_all(html, |caps: &Captures| match replacements.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Resolve `{{#field}}...{{/field}}` blocks. A block only matches the nearest
/// close marker with the same field name; an open marker without one is left
/// untouched.
pub fn process_conditional_blocks(html: &str, replacements: &ReplacementMap) -> String {
    let mut output = String::with_capacity(html.len());
    let mut cursor = 0;

    while cursor < html.len() {
        let rest = &html[cursor..];
        let Some(caps) = BLOCK_OPEN.captures(rest) else {
            output.push_str(rest);
            break;
        };
        let Some(open) = caps.get(0) else {
            output.push_str(rest);
            break;
        };

        let field = &caps[1];
        let close_marker = format!("{{{{/{}}}}}", field);
        let body_start = open.end();

        match rest[body_start..].find(&close_marker) {
            Some(body_len) => {
                output.push_str(&rest[..open.start()]);
                if replacements.is_filled(field) {
                    output.push_str(&rest[body_start..body_start + body_len]);
                }
                cursor += body_start + body_len + close_marker.len();
            }
            None => {
                output.push_str(&rest[..open.end()]);
                cursor += open.end();
            }
        }
    }

    output
}

/// Token names used in `html` that neither the vocabulary nor the bag knows.
pub fn unknown_placeholders(html: &str, replacements: &ReplacementMap) -> Vec<String> {
    let mut unknown = BTreeSet::new();
    for caps in TOKEN.captures_iter(html) {
        let name = &caps[1];
        if !is_vocabulary_token(name) && !replacements.contains_key(name) {
            unknown.insert(name.to_string());
        }
    }
    for caps in BLOCK_OPEN.captures_iter(html) {
        let name = &caps[1];
        if !is_vocabulary_token(name) && !replacements.contains_key(name) {
            unknown.insert(name.to_string());
        }
    }
    unknown.into_iter().collect()
}
