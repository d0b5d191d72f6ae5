use regex::Regex;

use crate::config::CleanupRule;
use crate::model::Field;

/// Apply cleanup rules to one field value, in list order. Later rules
/// see the output of earlier rules. Pure and infallible: an invalid
/// regex pattern falls back to literal replacement.
pub fn apply_cleanup_rules(value: &str, field: Field, rules: &[CleanupRule]) -> String {
    let mut out = value.to_string();
    for rule in rules {
        if rule.field.is_some_and(|target| target != field) {
            continue;
        }
        if rule.pattern.is_empty() {
            continue;
        }
        out = if rule.is_regex {
            match Regex::new(&rule.pattern) {
                Ok(re) => re.replace_all(&out, rule.replacement.as_str()).into_owned(),
                Err(_) => out.replace(&rule.pattern, &rule.replacement),
            }
        } else {
            out.replace(&rule.pattern, &rule.replacement)
        };
    }
    out
}
