//! Canonical rule serialization
//!
//! Produces the deterministic string used as the AST cache key:
//!
//! ```text
//! [{kind:minLength,args:{n:3}},{kind:forEach,args:{rules:[...]},elem:{kind:string}}]
//! ```
//!
//! Argument keys and string sets are sorted, strings are quoted with
//! escapes, string sets are braced so they never read as rule lists, and
//! function arguments are written as the marker `"fn"`. Kinds
//! and argument keys are written bare only when they hold no delimiter.

use std::fmt::Write as _;

use super::{Arg, Rule};

/// Serializes `rules` canonically, writing functions as `"fn"`.
#[must_use]
pub fn serialize_rules(rules: &[Rule]) -> String {
    let mut writer = KeyWriter::default();
    writer.rules(rules);
    writer.out
}

/// The cache key for `rules`, or `None` when any argument in the tree is a
/// function and the list must not be cached.
///
/// The function check happens in the same pass that builds the key.
#[must_use]
pub fn canonical_key(rules: &[Rule]) -> Option<String> {
    let mut writer = KeyWriter::default();
    writer.rules(rules);
    (!writer.saw_func).then_some(writer.out)
}

/// Returns `true` if any rule (nested lists and `elem` included) carries a
/// function argument.
#[must_use]
pub fn has_func_args(rules: &[Rule]) -> bool {
    rules.iter().any(Rule::contains_func)
}

#[derive(Default)]
struct KeyWriter {
    out: String,
    saw_func: bool,
}

impl KeyWriter {
    fn rules(&mut self, rules: &[Rule]) {
        self.out.push('[');
        for (i, rule) in rules.iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.rule(rule);
        }
        self.out.push(']');
    }

    fn rule(&mut self, rule: &Rule) {
        self.out.push_str("{kind:");
        self.name(rule.kind.as_str());

        if !rule.args.is_empty() {
            let mut keys: Vec<&String> = rule.args.keys().collect();
            keys.sort_unstable();

            self.out.push_str(",args:{");
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    self.out.push(',');
                }
                self.name(key);
                self.out.push(':');
                if let Some(arg) = rule.args.get(key.as_str()) {
                    self.arg(arg);
                }
            }
            self.out.push('}');
        }

        if let Some(elem) = &rule.elem {
            self.out.push_str(",elem:");
            self.rule(elem);
        }
        self.out.push('}');
    }

    fn name(&mut self, name: &str) {
        let plain = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if plain {
            self.out.push_str(name);
        } else {
            self.quoted(name);
        }
    }

    fn quoted(&mut self, s: &str) {
        // Debug formatting escapes quotes, backslashes and control chars
        let _ = write!(self.out, "{s:?}");
    }

    fn arg(&mut self, arg: &Arg) {
        match arg {
            Arg::Int(n) => {
                let _ = write!(self.out, "{n}");
            }
            Arg::Str(s) => self.quoted(s),
            Arg::StrSet(values) => {
                let mut sorted: Vec<&String> = values.iter().collect();
                sorted.sort_unstable();
                self.out.push('{');
                for (i, value) in sorted.into_iter().enumerate() {
                    if i > 0 {
                        self.out.push(',');
                    }
                    self.quoted(value);
                }
                self.out.push('}');
            }
            Arg::Rules(rules) => self.rules(rules),
            Arg::Func(_) => {
                self.saw_func = true;
                self.out.push_str("\"fn\"");
            }
        }
    }
}
