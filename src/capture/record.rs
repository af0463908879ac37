/// Resolved function name given to operators seen on the CPU fallback path.
pub const FALLBACK_FUNCTION: &str = "fallback";

/// Argument text of a fallback record.
pub const FALLBACK_ARGS: &str = "no";

/// Arguments captured for one operator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arguments {
    /// Formatted `name:[attrs] ` entries, in log order.
    Captured(Vec<String>),
    /// The operator ran on the fallback path; no arguments were dumped.
    Fallback,
}

/// One textual occurrence of an operator call in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRecord {
    pub operator_name: String,
    pub resolved_function_name: String,
    pub arguments: Arguments,
}

impl InvocationRecord {
    pub fn fallback(operator_name: &str) -> Self {
        Self {
            operator_name: operator_name.to_string(),
            resolved_function_name: FALLBACK_FUNCTION.to_string(),
            arguments: Arguments::Fallback,
        }
    }
}

impl Arguments {
    /// Render the arguments as the bracketed list text the signature
    /// normalizer works on, e.g. `['self:[sizes: [2]] ', 'other:[...] ']`.
    pub fn to_text(&self) -> String {
        match self {
            Arguments::Fallback => FALLBACK_ARGS.to_string(),
            Arguments::Captured(items) => {
                let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
                format!("[{}]", quoted.join(", "))
            }
        }
    }
}

/// Quote one list element. Single quotes are preferred; double quotes are
/// used when the element holds a single quote but no double quote.
fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        return format!("\"{}\"", s.replace('\\', "\\\\"));
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn captured_arguments_render_as_quoted_list() {
        let args = Arguments::Captured(vec![
            "self:[ sizes: [2, 3]] ".to_string(),
            "other:[ sizes: [3]] ".to_string(),
        ]);
        assert_eq!(
            args.to_text(),
            "['self:[ sizes: [2, 3]] ', 'other:[ sizes: [3]] ']"
        );
    }

    #[test]
    fn empty_and_fallback_arguments() {
        assert_eq!(Arguments::Captured(vec![]).to_text(), "[]");
        assert_eq!(Arguments::Fallback.to_text(), "no");
    }

    #[test]
    fn quote_switches_to_double_quotes() {
        assert_eq!(quote("it's"), "\"it's\"");
        assert_eq!(quote("a'b\"c"), "'a\\'b\"c'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn fallback_record_fields() {
        let rec = InvocationRecord::fallback("aten::foo");
        assert_eq!(rec.operator_name, "aten::foo");
        assert_eq!(rec.resolved_function_name, "fallback");
        assert_eq!(rec.arguments, Arguments::Fallback);
    }
}
