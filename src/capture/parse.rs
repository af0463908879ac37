use crate::capture::record::{Arguments, InvocationRecord};
use anyhow::Context;
use regex::Regex;
use std::str::Lines;

/// Scan captured log text for operator-invocation blocks.
///
/// A block starts at a marker line and takes the indented attribute lines
/// that directly follow it:
///
/// ```text
/// --[add.out]: dipu_add_out
///     add.out: self: numel: 6, sizes: [2, 3], data_ptr: 0x7f2a...
///     add.out: other: numel: 6, sizes: [2, 3], data_ptr: 0x7f2b...
/// ```
///
/// Lines that fit neither shape are skipped; scanning never fails on content.
pub fn scan_operators(text: &str) -> anyhow::Result<OperatorBlocks<'_>> {
    let data_ptr = Regex::new(r", *data_ptr: 0x[0-9a-f]+").context("compile data_ptr pattern")?;
    Ok(OperatorBlocks {
        lines: text.lines(),
        state: State::Outside,
        data_ptr,
    })
}

/// Lazy iterator over the invocation records of a log.
pub struct OperatorBlocks<'a> {
    lines: Lines<'a>,
    state: State<'a>,
    data_ptr: Regex,
}

enum State<'a> {
    Outside,
    Inside(Block<'a>),
}

struct Block<'a> {
    operator_name: &'a str,
    resolved_function_name: &'a str,
    arguments: Vec<String>,
}

impl Block<'_> {
    fn finish(self) -> InvocationRecord {
        InvocationRecord {
            operator_name: self.operator_name.to_string(),
            resolved_function_name: self.resolved_function_name.to_string(),
            arguments: Arguments::Captured(self.arguments),
        }
    }
}

impl<'a> Iterator for OperatorBlocks<'a> {
    type Item = InvocationRecord;

    fn next(&mut self) -> Option<InvocationRecord> {
        while let Some(line) = self.lines.next() {
            if let Some((operator_name, resolved_function_name)) = parse_marker(line) {
                let opened = Block {
                    operator_name,
                    resolved_function_name,
                    arguments: Vec::new(),
                };
                match std::mem::replace(&mut self.state, State::Inside(opened)) {
                    State::Inside(done) => return Some(done.finish()),
                    State::Outside => continue,
                }
            }

            let State::Inside(block) = &mut self.state else {
                continue;
            };

            if is_attribute_line(line) {
                if let Some(arg) = extract_argument(line, block.operator_name, &self.data_ptr) {
                    block.arguments.push(arg);
                }
                continue;
            }

            // Any other line closes the open block.
            if let State::Inside(done) = std::mem::replace(&mut self.state, State::Outside) {
                return Some(done.finish());
            }
        }

        match std::mem::replace(&mut self.state, State::Outside) {
            State::Inside(done) => Some(done.finish()),
            State::Outside => None,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split a marker line `...--[<operator>]: <function> ...` into its operator
/// name and resolved function name.
fn parse_marker(line: &str) -> Option<(&str, &str)> {
    let start = line.find("--[")? + 3;
    let rest = &line[start..];
    let close = rest.find("]:")?;
    let operator_name = rest[..close].trim();

    let after = rest[close + 2..].trim_start_matches(' ');
    let end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
    if end == 0 {
        return None;
    }
    Some((operator_name, &after[..end]))
}

/// Indented line starting with a `[\w:.]+:` token.
fn is_attribute_line(line: &str) -> bool {
    let body = line.trim_start_matches([' ', '\t']);
    if body.len() == line.len() {
        return false;
    }
    let token_end = body
        .find(|c: char| !(is_word_char(c) || c == ':' || c == '.'))
        .unwrap_or(body.len());
    body[..token_end]
        .char_indices()
        .any(|(i, c)| c == ':' && i > 0)
}

/// Turn `<operator>: <name>: <attrs>` into `<name>:[<attrs>] ` with
/// data pointers removed. Lines for other operators yield None.
fn extract_argument(line: &str, operator_name: &str, data_ptr: &Regex) -> Option<String> {
    let rest = line
        .trim_start()
        .strip_prefix(operator_name)?
        .strip_prefix(':')?;

    let (name, attrs) = match rest.find(':') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };
    let attrs = data_ptr.replace_all(attrs, "");
    Some(format!("{}:[{}] ", name.trim(), attrs))
}
