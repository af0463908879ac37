use crate::capture::record::InvocationRecord;
use anyhow::Context;
use indexmap::IndexSet;
use regex::Regex;

/// Collect operators that ran on the CPU fallback path.
///
/// Matches `fallback to cpu, name=<identifier>` anywhere in the text. Each
/// identifier is reported once, in order of first appearance.
pub fn scan_fallbacks(text: &str) -> anyhow::Result<Vec<InvocationRecord>> {
    let re = Regex::new(r"fallback to cpu, name=([\w:.]+)").context("compile fallback pattern")?;

    let names: IndexSet<&str> = re
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    Ok(names.into_iter().map(InvocationRecord::fallback).collect())
}
