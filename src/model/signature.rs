//! Argument signature normalization.
//!
//! Captured arguments carry run-specific noise (addresses, device ordinal,
//! constant flags) and inconsistent spacing. The rules below are applied in
//! order; address rules run first so their hex digits are gone before the
//! digit-based rules look at the text.

use anyhow::Context;
use regex::Regex;

const RULES: &[(&str, &str)] = &[
    (r"storage_data_ptr:\s0x[0-9a-fA-F]+,\s+", ""),
    (r"is_view:\s*[0-9]+,\s+", ""),
    (r"device:xpu:\s*[0-9]+,\s+", ""),
    (r"layout:\s*Strided,\s+", ""),
    (r"requires_grad:\s*false,\s+", ""),
    (r"pinned_memory:\s*false,\s+", ""),
    (r"storage_offset:\s*[0-9]+", ""),
    (r"',\s'", "@"),
    (r"sizes:\s*", "sizes:@"),
    (r",\s*stride:\s*", "@, stride:@"),
    (r",\s*dtype:", "@, dtype:"),
];

/// Compiled rewrite rules producing a normalized signature.
pub struct SignatureNormalizer {
    rules: Vec<(Regex, &'static str)>,
}

impl SignatureNormalizer {
    pub fn new() -> anyhow::Result<Self> {
        let rules = RULES
            .iter()
            .map(|(pat, rep)| {
                Regex::new(pat)
                    .with_context(|| format!("compile signature rule {}", pat))
                    .map(|re| (re, *rep))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn normalize(&self, args: &str) -> String {
        let mut out = args.to_string();
        for (re, rep) in &self.rules {
            // NoExpand: replacements are literal text.
            out = re.replace_all(&out, regex::NoExpand(*rep)).into_owned();
        }
        out
    }
}
