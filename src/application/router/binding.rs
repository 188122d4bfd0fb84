//! Positional argument binding.

use super::CommandSpec;

/// Arguments bound to a sub-command, lower-cased.
///
/// Holds at most `required + optional` values; extra tokens are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoundArgs {
    values: Vec<String>,
}

impl BoundArgs {
    /// Binds `tokens` against `spec`. Returns `None` when fewer than the
    /// required number of tokens are present.
    pub fn bind(spec: &CommandSpec, tokens: &[String]) -> Option<Self> {
        if tokens.len() < spec.required {
            return None;
        }
        let values = tokens
            .iter()
            .take(spec.max_args())
            .map(|t| t.to_lowercase())
            .collect();
        Some(Self { values })
    }

    /// A required argument. Binding guarantees presence for indices below
    /// the required count.
    pub fn required(&self, index: usize) -> &str {
        self.values.get(index).map(String::as_str).unwrap_or("")
    }

    /// An optional argument; missing and empty tokens both read as `None`.
    pub fn optional(&self, index: usize) -> Option<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}
