//! Sub-command table entries.

/// Static description of one sub-command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Word typed after the top-level command, lower-case.
    pub word: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    /// Arguments that must be present.
    pub required: usize,
    /// Arguments bound after the required ones if present.
    pub optional: usize,
}

impl CommandSpec {
    pub fn max_args(&self) -> usize {
        self.required + self.optional
    }
}

/// A closed set of sub-commands registered under one top-level command.
///
/// Implemented by a fieldless enum; the router builds its lookup table from
/// [`SubCommand::all`] once at construction.
pub trait SubCommand: Copy + Eq + std::fmt::Debug + Send + Sync + 'static {
    /// Every variant, in help-listing order.
    fn all() -> &'static [Self];

    fn spec(&self) -> CommandSpec;
}
