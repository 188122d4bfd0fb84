//! Maps prefixed chat text onto a typed sub-command.

use std::collections::HashMap;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::{tokenize, BoundArgs, CommandSpec, SubCommand};

/// Router settings shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Marker in front of every top-level command, e.g. `!`.
    pub prefix: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            prefix: "!".to_string(),
        }
    }
}

/// Outcome of routing one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routing<C> {
    /// Help text to send back verbatim.
    Help(String),
    /// A sub-command with its bound arguments.
    Invoke { command: C, args: BoundArgs },
}

/// Router for one top-level command and its sub-command enum.
#[derive(Debug, Clone)]
pub struct CommandRouter<C: SubCommand> {
    trigger: String,
    table: HashMap<&'static str, C>,
}

impl<C: SubCommand> CommandRouter<C> {
    pub fn new(config: &RouterConfig, command: &str) -> Self {
        let table = C::all().iter().map(|c| (c.spec().word, *c)).collect();
        Self {
            trigger: format!("{}{}", config.prefix, command.to_lowercase()),
            table,
        }
    }

    /// Prefix plus top-level command, e.g. `!bestellung`.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Whether the message is meant for this router.
    pub fn is_addressed(&self, body: &str) -> bool {
        self.strip_trigger(body).is_some()
    }

    fn strip_trigger<'a>(&self, body: &'a str) -> Option<&'a str> {
        let body = body.trim_start();
        let head = body.get(..self.trigger.len())?;
        if !head.eq_ignore_ascii_case(&self.trigger) {
            return None;
        }
        let rest = &body[self.trigger.len()..];
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest)
        } else {
            None
        }
    }

    pub fn lookup(&self, word: &str) -> Option<C> {
        self.table.get(word.to_lowercase().as_str()).copied()
    }

    /// Routes a message. `None` means the message is not addressed to us.
    pub fn route(&self, body: &str) -> Option<Result<Routing<C>, DomainError>> {
        let rest = self.strip_trigger(body)?;
        Some(self.route_tokens(rest))
    }

    fn route_tokens(&self, rest: &str) -> Result<Routing<C>, DomainError> {
        let tokens = tokenize(rest).map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidArgument,
                format!("Fehler bei decodieren der Nachricht: {}", e),
            )
        })?;

        let Some((word, args)) = tokens.split_first() else {
            return Ok(Routing::Help(self.help_listing()));
        };
        let word = word.to_lowercase();

        if word == "help" {
            return match args.first() {
                None => Ok(Routing::Help(self.help_listing())),
                Some(topic) => self
                    .lookup(topic)
                    .map(|c| Routing::Help(self.usage_text(&c.spec())))
                    .ok_or_else(|| self.unknown_command()),
            };
        }

        let command = self.lookup(&word).ok_or_else(|| self.unknown_command())?;
        let spec = command.spec();
        let args = BoundArgs::bind(&spec, args).ok_or_else(|| self.wrong_arguments(&spec))?;
        Ok(Routing::Invoke { command, args })
    }

    /// All sub-command words in registration order.
    pub fn help_listing(&self) -> String {
        let words: Vec<&str> = C::all().iter().map(|c| c.spec().word).collect();
        format!("Verfügbare Kommandos sind: \n{}", words.join(" "))
    }

    pub fn usage_text(&self, spec: &CommandSpec) -> String {
        format!(
            "{}\nBenutzung: {} {}",
            spec.description, self.trigger, spec.usage
        )
    }

    pub fn unknown_command(&self) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidArgument,
            format!("Unbekanntes Kommando, benutze {} help für Hilfe.", self.trigger),
        )
    }

    pub fn wrong_arguments(&self, spec: &CommandSpec) -> DomainError {
        DomainError::new(
            ErrorCode::WrongArgumentCount,
            format!(
                "Falsche Anzahl an Argumenten, benutze {} help für Hilfe. Benötigt: {}, optional: {} ({})",
                self.trigger, spec.required, spec.optional, spec.usage
            ),
        )
        .with_detail("command", spec.word)
    }

    /// Pointer to a listing sub-command, attached to not-found errors.
    pub fn listing_hint(&self, listing: &str) -> String {
        format!("benutze {} {} für eine Liste", self.trigger, listing)
    }
}
