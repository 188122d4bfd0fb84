//! Command router - turns `<prefix><command> <sub-command> [args...]` into a
//! typed invocation.

mod binding;
mod command;
mod command_router;
mod tokenizer;

pub use binding::BoundArgs;
pub use command::{CommandSpec, SubCommand};
pub use command_router::{CommandRouter, RouterConfig, Routing};
pub use tokenizer::{tokenize, TokenizeError};
