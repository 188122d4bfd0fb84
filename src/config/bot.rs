//! Chat bot configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::RouterConfig;
use crate::domain::foundation::UserId;

/// Command prefix and console identities
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Marker in front of every command, e.g. `!`
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Sender identity of lines typed on the console
    #[serde(default = "default_console_user")]
    pub console_user: String,

    /// Room the console conversation takes place in
    #[serde(default = "default_console_room")]
    pub console_room: String,

    /// Identity the bot replies as; its own messages are ignored
    #[serde(default = "default_bot_user")]
    pub bot_user: String,
}

impl BotConfig {
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            prefix: self.command_prefix.clone(),
        }
    }

    pub fn console_user_id(&self) -> Result<UserId, ValidationError> {
        UserId::new(self.console_user.as_str())
            .map_err(|_| ValidationError::InvalidIdentity("bot.console_user"))
    }

    pub fn bot_user_id(&self) -> Result<UserId, ValidationError> {
        UserId::new(self.bot_user.as_str()).map_err(|_| ValidationError::InvalidIdentity("bot.bot_user"))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.command_prefix.is_empty() {
            return Err(ValidationError::EmptyCommandPrefix);
        }
        if self.command_prefix.chars().any(char::is_whitespace) {
            return Err(ValidationError::WhitespaceInCommandPrefix);
        }
        self.console_user_id()?;
        self.bot_user_id()?;
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            console_user: default_console_user(),
            console_room: default_console_room(),
            bot_user: default_bot_user(),
        }
    }
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_console_user() -> String {
    "@console:localhost".to_string()
}

fn default_console_room() -> String {
    "!console:localhost".to_string()
}

fn default_bot_user() -> String {
    "@sammelbestellung:localhost".to_string()
}
