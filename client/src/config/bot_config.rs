use common::config::Validate;
use serde::{Deserialize, Serialize};

const MAX_DELAY_MS: u64 = 10_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct BotConfig {
    /// Artificial thinking delay before the bot's move is applied.
    pub delay_ms: u64,
}

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.delay_ms > MAX_DELAY_MS {
            return Err(format!(
                "Bot delay must not exceed {} ms, got {}",
                MAX_DELAY_MS, self.delay_ms
            ));
        }
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}
