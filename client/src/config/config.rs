use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use common::game::GameMode;
use serde::{Deserialize, Serialize};

use super::BotConfig;

const CONFIG_FILE_NAME: &str = "tictactoe_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager() -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer>
{
    ConfigManager::from_yaml_file(&get_config_path())
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub last_mode: Option<GameMode>,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.bot.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            last_mode: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigContentProvider, ConfigSerializer, YamlConfigSerializer};

    fn get_temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_client_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_with_last_mode_round_trips() {
        let config = Config {
            bot: BotConfig { delay_ms: 250 },
            last_mode: Some(GameMode::Bot),
        };
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&config).unwrap();
        let deserialized: Config = serializer.deserialize(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_default_config_round_trips_through_file() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());

        let serialized = serializer.serialize(&default_config).unwrap();
        content_provider.set_config_content(&serialized).unwrap();

        let read_back = content_provider.get_config_content().unwrap().unwrap();
        let deserialized: Config = serializer.deserialize(&read_back).unwrap();
        assert_eq!(default_config, deserialized);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_excessive_bot_delay_fails_validation() {
        let config = Config {
            bot: BotConfig { delay_ms: 60_000 },
            last_mode: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
