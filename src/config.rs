use serde::{Deserialize, Serialize};
use std::io::ErrorKind;

use crate::scheduler::SpeedPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "snake.yaml";

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, String>;
    fn set_config_content(&self, content: &str) -> Result<(), String>;
}

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

pub struct YamlConfigSerializer;

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to serialize config: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize config: {}", e))
    }
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(format!("Failed to read config file: {}", err)),
            },
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), String> {
        std::fs::write(self.file_path.as_str(), content)
            .map_err(|e| format!("Failed to write config file: {}", e))
    }
}

pub struct ConfigManager<TConfigContentProvider, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfigSerializer: ConfigSerializer<GameConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
}

impl ConfigManager<FileContentConfigProvider, YamlConfigSerializer> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self {
            config_content_provider: FileContentConfigProvider::new(file_path.to_string()),
            config_serializer: YamlConfigSerializer,
        }
    }
}

impl<TConfigContentProvider, TConfigSerializer> ConfigManager<TConfigContentProvider, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfigSerializer: ConfigSerializer<GameConfig>,
{
    pub fn new(config_content_provider: TConfigContentProvider, config_serializer: TConfigSerializer) -> Self {
        Self {
            config_serializer,
            config_content_provider,
        }
    }

    /// Reads and validates the config. A missing source yields the defaults.
    pub fn get_config(&self) -> Result<GameConfig, String> {
        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(GameConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        Ok(config)
    }

    pub fn set_config(&self, config: &GameConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;
        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider.set_config_content(&serialized_config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub base_interval_ms: u64,
    pub min_interval_ms: u64,
    pub interval_step_ms: u64,
    pub points_per_step: u32,
    pub data_file: String,
    pub log_file: Option<String>,
    pub show_legend: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        let policy = SpeedPolicy::default();
        Self {
            base_interval_ms: policy.base_interval_ms,
            min_interval_ms: policy.min_interval_ms,
            interval_step_ms: policy.interval_step_ms,
            points_per_step: policy.points_per_step,
            data_file: "snake_data.yaml".to_string(),
            log_file: Some("snake.log".to_string()),
            show_legend: true,
        }
    }
}

impl GameConfig {
    pub fn speed_policy(&self) -> SpeedPolicy {
        SpeedPolicy {
            base_interval_ms: self.base_interval_ms,
            min_interval_ms: self.min_interval_ms,
            interval_step_ms: self.interval_step_ms,
            points_per_step: self.points_per_step,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.min_interval_ms == 0 {
            return Err("min_interval_ms must be positive".to_string());
        }
        if self.min_interval_ms > self.base_interval_ms {
            return Err("min_interval_ms must not exceed base_interval_ms".to_string());
        }
        if self.base_interval_ms > 5000 {
            return Err("base_interval_ms must be at most 5000".to_string());
        }
        if self.interval_step_ms > self.base_interval_ms {
            return Err("interval_step_ms must not exceed base_interval_ms".to_string());
        }
        if self.points_per_step == 0 {
            return Err("points_per_step must be positive".to_string());
        }
        if self.data_file.trim().is_empty() {
            return Err("data_file must not be empty".to_string());
        }
        Ok(())
    }
}
