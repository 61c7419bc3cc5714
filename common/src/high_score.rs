use serde::{Deserialize, Serialize};

use crate::config::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider,
    YamlConfigSerializer,
};
use crate::{log, log_error};

pub const DEFAULT_HIGH_SCORE_FILE: &str = "snake_high_score.yaml";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u32,
}

/// Persists the best score between runs. Unreadable storage counts as no record.
pub struct HighScoreStore<TContentProvider = FileContentConfigProvider>
where
    TContentProvider: ConfigContentProvider,
{
    content_provider: TContentProvider,
    serializer: YamlConfigSerializer,
    stored: Option<u32>,
}

impl HighScoreStore<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(FileContentConfigProvider::new(file_path))
    }
}

impl<TContentProvider> HighScoreStore<TContentProvider>
where
    TContentProvider: ConfigContentProvider,
{
    pub fn new(content_provider: TContentProvider) -> Self {
        Self {
            content_provider,
            serializer: YamlConfigSerializer::new(),
            stored: None,
        }
    }

    pub fn try_load(&self) -> Result<u32, ConfigError> {
        let Some(content) = self.content_provider.get_config_content()? else {
            return Ok(0);
        };
        let record: HighScoreRecord = self.serializer.deserialize(&content)?;
        Ok(record.high_score)
    }

    /// Reads the stored value, falling back to 0 on a missing or corrupt record.
    pub fn load(&mut self) -> u32 {
        let high_score = match self.try_load() {
            Ok(high_score) => high_score,
            Err(e) => {
                log_error!("Failed to load high score, starting from 0: {}", e);
                0
            }
        };
        self.stored = Some(high_score);
        high_score
    }

    /// Writes `high_score` when it differs from what is stored. Returns whether it wrote.
    pub fn save(&mut self, high_score: u32) -> Result<bool, ConfigError> {
        if self.stored == Some(high_score) {
            return Ok(false);
        }

        let content = self.serializer.serialize(&HighScoreRecord { high_score })?;
        self.content_provider.set_config_content(&content)?;
        self.stored = Some(high_score);
        log!("High score {} saved", high_score);
        Ok(true)
    }

    pub fn content_provider(&self) -> &TContentProvider {
        &self.content_provider
    }
}
