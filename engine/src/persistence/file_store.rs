use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{HighScoreStore, PersistenceError};
use crate::config::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, YamlConfigSerializer,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct HighScoreRecord {
    pub high_score: u32,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Keeps the high score as a small YAML record.
pub struct FileHighScoreStore<TContentProvider = FileContentConfigProvider>
where
    TContentProvider: ConfigContentProvider,
{
    content_provider: TContentProvider,
    serializer: YamlConfigSerializer,
}

impl FileHighScoreStore<FileContentConfigProvider> {
    pub fn from_yaml_file(file_path: impl AsRef<Path>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path.as_ref()))
    }
}

impl<TContentProvider: ConfigContentProvider> FileHighScoreStore<TContentProvider> {
    pub fn new(content_provider: TContentProvider) -> Self {
        Self {
            content_provider,
            serializer: YamlConfigSerializer::new(),
        }
    }

    pub fn load_record(&self) -> Result<Option<HighScoreRecord>, PersistenceError> {
        let Some(content) = self.content_provider.get_config_content()? else {
            return Ok(None);
        };
        let record: HighScoreRecord = self.serializer.deserialize(&content)?;
        Ok(Some(record))
    }
}

impl<TContentProvider: ConfigContentProvider> HighScoreStore for FileHighScoreStore<TContentProvider> {
    fn load_high_score(&self) -> Result<Option<u32>, PersistenceError> {
        Ok(self.load_record()?.map(|record| record.high_score))
    }

    fn save_high_score(&self, value: u32) -> Result<(), PersistenceError> {
        let record = HighScoreRecord {
            high_score: value,
            updated_at: Some(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        };
        let content = self.serializer.serialize(&record)?;
        self.content_provider.set_config_content(&content)?;
        Ok(())
    }
}
