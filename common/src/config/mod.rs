mod config_content_provider;
mod config_error;
mod config_manager;
mod config_serializer;
mod memory_content_provider;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider};
pub use config_error::ConfigError;
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use memory_content_provider::MemoryContentProvider;
pub use validate::Validate;
