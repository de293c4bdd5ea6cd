use crate::config::Pattern;
use crate::errors::LoadError;

/// Source of pattern definitions.
///
/// The core performs no file or network I/O of its own; pattern loading and
/// listing are delegated to an implementation of this trait. Definitions are
/// pulled once at startup and again on explicit reload.
pub trait PatternLoader: Send + Sync {
    fn load_pattern(&self, id: &str) -> Result<Pattern, LoadError>;

    fn list_patterns(&self) -> Result<Vec<String>, LoadError>;
}
