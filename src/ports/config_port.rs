//! Configuration access port trait.

use crate::domain::error::BreakscanError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;

    fn require_string(&self, section: &str, key: &str) -> Result<String, BreakscanError> {
        self.get_string(section, key)
            .ok_or_else(|| BreakscanError::ConfigMissing {
                section: section.to_string(),
                key: key.to_string(),
            })
    }
}
