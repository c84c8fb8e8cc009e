//! Configuration access port trait.

/// Sectioned key/value lookup. `get_double` falls back to `default` when the
/// key is absent or does not parse.
pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
}
