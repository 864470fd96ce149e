use super::Config;

/// Config written on first run.
pub fn defaults() -> Config {
    Config::default()
}
