use crate::config::Settings;

/// Load settings, falling back to defaults on any load or validation
/// failure. Configuration is optional; startup never fails because of it.
pub fn load_settings() -> Settings {
    let loaded = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("vivace: failed to load config, using defaults: {e}");
            return Settings::default();
        }
    };
    if let Err(msg) = loaded.validate() {
        eprintln!("vivace: invalid config, using defaults: {msg}");
        return Settings::default();
    }
    loaded
}
