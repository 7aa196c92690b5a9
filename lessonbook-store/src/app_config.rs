use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    pub images_dir: PathBuf,
}

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE_NAME: &str = "afterschool";
pub const DEFAULT_IMAGES_DIR: &str = "images";

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::build(&run_mode, env::var("PORT").ok(), env::var("MONGODB_URI").ok())
    }

    /// Layering, lowest precedence first: built-in defaults, `config/default`,
    /// `config/{run_mode}`, `config/local`, `LESSONBOOK_*` variables, and
    /// finally the conventional `PORT` / `MONGODB_URI` overrides.
    pub fn build(
        run_mode: &str,
        port: Option<String>,
        mongodb_uri: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .set_default("server.port", DEFAULT_PORT as i64)?
            .set_default("database.url", DEFAULT_DATABASE_URL)?
            .set_default("database.name", DEFAULT_DATABASE_NAME)?
            .set_default("assets.images_dir", DEFAULT_IMAGES_DIR)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `LESSONBOOK_SERVER__PORT=8080`
            .add_source(config::Environment::with_prefix("LESSONBOOK").separator("__"))
            .set_override_option("server.port", port)?
            .set_override_option("database.url", mongodb_uri)?
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_without_sources() {
        let config = Config::build("test", None, None).unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database.name, DEFAULT_DATABASE_NAME);
        assert_eq!(config.assets.images_dir, PathBuf::from(DEFAULT_IMAGES_DIR));
    }

    #[test]
    fn test_conventional_overrides_win() {
        let config = Config::build(
            "test",
            Some("8080".to_string()),
            Some("mongodb://db.internal:27017".to_string()),
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "mongodb://db.internal:27017");
    }

    #[test]
    fn test_bad_port_is_an_error() {
        assert!(Config::build("test", Some("not-a-port".to_string()), None).is_err());
    }
}
