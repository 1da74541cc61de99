//! Configuration loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Name of the project-level config file
pub const PROJECT_CONFIG_FILE: &str = "miniflux-mcp.toml";

/// Prefix of the environment variables that override file settings
pub const ENV_PREFIX: &str = "MINIFLUX_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `MINIFLUX_URL`, `MINIFLUX_API_KEY`, ...
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./miniflux-mcp.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/miniflux-mcp/config.toml`
    /// 5. Default values
    ///
    /// With `skip_files` only the environment and defaults are read.
    pub fn load(
        config_path: Option<&PathBuf>,
        skip_files: bool,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let global = if skip_files {
            None
        } else {
            Self::global_config_path()
        };
        Self::figment(global.as_deref(), config_path.map(PathBuf::as_path), skip_files)
            .extract()
            .map_err(Box::new)
    }

    fn figment(global_path: Option<&Path>, config_path: Option<&Path>, skip_files: bool) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if !skip_files {
            if let Some(global_path) = global_path {
                if global_path.exists() {
                    figment = figment.merge(Toml::file(global_path));
                }
            }

            if let Some(path) = Self::project_config_path() {
                figment = figment.merge(Toml::file(path));
            }

            if let Some(path) = config_path {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/miniflux-mcp/config.toml if set,
    /// otherwise the platform's config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("miniflux-mcp").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        let path = PathBuf::from(PROJECT_CONFIG_FILE);
        path.exists().then_some(path)
    }

    /// Print the config sources being used (for debugging)
    ///
    /// Goes to stderr: stdout belongs to the protocol.
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        eprintln!("Configuration sources (in priority order):");

        let env_vars: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_vars.is_empty() {
            eprintln!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            eprintln!("  [FOUND] Env:     {}", env_vars.join(", "));
        }

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            eprintln!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            eprintln!("  [FOUND] Project: {}", path.display());
        } else {
            eprintln!("  [     ] Project: ./{}", PROJECT_CONFIG_FILE);
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                eprintln!("  [FOUND] Global:  {}", path.display());
            } else {
                eprintln!("  [     ] Global:  {}", path.display());
            }
        }

        eprintln!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn load_in_jail(
        global: Option<&Path>,
        explicit: Option<&Path>,
        skip_files: bool,
    ) -> Result<FileConfig, figment::Error> {
        ConfigLoader::figment(global, explicit, skip_files).extract()
    }

    #[test]
    fn test_defaults_only() {
        Jail::expect_with(|_jail| {
            let config = load_in_jail(None, None, false)?;
            assert_eq!(config, FileConfig::default());
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PROJECT_CONFIG_FILE,
                r#"
                url = "https://file.example.org"
                api_key = "from-file"
                timeout_seconds = 10
                "#,
            )?;
            jail.set_env("MINIFLUX_URL", "https://env.example.org");
            jail.set_env("MINIFLUX_TIMEOUT_SECONDS", "5");

            let config = load_in_jail(None, None, false)?;
            assert_eq!(config.url.as_deref(), Some("https://env.example.org"));
            assert_eq!(config.api_key.as_deref(), Some("from-file"));
            assert_eq!(config.timeout_seconds, 5);
            Ok(())
        });
    }

    #[test]
    fn test_file_priority() {
        Jail::expect_with(|jail| {
            jail.create_file("global.toml", "url = \"https://global\"\nusername = \"g\"")?;
            jail.create_file(PROJECT_CONFIG_FILE, "url = \"https://project\"")?;
            jail.create_file("explicit.toml", "url = \"https://explicit\"")?;

            let global = jail.directory().join("global.toml");
            let config = load_in_jail(Some(&global), Some(Path::new("explicit.toml")), false)?;
            assert_eq!(config.url.as_deref(), Some("https://explicit"));
            assert_eq!(config.username.as_deref(), Some("g"));

            let config = load_in_jail(Some(&global), None, false)?;
            assert_eq!(config.url.as_deref(), Some("https://project"));
            Ok(())
        });
    }

    #[test]
    fn test_skip_files_still_reads_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(PROJECT_CONFIG_FILE, "url = \"https://project\"")?;
            jail.set_env("MINIFLUX_API_KEY", "from-env");

            let config = load_in_jail(None, None, true)?;
            assert_eq!(config.url, None);
            assert_eq!(config.api_key.as_deref(), Some("from-env"));
            Ok(())
        });
    }

    #[test]
    fn test_global_config_path_names_the_app() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("miniflux-mcp/config.toml"));
        }
    }
}
