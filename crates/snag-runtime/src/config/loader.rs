//! Options loader using figment.
//!
//! Hosts that prefer configuration files over code can load [`RawOptions`]
//! from layered sources. The bootstrap never reads files or the environment
//! itself; the loader's output is simply handed to it.
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: `snag.toml`
//! - `yaml-config`: `snag.yaml`, `snag.yml`
//!
//! # Priority (lowest to highest)
//!
//! 1. Programmatic defaults ([`OptionsLoader::defaults`])
//! 2. Profile-specific file (`snag.{profile}.toml`)
//! 3. Main file (`snag.toml` / `snag.yaml`)
//! 4. Environment variables (`SNAG_*`)
//!
//! # Environment Variable Mapping
//!
//! Variable names are snake case and map onto the camelCase option names,
//! with `__` separating nested keys:
//!
//! - `SNAG_API_KEY=abc` → `apiKey = "abc"`
//! - `SNAG_RELEASE_STAGE=staging` → `releaseStage = "staging"`
//! - `SNAG_ENDPOINTS__NOTIFY=https://…` → `endpoints.notify = "https://…"`
//!
//! # Example
//!
//! ```rust,ignore
//! use snag_runtime::{OptionsLoader, bootstrap_process};
//!
//! let options = OptionsLoader::new().profile("production").load()?;
//! let client = bootstrap_process(options, &[])?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(any(feature = "yaml-config", feature = "toml-config"))]
use figment::providers::Format;
#[cfg(feature = "toml-config")]
use figment::providers::Toml;
#[cfg(feature = "yaml-config")]
use figment::providers::Yaml;
use figment::providers::{Env, Serialized};
use serde_json::{Map, Value};
use tracing::{debug, info, trace};

use super::error::{LoaderError, LoaderResult};
use snag_core::RawOptions;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SNAG_";

/// Variable selecting the profile.
pub const PROFILE_VAR: &str = "SNAG_PROFILE";

/// Loads [`RawOptions`] from files and environment variables.
#[derive(Debug)]
pub struct OptionsLoader {
    defaults: Map<String, Value>,
    profile: Option<String>,
    search_paths: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    load_env: bool,
}

impl Default for OptionsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionsLoader {
    /// Creates a loader reading `SNAG_PROFILE` for the profile.
    pub fn new() -> Self {
        Self {
            defaults: Map::new(),
            profile: std::env::var(PROFILE_VAR).ok().filter(|p| !p.is_empty()),
            search_paths: Vec::new(),
            config_file: None,
            load_env: true,
        }
    }

    /// Sets the profile used for profile-specific files.
    pub fn profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Adds a directory searched for `snag.*` files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Loads exactly this file instead of searching.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables `SNAG_*` environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Sets lowest-priority option values.
    pub fn defaults(mut self, options: impl Into<RawOptions>) -> Self {
        self.defaults.extend(options.into().normalize());
        self
    }

    /// Loads the layered options.
    pub fn load(self) -> LoaderResult<RawOptions> {
        let figment = self.build_figment()?;
        let options: Map<String, Value> = figment.extract().map_err(Box::new)?;
        debug!(options = options.len(), "Options loaded");
        Ok(RawOptions::Map(options))
    }

    fn build_figment(&self) -> LoaderResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(self.defaults.clone()));

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(LoaderError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "Loading options file");
            figment = merge_file(figment, path)?;
        } else {
            figment = self.load_files(figment);
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "Loading environment variables");
            // Keys are lowercased in the mapper; figment's own lowercasing
            // runs after it and would fold the camelCase names.
            figment = figment.merge(
                Env::prefixed(ENV_PREFIX)
                    .ignore(&["profile"])
                    .lowercase(false)
                    .split("__")
                    .map(|key| env_key_to_option(&key.as_str().to_ascii_lowercase()).into()),
            );
        }
        Ok(figment)
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("snag"));
        }
        paths
    }

    #[cfg_attr(
        not(any(feature = "toml-config", feature = "yaml-config")),
        allow(unused_mut, unused_variables)
    )]
    fn load_files(&self, mut figment: Figment) -> Figment {
        let search_paths = self.resolve_search_paths();

        #[cfg(feature = "toml-config")]
        {
            figment = self.load_format(figment, &search_paths, &["snag.toml"], |f, p| {
                f.merge(Toml::file(p))
            });
        }

        #[cfg(feature = "yaml-config")]
        {
            figment = self.load_format(figment, &search_paths, &["snag.yaml", "snag.yml"], |f, p| {
                f.merge(Yaml::file(p))
            });
        }

        figment
    }

    /// Merges the first `base_names` match in `search_paths`, preceded by its
    /// profile-specific variant when one exists.
    #[cfg(any(feature = "toml-config", feature = "yaml-config"))]
    fn load_format<F>(
        &self,
        mut figment: Figment,
        search_paths: &[PathBuf],
        base_names: &[&str],
        merge: F,
    ) -> Figment
    where
        F: Fn(Figment, &Path) -> Figment,
    {
        for dir in search_paths {
            for base_name in base_names {
                if let Some(profile) = &self.profile
                    && let Some((stem, ext)) = base_name.rsplit_once('.')
                {
                    let profile_path = dir.join(format!("{stem}.{profile}.{ext}"));
                    if profile_path.exists() {
                        debug!(path = %profile_path.display(), "Loading profile options file");
                        figment = merge(figment, &profile_path);
                    }
                }

                let path = dir.join(base_name);
                if path.exists() {
                    info!(path = %path.display(), "Loading options file");
                    return merge(figment, &path);
                }
            }
        }
        figment
    }
}

fn merge_file(figment: Figment, path: &Path) -> LoaderResult<Figment> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        #[cfg(feature = "toml-config")]
        "toml" => Ok(figment.merge(Toml::file(path))),
        #[cfg(feature = "yaml-config")]
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        _ => Err(LoaderError::UnsupportedFormat(ext.to_string())),
    }
}

/// `api_key` → `apiKey`, `endpoints.notify` stays as is.
fn env_key_to_option(key: &str) -> String {
    key.split('.')
        .map(|segment| {
            let mut out = String::with_capacity(segment.len());
            let mut upper = false;
            for c in segment.chars() {
                if c == '_' {
                    upper = true;
                } else if upper {
                    out.extend(c.to_uppercase());
                    upper = false;
                } else {
                    out.push(c);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(".")
}
