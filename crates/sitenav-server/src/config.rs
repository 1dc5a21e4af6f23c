use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use sitenav_favicon::ResolverConfig;

use crate::error::{ServerError, ServerResult};

/// Config file read when no explicit path is given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "sitenav.toml";

/// Prefix for environment overrides, e.g. `SITENAV_DATA_FILE`.
pub const ENV_PREFIX: &str = "SITENAV_";

pub const DEFAULT_PORT: u16 = 3000;

/// Upload limit for images: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// The JSON snapshot file.
    pub data_file: PathBuf,
    /// Where uploaded images are written and served from.
    pub images_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub favicon: ResolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            data_file: PathBuf::from("data").join("websites.json"),
            images_dir: PathBuf::from("images"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            favicon: ResolverConfig::default(),
        }
    }
}

impl ServerConfig {
    /// The provider chain: defaults, then the TOML file, then `SITENAV_*`
    /// environment variables. Nested keys use `__`, as in
    /// `SITENAV_FAVICON__PROBE_TIMEOUT_SECS`.
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load the layered configuration.
    ///
    /// An explicitly named file must exist; the default file is optional.
    /// A `PORT` variable replaces the port of the bind address.
    pub fn load(file: Option<&Path>) -> ServerResult<Self> {
        let path = match file {
            Some(path) if !path.exists() => {
                return Err(ServerError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let config: ServerConfig = Self::figment(&path)
            .extract()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        config.apply_port(std::env::var("PORT").ok().as_deref())
    }

    /// Replace the bind port with `port`, if given.
    pub fn apply_port(mut self, port: Option<&str>) -> ServerResult<Self> {
        if let Some(raw) = port.map(str::trim).filter(|p| !p.is_empty()) {
            let port: u16 = raw
                .parse()
                .map_err(|_| ServerError::Config(format!("invalid PORT value: {raw}")))?;
            self.bind_addr.set_port(port);
        }
        Ok(self)
    }
}
