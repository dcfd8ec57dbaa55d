//! Server configuration from command-line flags with environment fallbacks.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use entity_store_core::{DocumentService, FileStore, Presence};

#[derive(Debug, Clone, Parser)]
#[command(name = "entity-store")]
#[command(about = "Per-entity JSON documents with nested path access over HTTP")]
#[command(version)]
pub struct Config {
    /// Interface to listen on
    #[arg(long, env = "ENTITY_STORE_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 1337)]
    pub port: u16,

    /// Directory holding one `<id>.json` file per entity
    #[arg(long, env = "ENTITY_STORE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Treat only missing keys as absent, so `0`, `false`, `""` and `null` can be read back
    #[arg(long, env = "ENTITY_STORE_STRICT_PRESENCE")]
    pub strict_presence: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn presence(&self) -> Presence {
        if self.strict_presence {
            Presence::Strict
        } else {
            Presence::Truthy
        }
    }

    /// Open the file store under `data_dir` and wrap it in a service.
    pub fn documents(&self) -> Result<DocumentService> {
        let store = FileStore::new(&self.data_dir).with_context(|| {
            format!("cannot open data directory {}", self.data_dir.display())
        })?;
        Ok(DocumentService::new(Arc::new(store)).with_presence(self.presence()))
    }
}
