//! Source Config

use std::path::{Path, PathBuf};

use clap::Args;

/// Where products and promotions are loaded from.
#[derive(Debug, Args)]
pub(crate) struct SourceConfig {
    /// YAML catalog file
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// A resolved source. An explicit catalog wins over a database URL.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Source<'a> {
    /// Read a YAML catalog.
    Catalog(&'a Path),

    /// Query `PostgreSQL`.
    Database(&'a str),
}

impl SourceConfig {
    pub(crate) fn resolve(&self) -> Option<Source<'_>> {
        if let Some(path) = &self.catalog {
            return Some(Source::Catalog(path));
        }

        self.database_url.as_deref().map(Source::Database)
    }
}
