// src/host/static_source.rs

//! Runnable source backed by the static `[runnable.<name>]` config
//! sections.
//!
//! A real editor integration would plug a language-service-backed source in
//! here; the static source stands in for it on the CLI host, where the
//! "document" is the config file and every configured runnable is relevant
//! to every position.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::host::{DocumentPosition, RunnableSource};
use crate::types::Runnable;

#[derive(Debug, Clone)]
pub struct StaticRunnableSource {
    runnables: Vec<Runnable>,
}

impl StaticRunnableSource {
    pub fn new(runnables: Vec<Runnable>) -> Self {
        Self { runnables }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(cfg.runnables())
    }
}

impl RunnableSource for StaticRunnableSource {
    fn runnables_at<'a>(
        &'a self,
        position: &'a DocumentPosition,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Runnable>>> + Send + 'a>> {
        Box::pin(async move {
            debug!(
                document = %position.document.display(),
                line = position.line,
                count = self.runnables.len(),
                "listing static runnables"
            );
            Ok(self.runnables.clone())
        })
    }
}
