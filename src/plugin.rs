//! Pipeline entry point: one search index build per site build.

use crate::config::SearchConfig;
use crate::emit::{GeneratedScript, ScriptEmitter};
use crate::error::BuildError;
use crate::extract::Extractor;
use crate::fingerprint::Fingerprint;
use crate::html::{HtmlDom, ScraperDom};
use crate::payload::{IndexPayload, PayloadBuilder, TitleCollision};
use crate::site::SiteFiles;
use std::time::Instant;

/// Summary of one build, for logging and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Files in the set when the build started.
    pub scanned: usize,
    /// Documentation pages indexed.
    pub documents: usize,
    pub collisions: Vec<TitleCollision>,
    pub output_path: String,
    pub bytes: usize,
    pub fingerprint: Fingerprint,
    /// Whether an artifact from an earlier run was replaced.
    pub replaced: bool,
}

/// Result of a build before it is applied to the file set.
#[derive(Debug, Clone)]
pub struct Build {
    pub payload: IndexPayload,
    pub script: GeneratedScript,
}

/// The docs search plugin, generic over the HTML backend.
#[derive(Debug, Clone)]
pub struct DocsSearch<D = ScraperDom> {
    config: SearchConfig,
    dom: D,
}

impl DocsSearch<ScraperDom> {
    pub fn new(config: SearchConfig) -> Result<Self, BuildError> {
        Self::with_dom(config, ScraperDom)
    }
}

impl<D: HtmlDom> DocsSearch<D> {
    /// Create a plugin with an explicit HTML backend. Configuration is validated here.
    pub fn with_dom(config: SearchConfig, dom: D) -> Result<Self, BuildError> {
        config.validate()?;
        // Compile once up front so selector errors surface before any build
        Extractor::new(&dom, &config)?;
        Ok(Self { config, dom })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Extract, accumulate and emit without modifying `files`.
    pub fn build(&self, files: &SiteFiles) -> Result<Build, BuildError> {
        let extractor = Extractor::new(&self.dom, &self.config)?;

        let mut builder = PayloadBuilder::new();
        builder.extend(extractor.extract_all(files));
        let payload = builder.finish();

        for collision in &payload.collisions {
            tracing::warn!(
                "Documentation title '{}' in '{}' overwrites the result for '{}'",
                collision.title,
                collision.second,
                collision.first
            );
        }
        if self.config.strict_titles
            && let Some(collision) = payload.collisions.first()
        {
            return Err(BuildError::TitleCollision {
                title: collision.title.clone(),
                first: collision.first.clone(),
                second: collision.second.clone(),
            });
        }

        let script =
            ScriptEmitter::new(&self.config.client, &self.config.output_path).emit(&payload)?;
        Ok(Build { payload, script })
    }

    /// Build and inject the script into `files`. On error `files` is left untouched.
    pub fn apply(&self, files: &mut SiteFiles) -> Result<BuildReport, BuildError> {
        let start = Instant::now();
        let scanned = files.len();
        tracing::info!("Building docs search index over {} site files", scanned);

        let Build { payload, script } = self.build(files)?;
        let replaced = script.inject(files).is_some();

        let report = BuildReport {
            scanned,
            documents: payload.entries.len(),
            collisions: payload.collisions,
            output_path: script.path,
            bytes: script.source.len(),
            fingerprint: script.fingerprint,
            replaced,
        };

        tracing::info!(
            "Wrote {} ({} documents, {} bytes, fingerprint {}) in {:?}",
            report.output_path,
            report.documents,
            report.bytes,
            report.fingerprint,
            start.elapsed()
        );

        Ok(report)
    }

    /// Pipeline hook. The work is synchronous; completion is signaled by the
    /// returned future resolving.
    pub async fn run(&self, files: &mut SiteFiles) -> Result<BuildReport, BuildError> {
        self.apply(files)
    }
}
