//! Client script generation.
//!
//! The script binds three data literals (`docsSearchIndex`, `docsResults`,
//! `docsSearchConfig`) and then runs the embedded controller source, which
//! refers to them by name. Nothing here touches the filesystem.

use crate::client::CONTROLLER_SOURCE;
use crate::config::{ClientSettings, Markup};
use crate::error::BuildError;
use crate::fingerprint::Fingerprint;
use crate::payload::IndexPayload;
use crate::site::{SiteFile, SiteFiles};
use serde::Serialize;

/// The generated artifact, ready to be placed into the site file set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    /// Site-relative virtual path.
    pub path: String,
    pub source: String,
    pub fingerprint: Fingerprint,
}

impl GeneratedScript {
    /// Place the script into `files`, replacing any previous artifact at the same path.
    ///
    /// Returns the replaced file, if there was one.
    pub fn inject(&self, files: &mut SiteFiles) -> Option<SiteFile> {
        files.insert(self.path.clone(), SiteFile::from_contents(self.source.clone()))
    }
}

/// Browser-facing view of [`ClientSettings`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptConfig<'a> {
    search_route: &'a str,
    title_boost: u32,
    contents_boost: u32,
    escape_results: bool,
    markup: ScriptMarkup<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptMarkup<'a> {
    query_label: &'a str,
    search_input: &'a str,
    results: &'a str,
    form: &'a str,
}

impl<'a> From<&'a ClientSettings> for ScriptConfig<'a> {
    fn from(settings: &'a ClientSettings) -> Self {
        let Markup {
            query_label,
            search_input,
            results,
            form,
        } = &settings.markup;
        Self {
            search_route: &settings.search_route,
            title_boost: settings.title_boost,
            contents_boost: settings.contents_boost,
            escape_results: settings.escape_results,
            markup: ScriptMarkup {
                query_label,
                search_input,
                results,
                form,
            },
        }
    }
}

pub struct ScriptEmitter<'a> {
    settings: &'a ClientSettings,
    output_path: &'a str,
}

impl<'a> ScriptEmitter<'a> {
    pub fn new(settings: &'a ClientSettings, output_path: &'a str) -> Self {
        Self {
            settings,
            output_path,
        }
    }

    /// Render the full script text for `payload`.
    pub fn render(&self, payload: &IndexPayload) -> Result<String, BuildError> {
        let index = payload.entries_json()?;
        let results = payload.results_json()?;
        let config = serde_json::to_string(&ScriptConfig::from(self.settings))?;

        let mut source = String::with_capacity(
            index.len() + results.len() + config.len() + CONTROLLER_SOURCE.len() + 96,
        );
        source.push_str("var docsSearchIndex = ");
        source.push_str(&index);
        source.push_str(";\nvar docsResults = ");
        source.push_str(&results);
        source.push_str(";\nvar docsSearchConfig = ");
        source.push_str(&config);
        source.push_str(";\n\n");
        source.push_str(CONTROLLER_SOURCE);
        Ok(source)
    }

    pub fn emit(&self, payload: &IndexPayload) -> Result<GeneratedScript, BuildError> {
        let source = self.render(payload)?;
        Ok(GeneratedScript {
            path: self.output_path.to_string(),
            fingerprint: Fingerprint::of(&source),
            source,
        })
    }
}
