pub mod cli;
pub mod client;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod html;
pub mod payload;
pub mod persist;
pub mod plugin;
pub mod site;
pub mod tracing;

pub use config::{ClientSettings, Markup, SearchConfig};
pub use emit::{GeneratedScript, ScriptEmitter};
pub use error::{BuildError, ConfigError, ManifestError};
pub use extract::{ExtractedDocument, Extractor};
pub use fingerprint::Fingerprint;
pub use html::{HtmlDom, ScraperDom};
pub use payload::{IndexEntry, IndexPayload, PayloadBuilder, ResultMap, ResultRecord, TitleCollision};
pub use plugin::{BuildReport, DocsSearch};
pub use site::{LinkPath, SiteFile, SiteFiles};
