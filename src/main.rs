use anyhow::{Context, bail};
use clap::Parser;
use moonsearch::cli::{Cli, Commands};
use moonsearch::client::{Location, QueryController, canonical_search_url};
use moonsearch::persist::{ArtifactStatus, check_artifact, write_artifact};
use moonsearch::{DocsSearch, SearchConfig, SiteFiles};
use std::path::Path;

async fn load_config(path: Option<&Path>) -> anyhow::Result<SearchConfig> {
    match path {
        Some(path) => Ok(SearchConfig::load(path).await?),
        None => Ok(SearchConfig::default()),
    }
}

async fn build(
    files_path: &Path,
    out: &Path,
    config: SearchConfig,
    check: bool,
) -> anyhow::Result<()> {
    let plugin = DocsSearch::new(config)?;
    let mut files = SiteFiles::load(files_path).await?;
    let report = plugin.run(&mut files).await?;

    if check {
        match check_artifact(out, &report.output_path, report.fingerprint).await? {
            ArtifactStatus::UpToDate => {
                tracing::info!("{} is up to date ({})", report.output_path, report.fingerprint);
                return Ok(());
            }
            ArtifactStatus::Stale { on_disk } => bail!(
                "{} is stale: on disk {}, expected {}",
                report.output_path,
                on_disk,
                report.fingerprint
            ),
            ArtifactStatus::Missing => bail!("{} has not been generated", report.output_path),
        }
    }

    let script = files
        .get(&report.output_path)
        .context("Generated script missing from the site file set")?;
    let target = write_artifact(out, &report.output_path, &script.contents).await?;
    println!(
        "Indexed {} of {} files into {} ({} bytes, {})",
        report.documents,
        report.scanned,
        target.display(),
        report.bytes,
        report.fingerprint
    );
    Ok(())
}

async fn search(
    files_path: &Path,
    config: SearchConfig,
    query: &str,
    limit: usize,
) -> anyhow::Result<()> {
    let plugin = DocsSearch::new(config)?;
    let files = SiteFiles::load(files_path).await?;
    let build = plugin.build(&files)?;
    let controller = QueryController::new(&build.payload, &plugin.config().client);

    let hits = controller.search(query);
    if hits.is_empty() {
        println!("No results found for '{}'.", query);
        return Ok(());
    }

    println!("Results for '{}':\n", query);
    for (rank, hit) in hits.iter().take(limit).enumerate() {
        let record = build.payload.results.get(&hit.reference);
        let href = record.map(|r| r.href()).unwrap_or_default();
        let excerpt = record.map(|r| r.excerpt.as_str()).unwrap_or_default();
        println!("{}. {} ({:.3}) -> {}", rank + 1, hit.reference, hit.score, href);
        if !excerpt.is_empty() {
            println!("   {}", excerpt);
        }
    }
    if hits.len() > limit {
        println!("\n... and {} more", hits.len() - limit);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    moonsearch::tracing::init(cli.verbose, cli.log_format);

    match cli.command {
        Commands::Build {
            files,
            out,
            config,
            layout,
            output_path,
            check,
        } => {
            let mut config = load_config(config.as_deref()).await?;
            if let Some(layout) = layout {
                config.layout = layout;
            }
            if let Some(output_path) = output_path {
                config.output_path = output_path;
            }
            build(&files, &out, config, check).await
        }
        Commands::Search {
            query,
            files,
            config,
            limit,
        } => {
            let config = load_config(config.as_deref()).await?;
            search(&files, config, &query, limit).await
        }
        Commands::Url {
            input,
            base,
            config,
        } => {
            let config = load_config(config.as_deref()).await?;
            let location = Location::parse(&base)
                .with_context(|| format!("Invalid base URL '{}'", base))?;
            println!(
                "{}",
                canonical_search_url(&location, &config.client.search_route, &input)
            );
            Ok(())
        }
    }
}
