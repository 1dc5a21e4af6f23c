use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use sitenav_catalog::{parse_import, Catalog};
use sitenav_favicon::{FaviconResolver, Tier};
use sitenav_server::{ServerConfig, SitenavServer};
use sitenav_store::JsonFileStore;
use sitenav_types::{AccessMode, WebsiteRecord, WebsiteSnapshot};
use tracing::{debug, info};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    debug!(
        data = %config.data_file.display(),
        images = %config.images_dir.display(),
        "configuration loaded"
    );

    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::List(args) => cmd_list(&config, args),
        Command::Favicon(args) => cmd_favicon(config, args, cli.verbose).await,
        Command::Export(args) => cmd_export(&config, args),
        Command::Import(args) => cmd_import(&config, args),
        Command::Config => cmd_config(&config),
    }
}

fn open_catalog(config: &ServerConfig) -> anyhow::Result<Catalog<JsonFileStore>> {
    let store = JsonFileStore::open(&config.data_file)
        .with_context(|| format!("cannot open {}", config.data_file.display()))?;
    Ok(Catalog::new(store))
}

async fn cmd_serve(mut config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(images) = args.images {
        config.images_dir = images;
    }
    println!(
        "{} sitenav on {} (data: {}, images: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.data_file.display(),
        config.images_dir.display()
    );
    SitenavServer::new(config).serve().await?;
    Ok(())
}

fn cmd_list(config: &ServerConfig, args: ListArgs) -> anyhow::Result<()> {
    let websites = open_catalog(config)?.list();
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&websites)?),
        OutputFormat::Text => {
            if websites.is_empty() {
                println!("No websites.");
            }
            for (i, website) in websites.iter().enumerate() {
                print_website(i + 1, website);
            }
        }
    }
    Ok(())
}

fn print_website(position: usize, website: &WebsiteRecord) {
    println!("{:>3}. {}", position, website.name.bold());
    if let Some(description) = website.description.as_deref().filter(|d| !d.is_empty()) {
        println!("     {}", description.dimmed());
    }
    for mode in AccessMode::ALL {
        if let Some(url) = website.url_for(mode) {
            println!("     {:<9} {}", mode.label().cyan(), url.blue());
        }
    }
}

async fn cmd_favicon(config: ServerConfig, args: FaviconArgs, verbose: bool) -> anyhow::Result<()> {
    let resolver = FaviconResolver::with_default_stages(config.favicon)?;
    let resolution = resolver.resolve_with_report(&args.url).await?;

    if verbose {
        for stage in &resolution.stages {
            let tier = match stage.tier {
                Tier::Primary => "primary",
                Tier::Fallback => "fallback",
            };
            let outcome = if stage.skipped {
                "skipped".dimmed().to_string()
            } else {
                format!("+{} in {:?}", stage.added, stage.elapsed)
            };
            println!("  {} ({}) {}", stage.stage_name.bold(), tier, outcome);
        }
    }

    match resolution.candidates.as_slice() {
        [] => println!("{} No icons found for {}", "✗".red().bold(), args.url.yellow()),
        candidates => {
            println!(
                "{} {} candidate(s) for {}",
                "✓".green().bold(),
                candidates.len(),
                args.url.yellow()
            );
            for url in candidates {
                println!("  {}", url.blue());
            }
        }
    }
    Ok(())
}

fn cmd_export(config: &ServerConfig, args: ExportArgs) -> anyhow::Result<()> {
    let snapshot = open_catalog(config)?.export()?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    match args.output {
        Some(path) => {
            write_json(&path, &json)?;
            eprintln!(
                "{} Exported {} website(s) to {}",
                "✓".green().bold(),
                snapshot.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_import(config: &ServerConfig, args: ImportArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;
    let records = parse_import(&body)?;
    debug!(file = %args.file.display(), count = records.len(), "import file validated");

    let catalog = open_catalog(config)?;
    if let Some(backup) = &args.backup {
        let current = catalog
            .export()
            .context("cannot back up the current collection")?;
        write_backup(backup, &current)?;
        info!(path = %backup.display(), count = current.len(), "backup written");
        println!("  Backup: {} ({} website(s))", backup.display(), current.len());
    }

    let count = catalog.import(records)?;
    println!(
        "{} Imported {} website(s) into {}",
        "✓".green().bold(),
        count,
        config.data_file.display()
    );
    Ok(())
}

fn write_backup(path: &Path, snapshot: &WebsiteSnapshot) -> anyhow::Result<()> {
    write_json(path, &serde_json::to_string_pretty(snapshot)?)
}

fn write_json(path: &Path, json: &str) -> anyhow::Result<()> {
    std::fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> ServerConfig {
        ServerConfig {
            data_file: dir.join("websites.json"),
            images_dir: dir.join("images"),
            ..ServerConfig::default()
        }
    }

    #[test]
    fn import_with_backup_replaces_and_saves_previous() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(
            &config.data_file,
            r#"{"websites":[{"name":"Old","image":null}],"categories":[]}"#,
        )
        .unwrap();
        let input = dir.path().join("new.json");
        std::fs::write(&input, r#"{"websites":[{"name":"A"},{"name":"B"}]}"#).unwrap();
        let backup = dir.path().join("backup.json");

        cmd_import(&config, ImportArgs { file: input, backup: Some(backup.clone()) }).unwrap();

        let names: Vec<String> = open_catalog(&config).unwrap().list().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["A", "B"]);
        let saved: WebsiteSnapshot = serde_json::from_str(&std::fs::read_to_string(backup).unwrap()).unwrap();
        assert_eq!(saved.websites[0].name, "Old");
    }

    #[test]
    fn import_rejects_nameless_record() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let input = dir.path().join("bad.json");
        std::fs::write(&input, r#"{"websites":[{"intranet":"http://x"}]}"#).unwrap();

        assert!(cmd_import(&config, ImportArgs { file: input, backup: None }).is_err());
        assert!(!config.data_file.exists());
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.data_file, r#"{"websites":[{"name":"NAS"}]}"#).unwrap();
        let output = dir.path().join("out.json");

        cmd_export(&config, ExportArgs { output: Some(output.clone()) }).unwrap();
        let written: WebsiteSnapshot = serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written.websites.len(), 1);
    }

    #[test]
    fn export_of_missing_data_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(cmd_export(&config, ExportArgs { output: None }).is_err());
    }
}
