//! SplitEase main entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use splitease_config::{Config, ConfigErrorSeverity};
use splitease_core::{SplitEngine, SplitForm};
use splitease_ui::{PageBuilder, RenderedSplit};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "splitease")]
#[command(author = "SplitEase Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Split previews and page glue for the SplitEase expense sharing app", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a form snapshot and print the split preview
    Preview {
        /// YAML snapshot of the expense form
        snapshot: PathBuf,

        /// Print the engine preview as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the default configuration
    DefaultConfig,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Command::DefaultConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let config = load_config(&args.config)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();
    log::info!("Config loaded from {}", args.config.display());

    let rt = Runtime::new().context("failed to start runtime")?;
    rt.block_on(async move {
        match args.command {
            Command::Preview { snapshot, json } => preview(config, snapshot, json).await,
            Command::DefaultConfig => Ok(()),
        }
    })
}

/// Load the config file; warnings fall back to defaults, errors stop startup
fn load_config(path: &Path) -> Result<Config> {
    match Config::load(path.to_path_buf()) {
        Ok(config) => Ok(config),
        Err(e) if e.severity() == ConfigErrorSeverity::Warning => {
            eprintln!("[WARN] using default configuration\n{}", e.to_details());
            Ok(Config::default())
        }
        Err(e) => {
            let details = e.to_details();
            Err(e).with_context(|| format!("failed to load configuration from {}\n{}", path.display(), details))
        }
    }
}

fn parse_snapshot(content: &str, source: &Path) -> Result<SplitForm> {
    SplitForm::from_yaml(content).map_err(|e| {
        let details = e.to_details();
        log::error!("{} snapshot rejected: {}", e.severity(), details);
        anyhow::Error::new(e).context(format!("invalid snapshot {}\n{}", source.display(), details))
    })
}

async fn preview(config: Config, snapshot: PathBuf, json: bool) -> Result<()> {
    let content = tokio::fs::read_to_string(&snapshot)
        .await
        .with_context(|| format!("failed to read snapshot {}", snapshot.display()))?;
    let form = parse_snapshot(&content, &snapshot)?;
    log::debug!("snapshot has {} members in {} mode", form.members.len(), form.mode);

    if json {
        let engine = SplitEngine::from_config(&config.split)?;
        let output = serde_json::to_string_pretty(&engine.preview(&form))?;
        println!("{}", output);
        return Ok(());
    }

    let mut page = PageBuilder::new().config(config).expense_form(&form).build()?;
    page.load();
    print_rendered(&page.rendered_split());
    Ok(())
}

fn print_rendered(rendered: &RenderedSplit) {
    println!("Split type: {}", rendered.split_type.as_deref().unwrap_or("-"));
    println!("Equal share: {}", rendered.equal_preview.as_deref().unwrap_or("-"));
    for row in &rendered.rows {
        println!(
            "  {:<20} equal {:>12}  percentage {:>12}",
            row.name,
            row.split_amount.as_deref().unwrap_or("-"),
            row.calculated_amount.as_deref().unwrap_or("-")
        );
    }
    if let Some(exact) = &rendered.exact_remaining {
        println!("Exact total: {} ({})", exact.text, status_label(exact.reconciled));
    }
    if let Some(total) = &rendered.percentage_total {
        println!("Percentage total: {} ({})", total.text, status_label(total.reconciled));
    }
}

fn status_label(reconciled: bool) -> &'static str {
    if reconciled {
        "balanced"
    } else {
        "unbalanced"
    }
}
