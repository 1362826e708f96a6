use anyhow::Context;
use clap::{Parser, Subcommand};
use layerkit::{init_logging, replay, store_options, Config, BUILD_DATE, VERSION};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "layerkit", version, about = "Layer history tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Replay a JSON history script and print each step")]
    Replay {
        #[arg(help = "Script file to replay.")]
        script: PathBuf,

        #[arg(help = "Config file (.toml or .json).", long)]
        config: Option<PathBuf>,

        #[arg(help = "Print the final snapshot as JSON.", long, default_value_t = false)]
        json: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(default) => Config::load_or_default(&default)
                .with_context(|| format!("failed to load config {}", default.display())),
            Err(_) => Ok(Config::default()),
        },
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            script,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            init_logging(&config.logging)?;
            tracing::info!("layerkit {} (built {})", VERSION, BUILD_DATE);

            let parsed = replay::Script::load(&script)
                .with_context(|| format!("failed to read script {}", script.display()))?;
            let report = replay::run(parsed, store_options(&config.history));

            if json {
                println!("{}", serde_json::to_string_pretty(&report.final_snapshot)?);
            } else {
                for step in &report.steps {
                    println!("{}", step);
                }
                match &report.final_snapshot {
                    Some(snapshot) => println!(
                        "final: revision {} with {} layers, {} selected",
                        snapshot.revision,
                        snapshot.layers.len(),
                        snapshot.selected_layer_ids.len()
                    ),
                    None => println!("final: no snapshot"),
                }
            }

            let invalid = report.invalid_count();
            if invalid > 0 {
                tracing::warn!("{} scripted snapshots failed validation", invalid);
            }
        }
    }

    Ok(())
}
