use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use property_desk::form::{ActionHandler, SystemClock};
use property_desk::storage::{FileStorage, StorageAdapter};
use property_desk::ui::{TerminalUi, UserInterface};
use property_desk::{
    Action, AppConfig, FormController, FormFields, PropertyStore, RecordId, Renderer,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type StdioUi = TerminalUi<std::io::BufReader<std::io::Stdin>, std::io::Stdout>;
type TerminalController = FormController<StdioUi>;

#[derive(Parser)]
#[command(name = "property-desk")]
#[command(about = "Keep a list of rental properties on this machine")]
#[command(version)]
struct Cli {
    /// Directory holding the stored listings
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Storage slot name
    #[arg(long, global = true)]
    key: Option<String>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a property
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        location: String,

        /// apartment, house or commercial
        #[arg(long = "type")]
        property_type: String,

        /// Monthly rent
        #[arg(long)]
        rent: String,

        /// available or occupied
        #[arg(long)]
        status: String,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show all properties
    List {
        /// Also write the cards as an HTML fragment
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Load a property back into the form and save it again
    Edit { id: RecordId },

    /// Delete a property
    Delete {
        id: RecordId,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they do not mix with the listing output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), cli.data_dir, cli.key).await?;

    info!("🏠 Property Desk");
    info!("Using {} under {}", config.storage_key, config.data_dir.display());

    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let adapter = StorageAdapter::new(storage, config.storage_key.clone());
    let store = PropertyStore::open(adapter)
        .await
        .context("Failed to load stored properties")?;

    let assume_yes = matches!(cli.command, Commands::Delete { yes: true, .. });
    let ui = TerminalUi::stdio().assume_yes(assume_yes);
    let renderer = Renderer::new(config.currency.clone());
    let mut controller = FormController::new(store, renderer.clone(), ui, Arc::new(SystemClock));

    match cli.command {
        Commands::Add {
            name,
            location,
            property_type,
            rent,
            status,
            notes,
        } => {
            *controller.fields_mut() = FormFields {
                name,
                location,
                property_type,
                rent,
                status,
                notes,
            };
            let id = controller.submit().await?;
            ensure_saved(&mut controller)?;
            info!("💾 Saved property {}", id);
        }
        Commands::List { html } => {
            controller.render();
            if let Some(path) = html {
                let fragment = renderer.render_all(controller.store().all()).to_html();
                tokio::fs::write(&path, fragment)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("💾 Wrote {} cards to {}", controller.store().len(), path.display());
            }
        }
        Commands::Edit { id } => {
            if !controller.begin_edit(id).await {
                warn!("No property with id {}", id);
                return Ok(());
            }
            ensure_saved(&mut controller)?;
            resubmit(&mut controller).await?;
        }
        Commands::Delete { id, .. } => {
            if controller.store().find(id).is_none() {
                warn!("No property with id {}", id);
                return Ok(());
            }
            controller.handle(Action::Delete(id)).await;
            ensure_saved(&mut controller)?;
        }
    }

    Ok(())
}

/// Prompt for every field with the prefilled values as defaults until the
/// form is accepted. The record is already out of the store at this point, so
/// giving up would lose it; end of input falls back to the prefilled values.
async fn resubmit(controller: &mut TerminalController) -> Result<()> {
    let prefill = controller.fields().clone();

    loop {
        let ui = controller.ui_mut();
        let fields = FormFields {
            name: ui.prompt("Name", &prefill.name)?,
            location: ui.prompt("Location", &prefill.location)?,
            property_type: ui
                .prompt("Type (apartment/house/commercial)", &prefill.property_type)?,
            rent: ui.prompt("Rent", &prefill.rent)?,
            status: ui.prompt("Status (available/occupied)", &prefill.status)?,
            notes: ui.prompt("Notes", &prefill.notes)?,
        };
        *controller.fields_mut() = fields;

        match controller.submit().await {
            Ok(id) => {
                ensure_saved(controller)?;
                info!("💾 Saved edited property as {}", id);
                return Ok(());
            }
            Err(e) if prefill.parse().is_ok() => {
                controller.ui_mut().notice(&e.to_string());
            }
            Err(e) => bail!("Stored property cannot be resubmitted: {}", e),
        }
    }
}

/// Each run is its own process, so a change that did not reach storage is lost
/// on exit and has to fail the command.
fn ensure_saved(controller: &mut TerminalController) -> Result<()> {
    match controller.take_storage_error() {
        Some(e) => Err(anyhow::Error::new(e).context("Changes were not saved")),
        None => Ok(()),
    }
}
