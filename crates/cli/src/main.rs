//! Admin CLI for POS availability flags.
//!
//! Acts as a minimal host: it registers catalog items, fires the catalog
//! lifecycle hooks, and answers POS availability queries against the
//! configured store.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use posflag_availability::settings;
use posflag_availability::{AvailabilityFlag, AvailabilityStore};
use posflag_core::ItemId;
use posflag_events::{CatalogEvent, CatalogEventSink, Event};
use posflag_infra::{CatalogRegistry, PosStore, StoreConfig};

type Service = AvailabilityStore<Arc<dyn PosStore>, Arc<dyn PosStore>>;

#[derive(Parser, Debug)]
#[command(name = "posflag", version, about = "Point-of-sale availability flags")]
struct Cli {
    /// `memory` or the path of a JSON store file.
    #[arg(long, global = true, env = "POSFLAG_STORE")]
    store: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read or change the "sell all products by default" setting.
    Default {
        #[command(subcommand)]
        action: DefaultAction,
    },
    /// Catalog item operations.
    Item {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// List catalog items with their flags.
    List {
        /// Only items sellable at the point of sale.
        #[arg(long, default_value_t = false)]
        pos_only: bool,
    },
    /// Print the POS Products settings section and its current values.
    Settings,
}

#[derive(Subcommand, Debug)]
enum DefaultAction {
    Get,
    Set {
        #[arg(value_parser = parse_bool_arg, action = clap::ArgAction::Set)]
        value: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ItemAction {
    /// Register an item and fire the created hook.
    Create { id: Option<ItemId> },
    /// Fire the updated hook for an existing item.
    Update { id: ItemId },
    /// Print whether the item is sellable at the point of sale.
    Allowed { id: ItemId },
    /// Print the stored flag and resolved availability.
    Show { id: ItemId },
    /// Explicitly set the flag (`allowed`, `disallowed` or `unset`).
    Set { id: ItemId, flag: AvailabilityFlag },
    /// Remove the item from the catalog.
    Remove { id: ItemId },
}

#[derive(Debug, Serialize)]
struct ItemView {
    id: ItemId,
    flag: AvailabilityFlag,
    allowed: bool,
}

fn parse_bool_arg(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" | "on" => Ok(true),
        "no" | "false" | "0" | "off" => Ok(false),
        other => Err(format!("expected yes/no or true/false, got {other:?}")),
    }
}

fn main() -> anyhow::Result<()> {
    posflag_observability::init();

    let cli = Cli::parse();
    let config = match cli.store.as_deref() {
        Some(value) => StoreConfig::parse(value)?,
        None => StoreConfig::from_env()?,
    };
    let backing = config.open();

    let stdout = std::io::stdout();
    run(cli.command, backing, &mut stdout.lock())
}

fn run<W: Write>(command: Commands, backing: Arc<dyn PosStore>, out: &mut W) -> anyhow::Result<()> {
    let service: Service = AvailabilityStore::new(backing.clone(), backing.clone());

    match command {
        Commands::Default { action } => match action {
            DefaultAction::Get => writeln!(out, "{}", service.resolver().get_default())?,
            DefaultAction::Set { value } => {
                service.resolver().set_default(value)?;
                writeln!(out, "{value}")?;
            }
        },
        Commands::Item { action } => run_item(action, &service, backing.as_ref(), out)?,
        Commands::List { pos_only } => {
            let ids = backing.list_items().context("listing catalog items")?;
            let ids = if pos_only { service.filter_allowed(ids) } else { ids };
            for id in ids {
                if let Some(view) = view(&service, id) {
                    writeln!(out, "{}", serde_json::to_string(&view)?)?;
                }
            }
        }
        Commands::Settings => {
            let payload = serde_json::json!({
                "fields": settings::contribute(Vec::new()),
                "values": settings::current_values(service.resolver()),
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        }
    }
    Ok(())
}

fn run_item<W: Write>(
    action: ItemAction,
    service: &Service,
    registry: &dyn PosStore,
    out: &mut W,
) -> anyhow::Result<()> {
    match action {
        ItemAction::Create { id } => {
            let id = id.unwrap_or_default();
            if !registry.register_item(id).context("registering item")? {
                tracing::info!(%id, "item already registered");
            }
            notify(service, &CatalogEvent::created(id));
            print_view(service, id, out)?;
        }
        ItemAction::Update { id } => {
            notify(service, &CatalogEvent::updated(id));
            print_view(service, id, out)?;
        }
        ItemAction::Allowed { id } => writeln!(out, "{}", service.is_allowed(id))?,
        ItemAction::Show { id } => print_view(service, id, out)?,
        ItemAction::Set { id, flag } => {
            service.set_flag(id, flag)?;
            print_view(service, id, out)?;
        }
        ItemAction::Remove { id } => {
            let removed = registry.remove_item(id).context("removing item")?;
            writeln!(out, "{removed}")?;
        }
    }
    Ok(())
}

/// Deliver a catalog event the way a host does: failures are logged and the
/// catalog operation carries on.
fn notify(service: &Service, event: &CatalogEvent) {
    tracing::debug!(
        event = event.event_type(),
        item_id = %event.item_id(),
        occurred_at = %event.occurred_at(),
        "delivering catalog event"
    );
    if let Err(e) = service.deliver(event) {
        tracing::error!(
            event = event.event_type(),
            item_id = %event.item_id(),
            occurred_at = %event.occurred_at(),
            error = %e,
            "POS flag initialization failed"
        );
    }
}

fn view(service: &Service, id: ItemId) -> Option<ItemView> {
    let flag = service.flag(id)?;
    Some(ItemView {
        id,
        flag,
        allowed: service.is_allowed(id),
    })
}

fn print_view<W: Write>(service: &Service, id: ItemId, out: &mut W) -> anyhow::Result<()> {
    let view = view(service, id).ok_or_else(|| anyhow::anyhow!("item not found: {id}"))?;
    writeln!(out, "{}", serde_json::to_string(&view)?)?;
    Ok(())
}
