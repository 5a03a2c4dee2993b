mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use omnibus::{catalog::Catalog, config, import};
use omnibus_common::{EntityDescriptor, EntityKind, FieldValue, Representation};
use omnibus_db::pool::init_pool;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load_config_or_default(cli.config.as_deref())?;

    // Respect RUST_LOG if set, otherwise the config filter (or verbose mode).
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "omnibus=debug,omnibus_db=debug,omnibus_common=debug".to_string()
        } else {
            config.log.filter.clone()
        }
    });
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = init_pool(&config.database.path)?;
    let catalog = Catalog::new(pool);

    match cli.command {
        Commands::List { kind } => {
            let kind = parse_kind(&kind)?;
            print_json(&catalog.list(kind)?)?;
        }
        Commands::Get { kind, title } => {
            let kind = parse_kind(&kind)?;
            print_json(&catalog.get(kind, &title)?)?;
        }
        Commands::Create {
            kind,
            title,
            fields,
        } => {
            let kind = parse_kind(&kind)?;
            let fields = parse_fields(kind, &fields)?;
            print_json(&catalog.create(kind, &title, &fields)?)?;
        }
        Commands::Update {
            kind,
            title,
            fields,
        } => {
            let kind = parse_kind(&kind)?;
            let fields = parse_fields(kind, &fields)?;
            print_json(&catalog.update(kind, &title, &fields)?)?;
        }
        Commands::Delete { kind, title } => {
            let kind = parse_kind(&kind)?;
            catalog.delete(kind, &title)?;
            println!("Deleted {} '{}'", kind, title);
        }
        Commands::Search { kind, term } => {
            let kind = parse_kind(&kind)?;
            print_json(&catalog.search(kind, &term)?)?;
        }
        Commands::Import { file } => {
            let summary = import::import_file(&catalog, &file)?;
            println!(
                "Imported {} entries ({} skipped)",
                summary.created, summary.skipped
            );
        }
        Commands::Count => {
            for kind in EntityKind::ALL {
                println!("{}: {}", kind, catalog.count(kind)?);
            }
        }
    }

    Ok(())
}

fn parse_kind(raw: &str) -> Result<EntityKind> {
    raw.parse().map_err(|e: String| anyhow::anyhow!(e))
}

/// Parse `name=value` field arguments, splitting values of list fields on
/// commas. Unknown field names pass through as scalars and are rejected by
/// the schema with a proper validation error.
fn parse_fields(kind: EntityKind, raw: &[String]) -> Result<Representation> {
    let descriptor = EntityDescriptor::for_kind(kind);
    let mut fields = Representation::new();

    for arg in raw {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Field argument '{}' is not name=value", arg))?;

        let multi = descriptor
            .field(name)
            .map(|spec| spec.multi)
            .unwrap_or(false);
        let value = if multi {
            FieldValue::List(
                value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect(),
            )
        } else {
            FieldValue::text(value)
        };

        fields.insert(name.to_string(), value);
    }

    Ok(fields)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
