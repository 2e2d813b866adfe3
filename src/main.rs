use clap::{Args, Parser, Subcommand};
use eve_atlas::config::Config;
use eve_atlas::domain::{Galaxy, ItemKey, System};
use eve_atlas::logging;
use eve_atlas::progress::{ConsoleProgress, ProgressSink, Silent};
use eve_atlas::storage::SqliteStore;
use eve_atlas::Atlas;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "eve-atlas")]
#[command(about = "Read-only atlas over the EVE Online static data export")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search systems by case-insensitive name prefix
    Search {
        prefix: String,
        /// Emit matches as JSON instead of a text listing
        #[arg(long)]
        json: bool,
    },
    /// List every system in a galaxy
    Systems {
        #[arg(long)]
        galaxy: Galaxy,
        /// Report build progress and elapsed time
        #[arg(long)]
        verbose: bool,
    },
    /// List the regions of a galaxy
    Regions {
        #[arg(long)]
        galaxy: Galaxy,
    },
    /// Show a single system by id
    System { pk: i64 },
    /// Look up a single item by id or name
    Item {
        #[command(flatten)]
        key: KeyArgs,
        /// Emit the item as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the items of a group
    GroupItems {
        #[command(flatten)]
        key: KeyArgs,
    },
    /// List the items of a category
    CategoryItems {
        #[command(flatten)]
        key: KeyArgs,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeyArgs {
    /// Numeric id of the target
    #[arg(long)]
    id: Option<i64>,
    /// Name of the target (case-insensitive)
    #[arg(long)]
    name: Option<String>,
}

impl From<KeyArgs> for ItemKey {
    fn from(args: KeyArgs) -> Self {
        match (args.id, args.name) {
            (Some(id), _) => ItemKey::ById(id),
            (_, Some(name)) => ItemKey::ByName(name),
            _ => unreachable!("clap enforces exactly one of --id/--name"),
        }
    }
}

fn print_system(system: &System) {
    println!(
        "   {} [{}]  sec {:.1}  {} / {}",
        system.name,
        system.pk,
        system.security,
        system.constellation.name,
        system.constellation.region.name
    );
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;
    let db_path = config.database_path();
    info!(db = %db_path.display(), "opening static data export");

    let atlas = Atlas::new(Arc::new(SqliteStore::new(&db_path)));

    match cli.command {
        Commands::Search { prefix, json } => {
            let systems = atlas.search_systems(&prefix)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&systems)?);
            } else {
                println!("🔍 {} system(s) matching '{}':", systems.len(), prefix);
                for system in &systems {
                    print_system(system);
                }
            }
        }
        Commands::Systems { galaxy, verbose } => {
            let mut console = ConsoleProgress::new();
            let mut silent = Silent;
            let progress: &mut dyn ProgressSink = if verbose { &mut console } else { &mut silent };
            let systems = atlas.list_systems(galaxy, progress)?;
            for system in &systems {
                print_system(system);
            }
            println!("📊 {} systems in {}", systems.len(), galaxy);
        }
        Commands::Regions { galaxy } => {
            let regions = atlas.list_regions(galaxy)?;
            for region in &regions {
                println!("   {} [{}]", region.name, region.pk);
            }
            println!("📊 {} regions in {}", regions.len(), galaxy);
        }
        Commands::System { pk } => {
            let system = atlas.get_system(pk)?;
            print_system(&system);
            println!(
                "   at ({:.3e}, {:.3e}, {:.3e}), {} stargate(s)",
                system.x,
                system.y,
                system.z,
                system.stargates.len()
            );
        }
        Commands::Item { key, json } => {
            let item = atlas.get_item(&key.into())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&item)?);
            } else {
                println!(
                    "   {} [{}]  {} / {}",
                    item.name, item.pk, item.group.name, item.group.category.name
                );
                if !item.description.is_empty() {
                    println!("   {}", item.description);
                }
            }
        }
        Commands::GroupItems { key } => {
            let items = atlas.items_in_group(&key.into())?;
            for item in &items {
                println!("   {} [{}]", item.name, item.pk);
            }
            println!("📊 {} item(s)", items.len());
        }
        Commands::CategoryItems { key } => {
            let items = atlas.items_in_category(&key.into())?;
            for item in &items {
                println!("   {} [{}]", item.name, item.pk);
            }
            println!("📊 {} item(s)", items.len());
        }
    }

    Ok(())
}
