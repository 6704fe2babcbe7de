use clap::{Parser, Subcommand};

use mealo_client::types::NewCartItem;
use mealo_client::workflow::Unlocated;
use mealo_client::PlatformClient;

#[derive(Debug, Parser)]
#[command(name = "mealo-cli")]
#[command(about = "Drive the Mealo workflow from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve an address and print the session cookie jar.
    Locate {
        #[arg(long)]
        address: String,
    },
    /// Resolve an address, then search for stores and dishes.
    Search {
        #[arg(long)]
        address: String,
        query: String,
    },
    /// Fetch a store's menu. No session needed.
    Menu { store_id: String },
    /// Resolve an address, open a cart with one item, and price it.
    Order {
        #[arg(long)]
        address: String,
        #[arg(long)]
        store_id: String,
        #[arg(long)]
        item_id: String,
        #[arg(long)]
        section_id: String,
        #[arg(long)]
        subsection_id: String,
        #[arg(long)]
        price_cents: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = mealo_core::load_app_config_from_env()?;
    let client = PlatformClient::from_config(&config)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Locate { address } => {
            let located = Unlocated::new().locate(&client, &address).await?;
            println!("{}", serde_json::to_string_pretty(located.jar())?);
        }
        Commands::Search { address, query } => {
            let located = Unlocated::new().locate(&client, &address).await?;
            let searched = located.search(&client, &query).await?;
            println!("{}", serde_json::to_string_pretty(searched.results())?);
        }
        Commands::Menu { store_id } => {
            let response = client.store_menu(&store_id).await?;
            println!("{}", serde_json::to_string_pretty(&response.data)?);
        }
        Commands::Order {
            address,
            store_id,
            item_id,
            section_id,
            subsection_id,
            price_cents,
            title,
            quantity,
        } => {
            let item = NewCartItem {
                catalog_item_id: item_id,
                store_id,
                section_id,
                subsection_id,
                unit_price_cents: price_cents,
                title,
                quantity,
                customizations: serde_json::Value::Null,
                image: None,
            };
            let located = Unlocated::new().locate(&client, &address).await?;
            let cart = located.create_cart(&client, &item).await?;
            tracing::info!(
                draft_order = %cart.order().draft_order_uuid,
                "cart created"
            );
            let priced = cart.compute_fee(&client).await?;
            println!("{}", serde_json::to_string_pretty(priced.fees())?);
        }
    }

    Ok(())
}
