use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use catalogo::config::{get_settings, Settings};
use catalogo::contact::{product_mailto_url, product_whatsapp_url, ContactForm};
use catalogo::mock_data;
use catalogo::view::{render_detail, render_text};
use catalogo::viewer::ProductViewer;
use catalogo::{Catalog, CatalogQuery};

#[derive(Parser)]
#[command(name = "catalogo", version, about = "Catálogo de maquinaria pesada")]
struct Cli {
    /// Settings file (defaults to ./appsettings.* when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog JSON document, overrides `catalog.data_path`
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a page of the catalog
    List(ListArgs),
    /// Show one product with its contact links
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Build the WhatsApp link for the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Print the bundled sample catalog document
    Sample,
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, short)]
    search: Option<String>,
    #[arg(long = "categoria")]
    categories: Vec<String>,
    #[arg(long = "marca")]
    brands: Vec<String>,
    #[arg(long = "tipo")]
    types: Vec<String>,
    #[arg(long = "estado")]
    conditions: Vec<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// precio-asc, precio-desc, año-asc, año-desc, nombre or fecha
    #[arg(long, default_value = "fecha")]
    sort: String,
    #[arg(long, default_value_t = 1)]
    page: usize,
    #[arg(long)]
    page_size: Option<usize>,
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn into_query(self) -> (CatalogQuery, bool) {
        let query = CatalogQuery {
            search_term: self.search,
            categories: self.categories,
            brands: self.brands,
            types: self.types,
            conditions: self.conditions,
            min_price: self.min_price,
            max_price: self.max_price,
            sort_by: Some(self.sort),
            page_size: self.page_size,
            page: Some(self.page),
        };
        (query, self.json)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut settings_error = None;
    let settings = match &cli.config {
        Some(path) => Settings::load_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => get_settings().cloned().unwrap_or_else(|err| {
            settings_error = Some(err);
            Settings::default()
        }),
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.logging.level.as_str()),
    )
    .init();
    if let Some(err) = settings_error {
        log::warn!("failed to load settings, using defaults: {}", err);
    }

    let data_path = cli
        .data
        .clone()
        .unwrap_or_else(|| settings.catalog.data_path.clone());

    match cli.command {
        Command::List(args) => {
            let (query, json) = args.into_query();
            if let Some(size) = query.page_size {
                if !settings.catalog.is_page_size_allowed(size) {
                    bail!(
                        "page size {} is not one of {:?}",
                        size,
                        settings.catalog.page_size_options
                    );
                }
            }

            let mut catalog = Catalog::new(settings.catalog.options());
            let loaded = catalog.load(&data_path).await.is_ok();
            query.apply(&mut catalog);

            let view = catalog.view();
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print!("{}", render_text(&view));
            }
            if !loaded {
                std::process::exit(1);
            }
        }
        Command::Show { id, json } => {
            let mut catalog = Catalog::new(settings.catalog.options());
            if let Err(err) = catalog.load(&data_path).await {
                eprintln!("{}", err.user_message());
                std::process::exit(1);
            }

            let mut viewer = ProductViewer::new();
            viewer.open_by_id(&catalog, id);
            let Some(product) = viewer.product() else {
                bail!("Producto {} no encontrado", id);
            };

            if json {
                println!("{}", serde_json::to_string_pretty(product)?);
                return Ok(());
            }

            print!("{}", render_detail(product));
            let thumbnails = viewer.thumbnails();
            if !thumbnails.is_empty() {
                println!();
                println!("Imágenes:");
                for (index, image, current) in thumbnails {
                    let marker = if current { '*' } else { ' ' };
                    println!(" {} {}. {}", marker, index + 1, image);
                }
            }
            println!();
            println!("WhatsApp: {}", product_whatsapp_url(product, &settings.contact));
            println!("Email:    {}", product_mailto_url(product, &settings.contact));
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                message,
            };
            let url = form.whatsapp_url(&settings.contact)?;
            println!("{}", url);
        }
        Command::Sample => {
            println!("{}", serde_json::to_string_pretty(&mock_data::init_mock_data())?);
        }
    }

    Ok(())
}
