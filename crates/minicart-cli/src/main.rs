use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use minicart_core::config::ATTR_ID;
use minicart_core::system::{Document, NodeId};
use minicart_core::{format_price, CartWidget, LineItem, Page, WidgetConfig};
use minicart_host_html::{parse_document, to_html, FilePersistence};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minicart", about = "Client-side shopping cart widget host")]
struct Cli {
    /// Storage file standing in for browser local storage.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Widget config (JSON). Defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a page, run the widget on it and print the resulting HTML.
    Open {
        /// HTML page to load.
        page: PathBuf,

        /// Address path used to pick the page view (defaults to `/<file name>`).
        #[arg(long)]
        path: Option<String>,

        /// Page view to run: product, cart or other. Overrides --path.
        #[arg(long)]
        view: Option<Page>,

        /// Controls to activate after loading, in order: `add:ID` or `remove:ID`.
        #[arg(long = "click")]
        clicks: Vec<Click>,

        /// Write the HTML here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the cart lines and total.
    List,
    /// Append a line to the cart.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
    },
    /// Remove the first line with the given id.
    Remove { id: String },
    /// Delete the stored cart.
    Clear,
}

/// A control activation requested on the command line.
#[derive(Debug, Clone, PartialEq)]
enum Click {
    Add(String),
    Remove(String),
}

impl FromStr for Click {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("add", id)) if !id.is_empty() => Ok(Click::Add(id.to_string())),
            Some(("remove", id)) if !id.is_empty() => Ok(Click::Remove(id.to_string())),
            _ => Err(format!("expected add:ID or remove:ID, got {s:?}")),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => WidgetConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => WidgetConfig::default(),
    };
    let store_path = match cli.store {
        Some(path) => path,
        None => FilePersistence::default_path()
            .context("no data directory on this platform; pass --store")?,
    };
    let mut widget = CartWidget::new(FilePersistence::new(store_path), config);

    match cli.command {
        Command::Open {
            page,
            path,
            view,
            clicks,
            output,
        } => {
            let html = open_page(&mut widget, &page, path.as_deref(), view, &clicks)?;
            match output {
                Some(out) => fs::write(&out, html)
                    .with_context(|| format!("failed to write {}", out.display()))?,
                None => print!("{html}"),
            }
        }
        Command::List => {
            let cart = widget.cart()?;
            if cart.is_empty() {
                println!("{}", widget.config().empty_message);
            }
            for line in &cart {
                println!("{}\t{}\t{}", line.id, line.name, format_price(line.price));
            }
            println!("total\t{}", format_price(cart.total()));
        }
        Command::Add { id, name, price } => {
            if !price.is_finite() || price < 0.0 {
                bail!("price must be a non-negative number, got {price}");
            }
            let cart = widget.cart()?.add_line(LineItem::new(id, name, price));
            widget.store_mut().save(&cart)?;
            println!("{} line(s) in cart", cart.len());
        }
        Command::Remove { id } => {
            let cart = widget.cart()?.remove_first_matching(&id);
            widget.store_mut().save(&cart)?;
            println!("{} line(s) in cart", cart.len());
        }
        Command::Clear => {
            widget.store_mut().clear()?;
            println!("cart cleared");
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve which view a page gets: explicit `--view`, else the address path.
fn resolve_page(file: &Path, path: Option<&str>, view: Option<Page>, config: &WidgetConfig) -> Page {
    if let Some(view) = view {
        return view;
    }
    let path = match path {
        Some(p) => p.to_string(),
        None => format!(
            "/{}",
            file.file_name().unwrap_or_default().to_string_lossy()
        ),
    };
    Page::from_path(&path, &config.routing)
}

fn open_page(
    widget: &mut CartWidget<FilePersistence>,
    file: &Path,
    path: Option<&str>,
    view: Option<Page>,
    clicks: &[Click],
) -> Result<String> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let mut doc = parse_document(&source);
    let page = resolve_page(file, path, view, widget.config());
    info!(file = %file.display(), %page, "opening page");
    widget.boot(&mut doc, page)?;

    for click in clicks {
        let Some(node) = find_control(&doc, widget.config(), click) else {
            bail!("no control on the page for {click:?}");
        };
        if !widget.activate(&mut doc, node)? {
            info!(?click, "control is inactive, ignoring");
        }
    }
    Ok(to_html(&doc))
}

/// First control matching a click: add controls are found through their
/// product container, remove controls through their own id attribute.
fn find_control(doc: &Document, config: &WidgetConfig, click: &Click) -> Option<NodeId> {
    use minicart_core::system::Dom;

    match click {
        Click::Add(id) => doc
            .elements_by_class(&config.add_class)
            .into_iter()
            .find(|&control| {
                doc.closest(control, &config.product_class)
                    .and_then(|container| doc.attribute(container, ATTR_ID))
                    .as_deref()
                    == Some(id.as_str())
            }),
        Click::Remove(id) => doc.find_by_class_and_attr(&config.remove_class, ATTR_ID, id),
    }
}
