//! Watchlist command-line entry point
//!
//! Natively this drives a directory-backed watchlist from the shell. The
//! browser build exposes `watchlist::web` instead and this binary is empty.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};

    use watchlist::consts::{DATA_DIR_ENV, DEFAULT_DATA_DIR};
    use watchlist::persistence::FileStorage;
    use watchlist::{ContentDescriptor, Item, Kind, KindFilter, SortOrder, Watchlist};

    #[derive(Parser)]
    #[command(author, version, about, long_about = None)]
    pub struct Cli {
        /// Directory holding the watchlist file
        #[arg(long, value_name = "DIR", env = DATA_DIR_ENV, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Save a title
        Add {
            id: String,
            /// movie or tv
            #[arg(long, value_parser = parse_kind)]
            kind: Kind,
            #[arg(long)]
            title: Option<String>,
            /// Fallback label when there is no title
            #[arg(long)]
            name: Option<String>,
            #[arg(long)]
            poster: Option<String>,
        },
        /// Drop a saved title
        Remove { id: String },
        /// Print saved titles
        List {
            /// all, movie or tv
            #[arg(long, default_value = "all", value_parser = parse_filter)]
            kind: KindFilter,
            /// newest, oldest or alphabetical
            #[arg(long, default_value = "newest", value_parser = parse_order)]
            sort: SortOrder,
            /// Print JSON instead of a table
            #[arg(long)]
            json: bool,
        },
        /// Print how many titles are saved
        Count,
        /// Check whether an id is saved
        Contains { id: String },
        /// Remove everything
        Clear,
    }

    fn parse_kind(s: &str) -> Result<Kind, String> {
        Kind::from_str(s).ok_or_else(|| format!("unknown kind '{s}' (expected movie or tv)"))
    }

    fn parse_filter(s: &str) -> Result<KindFilter, String> {
        KindFilter::from_str(s)
            .ok_or_else(|| format!("unknown kind '{s}' (expected all, movie or tv)"))
    }

    fn parse_order(s: &str) -> Result<SortOrder, String> {
        SortOrder::from_str(s)
            .ok_or_else(|| format!("unknown order '{s}' (expected newest, oldest or alphabetical)"))
    }

    pub fn run(cli: Cli) {
        let storage = FileStorage::new(cli.data_dir);
        log::debug!("Using data dir {}", storage.dir().display());
        let mut watchlist = Watchlist::open(storage);

        match cli.command {
            Commands::Add {
                id,
                kind,
                title,
                name,
                poster,
            } => {
                let descriptor = ContentDescriptor {
                    id,
                    media_type: Some(kind.as_str().to_string()),
                    title,
                    name,
                    poster_path: poster,
                };
                if watchlist.add(&descriptor, kind) {
                    println!("Added {} '{}'", kind, descriptor.label());
                } else {
                    println!("'{}' is already saved", descriptor.id);
                }
            }
            Commands::Remove { id } => {
                if watchlist.remove(&id) {
                    println!("Removed '{id}'");
                } else {
                    println!("'{id}' is not saved");
                }
            }
            Commands::List { kind, sort, json } => {
                let items = watchlist.view(kind, sort);
                if json {
                    match serde_json::to_string_pretty(&items) {
                        Ok(out) => println!("{out}"),
                        Err(e) => log::error!("Failed to encode items: {}", e),
                    }
                } else {
                    print_table(&items);
                }
            }
            Commands::Count => println!("{}", watchlist.count()),
            Commands::Contains { id } => println!("{}", watchlist.contains(&id)),
            Commands::Clear => {
                let n = watchlist.count();
                watchlist.clear_all();
                println!("Cleared {n} items");
            }
        }
    }

    fn print_table(items: &[Item]) {
        if items.is_empty() {
            println!("(empty)");
            return;
        }
        for item in items {
            println!(
                "{:<12} {:<6} {:>14}  {}",
                item.id, item.kind, item.added_at, item.label
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    cli::run(cli::Cli::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is watchlist::web::start, this is just to satisfy the compiler
}
