use anyhow::{Context, Result};
use clap::Parser;
use polyglot::ui::cli::{Cli, Commands};
use polyglot::{open_in_viewer, Catalog, Config, Record};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(cli.base_dir.clone()).context("Failed to resolve storage root")?;
    let catalog = Catalog::new(config);

    match cli.command {
        Commands::Init => handle_init(&catalog),
        Commands::Save {
            image,
            text,
            text_file,
            out,
            name,
        } => handle_save(&catalog, &image, text, text_file, out, name),
        Commands::Check { path } => handle_check(&catalog, &path),
        Commands::Search { query } => handle_search(&catalog, &query),
        Commands::List => handle_list(&catalog),
        Commands::Delete { path } => handle_delete(&catalog, &path),
        Commands::Rebuild => handle_rebuild(&catalog),
        Commands::Open { path } => handle_open(&path),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_init(catalog: &Catalog) -> Result<()> {
    let config = catalog.config();
    let already = config.is_initialized();

    catalog.ensure_storage().context("Failed to initialize storage")?;

    if already {
        println!("polyglot is already initialized at: {}", config.base_dir.display());
    } else {
        println!("✓ Created storage root: {}", config.base_dir.display());
        println!("✓ Created index: {}", config.index_path.display());
    }
    Ok(())
}

fn handle_save(
    catalog: &Catalog,
    image: &Path,
    text: Option<String>,
    text_file: Option<PathBuf>,
    out: Option<PathBuf>,
    name: Option<String>,
) -> Result<()> {
    let text = match (text, text_file) {
        (Some(text), _) => text,
        (None, Some(file)) => std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read note from {}", file.display()))?,
        (None, None) => String::new(),
    };

    let name = match name {
        Some(name) => name,
        None => image
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .with_context(|| format!("Cannot derive a pair name from {}", image.display()))?,
    };

    let out = out.unwrap_or_else(|| catalog.config().base_dir.clone());

    let saved = catalog
        .save_pair(image, &text, &out, &name)
        .with_context(|| format!("Failed to save pair '{}'", name))?;

    println!("Created:");
    println!("  {}", saved.image.display());
    println!("  {}", saved.text.display());
    Ok(())
}

fn handle_check(catalog: &Catalog, path: &Path) -> Result<()> {
    match catalog.inspect_pair(path) {
        Some(view) => {
            println!("✓ Pair found");
            println!("  Image: {}", view.image.display());
            println!("  Text:  {}", view.text_path.display());
            println!();
            match view.text {
                Some(text) => println!("{}", text),
                None => println!("(Error reading text)"),
            }
        }
        None => {
            println!("✗ Not a pair: matching .jpg or .jpg.txt not found for {}", path.display());
        }
    }
    Ok(())
}

fn handle_search(catalog: &Catalog, query: &str) -> Result<()> {
    let results = catalog.search(query).context("Search failed")?;

    if results.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} results:", results.len());
    print_records(&results);
    Ok(())
}

fn handle_list(catalog: &Catalog) -> Result<()> {
    let records = catalog.list_valid().context("Failed to load index")?;

    if records.is_empty() {
        println!("No pairs indexed.");
        return Ok(());
    }

    println!("{} pairs:", records.len());
    print_records(&records);
    Ok(())
}

fn handle_delete(catalog: &Catalog, path: &Path) -> Result<()> {
    let deleted = catalog
        .delete_pair(path)
        .with_context(|| format!("Failed to delete pair for {}", path.display()))?;

    if deleted.is_empty() {
        println!("Nothing deleted: {} is not part of a pair.", path.display());
    } else {
        for name in &deleted {
            println!("  ✗ Deleted {}", name);
        }
    }
    Ok(())
}

fn handle_rebuild(catalog: &Catalog) -> Result<()> {
    let records = catalog.rebuild().context("Failed to rebuild index")?;

    println!("Index rebuilt: {} pairs", records.len());
    print_records(&records);
    Ok(())
}

fn handle_open(path: &Path) -> Result<()> {
    if !open_in_viewer(path) {
        eprintln!("⚠ Warning: could not open {} in a viewer", path.display());
    }
    Ok(())
}

fn print_records(records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        println!("\n{}. {}", i + 1, record.id);
        println!("   Image: {}", record.image.display());
        println!("   Text:  {}", record.text.display());
    }
}
