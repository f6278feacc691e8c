use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use plist::Value;
use recents_history::{Catalog, Product};
use std::fs;
use std::path::PathBuf;

mod template;

/// Assemble the distributable workflow bundle: one Script Filter per
/// configured product, templated onto the static workflow graph.
#[derive(Parser)]
#[command(name = "recents-bundler")]
#[command(about = "Build the launcher workflow bundle", long_about = None)]
struct Cli {
    /// Version stamped into the bundle
    version: String,

    /// Product catalog file
    #[arg(long, default_value = "products.json")]
    catalog: PathBuf,

    /// Workflow graph template
    #[arg(long, default_value = "alfred/template.plist")]
    template: PathBuf,

    /// Readme inlined into the bundle
    #[arg(long, default_value = "README.md")]
    readme: PathBuf,

    /// Directory holding one <keyword>.png per product
    #[arg(long, default_value = "icons")]
    icons: PathBuf,

    /// Output directory
    #[arg(long, default_value = "out")]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let catalog = Catalog::load(&cli.catalog)?;
    let products: Vec<&Product> = catalog.products().collect();

    let mut document = Value::from_file(&cli.template)
        .with_context(|| format!("can't read template {}", cli.template.display()))?;
    let root = document
        .as_dictionary_mut()
        .context("template root is not a dictionary")?;

    let readme = fs::read_to_string(&cli.readme)
        .with_context(|| format!("can't read {}", cli.readme.display()))?;

    template::inject_products(root, &products, &cli.version, &readme)?;

    fs::create_dir_all(&cli.out)?;
    let info_plist = cli.out.join("info.plist");
    document
        .to_file_xml(&info_plist)
        .with_context(|| format!("can't write {}", info_plist.display()))?;

    copy_icons(&cli, &products);

    info!(
        "built workflow bundle for {} products into {}",
        products.len(),
        cli.out.display()
    );
    Ok(())
}

/// Icons land next to info.plist under the node uid, which is how the
/// launcher resolves per-object icons. Missing icons only cost the product
/// its picture.
fn copy_icons(cli: &Cli, products: &[&Product]) {
    for product in products {
        let Some(uid) = product.uid.as_deref() else {
            continue;
        };
        let source = cli.icons.join(format!("{}.png", product.keyword));
        let target = cli.out.join(format!("{uid}.png"));
        if let Err(err) = fs::copy(&source, &target) {
            warn!(
                "no icon for '{}' ({}): {err}",
                product.keyword,
                source.display()
            );
        }
    }
}
