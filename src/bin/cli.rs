// src/bin/cli.rs
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pydocs_scrape::cli::run()
}
