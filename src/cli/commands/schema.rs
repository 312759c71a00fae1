use folio::core::catalog::CatalogDocument;

pub fn run() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(CatalogDocument);
    serde_json::to_writer_pretty(std::io::stdout(), &schema)?;
    println!();
    Ok(())
}
