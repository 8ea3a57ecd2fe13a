//! Import and export records

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::CatalogService;
use crate::storage::Collection;
use crate::utils::csv_handler;

pub async fn import_records(
    catalog: &CatalogService,
    file_path: &str,
    collection: Collection,
) -> Result<(), CliError> {
    let text = tokio::fs::read_to_string(file_path).await.map_err(|e| {
        CliError::CommandError(format!("Failed to read import file '{}': {}", file_path, e))
    })?;

    if text.trim().is_empty() {
        return Err(CliError::ParseError(format!(
            "Import file '{}' is empty",
            file_path
        )));
    }

    let summary = catalog.import_csv(collection, &text).await?;

    println!(
        "{} Imported {} records into {} ({} skipped)",
        "✓".bold().green(),
        summary.imported.to_string().green(),
        collection.to_string().cyan(),
        summary.skipped.to_string().yellow()
    );

    Ok(())
}

pub async fn export_records(
    catalog: &CatalogService,
    collection: Collection,
    file_path: Option<String>,
) -> Result<(), CliError> {
    let csv = catalog.export_csv(collection).await?;
    let output_path = file_path.unwrap_or_else(|| csv_handler::generate_export_filename(collection));

    tokio::fs::write(&output_path, csv).await.map_err(|e| {
        CliError::CommandError(format!(
            "Failed to write export file '{}': {}",
            output_path, e
        ))
    })?;

    println!(
        "{} Exported {} to: {}",
        "✓".bold().green(),
        collection.to_string().green(),
        output_path.cyan()
    );

    Ok(())
}
