//! CSV export of a farmer's listings.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::domain::Product;

/// Default filename for dashboard exports, written to the working directory.
pub const EXPORT_FILENAME: &str = "kissankart_harvests.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub struct HarvestExporter;

impl HarvestExporter {
    /// Writes the given listings as CSV. Media URLs are joined with `;`
    /// so each listing stays on one row.
    pub fn export(products: &[Product], path: &Path) -> Result<(), ExportError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "id",
            "name",
            "category",
            "unit",
            "base_price",
            "consumer_price",
            "stock",
            "posted_media",
        ])?;
        for product in products {
            let base_price = product.base_price.to_string();
            let consumer_price = product.consumer_price.to_string();
            let category = product.category.to_string();
            let stock = product.stock_status.to_string();
            let media = product.media.join(";");
            writer.write_record([
                product.id.0.as_str(),
                product.name.as_str(),
                category.as_str(),
                product.unit.as_str(),
                base_price.as_str(),
                consumer_price.as_str(),
                stock.as_str(),
                media.as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}
