use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::{
    catalog::Catalog,
    product::{Product, ProductError, StoreProductRequest},
};

const FIELDS_PER_LINE: usize = 3;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("File is not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Data error: line {line} is corrupt or incomplete ({fields} fields, expected 3)")]
    CorruptLine { line: u64, fields: usize },

    #[error("Data error: line {line} has a price that is not a number: '{value}'")]
    InvalidPrice { line: u64, value: String },

    #[error("Data error: line {line} is not a valid product: {message}")]
    InvalidProduct { line: u64, message: String },

    #[error("Data error: line {line} could not be decoded: {message}")]
    Malformed { line: u64, message: String },

    #[error("Duplicate id '{id}' on line {line}, the earlier entry is used for lookups")]
    DuplicateId { line: u64, id: String },

    #[error("An unexpected error occurred while reading the file: {0}")]
    Io(#[from] io::Error),
}

impl CatalogError {
    /// Warnings keep the line; everything else drops it (or stops the load).
    pub fn is_warning(&self) -> bool {
        matches!(self, CatalogError::DuplicateId { .. })
    }
}

/// Result of a load: whatever could be read, plus everything that went wrong.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub issues: Vec<CatalogError>,
}

impl CatalogLoad {
    pub fn is_missing(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| matches!(issue, CatalogError::NotFound { .. }))
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Reads a pipe-delimited `id|name|price` file. Never fails outright: a missing
/// file yields an empty catalog, bad lines are skipped and reported.
pub fn load_catalog(path: &Path) -> CatalogLoad {
    info!("Loading catalog from {}", path.display());

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!("Catalog file {} does not exist", path.display());
            return CatalogLoad {
                catalog: Catalog::default(),
                issues: vec![CatalogError::NotFound {
                    path: path.to_path_buf(),
                }],
            };
        }
        Err(e) => {
            error!("Failed to open catalog {}: {}", path.display(), e);
            return CatalogLoad {
                catalog: Catalog::default(),
                issues: vec![CatalogError::Io(e)],
            };
        }
    };

    load_from_reader(file)
}

pub fn load_from_reader<R: Read>(source: R) -> CatalogLoad {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut load = CatalogLoad::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                error!("Catalog read aborted: {}", e);
                if let csv::ErrorKind::Io(io_error) = e.into_kind() {
                    load.issues.push(CatalogError::Io(io_error));
                }
                break;
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                warn!("Skipping catalog line {}: {}", line, e);
                load.issues.push(CatalogError::Malformed {
                    line,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match parse_record(&record, line) {
            Ok(product) => {
                if load.catalog.contains(&product.id) {
                    let issue = CatalogError::DuplicateId {
                        line,
                        id: product.id.clone(),
                    };
                    warn!("{}", issue);
                    load.issues.push(issue);
                }
                debug!("Loaded product {} from line {}", product.id, line);
                load.catalog.push(product);
            }
            Err(issue) => {
                warn!("Skipping catalog line {}: {}", line, issue);
                load.issues.push(issue);
            }
        }
    }

    info!(
        "Catalog loaded: {} products, {} issues",
        load.catalog.len(),
        load.issues.len()
    );
    load
}

fn parse_record(record: &csv::StringRecord, line: u64) -> Result<Product, CatalogError> {
    if record.len() != FIELDS_PER_LINE {
        return Err(CatalogError::CorruptLine {
            line,
            fields: record.len(),
        });
    }

    let request: StoreProductRequest =
        record
            .deserialize(None)
            .map_err(|e: csv::Error| CatalogError::Malformed {
                line,
                message: e.to_string(),
            })?;

    Product::new(request).map_err(|e| match e {
        ProductError::InvalidPrice { value } => CatalogError::InvalidPrice { line, value },
        other => CatalogError::InvalidProduct {
            line,
            message: other.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_loads_lines_in_file_order() {
        let data = "A17|Wireless Mouse|19.99\nB02|USB Hub|24.50\nC33|Laptop Stand|35\n";
        let load = load_from_reader(data.as_bytes());

        assert!(!load.has_issues());
        let ids: Vec<&str> = load.catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["A17", "B02", "C33"]);

        let mouse = &load.catalog.products()[0];
        assert_eq!(mouse.name, "Wireless Mouse");
        assert_eq!(mouse.price, Decimal::new(1999, 2));
    }

    #[test]
    fn test_corrupt_line_is_skipped() {
        let data = "A17|Wireless Mouse|19.99\nbroken line\nB02|USB Hub|24.50|extra\nC33|Laptop Stand|35.00\n";
        let load = load_from_reader(data.as_bytes());

        assert_eq!(load.catalog.len(), 2);
        assert!(load.catalog.contains("C33"));
        assert_eq!(load.issues.len(), 2);
        assert!(matches!(load.issues[0], CatalogError::CorruptLine { line: 2, fields: 1 }));
        assert!(matches!(load.issues[1], CatalogError::CorruptLine { line: 3, fields: 4 }));
    }

    #[test]
    fn test_non_numeric_price_is_reported() {
        let load = load_from_reader("A17|Wireless Mouse|cheap\n".as_bytes());

        assert!(load.catalog.is_empty());
        assert!(matches!(
            &load.issues[0],
            CatalogError::InvalidPrice { line: 1, value } if value == "cheap"
        ));
    }

    #[test]
    fn test_negative_price_and_empty_name_are_invalid() {
        let load = load_from_reader("A17|Wireless Mouse|-5\nB02||3.00\n".as_bytes());

        assert!(load.catalog.is_empty());
        assert_eq!(load.issues.len(), 2);
        assert!(load
            .issues
            .iter()
            .all(|issue| matches!(issue, CatalogError::InvalidProduct { .. })));
    }

    #[test]
    fn test_duplicate_id_is_kept_with_warning() {
        let load = load_from_reader("A17|Wireless Mouse|19.99\na17|Other Mouse|9.99\n".as_bytes());

        assert_eq!(load.catalog.len(), 2);
        assert_eq!(load.catalog.find("A17").unwrap().name, "Wireless Mouse");
        assert_eq!(load.issues.len(), 1);
        assert!(load.issues[0].is_warning());
    }

    #[test]
    fn test_fields_are_trimmed() {
        let load = load_from_reader(" A17 | Wireless Mouse | 19.99 \n".as_bytes());

        let mouse = load.catalog.find("a17").unwrap();
        assert_eq!(mouse.id, "A17");
        assert_eq!(mouse.name, "Wireless Mouse");
    }
}
