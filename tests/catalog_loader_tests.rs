use std::io::Write;

use rust_decimal::Decimal;
use tempfile::{tempdir, NamedTempFile};

use online_store::services::catalog_service::{load_catalog, CatalogError};

fn catalog_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_well_formed_file() {
    let file = catalog_file(
        "A17|Wireless Mouse|19.99\n\
         K09|Mechanical Keyboard|89.00\n\
         M21|27in Monitor|249.95\n",
    );

    let load = load_catalog(file.path());

    assert!(!load.has_issues());
    assert_eq!(load.catalog.len(), 3);

    let products = load.catalog.products();
    assert_eq!(products[0].id, "A17");
    assert_eq!(products[0].name, "Wireless Mouse");
    assert_eq!(products[0].price, Decimal::new(1999, 2));
    assert_eq!(products[2].id, "M21");
    assert_eq!(products[2].price, Decimal::new(24995, 2));
}

#[test]
fn test_missing_file_gives_empty_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("products.csv");

    let load = load_catalog(&path);

    assert!(load.catalog.is_empty());
    assert!(load.is_missing());
    assert_eq!(load.issues.len(), 1);
    assert!(matches!(
        &load.issues[0],
        CatalogError::NotFound { path: missing } if missing == &path
    ));
}

#[test]
fn test_corrupt_lines_do_not_stop_the_load() {
    let file = catalog_file(
        "A17|Wireless Mouse|19.99\n\
         K09|Mechanical Keyboard\n\
         M21|27in Monitor|two hundred\n\
         H04|Headset|59.90\n",
    );

    let load = load_catalog(file.path());

    let ids: Vec<&str> = load.catalog.products().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["A17", "H04"]);
    assert_eq!(load.issues.len(), 2);
    assert!(matches!(load.issues[0], CatalogError::CorruptLine { line: 2, .. }));
    assert!(matches!(load.issues[1], CatalogError::InvalidPrice { line: 3, .. }));
    assert!(!load.is_missing());
}

#[test]
fn test_lookup_any_case_after_load() {
    let file = catalog_file("a17|Wireless Mouse|19.99\nB02|USB Hub|24.50\n");

    let load = load_catalog(file.path());

    for product in load.catalog.products() {
        let upper = product.id.to_uppercase();
        let lower = product.id.to_lowercase();
        assert_eq!(load.catalog.find(&upper).unwrap().id, product.id);
        assert_eq!(load.catalog.find(&lower).unwrap().id, product.id);
    }
    assert!(load.catalog.find("Z99").is_none());
}
