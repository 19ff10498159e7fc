use std::io::Cursor;

use rust_decimal::Decimal;

use online_store::cli::commands::{SessionOutcome, StoreApp};
use online_store::cli::console::LineConsole;
use online_store::services::catalog_service::load_from_reader;
use online_store::utils::formatting::ListingOrder;

const CATALOG: &str = "A17|Wireless Mouse|19.99\nB02|USB Hub|24.50\nC33|Laptop Stand|35.00\n";

type ScriptedApp = StoreApp<LineConsole<Cursor<String>, Vec<u8>>>;

fn scripted_app(script: &str, order: ListingOrder) -> ScriptedApp {
    let catalog = load_from_reader(CATALOG.as_bytes()).catalog;
    let console = LineConsole::new(Cursor::new(script.to_string()), Vec::new());
    StoreApp::new(console, catalog, order)
}

fn output_of(app: ScriptedApp) -> String {
    String::from_utf8(app.into_console().into_output()).expect("Output is not UTF-8")
}

#[test]
fn test_adding_same_product_twice_totals_both() {
    let mut app = scripted_app("1\nA17\na17\nno\n2\nx\n3\n", ListingOrder::Insertion);

    assert_eq!(app.run(), SessionOutcome::Exited);
    assert_eq!(app.cart().len(), 2);
    assert_eq!(app.cart().total().unwrap(), Decimal::new(3998, 2));

    let output = output_of(app);
    assert_eq!(output.matches("Wireless Mouse has been added to cart.").count(), 2);
    assert!(output.contains("Your total is: $39.98"));
}

#[test]
fn test_unknown_id_is_reported() {
    let mut app = scripted_app("1\nZ99\nNO\n3\n", ListingOrder::Insertion);

    app.run();
    assert!(app.cart().is_empty());
    assert!(output_of(app).contains("Sorry! Id is not found. Please try again."));
}

#[test]
fn test_menu_rejects_bad_input() {
    let mut app = scripted_app("abc\n7\n3\n", ListingOrder::Insertion);

    assert_eq!(app.run(), SessionOutcome::Exited);
    let output = output_of(app);
    assert!(output.contains("Please enter 1, 2, or 3."));
    assert!(output.contains("Invalid choice!"));
    assert_eq!(output.matches("Your choice:").count(), 3);
}

#[test]
fn test_catalog_listing_shows_every_product() {
    let mut app = scripted_app("1\nno\n3\n", ListingOrder::Insertion);

    app.run();
    let output = output_of(app);
    let mouse = output.find("Wireless Mouse").unwrap();
    let hub = output.find("USB Hub").unwrap();
    let stand = output.find("Laptop Stand").unwrap();
    assert!(mouse < hub && hub < stand);
}

#[test]
fn test_completed_checkout_empties_cart() {
    let script = "1\nA17\nB02\nno\n2\nc\nyes\ncash\n50\n2\nx\n3\n";
    let mut app = scripted_app(script, ListingOrder::Insertion);

    assert_eq!(app.run(), SessionOutcome::Exited);
    assert!(app.cart().is_empty());

    let output = output_of(app);
    assert!(output.contains("Your total is: $44.49"));
    assert!(output.contains("Your change is: $5.51"));
    assert!(output.contains("Your receipt:"));
    assert!(output.contains("Your cart is empty."));
    assert!(output.contains("Your total is: $0.00"));
}

#[test]
fn test_declined_checkout_keeps_cart() {
    let script = "1\nC33\nno\n2\nC\nno\n3\n";
    let mut app = scripted_app(script, ListingOrder::Insertion);

    app.run();
    assert_eq!(app.cart().len(), 1);
    assert_eq!(app.cart().items()[0].id, "C33");
    assert_eq!(app.cart().total().unwrap(), Decimal::new(3500, 2));
}

#[test]
fn test_cart_view_rejects_other_options() {
    let mut app = scripted_app("2\nq\nx\n3\n", ListingOrder::Insertion);

    app.run();
    assert!(output_of(app).contains("Invalid input, please try again"));
}

#[test]
fn test_legacy_order_hides_first_row_but_charges_everything() {
    let script = "1\nA17\nB02\nno\n2\nc\nyes\ncash\n44.49\n3\n";
    let mut app = scripted_app(script, ListingOrder::Legacy);

    assert_eq!(app.run(), SessionOutcome::Exited);
    assert!(app.cart().is_empty());

    let output = output_of(app);
    // only the "added" line and the checkout summary mention it; no table row does
    assert_eq!(output.matches("Wireless Mouse").count(), 2);
    assert!(output.contains("Your total is: $44.49"));
    assert!(output.contains("Thank you for the exact amount"));
}

#[test]
fn test_input_ending_mid_browse_ends_session() {
    let mut app = scripted_app("1\nA17\n", ListingOrder::Insertion);

    assert_eq!(app.run(), SessionOutcome::InputClosed);
    assert_eq!(app.cart().len(), 1);
}

#[test]
fn test_unrepresentable_total_is_reported_not_fatal() {
    let catalog = load_from_reader("X1|Yacht|50000000000000000000000000000\n".as_bytes()).catalog;
    let console = LineConsole::new(Cursor::new("1\nX1\nX1\nno\n2\nx\n3\n".to_string()), Vec::new());
    let mut app = StoreApp::new(console, catalog, ListingOrder::Insertion);

    assert_eq!(app.run(), SessionOutcome::Exited);
    assert_eq!(app.cart().len(), 2);

    let output = output_of(app);
    assert!(output.contains("Something went wrong"));
    assert!(!output.contains("Your total is:"));
    assert!(output.contains("Thank you for shopping with us!"));
}
