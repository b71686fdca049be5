use sheetstore_cart::CartCommand;
use sheetstore_catalog::build_catalog;
use sheetstore_core::VariantKey;

use super::*;
use crate::catalog::{load_catalog, normalize_options, select_products};
use crate::checkout::{check_size, run_checkout};

fn cart_command(args: &[&str]) -> CartCommands {
    let mut argv = vec!["sheetstore-cli", "cart"];
    argv.extend_from_slice(args);
    match Cli::try_parse_from(argv).expect("expected valid cli args").command {
        Some(Commands::Cart { command }) => command,
        other => panic!("expected cart command, got {other:?}"),
    }
}

fn test_config(require_id: bool) -> sheetstore_core::AppConfig {
    let lookup = |key: &str| match key {
        "SHEETSTORE_CSV_URL" => Ok("https://example.com/pub.csv".to_string()),
        "SHEETSTORE_RECIPIENT_NUMBER" => Ok("919876543210".to_string()),
        "SHEETSTORE_REQUIRE_ID" => Ok(require_id.to_string()),
        _ => Err(std::env::VarError::NotPresent),
    };
    sheetstore_core::config::build_app_config(lookup).expect("test config is valid")
}

fn unconfigured() -> sheetstore_core::AppConfig {
    sheetstore_core::config::build_app_config(|_| Err(std::env::VarError::NotPresent))
        .expect("defaults are valid")
}

// -----------------------------------------------------------------------
// argument parsing
// -----------------------------------------------------------------------

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sheetstore-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.csv_file.is_none());
}

#[test]
fn parses_catalog_filters() {
    let cli = Cli::try_parse_from([
        "sheetstore-cli",
        "catalog",
        "--category",
        "Ethnic",
        "--size",
        "M",
        "--featured",
        "4",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Catalog {
            category: Some(ref c),
            size: Some(ref s),
            featured: Some(4),
        }) if c == "Ethnic" && s == "M"
    ));
}

#[test]
fn csv_file_is_global() {
    let cli = Cli::try_parse_from(["sheetstore-cli", "cart", "show", "--csv-file", "products.csv"])
        .unwrap();
    assert_eq!(
        cli.csv_file.as_deref(),
        Some(std::path::Path::new("products.csv"))
    );
}

#[test]
fn parses_checkout_fields() {
    let cli = Cli::try_parse_from([
        "sheetstore-cli",
        "checkout",
        "--name",
        "Asha",
        "--phone",
        "9876543210",
        "--address",
        "12 MG Road",
        "--pincode",
        "411001",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Checkout {
            ref name,
            city: None,
            pincode: Some(ref pin),
            notes: None,
            ..
        }) if name == "Asha" && pin == "411001"
    ));
}

#[test]
fn checkout_requires_address() {
    let result = Cli::try_parse_from([
        "sheetstore-cli",
        "checkout",
        "--name",
        "Asha",
        "--phone",
        "9876543210",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_collections_command() {
    let cli =
        Cli::try_parse_from(["sheetstore-cli", "collections", "--csv-file", "p.csv"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Collections)));
    assert!(cli.csv_file.is_some());
}

#[test]
fn buy_defaults_quantity_to_one() {
    let cli = Cli::try_parse_from(["sheetstore-cli", "buy", "A1", "--size", "S"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Buy { ref id, qty: 1, .. }) if id == "A1"
    ));
}

// -----------------------------------------------------------------------
// cart subcommands
// -----------------------------------------------------------------------

#[test]
fn cart_show_has_no_mutation() {
    assert!(cart_command(&["show"]).into_cart_command().is_none());
}

#[test]
fn cart_add_maps_to_add_command() {
    assert_eq!(
        cart_command(&["add", "A1", "--size", "S"]).into_cart_command(),
        Some(CartCommand::Add {
            product_id: "A1".to_owned(),
            size: Some("S".to_owned()),
        })
    );
}

#[test]
fn cart_qty_accepts_negative_delta() {
    assert_eq!(
        cart_command(&["qty", "A1", "-999", "--size", "S"]).into_cart_command(),
        Some(CartCommand::ChangeQuantity {
            key: VariantKey::new("A1", Some("S")),
            delta: -999,
        })
    );
}

#[test]
fn cart_set_size_maps_to_update_size() {
    assert_eq!(
        cart_command(&["set-size", "A1", "--from", "S", "--to", "M"]).into_cart_command(),
        Some(CartCommand::UpdateSize {
            product_id: "A1".to_owned(),
            from: Some("S".to_owned()),
            to: Some("M".to_owned()),
        })
    );
}

#[test]
fn cart_remove_without_size_targets_unsized_line() {
    assert_eq!(
        cart_command(&["remove", "A2"]).into_cart_command(),
        Some(CartCommand::Remove {
            key: VariantKey::new("A2", None),
        })
    );
}

#[test]
fn cart_set_qty_and_clear() {
    assert_eq!(
        cart_command(&["set-qty", "A2", "3"]).into_cart_command(),
        Some(CartCommand::SetQuantity {
            key: VariantKey::new("A2", None),
            quantity: 3,
        })
    );
    assert_eq!(
        cart_command(&["clear"]).into_cart_command(),
        Some(CartCommand::Clear)
    );
}

// -----------------------------------------------------------------------
// helpers
// -----------------------------------------------------------------------

#[test]
fn require_id_selects_code_column_pipeline() {
    assert_eq!(
        normalize_options(&test_config(true)),
        sheetstore_catalog::NormalizeOptions::code_column()
    );
    assert_eq!(
        normalize_options(&test_config(false)),
        sheetstore_catalog::NormalizeOptions::default()
    );
}

#[test]
fn featured_without_filter_takes_display_prefix() {
    let catalog = build_catalog(
        "id,name,category,featured,size\nA1,a,Western,,S\nA2,b,Ethnic,yes,M\nA3,c,Ethnic,,S\n",
        &sheetstore_catalog::NormalizeOptions::default(),
    )
    .unwrap();

    let top: Vec<&str> = select_products(&catalog, &CatalogFilter::default(), Some(2))
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(top, vec!["A2", "A3"]);

    let small = CatalogFilter {
        category: None,
        size: Some("S".to_owned()),
    };
    let first_small: Vec<&str> = select_products(&catalog, &small, Some(1))
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(first_small, vec!["A3"]);
}

#[test]
fn buy_requires_an_offered_size() {
    let catalog = build_catalog(
        "id,name,size\nA1,Dress,\"S,M\"\nA2,Scarf,\n",
        &sheetstore_catalog::NormalizeOptions::default(),
    )
    .unwrap();
    let dress = catalog.get("A1").unwrap();
    assert!(check_size(dress, Some("M")).is_ok());
    assert!(check_size(dress, None).is_err());
    assert!(check_size(dress, Some("XL")).is_err());
    assert!(check_size(catalog.get("A2").unwrap(), None).is_ok());
}

// -----------------------------------------------------------------------
// optional configuration
// -----------------------------------------------------------------------

#[tokio::test]
async fn local_csv_file_needs_no_sheet_url() {
    let dir = std::env::temp_dir().join(format!("sheetstore-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("products.csv");
    std::fs::write(&path, "id,name,price\nA1,Dress,499\n").unwrap();

    let state = load_catalog(&unconfigured(), Some(path.as_path())).await.unwrap();

    assert_eq!(state.catalog().len(), 1);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn remote_catalog_without_url_names_the_variable() {
    let err = load_catalog(&unconfigured(), None).await.unwrap_err();
    assert!(format!("{err:#}").contains("SHEETSTORE_CSV_URL"), "{err:#}");
}

#[test]
fn checkout_without_recipient_names_the_variable() {
    let customer = CustomerDetails {
        name: "Asha".to_owned(),
        phone: "9876543210".to_owned(),
        address: "12 MG Road".to_owned(),
        ..CustomerDetails::default()
    };
    let err = run_checkout(&unconfigured(), &customer).unwrap_err();
    assert!(err.to_string().contains("SHEETSTORE_RECIPIENT_NUMBER"), "{err}");
}
