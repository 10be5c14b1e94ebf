use super::*;

#[test]
fn parses_url_argument() {
    let cli = Cli::try_parse_from(["storesync", "https://shop.example.ir/product/scooter-x/"])
        .expect("expected valid cli args");
    assert_eq!(cli.url, "https://shop.example.ir/product/scooter-x/");
    assert!(!cli.dry_run);
}

#[test]
fn parses_dry_run_flag() {
    let cli = Cli::try_parse_from([
        "storesync",
        "--dry-run",
        "https://shop.example.ir/product/scooter-x/",
    ])
    .expect("expected valid cli args");
    assert!(cli.dry_run);
}

#[test]
fn url_is_required() {
    assert!(Cli::try_parse_from(["storesync"]).is_err());
}

#[test]
fn extra_positional_is_rejected() {
    assert!(Cli::try_parse_from(["storesync", "https://a.example/1", "https://a.example/2"]).is_err());
}
