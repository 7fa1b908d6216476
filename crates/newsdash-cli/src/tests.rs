use super::*;

#[test]
fn cli_parses_live() {
    let cli = Cli::try_parse_from(["newsdash", "--company", "C1", "live"]).unwrap();
    assert!(matches!(cli.command, Commands::Live));
    assert_eq!(cli.company, "C1");
}

#[test]
fn cli_timeout_defaults_to_client_default() {
    let cli = Cli::try_parse_from(["newsdash", "--company", "C1", "live"]).unwrap();
    assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT_SECS);
}

#[test]
fn cli_parses_report_timestamp() {
    let cli = Cli::try_parse_from([
        "newsdash",
        "--company",
        "C1",
        "report",
        "2025-01-02T10:00:00",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Report { ref timestamp } if timestamp == "2025-01-02T10:00:00"
    ));
}

#[test]
fn cli_analyze_defaults_to_today() {
    let cli = Cli::try_parse_from(["newsdash", "--company", "C1", "analyze"]).unwrap();
    assert!(matches!(cli.command, Commands::Analyze { ref period } if period == "today"));
}

#[test]
fn cli_parses_analyze_period() {
    let cli =
        Cli::try_parse_from(["newsdash", "--company", "C1", "analyze", "--period", "month"])
            .unwrap();
    assert!(matches!(cli.command, Commands::Analyze { ref period } if period == "month"));
}

#[test]
fn cli_parses_connection_flags() {
    let cli = Cli::try_parse_from([
        "newsdash",
        "--company",
        "C2",
        "--api-url",
        "http://dash.internal:8080",
        "--token",
        "demo-token-c2",
        "--timeout-secs",
        "3",
        "--max-retries",
        "0",
        "reports",
    ])
    .unwrap();
    assert!(matches!(cli.command, Commands::Reports));
    assert_eq!(cli.api_url, "http://dash.internal:8080");
    assert_eq!(cli.token.as_deref(), Some("demo-token-c2"));
    assert_eq!(cli.timeout_secs, 3);
    assert_eq!(cli.max_retries, 0);
}

#[test]
fn cli_requires_subcommand() {
    assert!(Cli::try_parse_from(["newsdash", "--company", "C1"]).is_err());
}

#[test]
fn login_required_gets_a_hint() {
    let err = into_result(Err(ControllerError::LoginRequired)).unwrap_err();
    assert!(err.to_string().contains("NEWSDASH_SESSION_TOKEN"));
}

#[test]
fn busy_passes_through() {
    let err = into_result(Err(ControllerError::Busy)).unwrap_err();
    assert_eq!(err.to_string(), "another operation is in progress");
}
