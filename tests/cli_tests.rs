//! CLI argument parsing and context loading tests

use clap::Parser;
use qrdash::cli::{commands::Context, Cli, Commands, OutputFormat, QrAction};
use qrdash::qr::QrStyle;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_parse_login() {
    let cli = Cli::try_parse_from(["qrdash", "login", "-u", "alice", "-p", "secret"]).unwrap();
    match cli.command {
        Commands::Login { username, password } => {
            assert_eq!(username, "alice");
            assert_eq!(password.as_deref(), Some("secret"));
        }
        _ => panic!("expected login"),
    }
}

#[test]
fn test_parse_qr_create_with_style() {
    let cli = Cli::try_parse_from([
        "qrdash",
        "qr",
        "create",
        "https://example.com",
        "--dot-style",
        "circle",
        "--eye-style",
        "Rounded",
        "--fill-color",
        "#ff0000",
        "-o",
        "out",
    ])
    .unwrap();

    match cli.command {
        Commands::Qr {
            action: QrAction::Create { url, style, out },
        } => {
            assert_eq!(url, "https://example.com");
            assert_eq!(style.dot_style, Some(QrStyle::Circle));
            assert_eq!(style.eye_style, Some(QrStyle::Rounded));
            assert_eq!(style.fill_color.as_deref(), Some("#ff0000"));
            assert!(style.back_color.is_none());
            assert_eq!(out, Some(PathBuf::from("out")));
        }
        _ => panic!("expected qr create"),
    }
}

#[test]
fn test_parse_rejects_unknown_style() {
    let result = Cli::try_parse_from(["qrdash", "qr", "create", "x", "--dot-style", "hexagon"]);
    assert!(result.is_err());
}

#[test]
fn test_parse_qr_list_and_delete() {
    let cli = Cli::try_parse_from(["qrdash", "qr", "list", "-f", "json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Qr {
            action: QrAction::List {
                format: OutputFormat::Json
            }
        }
    ));

    let cli = Cli::try_parse_from(["qrdash", "qr", "delete", "7", "--force"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Qr {
            action: QrAction::Delete { id: 7, force: true }
        }
    ));
}

#[test]
fn test_parse_echo_defaults_number() {
    let cli = Cli::try_parse_from(["qrdash", "echo", "hi"]).unwrap();
    assert!(matches!(cli.command, Commands::Echo { number: 0, .. }));
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from([
        "qrdash",
        "hello",
        "--api-base",
        "http://example.com/api",
        "--config",
        "custom.toml",
    ])
    .unwrap();
    assert_eq!(cli.api_base.as_deref(), Some("http://example.com/api"));
    assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
}

#[test]
fn test_context_load_applies_overrides() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("qrdash.toml");
    let session_path = temp.path().join("session.json");
    fs::write(
        &config_path,
        format!(
            "[client]\napi_base = \"http://config.example/api\"\nsession_file = \"{}\"\n\n[qr]\ndot_style = \"gapped\"\n",
            session_path.display()
        ),
    )
    .unwrap();

    let ctx = Context::load(Some(config_path.as_path()), None).unwrap();
    assert_eq!(ctx.client.base(), "http://config.example/api");
    assert_eq!(ctx.session.path(), Some(session_path.as_path()));
    assert!(!ctx.session.is_authenticated());
    assert_eq!(ctx.config.qr.dot_style, QrStyle::Gapped);

    let ctx = Context::load(Some(config_path.as_path()), Some("http://flag.example/api/".to_string())).unwrap();
    assert_eq!(ctx.client.base(), "http://flag.example/api");
}

#[test]
fn test_context_load_missing_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    let result = Context::load(Some(temp.path().join("absent.toml").as_path()), None);
    assert!(result.is_err());
}
