//! Library integration tests.

use envswitch::EnvSwitchError;

#[test]
fn error_types_are_public() {
    let err = EnvSwitchError::UnknownEnvironment {
        name: "staging".into(),
    };
    assert!(err.to_string().contains("staging"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> envswitch::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use envswitch::cli::{Cli, Commands};

    let cli = Cli::parse_from(["envswitch", "switch", "--platform", "android"]);
    assert!(matches!(cli.command, Commands::Switch(_)));
}

#[test]
fn core_helpers_are_public() {
    assert_eq!(
        envswitch::variant::canonical_name("config.staging.json").as_deref(),
        Some("config.json")
    );
    assert_eq!(
        envswitch::version::encode_version_code("1.2.1", "2").unwrap(),
        "1020102"
    );
}
