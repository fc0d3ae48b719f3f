use clap::Parser;
use rentguard::cli::args::{Cli, Command, KeyAction, OutputFormat};
use rentguard::models::OutputLanguage;
use std::path::PathBuf;

#[test]
fn test_basic_cli_parsing() {
    let args = vec!["rentguard", "analyze", "contract.jpg"];
    let cli = Cli::try_parse_from(args);

    assert!(cli.is_ok());
    let cli = cli.unwrap();

    assert!(!cli.verbose);
    assert!(!cli.debug);
    assert!(cli.output_lang.is_none());

    match cli.command {
        Command::Analyze(args) => {
            assert_eq!(args.files, vec![PathBuf::from("contract.jpg")]);
            assert_eq!(args.model, "kimi-k2-turbo-preview");
            assert_eq!(args.base_url, "https://api.moonshot.cn/v1");
            assert!(args.timeout.is_none());
            assert_eq!(args.format, OutputFormat::Text);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_cli_short_flags() {
    let args = vec![
        "rentguard", "-v", "analyze", "-k", "sk-123", "-m", "moonshot-v1-8k", "-t", "30", "-f", "json",
        "p1.png", "p2.png",
    ];

    let cli = Cli::try_parse_from(args).unwrap();
    assert!(cli.verbose);

    match cli.command {
        Command::Analyze(args) => {
            assert_eq!(args.api_key.as_deref(), Some("sk-123"));
            assert_eq!(args.model, "moonshot-v1-8k");
            assert_eq!(args.timeout, Some(30));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.files.len(), 2);
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_output_language_option() {
    let cli = Cli::try_parse_from(["rentguard", "--output-lang", "chinese", "guide"]).unwrap();
    assert_eq!(cli.output_lang.as_deref(), Some("chinese"));

    if std::env::var("RENTGUARD_OUTPUT_LANGUAGE").is_err() {
        assert_eq!(cli.get_output_language().unwrap(), OutputLanguage::Chinese);

        let cli = Cli::try_parse_from(["rentguard", "--output-lang", "klingon", "guide"]).unwrap();
        assert!(cli.validate().is_err());
    }
}

#[test]
fn test_timeout_out_of_range_rejected() {
    assert!(Cli::try_parse_from(["rentguard", "analyze", "--timeout", "9", "a.jpg"]).is_err());
    assert!(Cli::try_parse_from(["rentguard", "analyze", "--timeout", "abc", "a.jpg"]).is_err());
    assert!(Cli::try_parse_from(["rentguard", "analyze", "--timeout", "600", "a.jpg"]).is_ok());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Cli::try_parse_from(["rentguard", "analyze", "--format", "xml", "a.jpg"]).is_err());
}

#[test]
fn test_key_subcommands() {
    let cli = Cli::try_parse_from(["rentguard", "key", "show"]).unwrap();
    assert!(matches!(cli.command, Command::Key { action: KeyAction::Show }));

    let cli = Cli::try_parse_from(["rentguard", "key", "set", "sk-live"]).unwrap();
    match cli.command {
        Command::Key { action } => assert_eq!(action, KeyAction::Set { key: "sk-live".to_string() }),
        other => panic!("unexpected command {:?}", other),
    }

    assert!(Cli::try_parse_from(["rentguard", "key", "set"]).is_err());
}

#[test]
fn test_guide_section_is_optional() {
    let cli = Cli::try_parse_from(["rentguard", "guide"]).unwrap();
    assert!(matches!(cli.command, Command::Guide { section: None }));

    let cli = Cli::try_parse_from(["rentguard", "guide", "inspection"]).unwrap();
    assert!(matches!(cli.command, Command::Guide { section: Some(ref s) } if s == "inspection"));
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["rentguard"]).is_err());
}
