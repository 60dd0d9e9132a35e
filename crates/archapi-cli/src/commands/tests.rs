//! Unit tests for CLI commands.

use super::*;

use crate::output::colors::ColorSupport;
use crate::output::errors::ErrorFormatter;
use crate::{Cli, ConfigOverrides};
use archapi_core::{MirrorList, Operation, Package, PackageInfo, TransportError};
use archapi_registry::SearchBy;
use clap::Parser;
use serde_json::json;

fn package_value() -> serde_json::Value {
    json!({
        "ID": 42,
        "Name": "aurutils",
        "PackageBaseID": 7,
        "PackageBase": "aurutils",
        "Version": "19.3-1",
        "Description": "helper tools for the arch user repository",
        "URL": "https://github.com/aurutils/aurutils",
        "NumVotes": 310,
        "Popularity": 4.5,
        "OutOfDate": 1700000000,
        "Maintainer": null,
        "FirstSubmitted": 1466000000,
        "LastModified": 1710000000,
        "URLPath": "/cgit/aur.git/snapshot/aurutils.tar.gz",
        "Depends": ["git", "jq", "pacutils"],
        "License": ["custom:ISC"]
    })
}

fn mirror_list() -> MirrorList {
    serde_json::from_value(json!({
        "cutoff": 86400,
        "last_check": "2024-05-01T10:30:00Z",
        "num_checks": 24,
        "check_frequency": 3600,
        "version": 3,
        "urls": [
            {
                "url": "https://de.example.org/arch/", "protocol": "https",
                "last_sync": "2024-05-01T10:00:00Z", "completion_pct": 1.0, "delay": 600,
                "duration_avg": 0.2, "duration_stddev": 0.1, "score": 0.9, "active": true,
                "country": "Germany", "country_code": "DE",
                "isos": true, "ipv4": true, "ipv6": true, "details": ""
            },
            {
                "url": "rsync://de.example.org/arch/", "protocol": "rsync",
                "last_sync": null, "completion_pct": null, "delay": null,
                "duration_avg": null, "duration_stddev": null, "score": null, "active": false,
                "country": "Germany", "country_code": "DE",
                "isos": false, "ipv4": true, "ipv6": false, "details": "out of sync"
            },
            {
                "url": "https://us.example.org/arch/", "protocol": "https",
                "last_sync": "2024-05-01T09:00:00Z", "completion_pct": 0.9, "delay": 3600,
                "duration_avg": 0.4, "duration_stddev": 0.3, "score": 2.5, "active": true,
                "country": "United States", "country_code": "US",
                "isos": true, "ipv4": true, "ipv6": false, "details": ""
            }
        ]
    }))
    .unwrap()
}

#[test]
fn test_parse_search_command() {
    let cli = Cli::try_parse_from(["archapi", "search", "--by", "maintainer", "jguer"]).unwrap();
    match cli.command {
        Commands::Search { by, term } => {
            assert_eq!(by, Some(SearchBy::Maintainer));
            assert_eq!(term, "jguer");
        }
        other => panic!("Expected search command, got {:?}", other),
    }

    assert!(Cli::try_parse_from(["archapi", "search", "--by", "title", "x"]).is_err());
}

#[test]
fn test_parse_info_requires_names() {
    assert!(Cli::try_parse_from(["archapi", "info"]).is_err());

    let cli = Cli::try_parse_from(["archapi", "--json", "info", "yay", "paru"]).unwrap();
    assert!(cli.json);
    match cli.command {
        Commands::Info { names } => assert_eq!(names, vec!["yay", "paru"]),
        other => panic!("Expected info command, got {:?}", other),
    }
}

#[test]
fn test_parse_global_overrides() {
    let cli = Cli::try_parse_from([
        "archapi",
        "mirrors",
        "--active",
        "--country",
        "de",
        "--rpc-url",
        "http://localhost:8080/rpc/",
        "--timeout",
        "3",
    ])
    .unwrap();

    assert_eq!(cli.overrides.rpc_url.as_deref(), Some("http://localhost:8080/rpc/"));
    assert_eq!(cli.overrides.timeout, Some(3));
    assert!(matches!(cli.command, Commands::Mirrors { active: true, .. }));
}

#[test]
fn test_format_package() {
    let pkg: Package = serde_json::from_value(package_value()).unwrap();
    let text = search::format_package(&pkg, &ColorSupport::disabled());

    assert_eq!(
        text,
        "aur/aurutils 19.3-1 (+310 4.50) [orphaned] [out of date]\n    helper tools for the arch user repository"
    );
}

#[test]
fn test_format_results_keep_server_order() {
    let mut popular: Package = serde_json::from_value(package_value()).unwrap();
    popular.name = "popular".to_string();
    popular.popularity = 9.0;
    let mut niche = popular.clone();
    niche.name = "niche".to_string();
    niche.popularity = 0.1;

    let text = search::format_results(&[niche, popular], &ColorSupport::disabled());
    let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("aur/")).collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("aur/niche "));
    assert!(lines[1].starts_with("aur/popular "));
}

#[test]
fn test_format_info() {
    let info: PackageInfo = serde_json::from_value(package_value()).unwrap();
    let text = info::format_info(&info);

    assert!(text.contains("Name            : aurutils"));
    assert!(text.contains("Depends On      : git  jq  pacutils"));
    assert!(text.contains("Make Deps       : None"));
    assert!(text.contains("Maintainer      : None"));
    assert!(text.contains("Out Of Date     : Yes (2023-11-14)"));
    assert!(text.contains(
        "Snapshot        : https://aur.archlinux.org/cgit/aur.git/snapshot/aurutils.tar.gz"
    ));
}

#[test]
fn test_mirror_filter() {
    let list = mirror_list();

    let all = mirrors::MirrorFilter::default().apply(&list);
    assert_eq!(all.len(), 3);

    let filter = mirrors::MirrorFilter {
        country: Some("de".to_string()),
        protocol: None,
        active: true,
    };
    let selected = filter.apply(&list);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].url, "https://de.example.org/arch/");

    let filter = mirrors::MirrorFilter {
        country: None,
        protocol: Some("HTTPS".to_string()),
        active: false,
    };
    let urls: Vec<&str> = filter.apply(&list).into_iter().map(|m| m.url.as_str()).collect();
    assert_eq!(urls, vec!["https://de.example.org/arch/", "https://us.example.org/arch/"]);
}

#[test]
fn test_format_mirror() {
    let list = mirror_list();
    let colors = ColorSupport::disabled();

    assert_eq!(
        mirrors::format_mirror(&list.urls[0], &colors),
        "[DE] https://de.example.org/arch/  score 0.90  delay 10m"
    );
    assert_eq!(
        mirrors::format_mirror(&list.urls[1], &colors),
        "[DE] rsync://de.example.org/arch/  score -  delay -"
    );
}

#[tokio::test]
async fn test_load_config_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "rpc_url = \"http://file.example/rpc/\"\ntimeout_secs = 10\n").unwrap();

    let overrides = ConfigOverrides {
        config: Some(path),
        rpc_url: None,
        mirrors_url: Some("http://flag.example/mirrors/".to_string()),
        timeout: Some(2),
    };

    let config = crate::config::load(&overrides).await.unwrap();
    assert_eq!(config.rpc_url, "http://file.example/rpc/");
    assert_eq!(config.mirrors_url, "http://flag.example/mirrors/");
    assert_eq!(config.timeout_secs, 2);
}

#[tokio::test]
async fn test_load_config_rejects_bad_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let overrides = ConfigOverrides {
        config: Some(path),
        timeout: Some(0),
        ..Default::default()
    };

    let err = crate::config::load(&overrides).await.unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::Invalid { field: "timeout_secs", .. })));
}

#[tokio::test]
async fn test_override_corrects_bad_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "rpc_url = \"not a url\"\n").unwrap();

    let overrides = ConfigOverrides {
        config: Some(path),
        rpc_url: Some("http://flag.example/rpc/".to_string()),
        ..Default::default()
    };

    let config = crate::config::load(&overrides).await.unwrap();
    assert_eq!(config.rpc_url, "http://flag.example/rpc/");

    let overrides = ConfigOverrides {
        rpc_url: None,
        ..overrides
    };
    let err = crate::config::load(&overrides).await.unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::InvalidUrl { field: "rpc_url", .. })));
}

#[tokio::test]
async fn test_explicit_missing_config_is_an_error() {
    let overrides = ConfigOverrides {
        config: Some("/nonexistent/archapi/config.toml".into()),
        ..Default::default()
    };

    let err = crate::config::load(&overrides).await.unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::Io { .. })));
}

#[test]
fn test_command_context_from_config() {
    let config = ClientConfig::default();
    let ctx = CommandContext::new(&config, true).unwrap();
    assert!(ctx.json);
    assert_eq!(ctx.registry.rpc_url().as_str(), "https://aur.archlinux.org/rpc/");
    assert_eq!(
        ctx.mirrors.feed_url().as_str(),
        "https://archlinux.org/mirrors/status/json/"
    );
}

#[test]
fn test_error_formatter_output() {
    let formatter = ErrorFormatter::with_colors(ColorSupport::disabled());

    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "operation timed out");
    let err = CliError::from(ArchApiError::transport(
        Operation::Search,
        TransportError::with_source("GET https://aur.archlinux.org/rpc/ failed", io),
    ));
    let text = formatter.format_error(&err);

    assert_eq!(
        text,
        "error: archapi: search request failed: GET https://aur.archlinux.org/rpc/ failed\n\
         caused by: operation timed out\n\
         help: Check your internet connection or the configured endpoint URL\n"
    );

    let err = CliError::from(ArchApiError::application(Operation::Info, "Incorrect by field specified."));
    assert_eq!(
        formatter.format_error(&err),
        "error: archapi: info rejected by server: Incorrect by field specified.\n"
    );
}
