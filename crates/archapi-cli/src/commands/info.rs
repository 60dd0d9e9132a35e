//! `archapi info`

use archapi_core::PackageInfo;
use chrono::{DateTime, Utc};

use super::{CliResult, CommandContext};

/// Web root that `URLPath` values are relative to
const AUR_WEB_ROOT: &str = "https://aur.archlinux.org";

pub async fn execute(names: Vec<String>, ctx: &CommandContext) -> CliResult<()> {
    let infos = ctx.registry.info(names.iter().map(String::as_str)).await?;

    if ctx.json {
        return ctx.print_json(&infos);
    }

    for name in &names {
        if !infos.iter().any(|info| &info.name == name) {
            ctx.output.warn(&format!("Package '{}' was not found", name));
        }
    }

    let blocks: Vec<String> = infos.iter().map(format_info).collect();
    println!("{}", blocks.join("\n\n"));
    Ok(())
}

/// `pacman -Si` style key/value block
pub fn format_info(info: &PackageInfo) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("Name", info.name.clone()),
        ("Package Base", info.package_base.clone()),
        ("Version", info.version.clone()),
        ("Description", info.description.clone().unwrap_or_default()),
        ("URL", info.url.clone().unwrap_or_default()),
        ("Licenses", list(&info.license)),
        ("Groups", list(&info.groups)),
        ("Provides", list(&info.provides)),
        ("Depends On", list(&info.depends)),
        ("Make Deps", list(&info.make_depends)),
        ("Check Deps", list(&info.check_depends)),
        ("Optional Deps", list(&info.opt_depends)),
        ("Conflicts With", list(&info.conflicts)),
        ("Replaces", list(&info.replaces)),
        ("Keywords", list(&info.keywords)),
        (
            "Maintainer",
            info.maintainer.clone().filter(|m| !m.is_empty()).unwrap_or_else(|| "None".to_string()),
        ),
        ("Votes", info.num_votes.to_string()),
        ("Popularity", format!("{:.2}", info.popularity)),
        ("First Submitted", timestamp(info.first_submitted_at())),
        ("Last Modified", timestamp(info.last_modified_at())),
    ];

    let out_of_date = match &info.out_of_date {
        None => "No".to_string(),
        Some(marker) => match marker.flagged_at() {
            Some(at) => format!("Yes ({})", at.format("%Y-%m-%d")),
            None => "Yes".to_string(),
        },
    };
    rows.push(("Out Of Date", out_of_date));

    if let Some(snapshot) = info.snapshot_url(AUR_WEB_ROOT) {
        rows.push(("Snapshot", snapshot));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(key, value)| format!("{:<width$} : {}", key, value, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        "None".to_string()
    } else {
        values.join("  ")
    }
}

fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}
