//! `archapi search`

use archapi_core::Package;
use archapi_registry::SearchBy;

use super::{CliResult, CommandContext};
use crate::output::colors::{ColorSupport, Style};

pub async fn execute(by: Option<SearchBy>, term: String, ctx: &CommandContext) -> CliResult<()> {
    let packages = ctx.registry.search(by, &term).await?;

    if ctx.json {
        return ctx.print_json(&packages);
    }

    if packages.is_empty() {
        ctx.output.warn(&format!("No packages found for '{}'", term));
        return Ok(());
    }

    println!("{}", format_results(&packages, ctx.output.colors()));
    Ok(())
}

/// All results in the order the server returned them, same as `--json`
pub fn format_results(packages: &[Package], colors: &ColorSupport) -> String {
    packages
        .iter()
        .map(|pkg| format_package(pkg, colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-line summary: `aur/name version (+votes popularity) [flags]` then the description
pub fn format_package(pkg: &Package, colors: &ColorSupport) -> String {
    let mut line = format!(
        "{}{} {} (+{} {:.2})",
        colors.paint(Style::Muted, "aur/"),
        colors.paint(Style::Name, &pkg.name),
        colors.paint(Style::Version, &pkg.version),
        pkg.num_votes,
        pkg.popularity
    );
    if pkg.is_orphaned() {
        line.push_str(&colors.paint(Style::Flag, " [orphaned]"));
    }
    if pkg.is_out_of_date() {
        line.push_str(&colors.paint(Style::Flag, " [out of date]"));
    }

    let description = pkg.description.as_deref().unwrap_or("");
    format!("{}\n    {}", line, description)
}
