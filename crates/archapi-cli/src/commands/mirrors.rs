//! `archapi mirrors`

use archapi_core::{Mirror, MirrorList};

use super::{CliResult, CommandContext};
use crate::output::colors::{ColorSupport, Style};

/// Filters applied to the feed before printing
#[derive(Debug, Default, Clone)]
pub struct MirrorFilter {
    pub country: Option<String>,
    pub protocol: Option<String>,
    pub active: bool,
}

impl MirrorFilter {
    pub fn matches(&self, mirror: &Mirror) -> bool {
        if self.active && !mirror.active {
            return false;
        }
        if let Some(country) = &self.country {
            if !mirror.in_country(country) {
                return false;
            }
        }
        if let Some(protocol) = &self.protocol {
            if !mirror.serves(protocol) {
                return false;
            }
        }
        true
    }

    /// Matching mirrors in feed order
    pub fn apply<'a>(&self, list: &'a MirrorList) -> Vec<&'a Mirror> {
        list.urls.iter().filter(|m| self.matches(m)).collect()
    }
}

pub async fn execute(filter: MirrorFilter, ctx: &CommandContext) -> CliResult<()> {
    let list = ctx.mirrors.list_mirrors().await?;
    let selected = filter.apply(&list);

    if ctx.json {
        return ctx.print_json(&selected);
    }

    ctx.output.info(&format!(
        "{} of {} mirrors, last checked {}",
        selected.len(),
        list.urls.len(),
        list.last_check.format("%Y-%m-%d %H:%M UTC")
    ));
    for mirror in selected {
        println!("{}", format_mirror(mirror, ctx.output.colors()));
    }
    Ok(())
}

/// One line per mirror: `[CC] url  score  delay`
pub fn format_mirror(mirror: &Mirror, colors: &ColorSupport) -> String {
    let country = if mirror.country_code.is_empty() {
        "--"
    } else {
        mirror.country_code.as_str()
    };
    let score = mirror
        .score
        .map(|s| format!("{:.2}", s))
        .unwrap_or_else(|| "-".to_string());
    let delay = mirror
        .delay
        .map(|d| format!("{}m", d / 60))
        .unwrap_or_else(|| "-".to_string());

    let url = if mirror.active {
        mirror.url.clone()
    } else {
        colors.paint(Style::Muted, &mirror.url)
    };
    format!("[{}] {}  score {}  delay {}", country, url, score, delay)
}
