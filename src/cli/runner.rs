//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::PagewalkConfig;
use crate::error::{Error, Result, ResultExt};
use crate::link::{next_cursor, parse_links, LinkPolicy};
use crate::pagination::Pagination;
use crate::types::{Cursor, JsonObject, JsonValue};
use std::io::Write;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::List {
                url,
                max_items,
                pointer,
                pretty,
                strict,
            } => self.list(url, *max_items, pointer.as_deref(), *pretty, *strict),
            Commands::Links { headers, base } => self.links(headers, base.as_deref()),
        }
    }

    fn load_config(&self) -> Result<PagewalkConfig> {
        match &self.cli.config {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                PagewalkConfig::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))
            }
            None => Ok(PagewalkConfig::default()),
        }
    }

    fn list(
        &self,
        url: &str,
        max_items: Option<usize>,
        pointer: Option<&str>,
        pretty: bool,
        strict: bool,
    ) -> Result<()> {
        let config = self.load_config()?;
        let policy = if strict {
            LinkPolicy::Strict
        } else {
            config.links.policy
        };

        let fetcher = Arc::new(config.fetcher()?);
        let entry = Cursor::parse(url).with_context(|| format!("Invalid start URL '{url}'"))?;
        let source = Pagination::raw(fetcher, entry).with_link_policy(policy);
        info!("Walking {}", source);

        let start = Instant::now();
        let limit = max_items.unwrap_or(usize::MAX);
        let mut items = source.iter();
        let mut printed = 0;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        while printed < limit && items.has_next()? {
            let object = items.next_item()?;
            if let Some(line) = render(&object, pointer, pretty)? {
                writeln!(out, "{line}")?;
            }
            printed += 1;
        }
        out.flush()?;

        let stats = items.stats();
        info!(
            "Printed {} item(s) from {} page(s) in {:?}",
            printed,
            stats.pages_fetched,
            start.elapsed()
        );
        Ok(())
    }

    fn links(&self, headers: &[String], base: Option<&str>) -> Result<()> {
        let links = parse_links(headers).map_err(|e| Error::parse("<input>", e.to_string()))?;

        for link in links.iter() {
            println!("{}", serde_json::to_string(link)?);
        }

        if let Some(base) = base {
            let base = Cursor::parse(base).with_context(|| format!("Invalid base URL '{base}'"))?;
            match next_cursor(&base, headers, LinkPolicy::Strict)? {
                Some(next) => println!("next: {next}"),
                None => println!("next: none"),
            }
        }
        Ok(())
    }
}

/// Render one item as a JSON line, or the value at `pointer`
///
/// Returns `None` when the pointer selects nothing.
pub(crate) fn render(
    object: &JsonObject,
    pointer: Option<&str>,
    pretty: bool,
) -> Result<Option<String>> {
    let value = JsonValue::Object(object.clone());
    let selected = match pointer {
        Some(pointer) => match value.pointer(pointer) {
            Some(found) => found,
            None => return Ok(None),
        },
        None => &value,
    };

    let line = if pretty {
        serde_json::to_string_pretty(selected)?
    } else {
        serde_json::to_string(selected)?
    };
    Ok(Some(line))
}
