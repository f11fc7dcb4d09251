use anyhow::Context;
use serde_json::json;

use crate::cli::{utils::output_value, OutputFormat};
use crate::config;
use crate::workspace::{content_from_query, set_content_in_url, ContentType, Location, NavigateOptions, Navigator};

/// Captures the URL instead of pushing it anywhere
#[derive(Default)]
struct PrintNavigator {
    pushed: Option<(String, NavigateOptions)>,
}

impl Navigator for PrintNavigator {
    fn push(&mut self, url: &str, options: NavigateOptions) {
        self.pushed = Some((url.to_string(), options));
    }
}

pub fn resolve(url: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let location = Location::parse(url, &config::config().workspace.default_path);
    let content = content_from_query(&location.params);

    output_value(
        output_format,
        content.as_str(),
        json!({ "url": location.href(), "content": content }),
    )
}

pub fn link(url: &str, content: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let (pushed, content, scroll) = link_url(url, content, &config::config().workspace.default_path)?;

    output_value(
        output_format,
        &pushed,
        json!({ "url": pushed, "content": content, "scroll": scroll }),
    )
}

/// URL `set_content_in_url` would push for `content`, which must be a navigable value
fn link_url(url: &str, content: &str, default_path: &str) -> anyhow::Result<(String, ContentType, bool)> {
    let content: ContentType = content
        .parse()
        .with_context(|| format!("expected one of {}", valid_values()))?;
    let location = Location::parse(url, default_path);

    let mut navigator = PrintNavigator::default();
    let pushed = set_content_in_url(content, &mut navigator, &location);
    let scroll = navigator.pushed.map(|(_, options)| options.scroll).unwrap_or(false);
    Ok((pushed, content, scroll))
}

fn valid_values() -> String {
    ContentType::URL_VALUES
        .iter()
        .map(ContentType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
