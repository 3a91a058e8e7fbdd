use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use super::{FeedRegistry, FeedSeed, RegistryError};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("cannot read feeds file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON feeds file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum JsonFeedItem {
    Url(String),
    Object { url: String, name: Option<String> },
}

pub fn parse_json_seeds(input: &str) -> Result<Vec<FeedSeed>, ImportError> {
    let items: Vec<JsonFeedItem> = serde_json::from_str(input)?;
    let seeds = items
        .into_iter()
        .map(|item| match item {
            JsonFeedItem::Url(url) => FeedSeed {
                name: url.clone(),
                url,
            },
            JsonFeedItem::Object { url, name } => FeedSeed {
                name: name
                    .filter(|value| !value.trim().is_empty())
                    .unwrap_or_else(|| url.clone()),
                url,
            },
        })
        .collect();
    Ok(seeds)
}

pub fn parse_url_list(input: &str) -> Vec<FeedSeed> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| line.starts_with("http://") || line.starts_with("https://"))
        .map(|line| FeedSeed::new(line, line))
        .collect()
}

/// Keeps the first seed for every normalized url.
pub fn dedup_seeds(seeds: Vec<FeedSeed>) -> Vec<FeedSeed> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(seeds.len());
    for seed in seeds {
        if seen.insert(normalize_url(&seed.url)) {
            kept.push(seed);
        } else {
            tracing::warn!(feed_url = %seed.url, "skipping duplicate feed");
        }
    }
    kept
}

pub fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_lowercase()
}

pub fn parse_feeds(content: &str) -> Result<Vec<FeedSeed>, ImportError> {
    if content.trim_start().starts_with('[') {
        parse_json_seeds(content)
    } else {
        Ok(parse_url_list(content))
    }
}

pub fn load_registry(path: &Path) -> Result<FeedRegistry, ImportError> {
    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let seeds = if is_json {
        parse_json_seeds(&content)?
    } else {
        parse_feeds(&content)?
    };
    let registry = FeedRegistry::from_seeds(dedup_seeds(seeds))?;
    tracing::info!(path = %path.display(), feeds = registry.len(), "loaded feeds file");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_url_list() {
        let input = r#"
            # comment
            http://blog.udacity.com/feed
            https://example.com/atom.xml
            not-a-url
        "#;
        let seeds = parse_url_list(input);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].url, "http://blog.udacity.com/feed");
        assert_eq!(seeds[0].name, "http://blog.udacity.com/feed");
    }

    #[test]
    fn parses_json_seeds_from_string_and_object() {
        let json = r#"
            [
              "https://example.com/feed.xml",
              { "url": "https://blog.example.com/rss", "name": "Blog" },
              { "url": "https://other.example.com/rss", "name": "  " }
            ]
        "#;

        let seeds = parse_json_seeds(json).expect("json should parse");
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].name, "https://example.com/feed.xml");
        assert_eq!(seeds[1].name, "Blog");
        assert_eq!(seeds[2].name, "https://other.example.com/rss");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let seeds = vec![
            FeedSeed::new("A", "https://example.com/feed/"),
            FeedSeed::new("B", "https://another.com/feed"),
            FeedSeed::new("A again", "HTTPS://EXAMPLE.COM/feed"),
        ];
        let kept = dedup_seeds(seeds);
        let names: Vec<&str> = kept.iter().map(|seed| seed.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn loads_registry_from_json_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile should be created");
        write!(
            file,
            r#"[{{"name": "A", "url": "http://a"}}, {{"name": "B", "url": "http://b"}}]"#
        )
        .expect("tempfile should be writable");

        let registry = load_registry(file.path()).expect("registry should load");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).map(|feed| feed.url.as_str()), Some("http://b"));
    }

    #[test]
    fn empty_url_list_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile should be created");
        writeln!(file, "# nothing here").expect("tempfile should be writable");

        let error = load_registry(file.path()).expect_err("empty registry must fail");
        assert!(matches!(error, ImportError::Registry(RegistryError::Empty)));
    }
}
