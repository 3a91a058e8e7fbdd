pub mod import;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedSeed {
    pub name: String,
    pub url: String,
}

impl FeedSeed {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedDescriptor {
    pub id: usize,
    pub name: String,
    pub url: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("feed registry is empty")]
    Empty,
    #[error("feed at position {0} has an empty name")]
    EmptyName(usize),
    #[error("feed at position {0} has an empty url")]
    EmptyUrl(usize),
}

const BUILTIN_FEEDS: [(&str, &str); 4] = [
    ("Udacity Blog", "http://blog.udacity.com/feed"),
    ("CSS Tricks", "http://feeds.feedburner.com/CssTricks"),
    ("HTML5 Rocks", "http://feeds.feedburner.com/html5rocks"),
    (
        "Linear Digressions",
        "http://feeds.feedburner.com/udacity-linear-digressions",
    ),
];

/// Ordered feed list. Ids are positions and never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRegistry {
    feeds: Vec<FeedDescriptor>,
}

impl FeedRegistry {
    pub fn builtin() -> Self {
        Self {
            feeds: BUILTIN_FEEDS
                .iter()
                .enumerate()
                .map(|(id, (name, url))| FeedDescriptor {
                    id,
                    name: name.to_string(),
                    url: url.to_string(),
                })
                .collect(),
        }
    }

    pub fn from_seeds(seeds: Vec<FeedSeed>) -> Result<Self, RegistryError> {
        if seeds.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut feeds = Vec::with_capacity(seeds.len());
        for (id, seed) in seeds.into_iter().enumerate() {
            let name = seed.name.trim();
            let url = seed.url.trim();
            if name.is_empty() {
                return Err(RegistryError::EmptyName(id));
            }
            if url.is_empty() {
                return Err(RegistryError::EmptyUrl(id));
            }
            feeds.push(FeedDescriptor {
                id,
                name: name.to_string(),
                url: url.to_string(),
            });
        }

        Ok(Self { feeds })
    }

    pub fn get(&self, id: usize) -> Option<&FeedDescriptor> {
        self.feeds.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedDescriptor> {
        self.feeds.iter()
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_feeds_are_defined() {
        let registry = FeedRegistry::builtin();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn builtin_feeds_have_urls_and_names() {
        for feed in FeedRegistry::builtin().iter() {
            assert!(!feed.url.is_empty(), "feed {} has no url", feed.id);
            assert!(!feed.name.is_empty(), "feed {} has no name", feed.id);
        }
    }

    #[test]
    fn ids_follow_registry_order() {
        let registry = FeedRegistry::from_seeds(vec![
            FeedSeed::new("A", "http://a"),
            FeedSeed::new("B", "http://b"),
            FeedSeed::new("C", "http://c"),
        ])
        .expect("seeds are valid");

        let ids: Vec<usize> = registry.iter().map(|feed| feed.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(registry.get(1).map(|feed| feed.name.as_str()), Some("B"));
        assert!(registry.get(3).is_none());

        let builtin_ids: Vec<usize> = FeedRegistry::builtin().iter().map(|feed| feed.id).collect();
        assert_eq!(builtin_ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn rejects_empty_registry_and_blank_fields() {
        assert_eq!(FeedRegistry::from_seeds(Vec::new()), Err(RegistryError::Empty));
        assert_eq!(
            FeedRegistry::from_seeds(vec![
                FeedSeed::new("A", "http://a"),
                FeedSeed::new("  ", "http://b"),
            ]),
            Err(RegistryError::EmptyName(1))
        );
        assert_eq!(
            FeedRegistry::from_seeds(vec![FeedSeed::new("A", "")]),
            Err(RegistryError::EmptyUrl(0))
        );
    }
}
