//! ATS platform detection.
//!
//! The detector is an ordered registry of (predicate, platform, strategy)
//! entries evaluated against the resolved page URL. First match wins; no
//! match falls through to the generic strategy. Adding support for a new
//! ATS is one [`PlatformRegistry::register`] call.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::strategy::{FillStrategy, GenericStrategy, GreenhouseStrategy, LeverStrategy};

/// Known ATS variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Greenhouse,
    Lever,
    Generic,
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

struct Entry {
    predicate: Predicate,
    platform: Platform,
    strategy: Arc<dyn FillStrategy>,
}

/// Ordered (predicate, platform, strategy) registry.
pub struct PlatformRegistry {
    entries: Vec<Entry>,
    fallback: Arc<dyn FillStrategy>,
}

impl PlatformRegistry {
    /// The built-in registry: Greenhouse, then Lever, falling back to the
    /// generic label-probing strategy.
    pub fn standard() -> Self {
        let mut registry = Self {
            entries: Vec::new(),
            fallback: Arc::new(GenericStrategy),
        };
        registry.register(
            Box::new(is_greenhouse),
            Platform::Greenhouse,
            Arc::new(GreenhouseStrategy),
        );
        registry.register(Box::new(is_lever), Platform::Lever, Arc::new(LeverStrategy));
        registry
    }

    /// Append an entry. Evaluation order is registration order.
    pub fn register(
        &mut self,
        predicate: Predicate,
        platform: Platform,
        strategy: Arc<dyn FillStrategy>,
    ) {
        self.entries.push(Entry {
            predicate,
            platform,
            strategy,
        });
    }

    /// Resolve a URL to its platform and fill strategy.
    pub fn resolve(&self, resolved_url: &str) -> (Platform, Arc<dyn FillStrategy>) {
        for entry in &self.entries {
            if (entry.predicate)(resolved_url) {
                return (entry.platform, entry.strategy.clone());
            }
        }
        (Platform::Generic, self.fallback.clone())
    }

    /// Classify a resolved URL. Pure function of the URL string.
    pub fn detect(&self, resolved_url: &str) -> Platform {
        self.resolve(resolved_url).0
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{domain}"))
}

/// Greenhouse-hosted boards, plus embedded forms carrying a `gh_jid` job id
/// parameter on the employer's own domain.
fn is_greenhouse(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    if url
        .host_str()
        .is_some_and(|h| host_matches(h, "greenhouse.io"))
    {
        return true;
    }
    url.query_pairs().any(|(key, _)| key == "gh_jid")
}

fn is_lever(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    url.host_str().is_some_and(|h| host_matches(h, "lever.co"))
}
