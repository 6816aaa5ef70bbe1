//! Passive advisory checks of static discovery surfaces.
//!
//! AI crawlers and traditional search engines discover content through
//! surfaces that need no active notification: the crawl policy file, the
//! sitemap, syndication feeds, and internal links. This check surfaces the
//! configured state of those surfaces to operators. It is synchronous, makes
//! no network calls, and never affects the report's overall success.

use log::{debug, warn};

use crate::config::AdvisoryConfig;
use crate::report::AdvisoryStatus;

/// Produces the advisory record for inclusion in the report, logging a
/// warning for each surface the configuration marks unhealthy.
pub fn check(config: &AdvisoryConfig) -> AdvisoryStatus {
    let status = AdvisoryStatus {
        robots_policy_ok: config.robots_policy_ok,
        sitemap_current: config.sitemap_current,
        feed_available: config.feed_available,
        internal_links_ok: config.internal_links_ok,
    };

    if !status.robots_policy_ok {
        warn!("Advisory: crawl policy file does not allow the expected crawlers");
    }
    if !status.sitemap_current {
        warn!("Advisory: sitemap freshness marker is stale");
    }
    if !status.feed_available {
        warn!("Advisory: syndication feed is unavailable");
    }
    if !status.internal_links_ok {
        warn!("Advisory: internal-link health marker is not set");
    }
    debug!(
        "Advisory check: robots={} sitemap={} feed={} links={}",
        status.robots_policy_ok,
        status.sitemap_current,
        status.feed_available,
        status.internal_links_ok
    );

    status
}
