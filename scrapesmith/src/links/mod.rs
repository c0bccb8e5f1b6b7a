//! Link harvesting from sample documents.

mod harvester;

pub use harvester::{
    harvest_all_links, harvest_container_links, resolve_href, HarvestReport, LinkCandidate,
    LinkWarning, ANCHOR_SELECTOR,
};
