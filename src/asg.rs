//! Auto Scaling Group discovery.

pub mod client;
pub mod matcher;
pub mod projector;
pub mod types;

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use client::GroupSource;
use projector::MatchResult;
use types::SearchTags;

/// Result of a find invocation, serialized as `{"as_groups": [...]}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindResult {
    pub as_groups: Vec<MatchResult>,
}

/// Fetch all groups once, keep the ones carrying every search tag, and project them.
pub async fn find<S: GroupSource>(source: &S, search: &SearchTags) -> Result<FindResult> {
    let groups = source.fetch_groups().await?;

    let as_groups: Vec<MatchResult> = matcher::match_groups(&groups, search)
        .into_iter()
        .map(projector::project)
        .collect();

    info!(
        "Matched {} of {} Auto Scaling Groups",
        as_groups.len(),
        groups.len()
    );

    Ok(FindResult { as_groups })
}
