//! Two-phase fetch for one epoch
//!
//! Phase one issues the primary search and commits the matches. Phase two
//! fans out one detail request per match and commits the resolved links.
//! Each phase suspends on exactly one future raced against the epoch token,
//! and each ends with a single epoch-checked commit.

use futures::future::try_join_all;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::state::{Phase, SearchState, StateStore};
use super::stats::ControllerStats;
use crate::api::RecipeSource;
use crate::error::{LookupError, LookupResult};

/// Everything one epoch's pipeline borrows from the controller
pub(crate) struct EpochContext<'a, S> {
    pub source: &'a S,
    pub store: &'a StateStore,
    pub stats: &'a ControllerStats,
    pub token: &'a CancellationToken,
    pub epoch: u64,
    pub limit: usize,
}

impl<S> EpochContext<'_, S> {
    fn commit(&self, update: impl FnOnce(&mut SearchState)) -> LookupResult<()> {
        if self.token.is_cancelled() || !self.store.commit(self.epoch, update) {
            return Err(LookupError::Cancelled);
        }
        Ok(())
    }
}

/// Race `future` against the epoch token
async fn cancellable<T>(
    token: &CancellationToken,
    future: impl Future<Output = LookupResult<T>>,
) -> LookupResult<T> {
    tokio::select! {
        biased;
        () = token.cancelled() => Err(LookupError::Cancelled),
        result = future => result,
    }
}

/// Run both phases for `query`; returns the number of matches committed
pub(crate) async fn run_epoch<S: RecipeSource>(
    ctx: &EpochContext<'_, S>,
    query: &str,
) -> LookupResult<usize> {
    let epoch = ctx.epoch;

    ControllerStats::record(&ctx.stats.searches_issued, 1);
    debug!(epoch, query, limit = ctx.limit, "searching");
    let matches = cancellable(ctx.token, ctx.source.search(query, ctx.limit)).await?;

    let ids: Vec<u64> = matches.iter().map(|m| m.id).collect();
    let next_phase = if ids.is_empty() {
        Phase::Settled
    } else {
        Phase::FetchingDetails
    };
    ctx.commit(|state| {
        state.results = matches;
        state.links.clear();
        state.highlight = None;
        state.phase = next_phase;
    })?;
    info!(epoch, query, count = ids.len(), "search results committed");

    if ids.is_empty() {
        return Ok(0);
    }

    ControllerStats::record(&ctx.stats.detail_requests_issued, ids.len());
    let details = try_join_all(ids.iter().map(|&id| ctx.source.information(id)));
    let details = cancellable(ctx.token, details).await?;

    let links: Vec<Option<String>> = details.into_iter().map(|d| d.source_url).collect();
    let resolved = links.iter().flatten().count();
    ctx.commit(|state| {
        state.links = links;
        state.phase = Phase::Settled;
    })?;
    info!(epoch, resolved, total = ids.len(), "source links committed");

    Ok(ids.len())
}
