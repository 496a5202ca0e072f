//! Futures-based fan-in over a batch of imports

use super::{AssetStore, CancellationToken, ImportOutcome, ImportRequest, LoadError, LoadedMesh};
use futures::channel::oneshot;
use futures::future::join_all;
use tracing::debug;

/// Issue every request and wait for all of them
///
/// Outcomes are returned in request order whatever order the store
/// completes them in. A store that drops a callback without calling it
/// yields [`LoadError::Cancelled`] for that request.
pub async fn import_all<S: AssetStore + ?Sized>(
    store: &mut S,
    requests: Vec<ImportRequest>,
    cancel: CancellationToken,
) -> Vec<ImportOutcome> {
    let receivers: Vec<_> = requests
        .into_iter()
        .map(|request| {
            let (tx, rx) = oneshot::channel();
            store.import_model(
                request,
                cancel.clone(),
                Box::new(move |outcome| {
                    // The receiver is gone only if the join itself was dropped
                    let _ = tx.send(outcome);
                }),
            );
            rx
        })
        .collect();

    debug!(requests = receivers.len(), "Waiting on imports");
    join_all(receivers)
        .await
        .into_iter()
        .map(|received| received.unwrap_or(Err(LoadError::Cancelled)))
        .collect()
}

/// Like [`import_all`] but stops at the first failure in request order
pub async fn try_import_all<S: AssetStore + ?Sized>(
    store: &mut S,
    requests: Vec<ImportRequest>,
    cancel: CancellationToken,
) -> Result<Vec<Vec<LoadedMesh>>, LoadError> {
    import_all(store, requests, cancel).await.into_iter().collect()
}

/// Block the current thread on [`import_all`]
///
/// The store must complete on its own (inline or on worker threads); a
/// store waiting for the caller to deliver would never finish.
pub fn import_all_blocking<S: AssetStore + ?Sized>(
    store: &mut S,
    requests: Vec<ImportRequest>,
    cancel: CancellationToken,
) -> Vec<ImportOutcome> {
    pollster::block_on(import_all(store, requests, cancel))
}
