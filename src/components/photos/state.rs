use crate::dispatcher::RequestSeq;
use crate::view_model::PhotoViewModel;

/// Photo slice owned by the store; mutated only through
/// [`reduce`](super::reduce).
///
/// `loading`, `error` and `message` are shared scalars: when operations
/// overlap, the last terminal phase to resolve wins. The list-replacing
/// fetches and the focused-photo fetch are fenced through the sequence
/// counters, so stale data can never overwrite newer data.
#[derive(Clone, Debug, Default)]
pub struct State {
    /// The active collection, most recent first for the user's own feed.
    pub photos: im::Vector<PhotoViewModel>,
    /// The photo loaded for detail view, distinct from the collection.
    pub photo: Option<PhotoViewModel>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
    /// Does not clear itself; the reducer arms a reset timer whenever it is
    /// set.
    pub message: Option<String>,
    pub collection_seq: RequestSeq,
    pub detail_seq: RequestSeq,
}
