use crate::dispatcher::RequestSeq;
use crate::view_model::UserViewModel;

/// Profile slice for whichever user the view is looking at.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub user: Option<UserViewModel>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: bool,
    pub message: Option<String>,
    pub profile_seq: RequestSeq,
}
