use crate::environment::model::{ApiError, ProfileUpdate, User};
use crate::view_model::UserId;

#[derive(Clone)]
pub enum Action {
    FetchUser(UserId),
    FetchedUser(Result<User, ApiError>, u64),
    UpdateProfile(ProfileUpdate),
    UpdatedProfile(Result<User, ApiError>),
    ResetMessage,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchUser(id) => f.debug_tuple("FetchUser").field(id).finish(),
            Self::FetchedUser(_, seq) => f.debug_tuple("FetchedUser").field(seq).finish(),
            Self::UpdateProfile(_) => f.debug_tuple("UpdateProfile").finish(),
            Self::UpdatedProfile(_) => f.debug_tuple("UpdatedProfile").finish(),
            Self::ResetMessage => write!(f, "ResetMessage"),
        }
    }
}
