use crate::environment::model::{
    ApiError, CommentPayload, DeletePayload, ImageUpload, LikePayload, Photo, UpdatePayload,
};
use crate::view_model::{PhotoId, UserId};

/// One initiating/terminal pair per remote operation. The initiating arm is
/// the pending phase; the terminal arm carries the fulfilled or rejected
/// result. Fenced terminals also carry the sequence they were issued with.
#[derive(Clone)]
pub enum Action {
    Publish { title: String, image: ImageUpload },
    Published(Result<Photo, ApiError>),
    FetchUserPhotos(UserId),
    FetchedUserPhotos(Result<Vec<Photo>, ApiError>, u64),
    Delete(PhotoId),
    Deleted(Result<DeletePayload, ApiError>),
    Update(PhotoId, String),
    Updated(Result<UpdatePayload, ApiError>),
    FetchPhoto(PhotoId),
    FetchedPhoto(Result<Photo, ApiError>, u64),
    Like(PhotoId),
    Liked(Result<LikePayload, ApiError>),
    Comment(PhotoId, String),
    Commented(Result<CommentPayload, ApiError>),
    FetchAll,
    FetchedAll(Result<Vec<Photo>, ApiError>, u64),
    Search(String),
    Searched(Result<Vec<Photo>, ApiError>, u64),
    ResetMessage,
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Publish { title, .. } => {
                f.debug_struct("Publish").field("title", title).finish()
            }
            Self::Published(_) => f.debug_tuple("Published").finish(),
            Self::FetchUserPhotos(id) => f.debug_tuple("FetchUserPhotos").field(id).finish(),
            Self::FetchedUserPhotos(_, seq) => {
                f.debug_tuple("FetchedUserPhotos").field(seq).finish()
            }
            Self::Delete(id) => f.debug_tuple("Delete").field(id).finish(),
            Self::Deleted(_) => f.debug_tuple("Deleted").finish(),
            Self::Update(id, title) => f.debug_tuple("Update").field(id).field(title).finish(),
            Self::Updated(_) => f.debug_tuple("Updated").finish(),
            Self::FetchPhoto(id) => f.debug_tuple("FetchPhoto").field(id).finish(),
            Self::FetchedPhoto(_, seq) => f.debug_tuple("FetchedPhoto").field(seq).finish(),
            Self::Like(id) => f.debug_tuple("Like").field(id).finish(),
            Self::Liked(_) => f.debug_tuple("Liked").finish(),
            Self::Comment(id, _) => f.debug_tuple("Comment").field(id).finish(),
            Self::Commented(_) => f.debug_tuple("Commented").finish(),
            Self::FetchAll => write!(f, "FetchAll"),
            Self::FetchedAll(_, seq) => f.debug_tuple("FetchedAll").field(seq).finish(),
            Self::Search(query) => f.debug_tuple("Search").field(query).finish(),
            Self::Searched(_, seq) => f.debug_tuple("Searched").field(seq).finish(),
            Self::ResetMessage => write!(f, "ResetMessage"),
        }
    }
}
