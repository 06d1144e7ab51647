use crate::dispatcher::{Effect, Slot};
use crate::environment::model::{ApiError, Photo};
use crate::environment::Environment;
use crate::view_model::{CommentViewModel, PhotoId, PhotoViewModel, UserId};

use super::{Action, State};

/// Client-side banner for a successful publish; this is the one call whose
/// payload carries no server message.
pub const PUBLISHED_MESSAGE: &str = "Foto publicada com sucesso!";

const MESSAGE_TIMER: &str = "photos-message";

pub fn reduce(action: Action, state: &mut State, environment: &Environment) -> Effect<Action> {
    log::trace!("{action:?}");
    match action {
        Action::Publish { title, image } => {
            pending(state);
            let model = environment.model.clone();
            Effect::future(
                async move { model.publish_photo(title, image).await },
                Action::Published,
            )
        }
        Action::Published(result) => match result {
            Ok(photo) => {
                let photo = PhotoViewModel::new(&photo, &environment.config);
                state.photo = Some(photo.clone());
                state.photos.push_front(photo);
                fulfilled(state, Some(PUBLISHED_MESSAGE.to_string()), environment)
            }
            Err(error) => {
                state.photo = None;
                rejected(state, error)
            }
        },
        Action::FetchUserPhotos(user_id) => {
            pending(state);
            let seq = state.collection_seq.issue();
            let model = environment.model.clone();
            Effect::future(async move { model.user_photos(user_id.0).await }, move |r| {
                Action::FetchedUserPhotos(r, seq)
            })
        }
        Action::FetchedUserPhotos(result, seq) => {
            if !state.collection_seq.is_current(seq) {
                log::debug!("discarding stale {} result", Slot::Collection);
                return Effect::NONE;
            }
            apply_collection(state, result, environment)
        }
        Action::Delete(id) => {
            pending(state);
            let model = environment.model.clone();
            Effect::future(async move { model.delete_photo(id.0).await }, Action::Deleted)
        }
        Action::Deleted(result) => match result {
            Ok(payload) => {
                state.photos.retain(|photo| photo.id.0 != payload.id);
                fulfilled(state, Some(payload.message), environment)
            }
            Err(error) => {
                state.photo = None;
                rejected(state, error)
            }
        },
        Action::Update(id, title) => {
            pending(state);
            let model = environment.model.clone();
            Effect::future(
                async move { model.update_photo(id.0, title).await },
                Action::Updated,
            )
        }
        Action::Updated(result) => match result {
            Ok(payload) => {
                // An id missing from the collection is a silent no-op; the
                // in-memory list may lag behind the server.
                let updated = PhotoId(payload.photo.id.clone());
                for photo in state.photos.iter_mut() {
                    if photo.id == updated {
                        photo.title = payload.photo.title.clone();
                    }
                }
                fulfilled(state, Some(payload.message), environment)
            }
            Err(error) => {
                state.photo = None;
                rejected(state, error)
            }
        },
        Action::FetchPhoto(id) => {
            pending(state);
            let seq = state.detail_seq.issue();
            let model = environment.model.clone();
            Effect::future(async move { model.single_photo(id.0).await }, move |r| {
                Action::FetchedPhoto(r, seq)
            })
        }
        Action::FetchedPhoto(result, seq) => {
            if !state.detail_seq.is_current(seq) {
                log::debug!("discarding stale {} result", Slot::Detail);
                return Effect::NONE;
            }
            match result {
                Ok(photo) => {
                    state.photo = Some(PhotoViewModel::new(&photo, &environment.config));
                    fulfilled(state, None, environment)
                }
                Err(error) => rejected(state, error),
            }
        }
        Action::Like(id) => {
            pending(state);
            let model = environment.model.clone();
            Effect::future(async move { model.like(id.0).await }, Action::Liked)
        }
        Action::Liked(result) => match result {
            Ok(payload) => {
                let photo_id = PhotoId(payload.photo_id.clone());
                let user_id = UserId(payload.user_id.clone());
                // Appended unconditionally: liking twice yields two entries,
                // duplicate prevention is the caller's job.
                if let Some(photo) = state.photo.as_mut() {
                    if photo.id == photo_id {
                        photo.likes.push(user_id.clone());
                    }
                }
                for photo in state.photos.iter_mut() {
                    if photo.id == photo_id {
                        photo.likes.push(user_id.clone());
                    }
                }
                fulfilled(state, Some(payload.message), environment)
            }
            Err(error) => rejected(state, error),
        },
        Action::Comment(id, text) => {
            pending(state);
            let model = environment.model.clone();
            Effect::future(
                async move { model.comment(id.0, text).await },
                Action::Commented,
            )
        }
        Action::Commented(result) => match result {
            Ok(payload) => {
                // Only the focused photo carries comments; collection entries
                // are left alone.
                if let Some(photo) = state.photo.as_mut() {
                    photo
                        .comments
                        .push(CommentViewModel::new(&payload.comment, &environment.config));
                }
                fulfilled(state, Some(payload.message), environment)
            }
            Err(error) => rejected(state, error),
        },
        Action::FetchAll => {
            pending(state);
            let seq = state.collection_seq.issue();
            let model = environment.model.clone();
            Effect::future(async move { model.photos().await }, move |r| {
                Action::FetchedAll(r, seq)
            })
        }
        Action::FetchedAll(result, seq) => {
            if !state.collection_seq.is_current(seq) {
                log::debug!("discarding stale {} result", Slot::Collection);
                return Effect::NONE;
            }
            apply_collection(state, result, environment)
        }
        Action::Search(query) => {
            pending(state);
            let seq = state.collection_seq.issue();
            let model = environment.model.clone();
            Effect::future(async move { model.search_photos(query).await }, move |r| {
                Action::Searched(r, seq)
            })
        }
        Action::Searched(result, seq) => {
            if !state.collection_seq.is_current(seq) {
                log::debug!("discarding stale {} result", Slot::Collection);
                return Effect::NONE;
            }
            apply_collection(state, result, environment)
        }
        Action::ResetMessage => {
            state.message = None;
            Effect::NONE
        }
    }
}

fn pending(state: &mut State) {
    state.loading = true;
    state.error = None;
}

fn fulfilled(state: &mut State, message: Option<String>, environment: &Environment) -> Effect<Action> {
    state.loading = false;
    state.error = None;
    state.success = true;
    match message {
        Some(message) => {
            state.message = Some(message);
            Effect::timer(
                environment.config.message_delay,
                Action::ResetMessage,
                MESSAGE_TIMER,
            )
        }
        None => Effect::NONE,
    }
}

fn rejected(state: &mut State, error: ApiError) -> Effect<Action> {
    state.loading = false;
    state.error = Some(error.to_string());
    Effect::NONE
}

fn apply_collection(
    state: &mut State,
    result: Result<Vec<Photo>, ApiError>,
    environment: &Environment,
) -> Effect<Action> {
    match result {
        Ok(photos) => {
            state.photos = photos
                .iter()
                .map(|photo| PhotoViewModel::new(photo, &environment.config))
                .collect();
            fulfilled(state, None, environment)
        }
        Err(error) => rejected(state, error),
    }
}
