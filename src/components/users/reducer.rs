use crate::dispatcher::{Effect, Slot};
use crate::environment::model::ApiError;
use crate::environment::Environment;
use crate::view_model::UserViewModel;

use super::{Action, State};

pub const PROFILE_UPDATED_MESSAGE: &str = "Usuário atualizado com sucesso!";

const MESSAGE_TIMER: &str = "users-message";

pub fn reduce(action: Action, state: &mut State, environment: &Environment) -> Effect<Action> {
    log::trace!("{action:?}");
    match action {
        Action::FetchUser(id) => {
            state.loading = true;
            state.error = None;
            let seq = state.profile_seq.issue();
            let model = environment.model.clone();
            Effect::future(async move { model.user_details(id.0).await }, move |r| {
                Action::FetchedUser(r, seq)
            })
        }
        Action::FetchedUser(result, seq) => {
            if !state.profile_seq.is_current(seq) {
                log::debug!("discarding stale {} result", Slot::Profile);
                return Effect::NONE;
            }
            match result {
                Ok(user) => {
                    state.user = Some(UserViewModel::new(&user, &environment.config));
                    fulfilled(state);
                    Effect::NONE
                }
                Err(error) => rejected(state, error),
            }
        }
        Action::UpdateProfile(update) => {
            state.loading = true;
            state.error = None;
            let model = environment.model.clone();
            Effect::future(
                async move { model.update_profile(update).await },
                Action::UpdatedProfile,
            )
        }
        Action::UpdatedProfile(result) => match result {
            Ok(user) => {
                state.user = Some(UserViewModel::new(&user, &environment.config));
                fulfilled(state);
                state.message = Some(PROFILE_UPDATED_MESSAGE.to_string());
                Effect::timer(
                    environment.config.message_delay,
                    Action::ResetMessage,
                    MESSAGE_TIMER,
                )
            }
            Err(error) => rejected(state, error),
        },
        Action::ResetMessage => {
            state.message = None;
            Effect::NONE
        }
    }
}

fn fulfilled(state: &mut State) {
    state.loading = false;
    state.error = None;
    state.success = true;
}

fn rejected(state: &mut State, error: ApiError) -> Effect<Action> {
    state.loading = false;
    state.error = Some(error.to_string());
    Effect::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::model::{ProfileUpdate, User};
    use crate::environment::Config;
    use crate::view_model::UserId;

    fn environment() -> Environment {
        Environment::new(Config::default(), Some("test-token".into()))
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            bio: Some("Oi!".into()),
            profile_image: Some("ana.png".into()),
            ..Default::default()
        }
    }

    #[test]
    fn fetch_user_sets_profile() {
        let environment = environment();
        let mut state = State::default();
        reduce(Action::FetchUser(UserId("u1".into())), &mut state, &environment);
        assert!(state.loading);
        reduce(
            Action::FetchedUser(Ok(user("u1", "Ana")), 1),
            &mut state,
            &environment,
        );
        assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
        assert_eq!(
            state.user.as_ref().and_then(|u| u.profile_image_url.clone()),
            Some("http://localhost:5000/uploads/users/ana.png".into())
        );
        assert!(!state.loading);
    }

    #[test]
    fn stale_profile_result_is_discarded() {
        let environment = environment();
        let mut state = State::default();
        reduce(Action::FetchUser(UserId("u1".into())), &mut state, &environment);
        reduce(Action::FetchUser(UserId("u2".into())), &mut state, &environment);
        reduce(
            Action::FetchedUser(Ok(user("u1", "Ana")), 1),
            &mut state,
            &environment,
        );
        assert_eq!(state.user, None);
        reduce(
            Action::FetchedUser(Ok(user("u2", "Bia")), 2),
            &mut state,
            &environment,
        );
        assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Bia"));
    }

    #[test]
    fn update_profile_replaces_user_and_sets_message() {
        let environment = environment();
        let mut state = State {
            user: Some(UserViewModel::new(&user("u1", "Ana"), &environment.config)),
            ..Default::default()
        };
        let effect = reduce(
            Action::UpdatedProfile(Ok(user("u1", "Ana Clara"))),
            &mut state,
            &environment,
        );
        assert_eq!(
            state.user.as_ref().map(|u| u.name.as_str()),
            Some("Ana Clara")
        );
        assert_eq!(state.message.as_deref(), Some(PROFILE_UPDATED_MESSAGE));
        assert!(matches!(effect, Effect::Timer { .. }));
    }

    #[test]
    fn rejected_update_keeps_current_user() {
        let environment = environment();
        let mut state = State {
            user: Some(UserViewModel::new(&user("u1", "Ana"), &environment.config)),
            loading: true,
            ..Default::default()
        };
        reduce(
            Action::UpdatedProfile(Err(ApiError::Domain("Nome inválido.".into()))),
            &mut state,
            &environment,
        );
        assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
        assert_eq!(state.error.as_deref(), Some("Nome inválido."));
        assert!(!state.loading);
    }

    #[test]
    fn update_profile_pending_builds_a_future() {
        let environment = environment();
        let mut state = State::default();
        let effect = reduce(
            Action::UpdateProfile(ProfileUpdate {
                name: Some("Ana".into()),
                ..Default::default()
            }),
            &mut state,
            &environment,
        );
        assert!(state.loading);
        assert!(matches!(effect, Effect::Future(_)));
    }
}
