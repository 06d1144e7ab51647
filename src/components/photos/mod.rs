mod action;
mod reducer;
mod state;

pub use action::Action;
pub use reducer::{reduce, PUBLISHED_MESSAGE};
pub use state::State;

use crate::dispatcher::{Effect, Reducer};
use crate::environment::Environment;

pub struct PhotosReducer;

impl Reducer for PhotosReducer {
    type Action = action::Action;

    type State = state::State;

    type Environment = Environment;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<Self::Action> {
        reducer::reduce(action, state, environment)
    }
}
