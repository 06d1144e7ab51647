use std::future::Future;
use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

/// Side effect returned by a reducer. The owning [`Store`](super::Store)
/// drives these: follow-up actions are re-enqueued, futures are spawned and
/// their output fed back as a terminal action, timers are named so that
/// re-arming one replaces the previous instance.
pub enum Effect<Action> {
    None,
    Action(Action),
    Future(BoxFuture<'static, Action>),
    Timer {
        delay: Duration,
        action: Action,
        id: String,
    },
    CancelTimer(String),
    Multiple(Vec<Effect<Action>>),
}

impl<Action: Send + 'static> Effect<Action> {
    pub const NONE: Self = Effect::None;

    pub fn action(action: Action) -> Self {
        Effect::Action(action)
    }

    /// Run `future` off the reduce loop and map its output into the terminal
    /// action. The pending phase has already been applied by the time the
    /// store sees this effect, so the terminal action can never overtake it.
    pub fn future<T, F, M>(future: F, map: M) -> Self
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        M: FnOnce(T) -> Action + Send + 'static,
    {
        Effect::Future(async move { map(future.await) }.boxed())
    }

    /// Deliver `action` after `delay`. Arming a timer with an id that is
    /// already scheduled aborts the earlier one; dropping the store aborts
    /// them all.
    pub fn timer(delay: Duration, action: Action, id: impl AsRef<str>) -> Self {
        Effect::Timer {
            delay,
            action,
            id: id.as_ref().to_string(),
        }
    }

    pub fn cancel_timer(id: impl AsRef<str>) -> Self {
        Effect::CancelTimer(id.as_ref().to_string())
    }

    pub fn merge2(a: Self, b: Self) -> Self {
        Effect::Multiple(vec![a, b])
    }
}

impl<Action: std::fmt::Debug> std::fmt::Debug for Effect<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Action(action) => f.debug_tuple("Action").field(action).finish(),
            Self::Future(_) => f.debug_tuple("Future").finish(),
            Self::Timer { delay, action, id } => f
                .debug_struct("Timer")
                .field("delay", delay)
                .field("action", action)
                .field("id", id)
                .finish(),
            Self::CancelTimer(id) => f.debug_tuple("CancelTimer").field(id).finish(),
            Self::Multiple(effects) => f.debug_tuple("Multiple").field(effects).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_maps_output_into_action() {
        let effect: Effect<String> = Effect::future(async { 2 + 2 }, |n| format!("got {n}"));
        let Effect::Future(future) = effect else {
            panic!("expected a future effect");
        };
        assert_eq!(tokio_test::block_on(future), "got 4");
    }

    #[test]
    fn merge_keeps_order() {
        let effect: Effect<u8> = Effect::merge2(Effect::action(1), Effect::action(2));
        let Effect::Multiple(effects) = effect else {
            panic!("expected a multiple effect");
        };
        assert!(matches!(effects[0], Effect::Action(1)));
        assert!(matches!(effects[1], Effect::Action(2)));
    }
}
