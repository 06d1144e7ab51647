//! Headless store driving the action/reducer cycle.
//!
//! Reducers are pure over their state; everything asynchronous comes back as
//! an [`Effect`]. The store owns the state exclusively: readers get `with` /
//! `snapshot` access and a change subscription, writers go through
//! [`Store::dispatch`]. One task processes actions strictly in arrival
//! order, so a pending phase is always observed before its terminal phase.

mod effect;

pub use effect::Effect;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use strum_macros::Display;
use strum_macros::EnumIter;
use strum_macros::IntoStaticStr;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

pub trait Reducer: 'static {
    type Action: Send + 'static;
    type State: Send + 'static;
    type Environment: Clone + Send + Sync + 'static;

    fn reduce(
        action: Self::Action,
        state: &mut Self::State,
        environment: &Self::Environment,
    ) -> Effect<Self::Action>;

    /// Dispatched once when the store starts up.
    fn initial_action() -> Option<Self::Action> {
        None
    }
}

/// Monotonically increasing sequence for one logical request slot. The
/// initiating phase issues a number, the terminal phase carries it back;
/// anything older than the latest issue is stale and must not be applied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn issue(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.0 == seq
    }
}

/// Logical slots guarded by a [`RequestSeq`].
#[derive(IntoStaticStr, EnumIter, Display, Debug, Clone, Copy, Eq, PartialEq)]
pub enum Slot {
    Collection,
    Detail,
    Profile,
}

pub struct Store<R: Reducer> {
    shared: Arc<Shared<R>>,
    sender: flume::Sender<R::Action>,
    runtime: JoinHandle<()>,
}

struct Shared<R: Reducer> {
    state: Mutex<R::State>,
    version: watch::Sender<u64>,
    timers: Mutex<HashMap<String, AbortHandle>>,
}

impl<R: Reducer> Shared<R> {
    fn state(&self) -> MutexGuard<'_, R::State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn timers(&self) -> MutexGuard<'_, HashMap<String, AbortHandle>> {
        match self.timers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<R: Reducer> Store<R> {
    /// Spawn the reduce loop. Must be called from within a tokio runtime.
    pub fn new(initial: R::State, environment: R::Environment) -> Self {
        let (sender, receiver) = flume::unbounded();
        let (version, _) = watch::channel(0u64);
        let shared = Arc::new(Shared {
            state: Mutex::new(initial),
            version,
            timers: Mutex::new(HashMap::new()),
        });
        let runtime = tokio::spawn(run_loop::<R>(
            shared.clone(),
            environment,
            sender.clone(),
            receiver,
        ));
        if let Some(action) = R::initial_action() {
            let _ = sender.send(action);
        }
        Store {
            shared,
            sender,
            runtime,
        }
    }

    /// Enqueue an action. Never blocks; the reduce loop applies actions in
    /// the order they were dispatched.
    pub fn dispatch(&self, action: R::Action) {
        if self.sender.send(action).is_err() {
            log::error!("dispatch on a stopped store");
        }
    }

    /// Read-only access to the current state.
    pub fn with<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        f(&self.shared.state())
    }

    pub fn snapshot(&self) -> R::State
    where
        R::State: Clone,
    {
        self.with(|state| state.clone())
    }

    /// A receiver that resolves whenever a dispatched action has been
    /// reduced. The carried value is a change counter, not the state itself;
    /// read through [`Store::with`] after waking.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.shared.version.subscribe()
    }
}

impl<R: Reducer> Drop for Store<R> {
    fn drop(&mut self) {
        for (_, timer) in self.shared.timers().drain() {
            timer.abort();
        }
        self.runtime.abort();
    }
}

async fn run_loop<R: Reducer>(
    shared: Arc<Shared<R>>,
    environment: R::Environment,
    sender: flume::Sender<R::Action>,
    receiver: flume::Receiver<R::Action>,
) {
    while let Ok(action) = receiver.recv_async().await {
        let effect = {
            let mut state = shared.state();
            R::reduce(action, &mut state, &environment)
        };
        shared.version.send_modify(|version| *version += 1);
        apply_effect::<R>(effect, &shared, &sender);
    }
}

fn apply_effect<R: Reducer>(
    effect: Effect<R::Action>,
    shared: &Arc<Shared<R>>,
    sender: &flume::Sender<R::Action>,
) {
    match effect {
        Effect::None => {}
        Effect::Action(action) => {
            let _ = sender.send(action);
        }
        Effect::Future(future) => {
            let sender = sender.clone();
            tokio::spawn(async move {
                let action = future.await;
                let _ = sender.send_async(action).await;
            });
        }
        Effect::Timer { delay, action, id } => {
            let sender = sender.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = sender.send_async(action).await;
            });
            if let Some(previous) = shared.timers().insert(id, handle.abort_handle()) {
                previous.abort();
            }
        }
        Effect::CancelTimer(id) => {
            if let Some(timer) = shared.timers().remove(&id) {
                timer.abort();
            }
        }
        Effect::Multiple(effects) => {
            for effect in effects {
                apply_effect::<R>(effect, shared, sender);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Clone, Debug, Default)]
    struct TestState {
        applied: Vec<&'static str>,
        fired: usize,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Start,
        Finish,
        ArmTimer,
        CancelTimer,
        TimerFired,
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type Action = TestAction;
        type State = TestState;
        type Environment = ();

        fn reduce(
            action: TestAction,
            state: &mut TestState,
            _environment: &(),
        ) -> Effect<TestAction> {
            match action {
                TestAction::Start => {
                    state.applied.push("start");
                    Effect::future(async {}, |_| TestAction::Finish)
                }
                TestAction::Finish => {
                    state.applied.push("finish");
                    Effect::NONE
                }
                TestAction::ArmTimer => Effect::timer(
                    Duration::from_millis(50),
                    TestAction::TimerFired,
                    "test-timer",
                ),
                TestAction::CancelTimer => Effect::cancel_timer("test-timer"),
                TestAction::TimerFired => {
                    state.fired += 1;
                    Effect::NONE
                }
            }
        }
    }

    #[tokio::test]
    async fn pending_precedes_terminal() {
        let store = Store::<TestReducer>::new(TestState::default(), ());
        let mut changes = store.subscribe();
        store.dispatch(TestAction::Start);
        while store.with(|state| state.applied.len()) < 2 {
            changes.changed().await.unwrap();
        }
        assert_eq!(
            store.with(|state| state.applied.clone()),
            vec!["start", "finish"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn rearmed_timer_replaces_previous() {
        let store = Store::<TestReducer>::new(TestState::default(), ());
        let mut changes = store.subscribe();
        store.dispatch(TestAction::ArmTimer);
        store.dispatch(TestAction::ArmTimer);
        while store.with(|state| state.fired) < 1 {
            changes.changed().await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.with(|state| state.fired), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_fires() {
        let store = Store::<TestReducer>::new(TestState::default(), ());
        let mut changes = store.subscribe();
        store.dispatch(TestAction::ArmTimer);
        store.dispatch(TestAction::CancelTimer);
        while *changes.borrow_and_update() < 2 {
            changes.changed().await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(store.with(|state| state.fired), 0);
    }

    #[test]
    fn sequence_fences_stale_results() {
        let mut seq = RequestSeq::default();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn slot_labels_are_stable() {
        use strum::IntoEnumIterator;
        let labels: Vec<&'static str> = Slot::iter().map(<&'static str>::from).collect();
        assert_eq!(labels, vec!["Collection", "Detail", "Profile"]);
    }
}
