use std::cell::Cell;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use std::rc::Weak;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use super::error::StoreError;
use super::middleware::Chain;
use super::middleware::Middleware;

pub const DEFAULT_MAX_PENDING_ACTIONS: usize = 64;

pub trait Reducer<S, A> {
    fn reduce(&self, action: &A, state: &Rc<S>) -> Rc<S>;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&A, &Rc<S>) -> Rc<S>,
{
    fn reduce(&self, action: &A, state: &Rc<S>) -> Rc<S> {
        self(action, state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub max_pending_actions: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_pending_actions: DEFAULT_MAX_PENDING_ACTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MiddlewareId(pub(crate) u64);

type Listener<S> = Rc<RefCell<dyn FnMut(&Rc<S>)>>;

struct MiddlewareEntry<S, A> {
    id: MiddlewareId,
    middleware: Rc<dyn Middleware<S, A>>,
}

struct StoreInner<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Box<dyn Reducer<S, A>>,
    middleware: RefCell<Vec<MiddlewareEntry<S, A>>>,
    listeners: RefCell<Vec<(u64, Listener<S>)>>,
    pending: RefCell<VecDeque<A>>,
    dispatching: Cell<bool>,
    next_id: Cell<u64>,
    is_owner_thread: Box<dyn Fn() -> bool>,
    config: StoreConfig,
}

impl<S, A> StoreInner<S, A> {
    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id.saturating_add(1));
        id
    }
}

pub struct Store<S, A> {
    inner: Rc<StoreInner<S, A>>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("middleware", &self.inner.middleware.borrow().len())
            .field("listeners", &self.inner.listeners.borrow().len())
            .field("pending", &self.inner.pending.borrow().len())
            .field("dispatching", &self.inner.dispatching.get())
            .finish()
    }
}

impl<S, A> Store<S, A>
where
    S: PartialEq + 'static,
    A: fmt::Debug + 'static,
{
    pub fn new(initial_state: S, reducer: impl Reducer<S, A> + 'static) -> Self {
        Self::with_config(initial_state, reducer, StoreConfig::default())
    }

    pub fn with_config(
        initial_state: S,
        reducer: impl Reducer<S, A> + 'static,
        config: StoreConfig,
    ) -> Self {
        let owner = std::thread::current().id();
        Self::with_owner_check(initial_state, reducer, config, move || {
            std::thread::current().id() == owner
        })
    }

    pub fn with_owner_check(
        initial_state: S,
        reducer: impl Reducer<S, A> + 'static,
        config: StoreConfig,
        is_owner_thread: impl Fn() -> bool + 'static,
    ) -> Self {
        let mut config = config;
        if config.max_pending_actions == 0 {
            warn!("max_pending_actions of 0 would refuse every dispatch, using 1");
            config.max_pending_actions = 1;
        }
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(initial_state)),
                reducer: Box::new(reducer),
                middleware: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                next_id: Cell::new(1),
                is_owner_thread: Box::new(is_owner_thread),
                config,
            }),
        }
    }

    pub fn state(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    pub fn middleware_count(&self) -> usize {
        self.inner.middleware.borrow().len()
    }

    /// A dispatch made while another action is in flight is queued and
    /// returns `Ok(())`; the outermost call drains the queue and reports the
    /// first error.
    pub fn dispatch(&self, action: A) -> Result<(), StoreError> {
        if !(self.inner.is_owner_thread)() {
            warn!(?action, "dispatch refused: not on owner thread");
            return Err(StoreError::WrongThread);
        }
        self.enqueue(action)?;
        if self.inner.dispatching.get() {
            return Ok(());
        }

        let _guard = DispatchGuard::enter(&self.inner);
        self.drain()
    }

    fn drain(&self) -> Result<(), StoreError> {
        let mut first_error = None;
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            if let Err(err) = self.process(action) {
                warn!(error = %err, "action aborted");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn add_middleware(&self, middleware: Rc<dyn Middleware<S, A>>) -> MiddlewareId {
        let id = MiddlewareId(self.inner.allocate_id());
        self.inner
            .middleware
            .borrow_mut()
            .push(MiddlewareEntry { id, middleware });
        debug!(middleware = id.0, "middleware added");
        id
    }

    // An action already in the chain keeps the chain it started with.
    pub fn remove_middleware(&self, id: MiddlewareId) -> bool {
        let mut entries = self.inner.middleware.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        if removed {
            debug!(middleware = id.0, "middleware removed");
        }
        removed
    }

    /// Registers `listener` and replays the current state to it. Actions the
    /// listener dispatches during the replay run before `subscribe` returns.
    pub fn subscribe(&self, listener: impl FnMut(&Rc<S>) + 'static) -> Subscription {
        let id = self.inner.allocate_id();
        let listener: Listener<S> = Rc::new(RefCell::new(listener));
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::clone(&listener)));

        let current = self.state();
        if self.inner.dispatching.get() {
            (&mut *listener.borrow_mut())(&current);
        } else {
            let _guard = DispatchGuard::enter(&self.inner);
            {
                let mut callback = listener.borrow_mut();
                (&mut *callback)(&current);
            }
            if let Err(err) = self.drain() {
                warn!(error = %err, "action dispatched during replay failed");
            }
        }

        let weak: Weak<StoreInner<S, A>> = Rc::downgrade(&self.inner);
        Subscription {
            dispose: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner
                        .listeners
                        .borrow_mut()
                        .retain(|(listener_id, _)| *listener_id != id);
                }
            })),
        }
    }

    fn enqueue(&self, action: A) -> Result<(), StoreError> {
        let mut pending = self.inner.pending.borrow_mut();
        let capacity = self.inner.config.max_pending_actions;
        if pending.len() >= capacity {
            warn!(?action, capacity, "pending queue full");
            return Err(StoreError::QueueOverflow { capacity });
        }
        pending.push_back(action);
        Ok(())
    }

    fn process(&self, action: A) -> Result<(), StoreError> {
        debug!(?action, "dispatch");
        let chain: Vec<Rc<dyn Middleware<S, A>>> = self
            .inner
            .middleware
            .borrow()
            .iter()
            .map(|entry| Rc::clone(&entry.middleware))
            .collect();
        self.run_from(&chain, 0, action)
    }

    fn run_from(
        &self,
        chain: &[Rc<dyn Middleware<S, A>>],
        index: usize,
        action: A,
    ) -> Result<(), StoreError> {
        let Some(middleware) = chain.get(index) else {
            self.commit(&action);
            return Ok(());
        };
        let state = self.state();
        let mut next = |action: A| self.run_from(chain, index + 1, action);
        let mut dispatch = |action: A| self.enqueue(action);
        middleware.handle(action, &state, &mut Chain::new(&mut next, &mut dispatch))
    }

    fn commit(&self, action: &A) {
        let current = self.state();
        let next = self.inner.reducer.reduce(action, &current);
        if Rc::ptr_eq(&current, &next) || *current == *next {
            trace!(?action, "state unchanged");
            return;
        }
        *self.inner.state.borrow_mut() = Rc::clone(&next);
        trace!(?action, "state committed");

        let listeners: Vec<(u64, Listener<S>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();
        for (id, listener) in listeners {
            // Skip listeners disposed earlier in this notification round.
            if !self.is_subscribed(id) {
                continue;
            }
            (&mut *listener.borrow_mut())(&next);
        }
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.inner
            .listeners
            .borrow()
            .iter()
            .any(|(listener_id, _)| *listener_id == id)
    }
}

struct DispatchGuard<'a, S, A> {
    inner: &'a StoreInner<S, A>,
}

impl<'a, S, A> DispatchGuard<'a, S, A> {
    fn enter(inner: &'a StoreInner<S, A>) -> Self {
        inner.dispatching.set(true);
        Self { inner }
    }
}

impl<S, A> Drop for DispatchGuard<'_, S, A> {
    fn drop(&mut self) {
        self.inner.dispatching.set(false);
        // A panicking reducer must not leave its follow-ups for the next dispatch.
        if std::thread::panicking() {
            if let Ok(mut pending) = self.inner.pending.try_borrow_mut() {
                pending.clear();
            }
        }
    }
}

#[must_use = "dropping a Subscription keeps the listener registered; call dispose() to remove it"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn dispose(mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}
