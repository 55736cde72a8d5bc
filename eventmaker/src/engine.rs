//! # Dispatch Engine
//!
//! [`EventMaker`] owns the listener lists, the middleware pipeline, the
//! connection status and the idle timer, and orchestrates emission.
//!
//! # Emission
//!
//! `emit` runs synchronously to completion:
//!
//! 1. A disconnected engine with at least one registered listener rejects the
//!    emission.
//! 2. Every middleware runs in registration order against one shared
//!    [`ActionRecord`]; the first [`Flow::Stop`] aborts the emission.
//! 3. Matching persistent listeners run, then matching one-shot listeners,
//!    which are unregistered before they run.
//! 4. The status returns to idle and, if anything ran, the idle timer restarts.
//!
//! The state lock is never held while user code runs, so handlers and
//! middlewares may call back into the engine. Every phase works on a snapshot
//! taken before the first callback.
//!
//! # Lifecycle
//!
//! `disconnect` and `connect` announce themselves through the reserved
//! [`DISCONNECT_EVENT`] and [`CONNECT_EVENT`] names, with the engine as the
//! sole argument.

use crate::{
    logging::{self, Tone},
    middleware::Middleware,
    options::{EventMakerBuilder, Options},
    status::Status,
};
use eventmaker_core::{
    ActionRecord, EmitError, Flow, Handler, Listener, PipelineFn, Scheduler, TimerHandle, Value,
};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

/// Event emitted by [`EventMaker::connect`].
pub const CONNECT_EVENT: &str = "connect";

/// Event emitted by [`EventMaker::disconnect`].
pub const DISCONNECT_EVENT: &str = "disconnect";

/// What happened to one emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// The engine was disconnected and had listeners; nothing ran.
    Rejected,
    /// A middleware returned [`Flow::Stop`]; no listener ran.
    Stopped,
    /// Listeners ran; holds how many.
    Delivered(usize),
}

impl Emission {
    /// Number of listeners that ran.
    pub fn delivered(self) -> usize {
        match self {
            Emission::Delivered(count) => count,
            Emission::Rejected | Emission::Stopped => 0,
        }
    }
}

#[derive(Default)]
struct State {
    status: Status,
    idle_after: Option<Duration>,
    idle_timer: Option<TimerHandle>,
    listeners: Vec<Listener>,
    listeners_once: Vec<Listener>,
    middlewares: Vec<Middleware>,
}

impl State {
    fn listener_count(&self) -> usize {
        self.listeners.len() + self.listeners_once.len()
    }
}

struct Inner {
    name: Option<String>,
    logs: bool,
    scheduler: Arc<dyn Scheduler>,
    state: Mutex<State>,
}

/// An in-process event bus.
///
/// Cloning yields another handle to the same engine.
///
/// # Example
///
/// ```rust,ignore
/// use eventmaker::{EventMaker, Value, args};
///
/// let engine = EventMaker::builder().name("bus").build();
/// engine.on("ping", |args: &[Value]| println!("ping with {} args", args.len()));
/// engine.emit("ping", args![1_i32, 2_i32])?;
/// ```
#[derive(Clone)]
pub struct EventMaker {
    inner: Arc<Inner>,
}

impl EventMaker {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create an engine from plain options.
    pub fn with_options(options: Options) -> Self {
        Self::builder().options(options).build()
    }

    /// Start building an engine.
    pub fn builder() -> EventMakerBuilder {
        EventMakerBuilder::new()
    }

    pub(crate) fn from_parts(
        name: Option<String>,
        logs: bool,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                name,
                logs,
                scheduler,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// The cosmetic name, if any.
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a persistent listener for `event`.
    ///
    /// Returns the listener so it can be removed later.
    pub fn on(&self, event: impl Into<String>, handler: impl Handler) -> Listener {
        self.on_listener(Listener::new(event, handler))
    }

    /// Register an existing listener as persistent. Returns the same listener.
    pub fn on_listener(&self, listener: Listener) -> Listener {
        self.log(
            format_args!("Listener for {} was registered", listener.event()),
            Tone::Success,
        );
        self.state().listeners.push(listener.clone());
        listener
    }

    /// Register a listener that is removed after its first invocation.
    pub fn once(&self, event: impl Into<String>, handler: impl Handler) -> Listener {
        self.once_listener(Listener::new(event, handler))
    }

    /// Register an existing listener as one-shot. Returns the same listener.
    pub fn once_listener(&self, listener: Listener) -> Listener {
        self.log(
            format_args!("Listener for {} was registered", listener.event()),
            Tone::Success,
        );
        self.state().listeners_once.push(listener.clone());
        listener
    }

    /// Build a listener without registering it.
    pub fn create_listener(&self, event: impl Into<String>, handler: impl Handler) -> Listener {
        Listener::new(event, handler)
    }

    /// Unregister every entry that is `listener`, persistent or one-shot.
    pub fn remove_listener(&self, listener: &Listener) {
        {
            let mut state = self.state();
            state.listeners.retain(|l| !l.same_identity_as(listener));
            state.listeners_once.retain(|l| !l.same_identity_as(listener));
        }
        self.log(
            format_args!("Listener \"{listener}\" was removed"),
            Tone::Success,
        );
    }

    /// Unregister every listener for `event`. Returns how many were removed.
    pub fn remove_listeners_by_event(&self, event: &str) -> usize {
        let removed = {
            let mut state = self.state();
            let before = state.listener_count();
            state.listeners.retain(|l| !l.has_event_name(event));
            state.listeners_once.retain(|l| !l.has_event_name(event));
            before - state.listener_count()
        };
        self.log(
            format_args!("{removed} Listeners for \"{event}\" were removed"),
            Tone::Success,
        );
        removed
    }

    /// Unregister every listener.
    pub fn remove_all_listeners(&self) {
        {
            let mut state = self.state();
            state.listeners.clear();
            state.listeners_once.clear();
        }
        self.log(format_args!("All listeners were removed"), Tone::Success);
    }

    /// Append a pipeline function. Middlewares cannot be removed.
    pub fn middleware(&self, function: impl PipelineFn) {
        self.state().middlewares.push(Middleware::new(function));
        self.log(
            format_args!("Middleware function was registered"),
            Tone::Success,
        );
    }

    /// Snapshot of all listeners: persistent first, then one-shot.
    pub fn listeners(&self) -> Vec<Listener> {
        let state = self.state();
        state
            .listeners
            .iter()
            .chain(&state.listeners_once)
            .cloned()
            .collect()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.state().listener_count()
    }

    // ------------------------------------------------------------------
    // Emission
    // ------------------------------------------------------------------

    /// Emit `event` with `args`.
    ///
    /// The first failing middleware or listener aborts the emission and its
    /// error is returned. Once listeners start running, every one-shot
    /// listener for `event` is already unregistered, including those that
    /// never ran because an earlier listener failed.
    pub fn emit(&self, event: &str, args: impl Into<Vec<Value>>) -> Result<Emission, EmitError> {
        let args = args.into();

        let middlewares = {
            let state = self.state();
            (state.status != Status::Disconnected || state.listener_count() == 0)
                .then(|| state.middlewares.clone())
        };
        let Some(middlewares) = middlewares else {
            self.log(format_args!("Emit failed (disconnected)"), Tone::Alert);
            return Ok(Emission::Rejected);
        };

        self.log(
            format_args!("Accepted data for \"{event}\": {args:?}"),
            Tone::Success,
        );

        let mut action = ActionRecord::new(args);
        for middleware in &middlewares {
            let flow =
                middleware
                    .invoke(event, &mut action)
                    .map_err(|source| EmitError::Middleware {
                        event: event.to_owned(),
                        source,
                    })?;
            if flow == Flow::Stop {
                self.log(
                    format_args!("Middleware function stopped the process"),
                    Tone::Alert,
                );
                return Ok(Emission::Stopped);
            }
        }

        self.state().status = Status::Processing;
        let delivered = self.deliver(event, &action.payload);
        {
            let mut state = self.state();
            if state.status != Status::Disconnected {
                state.status = Status::Idle;
            }
        }

        let count = delivered?;
        if count > 0 {
            self.rearm_idle_timer();
        }
        self.log(format_args!("Processed for {count} listeners"), Tone::Success);
        Ok(Emission::Delivered(count))
    }

    fn deliver(&self, event: &str, payload: &[Value]) -> Result<usize, EmitError> {
        let persistent: Vec<Listener> = self
            .state()
            .listeners
            .iter()
            .filter(|l| l.has_event_name(event))
            .cloned()
            .collect();
        for listener in &persistent {
            invoke(event, listener, payload)?;
        }

        let once = {
            let mut state = self.state();
            let (matching, rest): (Vec<Listener>, Vec<Listener>) =
                std::mem::take(&mut state.listeners_once)
                    .into_iter()
                    .partition(|l| l.has_event_name(event));
            state.listeners_once = rest;
            matching
        };
        for listener in &once {
            invoke(event, listener, payload)?;
        }

        Ok(persistent.len() + once.len())
    }

    // ------------------------------------------------------------------
    // Idle timer
    // ------------------------------------------------------------------

    /// Disconnect automatically after `after` without a delivered emission.
    ///
    /// Replaces any previous duration and restarts the countdown.
    pub fn set_idle_disconnect_after(&self, after: Duration) -> &Self {
        self.state().idle_after = Some(after);
        self.log(
            format_args!("Idling time was set: {} ms", after.as_millis()),
            Tone::Success,
        );
        self.rearm_idle_timer();
        self
    }

    /// Millisecond form of [`set_idle_disconnect_after`](Self::set_idle_disconnect_after).
    ///
    /// A negative value counts as zero. A NaN or unrepresentable value leaves
    /// the configured duration as it was; the countdown is still restarted
    /// against it.
    pub fn set_idle_disconnect_after_millis(&self, millis: f64) -> &Self {
        let secs = if millis <= 0.0 { 0.0 } else { millis / 1000.0 };
        match Duration::try_from_secs_f64(secs) {
            Ok(after) => self.set_idle_disconnect_after(after),
            Err(_) => {
                self.rearm_idle_timer();
                self
            }
        }
    }

    /// The configured idle duration.
    pub fn idle_disconnect_after(&self) -> Option<Duration> {
        self.state().idle_after
    }

    fn rearm_idle_timer(&self) {
        let (after, stale) = {
            let mut state = self.state();
            let Some(after) = state.idle_after else {
                return;
            };
            (after, state.idle_timer.take())
        };
        if let Some(handle) = stale {
            self.inner.scheduler.cancel(handle);
        }

        let handle = self.schedule(after, move |engine| {
            if let Err(err) = engine.disconnect() {
                engine.log(format_args!("{err}"), Tone::Alert);
            }
            engine.log(
                format_args!("No data processed for the last {} ms", after.as_millis()),
                Tone::Alert,
            );
        });

        let superseded = self.state().idle_timer.replace(handle);
        if let Some(handle) = superseded {
            self.inner.scheduler.cancel(handle);
        }
    }

    // ------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------

    /// Current status.
    pub fn status(&self) -> Status {
        self.state().status
    }

    /// Whether listeners are running right now.
    pub fn is_processing(&self) -> bool {
        self.status() == Status::Processing
    }

    /// Whether the engine is connected and at rest.
    pub fn is_idling(&self) -> bool {
        self.status() == Status::Idle
    }

    /// Whether the engine is disconnected.
    pub fn is_disconnected(&self) -> bool {
        self.status() == Status::Disconnected
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Emit [`DISCONNECT_EVENT`] and switch to disconnected.
    ///
    /// The idle-timer slot is cleared but the timer itself is not cancelled:
    /// an already armed countdown still fires at its deadline, even after a
    /// later [`connect`](Self::connect). The transition completes even if a
    /// disconnect listener fails; that error is returned afterwards.
    pub fn disconnect(&self) -> Result<(), EmitError> {
        self.state().idle_timer = None;

        let notified = self.notify(DISCONNECT_EVENT);
        self.state().status = Status::Disconnected;
        self.log(format_args!("Disconnected"), Tone::Muted);
        notified
    }

    /// Disconnect once `delay` has elapsed. Cannot be cancelled.
    pub fn disconnect_after(&self, delay: Duration) {
        self.schedule(delay, |engine| {
            if let Err(err) = engine.disconnect() {
                engine.log(format_args!("{err}"), Tone::Alert);
            }
        });
    }

    /// Emit [`CONNECT_EVENT`], switch to idle and restart the idle timer.
    ///
    /// The transition completes even if a connect listener fails; that error
    /// is returned afterwards.
    pub fn connect(&self) -> Result<(), EmitError> {
        let notified = self.notify(CONNECT_EVENT);
        self.state().status = Status::Idle;
        self.log(format_args!("Connected"), Tone::Muted);
        self.rearm_idle_timer();
        notified
    }

    /// Connect once `delay` has elapsed. Cannot be cancelled.
    pub fn connect_after(&self, delay: Duration) {
        self.schedule(delay, |engine| {
            if let Err(err) = engine.connect() {
                engine.log(format_args!("{err}"), Tone::Alert);
            }
        });
    }

    fn notify(&self, event: &str) -> Result<(), EmitError> {
        self.emit(event, vec![Value::new(self.clone())]).map(drop)
    }

    /// Run `action` against this engine after `delay`, unless it was dropped.
    fn schedule<F>(&self, delay: Duration, action: F) -> TimerHandle
    where
        F: FnOnce(&EventMaker) + Send + 'static,
    {
        let engine: Weak<Inner> = Arc::downgrade(&self.inner);
        self.inner.scheduler.schedule(
            delay,
            Box::new(move || {
                if let Some(inner) = engine.upgrade() {
                    action(&EventMaker { inner });
                }
            }),
        )
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self, message: fmt::Arguments<'_>, tone: Tone) {
        if self.inner.logs {
            logging::write(self, message, tone);
        }
    }
}

fn invoke(event: &str, listener: &Listener, payload: &[Value]) -> Result<(), EmitError> {
    listener
        .invoke(payload)
        .map_err(|source| EmitError::Listener {
            event: event.to_owned(),
            listener: listener.to_string(),
            source,
        })
}

impl Default for EventMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.name {
            Some(name) => write!(f, "EventMaker({name})"),
            None => f.write_str("EventMaker"),
        }
    }
}

impl fmt::Debug for EventMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("EventMaker")
            .field("name", &self.inner.name)
            .field("status", &state.status)
            .field("listeners", &state.listeners.len())
            .field("listeners_once", &state.listeners_once.len())
            .field("middlewares", &state.middlewares.len())
            .finish_non_exhaustive()
    }
}
