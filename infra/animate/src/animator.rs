use crate::error::{AnimateError, AnimateErrorExt, Result};
use crate::surface::{BoxMetrics, ElementId, RenderSurface, StyleProperty, px};
use fxhash::{FxHashMap, FxHashSet};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Duration used by the dashboard when none is given.
pub const DEFAULT_SLIDE_DURATION: Duration = Duration::from_millis(300);

/// Roughly one frame at 60 Hz.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Direction of a slide transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    /// Collapse to zero, then hide.
    Up,
    /// Reveal, then grow to the natural size.
    Down,
}

/// Snapshot of an in-flight transition.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    pub direction: Direction,
    pub from: BoxMetrics,
    pub to: BoxMetrics,
    pub started: Instant,
    pub duration: Duration,
    pub generation: u64,
}

impl AnimationState {
    /// Elapsed fraction of the transition at `now`, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Box metrics to render at `now`.
    #[must_use]
    pub fn frame(&self, now: Instant) -> BoxMetrics {
        self.from.lerp(&self.to, self.progress(now))
    }

    fn remaining(&self, now: Instant) -> Duration {
        (self.started + self.duration).saturating_duration_since(now)
    }
}

#[derive(Debug)]
struct Transition {
    state: AnimationState,
    task: AbortHandle,
}

impl Transition {
    fn abort(&self) {
        self.task.abort();
    }
}

struct Inner<S: ?Sized> {
    surface: Arc<S>,
    runtime: Handle,
    frame_interval: Duration,
    generation: AtomicU64,
    transitions: Mutex<FxHashMap<ElementId, Transition>>,
    // Cancelled elements still wearing their last frame.
    frozen: Mutex<FxHashSet<ElementId>>,
}

impl<S: ?Sized> std::fmt::Debug for Inner<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animator")
            .field("frame_interval", &self.frame_interval)
            .field("in_flight", &self.transitions.try_lock().map(|t| t.len()))
            .finish_non_exhaustive()
    }
}

/// Slides elements of a [`RenderSurface`] in and out of view.
///
/// Every element has at most one transition in flight. Starting a new one on the same element
/// supersedes the old one: its pending frames and completion are cancelled, and the new
/// transition starts from whatever the element currently renders. Consequently `slide_up`
/// followed immediately by `slide_down` always ends visible at the natural height.
///
/// Calls are fire-and-forget: the first frame is written synchronously, the remaining frames and
/// the completion run on the tokio runtime captured at construction.
///
/// # Example
/// ```rust,ignore
/// let animator = Animator::new(surface.clone())?;
/// animator.slide_toggle(panel, DEFAULT_SLIDE_DURATION)?;
/// ```
pub struct Animator<S: RenderSurface + ?Sized> {
    inner: Arc<Inner<S>>,
}

impl<S: RenderSurface + ?Sized> std::fmt::Debug for Animator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(&*self.inner, f)
    }
}

impl<S: RenderSurface + ?Sized> Clone for Animator<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: RenderSurface + ?Sized> Animator<S> {
    /// Creates an animator driven by the current tokio runtime.
    ///
    /// # Errors
    /// Returns [`AnimateError::Runtime`] when called outside a tokio runtime.
    pub fn new(surface: Arc<S>) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(AnimateError::from)
            .context("Animator must be created inside a tokio runtime")?;
        Ok(Self::with_handle(surface, runtime))
    }

    /// Creates an animator that spawns its transitions on `runtime`.
    pub fn with_handle(surface: Arc<S>, runtime: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                surface,
                runtime,
                frame_interval: DEFAULT_FRAME_INTERVAL,
                generation: AtomicU64::new(0),
                transitions: Mutex::new(FxHashMap::default()),
                frozen: Mutex::new(FxHashSet::default()),
            }),
        }
    }

    /// Overrides the interval between intermediate frames. A zero interval writes no
    /// intermediate frames, only the start and the completion.
    ///
    /// Only takes effect on a freshly created animator, before it is cloned.
    #[must_use]
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.frame_interval = interval;
        }
        self
    }

    #[must_use]
    pub fn surface(&self) -> &Arc<S> {
        &self.inner.surface
    }

    /// Reveals `element` and grows it from zero to its natural size over `duration`.
    ///
    /// # Errors
    /// Returns [`AnimateError::InvalidTarget`] if the element is not attached.
    pub fn slide_down(&self, element: ElementId, duration: Duration) -> Result<()> {
        self.start(element, Direction::Down, duration)
    }

    /// Shrinks `element` to zero over `duration`, then hides it.
    ///
    /// # Errors
    /// Returns [`AnimateError::InvalidTarget`] if the element is not attached.
    pub fn slide_up(&self, element: ElementId, duration: Duration) -> Result<()> {
        self.start(element, Direction::Up, duration)
    }

    /// Slides down when the computed display is `none`, up otherwise.
    ///
    /// # Errors
    /// Returns [`AnimateError::InvalidTarget`] if the element is not attached.
    pub fn slide_toggle(&self, element: ElementId, duration: Duration) -> Result<()> {
        self.ensure_attached(element)?;
        if self.inner.surface.computed_display(element).is_none() {
            self.slide_down(element, duration)
        } else {
            self.slide_up(element, duration)
        }
    }

    /// Stops the transition of `element` where it is, without completing it. The next slide on
    /// the element starts from the frozen frame.
    ///
    /// Returns `true` if a transition was in flight.
    pub fn cancel(&self, element: ElementId) -> bool {
        let removed = self.inner.transitions.lock().remove(&element);
        removed.is_some_and(|transition| {
            transition.abort();
            self.inner.frozen.lock().insert(element);
            debug!(%element, direction = %transition.state.direction, "Transition cancelled");
            true
        })
    }

    /// Jumps every in-flight transition to its final state.
    pub fn finish_all(&self) {
        let mut transitions = self.inner.transitions.lock();
        for (element, transition) in transitions.drain() {
            transition.abort();
            complete(&*self.inner.surface, element, transition.state.direction);
        }
    }

    #[must_use]
    pub fn is_animating(&self, element: ElementId) -> bool {
        self.inner.transitions.lock().contains_key(&element)
    }

    #[must_use]
    pub fn state(&self, element: ElementId) -> Option<AnimationState> {
        self.inner.transitions.lock().get(&element).map(|t| t.state.clone())
    }

    fn ensure_attached(&self, element: ElementId) -> Result<()> {
        if self.inner.surface.is_attached(element) {
            Ok(())
        } else {
            Err(AnimateError::InvalidTarget { element, context: None })
        }
    }

    fn start(&self, element: ElementId, direction: Direction, duration: Duration) -> Result<()> {
        self.ensure_attached(element).context(format!("slide {direction}"))?;

        let surface = &*self.inner.surface;
        let mut transitions = self.inner.transitions.lock();

        let superseded = transitions.remove(&element);
        if let Some(previous) = &superseded {
            previous.abort();
            debug!(%element, from = %previous.state.direction, to = %direction, "Transition superseded");
        }
        let was_frozen = self.inner.frozen.lock().remove(&element);

        let (from, to) = match direction {
            Direction::Down => prepare_down(surface, element, superseded.is_some() || was_frozen),
            Direction::Up => (surface.current_metrics(element), BoxMetrics::ZERO),
        };

        surface.set_style(element, StyleProperty::Overflow, "hidden");
        apply(surface, element, &from);
        surface.flush_layout(element);

        if duration.is_zero() {
            complete(surface, element, direction);
            return Ok(());
        }

        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let state =
            AnimationState { direction, from, to, started: Instant::now(), duration, generation };
        debug!(%element, %direction, ?duration, generation, "Transition started");

        let first_delay = self.inner.next_delay(&state, state.started);
        let task = self.inner.runtime.spawn(drive(
            Arc::clone(&self.inner),
            element,
            generation,
            first_delay,
        ));
        transitions.insert(element, Transition { state, task: task.abort_handle() });

        Ok(())
    }
}

impl<S: RenderSurface + ?Sized> Inner<S> {
    fn next_delay(&self, state: &AnimationState, now: Instant) -> Duration {
        let remaining = state.remaining(now);
        if self.frame_interval.is_zero() { remaining } else { remaining.min(self.frame_interval) }
    }

    /// Writes the next frame. Returns the delay until the following one, or `None` once the
    /// transition completed or was superseded.
    fn step(&self, element: ElementId, generation: u64) -> Option<Duration> {
        let mut transitions = self.transitions.lock();
        let transition = transitions.get(&element)?;
        if transition.state.generation != generation {
            return None;
        }

        let now = Instant::now();
        let state = &transition.state;
        if state.progress(now) >= 1.0 {
            let direction = state.direction;
            transitions.remove(&element);
            complete(&*self.surface, element, direction);
            return None;
        }

        apply(&*self.surface, element, &state.frame(now));
        Some(self.next_delay(state, now))
    }
}

async fn drive<S: RenderSurface + ?Sized>(
    inner: Arc<Inner<S>>,
    element: ElementId,
    generation: u64,
    first_delay: Duration,
) {
    let mut delay = first_delay;
    loop {
        tokio::time::sleep(delay).await;
        match inner.step(element, generation) {
            Some(next) => delay = next,
            None => break,
        }
    }
}

/// Makes the element displayable and measures its natural size.
///
/// The start point is zero, or what the element renders right now when a previous transition
/// was interrupted or cancelled.
fn prepare_down<S: RenderSurface + ?Sized>(
    surface: &S,
    element: ElementId,
    interrupted: bool,
) -> (BoxMetrics, BoxMetrics) {
    let start = if interrupted { surface.current_metrics(element) } else { BoxMetrics::ZERO };

    clear_box(surface, element);
    if surface.computed_display(element).is_none() {
        surface.remove_style(element, StyleProperty::Display);
        if surface.computed_display(element).is_none() {
            surface.set_style(element, StyleProperty::Display, "block");
        }
    }

    (start, surface.current_metrics(element))
}

fn apply<S: RenderSurface + ?Sized>(surface: &S, element: ElementId, metrics: &BoxMetrics) {
    for property in StyleProperty::BOX {
        surface.set_style(element, property, &px(metrics.get(property)));
    }
}

fn clear_box<S: RenderSurface + ?Sized>(surface: &S, element: ElementId) {
    for property in StyleProperty::BOX {
        surface.remove_style(element, property);
    }
}

fn complete<S: RenderSurface + ?Sized>(surface: &S, element: ElementId, direction: Direction) {
    if direction == Direction::Up {
        surface.set_style(element, StyleProperty::Display, "none");
    }
    clear_box(surface, element);
    surface.remove_style(element, StyleProperty::Overflow);
    trace!(%element, %direction, "Transition completed");
}
