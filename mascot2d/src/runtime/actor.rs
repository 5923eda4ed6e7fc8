use crate::{Error, MascotData, ReactionTrigger, RetriggerPolicy, Viewport, scroll_fraction};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

/// Visual state of an actor. Always exactly one of these; `Entering` and
/// `Exiting` are pass-through states that settle within the same tick or a
/// scheduled deadline later.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum VisualState {
    #[default]
    Hidden,
    Entering,
    Idle,
    Reacting,
    Exiting,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ActorEvent {
    /// The reveal threshold was crossed; the entrance is scheduled.
    Enter,
    /// The visible class was applied and the actor settled into idle.
    Reveal,
    ReactionStart { reaction: String },
    ReactionEnd { reaction: String },
    /// Scroll returned above the threshold; the actor hid and the crossing
    /// latch reset.
    Exit,
    Dispose,
}

#[derive(Clone, Debug)]
pub struct ActorSnapshot {
    pub name: String,
    pub visual: VisualState,
    pub crossed: bool,
    pub time: f32,
}

pub trait ActorListener {
    fn on_event(&mut self, actor: &ActorSnapshot, event: &ActorEvent);
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Deferred {
    Reveal,
    Greet,
    Revert,
}

/// One animated mascot bound to one page.
///
/// The host drives the actor with throttled scroll snapshots
/// ([`Actor::handle_scroll`]), gesture-mapped reactions ([`Actor::trigger`])
/// and a per-frame clock ([`Actor::update`]); the actor answers with a set of
/// presentation classes and lifecycle events. All deferred work is deadline
/// based on the actor's internal clock, so hosts without timers only need to
/// call `update` with frame deltas.
pub struct Actor {
    data: Arc<MascotData>,
    visual: VisualState,
    crossed: bool,
    hero_threshold: f32,
    time: f32,
    entrance_stagger: f32,

    reveal_at: Option<f32>,
    greet_at: Option<f32>,
    revert_at: Option<f32>,

    active_reaction: Option<usize>,
    /// Ambient class currently applied while idle (band override or the
    /// mascot default).
    current_ambient: Option<String>,
    classes: BTreeSet<String>,

    disposed: bool,
    listener: Option<Box<dyn ActorListener>>,
    event_queue: VecDeque<ActorEvent>,
}

impl Actor {
    /// Creates the actor and runs the initial scroll check synchronously, so
    /// a page loaded deep-linked below the threshold still reveals.
    pub fn new(data: Arc<MascotData>, view: &Viewport) -> Self {
        let mut actor = Self {
            hero_threshold: view.hero_threshold(),
            data,
            visual: VisualState::Hidden,
            crossed: false,
            time: 0.0,
            entrance_stagger: 0.0,
            reveal_at: None,
            greet_at: None,
            revert_at: None,
            active_reaction: None,
            current_ambient: None,
            classes: BTreeSet::new(),
            disposed: false,
            listener: None,
            event_queue: VecDeque::new(),
        };
        actor.classes.insert(actor.data.base_class.clone());
        if actor.data.auto_reveal || view.scroll_top > actor.hero_threshold {
            actor.enter();
        }
        actor.drain_event_queue();
        actor
    }

    pub fn set_listener<L: ActorListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    /// Extra delay before this actor's entrance, for staggered choreography.
    /// An entrance already scheduled by the initial scroll check is pushed
    /// back accordingly.
    pub fn set_entrance_stagger(&mut self, stagger: f32) {
        if !stagger.is_finite() || stagger < 0.0 {
            return;
        }
        let delta = stagger - self.entrance_stagger;
        self.entrance_stagger = stagger;
        if let Some(at) = self.reveal_at {
            self.reveal_at = Some(at + delta);
        }
    }

    pub fn data(&self) -> &Arc<MascotData> {
        &self.data
    }

    pub fn visual(&self) -> VisualState {
        self.visual
    }

    pub fn has_crossed(&self) -> bool {
        self.crossed
    }

    pub fn hero_threshold(&self) -> f32 {
        self.hero_threshold
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Presentation classes the host should mirror onto the overlay element.
    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    pub fn active_reaction(&self) -> Option<&str> {
        self.active_reaction
            .map(|i| self.data.reactions[i].name.as_str())
    }

    /// Applies one coalesced scroll snapshot. Call at most once per frame,
    /// via [`crate::FrameThrottle`].
    pub fn handle_scroll(&mut self, view: &Viewport) {
        if self.disposed {
            return;
        }
        if !self.data.auto_reveal {
            if view.scroll_top <= self.hero_threshold {
                if self.crossed {
                    self.exit();
                }
                self.drain_event_queue();
                return;
            }
            if !self.crossed {
                self.enter();
            }
        }
        self.apply_scroll_band(view);
        self.drain_event_queue();
    }

    /// Recomputes the cached hero threshold after a layout change and
    /// re-evaluates the current scroll position against it.
    pub fn resize(&mut self, view: &Viewport) {
        if self.disposed {
            return;
        }
        self.hero_threshold = view.hero_threshold();
        self.handle_scroll(view);
    }

    /// Starts a named reaction. Absorbed silently while hidden, entering or
    /// disposed; unknown names are an error.
    pub fn trigger(&mut self, name: &str) -> Result<(), Error> {
        if self.disposed {
            return Ok(());
        }
        let Some((index, reaction)) = self.data.reaction(name) else {
            return Err(Error::UnknownReaction {
                name: name.to_string(),
            });
        };
        let is_focus = reaction.trigger == ReactionTrigger::Focus;
        let duration = reaction.duration;

        match self.visual {
            // A reaction never pre-empts the scheduled reveal and has no
            // visual to attach to before it.
            VisualState::Hidden | VisualState::Entering | VisualState::Exiting => return Ok(()),
            VisualState::Reacting if self.active_reaction == Some(index) => {
                if is_focus {
                    // Focus regained within the blur grace window: keep the
                    // reaction held, drop the pending reversion.
                    self.revert_at = None;
                } else {
                    match self.data.retrigger {
                        RetriggerPolicy::Restart => {
                            self.revert_at = Some(self.time + duration);
                        }
                        RetriggerPolicy::Ignore => {}
                    }
                }
                self.drain_event_queue();
                return Ok(());
            }
            VisualState::Reacting => {
                // Last write wins between overlapping reactions.
                self.end_active_reaction(false);
            }
            VisualState::Idle => {}
        }

        self.start_reaction(index);
        self.drain_event_queue();
        Ok(())
    }

    /// Schedules the active reaction's reversion `grace` seconds from now.
    /// Used for blur: the reaction ends after a short grace period, not
    /// instantaneously, so focus moving between adjacent fields does not
    /// flicker. No-op unless `name` is the active reaction.
    pub fn end_reaction_after(&mut self, name: &str, grace: f32) {
        if self.disposed || self.visual != VisualState::Reacting {
            return;
        }
        if self.active_reaction() != Some(name) {
            return;
        }
        if grace.is_finite() && grace >= 0.0 {
            self.revert_at = Some(self.time + grace);
        }
    }

    /// Advances the internal clock and fires every due deadline in order.
    pub fn update(&mut self, delta: f32) {
        if self.disposed || !delta.is_finite() || delta < 0.0 {
            return;
        }
        self.time += delta;

        while let Some(deferred) = self.take_due_deferred() {
            match deferred {
                Deferred::Reveal => self.on_reveal(),
                Deferred::Greet => self.on_greet(),
                Deferred::Revert => self.on_revert(),
            }
        }
        self.drain_event_queue();
    }

    /// Removes the actor's visual output and cancels all scheduled work.
    /// Every other entry point is a guarded no-op afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.reveal_at = None;
        self.greet_at = None;
        self.revert_at = None;
        self.active_reaction = None;
        self.current_ambient = None;
        self.classes.clear();
        self.event_queue.push_back(ActorEvent::Dispose);
        self.drain_event_queue();
    }

    fn enter(&mut self) {
        self.crossed = true;
        self.visual = VisualState::Entering;
        self.reveal_at = Some(self.time + self.entrance_stagger + self.data.entrance_delay);
        self.event_queue.push_back(ActorEvent::Enter);
    }

    fn exit(&mut self) {
        self.visual = VisualState::Exiting;
        self.reveal_at = None;
        self.greet_at = None;
        self.revert_at = None;
        if self.active_reaction.is_some() {
            self.end_active_reaction(false);
        }
        self.classes.remove(&self.data.visible_class);
        if let Some(ambient) = self.current_ambient.take() {
            self.classes.remove(&ambient);
        }
        self.crossed = false;
        self.visual = VisualState::Hidden;
        self.event_queue.push_back(ActorEvent::Exit);
    }

    fn on_reveal(&mut self) {
        if self.visual != VisualState::Entering || !self.crossed {
            return;
        }
        self.classes.insert(self.data.visible_class.clone());
        self.set_ambient(Some(self.data.ambient_class.clone()));
        self.visual = VisualState::Idle;
        self.event_queue.push_back(ActorEvent::Reveal);
        if self.data.greeting.is_some() {
            self.greet_at = Some(self.time + self.data.greeting_delay);
        }
    }

    fn on_greet(&mut self) {
        if self.visual != VisualState::Idle {
            return;
        }
        let Some(greeting) = self.data.greeting.clone() else {
            return;
        };
        if let Some((index, _)) = self.data.reaction(&greeting) {
            self.start_reaction(index);
        }
    }

    fn on_revert(&mut self) {
        if self.visual == VisualState::Reacting {
            self.end_active_reaction(true);
        }
    }

    fn start_reaction(&mut self, index: usize) {
        let reaction = &self.data.reactions[index];
        let class = reaction.class.clone();
        let name = reaction.name.clone();
        let deadline = match reaction.trigger {
            // Focus reactions are held until blur schedules the reversion.
            ReactionTrigger::Focus => None,
            _ => Some(self.time + reaction.duration),
        };

        if let Some(ambient) = &self.current_ambient {
            self.classes.remove(ambient);
        }
        self.classes.insert(class);
        self.visual = VisualState::Reacting;
        self.active_reaction = Some(index);
        self.revert_at = deadline;
        self.event_queue
            .push_back(ActorEvent::ReactionStart { reaction: name });
    }

    fn end_active_reaction(&mut self, revert_to_idle: bool) {
        let Some(index) = self.active_reaction.take() else {
            return;
        };
        let reaction = &self.data.reactions[index];
        self.classes.remove(&reaction.class);
        let name = reaction.name.clone();
        self.revert_at = None;
        if revert_to_idle {
            self.visual = VisualState::Idle;
            if let Some(ambient) = self.current_ambient.clone() {
                self.classes.insert(ambient);
            }
        }
        self.event_queue
            .push_back(ActorEvent::ReactionEnd { reaction: name });
    }

    fn apply_scroll_band(&mut self, view: &Viewport) {
        if self.visual != VisualState::Idle {
            return;
        }
        // A page with no scrollable overflow never reaches the fraction
        // based sub-states; only the base ambient animation applies.
        let band_class = scroll_fraction(view).and_then(|fraction| {
            self.data
                .scroll_bands
                .iter()
                .find(|b| fraction > b.min_fraction && fraction <= b.max_fraction)
                .map(|b| b.class.clone())
        });
        let next = band_class.unwrap_or_else(|| self.data.ambient_class.clone());
        self.set_ambient(Some(next));
    }

    fn set_ambient(&mut self, next: Option<String>) {
        if self.current_ambient == next {
            return;
        }
        if let Some(old) = self.current_ambient.take() {
            self.classes.remove(&old);
        }
        if let Some(new) = next {
            self.classes.insert(new.clone());
            self.current_ambient = Some(new);
        }
    }

    fn take_due_deferred(&mut self) -> Option<Deferred> {
        let mut due: Option<(f32, Deferred)> = None;
        for (at, kind) in [
            (self.reveal_at, Deferred::Reveal),
            (self.greet_at, Deferred::Greet),
            (self.revert_at, Deferred::Revert),
        ] {
            let Some(at) = at else { continue };
            if at > self.time {
                continue;
            }
            match due {
                Some((best, _)) if best <= at => {}
                _ => due = Some((at, kind)),
            }
        }
        let (_, kind) = due?;
        match kind {
            Deferred::Reveal => self.reveal_at = None,
            Deferred::Greet => self.greet_at = None,
            Deferred::Revert => self.revert_at = None,
        }
        Some(kind)
    }

    fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            name: self.data.name.clone(),
            visual: self.visual,
            crossed: self.crossed,
            time: self.time,
        }
    }

    fn drain_event_queue(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            let snapshot = self.snapshot();
            if let Some(listener) = self.listener.as_mut() {
                listener.on_event(&snapshot, &event);
            }
        }
    }
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.data.name)
            .field("visual", &self.visual)
            .field("crossed", &self.crossed)
            .field("hero_threshold", &self.hero_threshold)
            .field("time", &self.time)
            .field("active_reaction", &self.active_reaction())
            .field("disposed", &self.disposed)
            .finish()
    }
}
