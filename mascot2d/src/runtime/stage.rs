use crate::{
    Actor, Error, FrameThrottle, Gesture, GestureKind, GestureReactor, MatchedReaction, PageData,
    Viewport, path_matches_selector_list,
};
use std::collections::VecDeque;

/// Choreography event surfaced to the host. The runtime never mutates the
/// host's location itself; navigation is an intent the host acts on.
#[derive(Clone, Debug, PartialEq)]
pub enum StageEvent {
    Navigate { mascot: String, target: String },
    Disposed,
}

pub trait StageListener {
    fn on_event(&mut self, event: &StageEvent);
}

struct StageActor {
    actor: Actor,
    reactor: GestureReactor,
    navigate_to: Option<String>,
    blur_grace: f32,
}

/// Owns every actor registered for a page: fans out throttled scroll ticks,
/// gestures and clock advances, and tears the whole ensemble down in one
/// `dispose` call.
pub struct Stage {
    actors: Vec<StageActor>,
    throttle: FrameThrottle,
    last_view: Viewport,
    listener: Option<Box<dyn StageListener>>,
    events: VecDeque<StageEvent>,
    disposed: bool,
}

impl Stage {
    /// Builds the page's actors from an explicit registration bundle and
    /// runs each actor's initial scroll check.
    pub fn new(page: &PageData, view: &Viewport) -> Result<Self, Error> {
        let mut actors = Vec::with_capacity(page.mascots.len());
        for entry in &page.mascots {
            entry.mascot.validate()?;
            let mut actor = Actor::new(entry.mascot.clone(), view);
            actor.set_entrance_stagger(entry.entrance_stagger);
            actors.push(StageActor {
                reactor: GestureReactor::new(&entry.mascot),
                blur_grace: entry.mascot.blur_grace,
                navigate_to: entry.navigate_to.clone(),
                actor,
            });
        }
        Ok(Self {
            actors,
            throttle: FrameThrottle::new(),
            last_view: *view,
            listener: None,
            events: VecDeque::new(),
            disposed: false,
        })
    }

    pub fn set_listener<L: StageListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    pub fn actor(&self, name: &str) -> Option<&Actor> {
        self.actors
            .iter()
            .map(|s| &s.actor)
            .find(|a| a.data().name == name)
    }

    pub fn actor_mut(&mut self, name: &str) -> Option<&mut Actor> {
        self.actors
            .iter_mut()
            .map(|s| &mut s.actor)
            .find(|a| a.data().name == name)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// The most recent geometry snapshot this stage saw.
    pub fn view(&self) -> &Viewport {
        &self.last_view
    }

    /// Records a raw scroll offset; coalesced to one update per frame.
    pub fn push_scroll(&mut self, scroll_top: f32) {
        if self.disposed {
            return;
        }
        self.throttle.push(scroll_top);
    }

    /// One animation frame: applies the coalesced scroll update (if any raw
    /// scroll events fired since the last frame) and advances every actor's
    /// clock by `delta` seconds.
    pub fn frame(&mut self, delta: f32, view: &Viewport) {
        if self.disposed {
            return;
        }
        self.last_view = *view;
        if let Some(scroll_top) = self.throttle.take() {
            let view = view.with_scroll_top(scroll_top);
            self.last_view = view;
            for slot in &mut self.actors {
                slot.actor.handle_scroll(&view);
            }
        }
        for slot in &mut self.actors {
            slot.actor.update(delta);
        }
    }

    /// Triggers a named reaction on a named actor, for host-driven effects
    /// outside the gesture path.
    pub fn trigger(&mut self, mascot: &str, reaction: &str) -> Result<(), Error> {
        let Some(actor) = self.actor_mut(mascot) else {
            return Err(Error::UnknownMascot {
                name: mascot.to_string(),
            });
        };
        actor.trigger(reaction)
    }

    /// Recomputes every actor's threshold after a layout change.
    pub fn resize(&mut self, view: &Viewport) {
        if self.disposed {
            return;
        }
        self.last_view = *view;
        for slot in &mut self.actors {
            slot.actor.resize(view);
        }
    }

    /// Routes one document-level gesture to every actor whose selector sets
    /// match, and surfaces click-to-navigate intents for gestures landing on
    /// a mascot's own overlay element.
    pub fn handle_gesture(&mut self, gesture: &Gesture) {
        if self.disposed {
            return;
        }
        for slot in &mut self.actors {
            if gesture.kind == GestureKind::Click {
                if let Some(target) = &slot.navigate_to {
                    let own_selector = format!(".{}", slot.actor.data().base_class);
                    if path_matches_selector_list(&gesture.path, &own_selector) {
                        self.events.push_back(StageEvent::Navigate {
                            mascot: slot.actor.data().name.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }

            match slot.reactor.match_gesture(gesture) {
                Some(MatchedReaction::Start(name)) => {
                    let name = name.to_string();
                    if let Err(e) = slot.actor.trigger(&name) {
                        log::warn!("gesture reaction '{name}' failed: {e}");
                    }
                }
                Some(MatchedReaction::EndAfterGrace(name)) => {
                    let name = name.to_string();
                    let grace = slot.blur_grace;
                    slot.actor.end_reaction_after(&name, grace);
                }
                None => {}
            }
        }
        self.drain_events();
    }

    /// Disposes every actor, clears the frame throttle and detaches nothing
    /// further from this object; the host drops its own listener handles.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for slot in &mut self.actors {
            slot.actor.dispose();
        }
        self.throttle.clear();
        self.disposed = true;
        self.events.push_back(StageEvent::Disposed);
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.pop_front() {
            if let Some(listener) = self.listener.as_mut() {
                listener.on_event(&event);
            }
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("actors", &self.actors.len())
            .field("disposed", &self.disposed)
            .finish()
    }
}
