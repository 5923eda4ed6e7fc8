use crate::{
    Gesture, GestureKind, GestureTarget, MascotData, MascotEntry, PageData, ReactionData,
    ReactionTrigger, Stage, StageEvent, StageListener, Viewport, VisualState,
};
use std::cell::RefCell;
use std::rc::Rc;

fn view(scroll_top: f32) -> Viewport {
    Viewport {
        scroll_top,
        scroll_height: 2000.0,
        viewport_height: 800.0,
        hero_height: None,
    }
}

fn pig() -> MascotData {
    let mut data = MascotData::new("pig");
    data.reactions.push(ReactionData::new(
        "jump",
        "pig-jumping",
        1.5,
        ReactionTrigger::Hover,
        ".team-member",
    ));
    data
}

#[derive(Clone, Default)]
struct Events {
    rows: Rc<RefCell<Vec<StageEvent>>>,
}

impl Events {
    fn listener(&self) -> EventsListener {
        EventsListener {
            events: self.clone(),
        }
    }

    fn take(&self) -> Vec<StageEvent> {
        std::mem::take(&mut *self.rows.borrow_mut())
    }
}

struct EventsListener {
    events: Events,
}

impl StageListener for EventsListener {
    fn on_event(&mut self, event: &StageEvent) {
        self.events.rows.borrow_mut().push(event.clone());
    }
}

#[test]
fn frame_applies_the_last_pushed_scroll_offset() {
    let mut page = PageData::new("about");
    page.mascots.push(MascotEntry::new(pig()));
    let mut stage = Stage::new(&page, &view(0.0)).expect("stage");

    stage.push_scroll(100.0);
    stage.push_scroll(700.0);
    stage.frame(0.016, &view(700.0));

    let actor = stage.actor("pig").expect("actor");
    assert!(actor.has_crossed());
    assert_eq!(actor.visual(), VisualState::Entering);
}

#[test]
fn frames_without_scroll_events_only_advance_the_clock() {
    let mut page = PageData::new("about");
    page.mascots.push(MascotEntry::new(pig()));
    let mut stage = Stage::new(&page, &view(0.0)).expect("stage");

    stage.frame(1.0, &view(0.0));
    let actor = stage.actor("pig").expect("actor");
    assert_eq!(actor.visual(), VisualState::Hidden);
    assert!((actor.time() - 1.0).abs() < 1e-6);
}

#[test]
fn homepage_mascots_reveal_in_stagger_order() {
    let mut page = PageData::new("home");
    for (name, stagger) in [("pig", 0.0), ("cow", 0.3), ("hen", 0.6)] {
        let mut data = MascotData::new(name);
        data.auto_reveal = true;
        page.mascots
            .push(MascotEntry::new(data).with_stagger(stagger));
    }
    let mut stage = Stage::new(&page, &view(0.0)).expect("stage");

    let visuals = |stage: &Stage| {
        ["pig", "cow", "hen"].map(|n| stage.actor(n).map(|a| a.visual()))
    };

    // entrance_delay 0.8 plus staggers 0 / 0.3 / 0.6.
    stage.frame(0.9, &view(0.0));
    assert_eq!(
        visuals(&stage),
        [
            Some(VisualState::Idle),
            Some(VisualState::Entering),
            Some(VisualState::Entering)
        ]
    );

    stage.frame(0.3, &view(0.0));
    assert_eq!(
        visuals(&stage),
        [
            Some(VisualState::Idle),
            Some(VisualState::Idle),
            Some(VisualState::Entering)
        ]
    );

    stage.frame(0.3, &view(0.0));
    assert_eq!(
        visuals(&stage),
        [
            Some(VisualState::Idle),
            Some(VisualState::Idle),
            Some(VisualState::Idle)
        ]
    );
}

#[test]
fn gestures_route_to_the_matching_actor_only() {
    let mut page = PageData::new("about");
    page.mascots.push(MascotEntry::new(pig()));
    let mut sheep = MascotData::new("sheep");
    sheep.reactions.push(ReactionData::new(
        "startle",
        "sheep-startled",
        1.0,
        ReactionTrigger::Hover,
        ".flock",
    ));
    page.mascots.push(MascotEntry::new(sheep));

    let mut stage = Stage::new(&page, &view(700.0)).expect("stage");
    stage.frame(1.0, &view(700.0));

    let gesture = Gesture::new(
        GestureKind::Hover,
        vec![GestureTarget::new("div").with_classes(&["team-member"])],
    );
    stage.handle_gesture(&gesture);

    assert_eq!(
        stage.actor("pig").expect("pig").active_reaction(),
        Some("jump")
    );
    assert_eq!(stage.actor("sheep").expect("sheep").active_reaction(), None);
}

#[test]
fn clicking_a_mascot_surfaces_a_navigation_intent() {
    let mut page = PageData::new("home");
    let mut data = pig();
    data.auto_reveal = true;
    page.mascots
        .push(MascotEntry::new(data).with_navigation("pages/pig.html"));

    let events = Events::default();
    let mut stage = Stage::new(&page, &view(0.0)).expect("stage");
    stage.set_listener(events.listener());
    stage.frame(1.0, &view(0.0));

    let click = Gesture::new(
        GestureKind::Click,
        vec![
            GestureTarget::new("img"),
            GestureTarget::new("div").with_classes(&["pig-animation"]),
        ],
    );
    stage.handle_gesture(&click);

    assert_eq!(
        events.take(),
        vec![StageEvent::Navigate {
            mascot: "pig".to_string(),
            target: "pages/pig.html".to_string(),
        }]
    );

    // Clicks elsewhere carry no intent.
    let elsewhere = Gesture::new(GestureKind::Click, vec![GestureTarget::new("body")]);
    stage.handle_gesture(&elsewhere);
    assert!(events.take().is_empty());
}

#[test]
fn blur_ends_a_focus_reaction_through_the_stage() {
    let mut page = PageData::new("contact");
    let mut data = MascotData::new("hen");
    data.reactions.push(ReactionData::new(
        "attend",
        "hen-attending",
        1.0,
        ReactionTrigger::Focus,
        "input[type=\"search\"]",
    ));
    data.auto_reveal = true;
    page.mascots.push(MascotEntry::new(data));

    let mut stage = Stage::new(&page, &view(0.0)).expect("stage");
    stage.frame(1.0, &view(0.0));

    let search = vec![GestureTarget::new("input").with_attr("type", "search")];
    stage.handle_gesture(&Gesture::new(GestureKind::FocusIn, search.clone()));
    assert_eq!(
        stage.actor("hen").expect("hen").active_reaction(),
        Some("attend")
    );

    stage.handle_gesture(&Gesture::new(GestureKind::FocusOut, search));
    // Default blur grace is 0.5s.
    stage.frame(0.4, &view(0.0));
    assert_eq!(
        stage.actor("hen").expect("hen").active_reaction(),
        Some("attend")
    );
    stage.frame(0.2, &view(0.0));
    assert_eq!(stage.actor("hen").expect("hen").active_reaction(), None);
}

#[test]
fn dispose_tears_down_every_actor_and_guards_reentry() {
    let mut page = PageData::new("about");
    page.mascots.push(MascotEntry::new(pig()));
    let mut cow = MascotData::new("cow");
    cow.auto_reveal = true;
    page.mascots.push(MascotEntry::new(cow));

    let events = Events::default();
    let mut stage = Stage::new(&page, &view(700.0)).expect("stage");
    stage.set_listener(events.listener());
    stage.frame(1.0, &view(700.0));

    stage.dispose();
    assert_eq!(events.take(), vec![StageEvent::Disposed]);
    assert!(stage.is_disposed());
    assert!(stage.actor("pig").expect("pig").is_disposed());
    assert!(stage.actor("cow").expect("cow").is_disposed());

    stage.push_scroll(0.0);
    stage.frame(1.0, &view(0.0));
    stage.dispose();
    assert!(events.take().is_empty());
}

#[test]
fn host_driven_triggers_resolve_by_mascot_name() {
    let mut page = PageData::new("about");
    page.mascots.push(MascotEntry::new(pig()));
    let mut stage = Stage::new(&page, &view(700.0)).expect("stage");
    stage.frame(1.0, &view(700.0));

    stage.trigger("pig", "jump").expect("trigger");
    assert_eq!(
        stage.actor("pig").expect("pig").active_reaction(),
        Some("jump")
    );
    assert!(stage.trigger("goat", "jump").is_err());
}

#[test]
fn stage_construction_rejects_invalid_mascots() {
    let mut page = PageData::new("broken");
    let mut data = pig();
    data.greeting = Some("missing".to_string());
    page.mascots.push(MascotEntry::new(data));
    assert!(Stage::new(&page, &view(0.0)).is_err());
}
