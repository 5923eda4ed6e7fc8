use crate::{Error, PageData, ReactionTrigger, RetriggerPolicy};

const ABOUT_PAGE: &str = r#"
{
  "name": "about",
  "mascots": [
    {
      "name": "pig",
      "greeting": "wave",
      "greetingDelay": 1.5,
      "reactions": [
        { "name": "wave", "duration": 1.0, "selectors": ".pig-animation" },
        {
          "name": "jump",
          "class": "pig-mega-jump",
          "duration": 2.5,
          "trigger": "click",
          "selectors": ".team-member, [class*=\"team\"]"
        },
        {
          "name": "attend",
          "trigger": "focus",
          "selectors": "input[type=\"search\"]"
        }
      ],
      "scrollBands": [
        { "min": 0.5, "max": 0.8, "class": "pig-trotting" }
      ]
    },
    {
      "name": "cow",
      "autoReveal": true,
      "entranceStagger": 0.3,
      "navigateTo": "pages/cow.html",
      "retrigger": "ignore"
    }
  ]
}
"#;

#[test]
fn json_page_parses_defaults_and_overrides() {
    let page = PageData::from_json_str(ABOUT_PAGE).expect("parse");
    assert_eq!(page.name, "about");
    assert_eq!(page.mascots.len(), 2);

    let pig = &page.mascot("pig").expect("pig").mascot;
    // Conventional class scheme is derived from the name.
    assert_eq!(pig.base_class, "pig-animation");
    assert_eq!(pig.visible_class, "pig-visible");
    assert_eq!(pig.ambient_class, "pig-walking");
    assert!((pig.entrance_delay - 0.8).abs() < 1e-6);
    assert_eq!(pig.greeting.as_deref(), Some("wave"));
    assert!((pig.greeting_delay - 1.5).abs() < 1e-6);
    assert_eq!(pig.retrigger, RetriggerPolicy::Restart);
    assert!(!pig.auto_reveal);

    let (_, wave) = pig.reaction("wave").expect("wave");
    assert_eq!(wave.class, "pig-wave");
    assert_eq!(wave.trigger, ReactionTrigger::Hover);

    let (_, jump) = pig.reaction("jump").expect("jump");
    assert_eq!(jump.class, "pig-mega-jump");
    assert_eq!(jump.trigger, ReactionTrigger::Click);
    assert!((jump.duration - 2.5).abs() < 1e-6);

    let (_, attend) = pig.reaction("attend").expect("attend");
    assert_eq!(attend.trigger, ReactionTrigger::Focus);
    assert!((attend.duration - 2.0).abs() < 1e-6);

    assert_eq!(pig.scroll_bands.len(), 1);
    assert_eq!(pig.scroll_bands[0].class, "pig-trotting");

    let cow = page.mascot("cow").expect("cow");
    assert!(cow.mascot.auto_reveal);
    assert!((cow.entrance_stagger - 0.3).abs() < 1e-6);
    assert_eq!(cow.navigate_to.as_deref(), Some("pages/cow.html"));
    assert_eq!(cow.mascot.retrigger, RetriggerPolicy::Ignore);
    assert!(cow.mascot.reactions.is_empty());

    // The parsed configuration is also valid.
    for entry in &page.mascots {
        entry.mascot.validate().expect("valid");
    }
}

#[test]
fn json_malformed_input_is_a_parse_error() {
    let err = PageData::from_json_str("{ not json").expect_err("parse error");
    assert!(matches!(err, Error::JsonParse { .. }));
}

#[test]
fn json_unknown_greeting_is_rejected() {
    let json = r#"{ "name": "p", "mascots": [ { "name": "pig", "greeting": "wave" } ] }"#;
    let err = PageData::from_json_str(json).expect_err("unknown greeting");
    assert!(matches!(
        err,
        Error::JsonUnknownGreeting { ref mascot, ref reaction }
            if mascot == "pig" && reaction == "wave"
    ));
}

#[test]
fn json_unsupported_trigger_is_rejected() {
    let json = r#"
{ "name": "p", "mascots": [ { "name": "pig", "reactions": [
  { "name": "jump", "trigger": "doubletap", "selectors": ".x" }
] } ] }
"#;
    let err = PageData::from_json_str(json).expect_err("bad trigger");
    assert!(matches!(
        err,
        Error::JsonUnsupportedTrigger { ref value, .. } if value == "doubletap"
    ));
}

#[test]
fn json_unsupported_retrigger_is_rejected() {
    let json = r#"{ "name": "p", "mascots": [ { "name": "pig", "retrigger": "queue" } ] }"#;
    let err = PageData::from_json_str(json).expect_err("bad retrigger");
    assert!(matches!(
        err,
        Error::JsonUnsupportedRetrigger { ref value, .. } if value == "queue"
    ));
}

#[test]
fn json_negative_durations_are_rejected() {
    let json = r#"
{ "name": "p", "mascots": [ { "name": "pig", "reactions": [
  { "name": "jump", "duration": -1.0, "selectors": ".x" }
] } ] }
"#;
    let err = PageData::from_json_str(json).expect_err("negative duration");
    assert!(matches!(err, Error::JsonInvalidDuration { .. }));

    let json = r#"{ "name": "p", "mascots": [ { "name": "pig", "entranceDelay": -0.5 } ] }"#;
    let err = PageData::from_json_str(json).expect_err("negative delay");
    assert!(matches!(err, Error::JsonInvalidDuration { .. }));
}

#[test]
fn json_empty_selector_lists_are_rejected() {
    let json = r#"
{ "name": "p", "mascots": [ { "name": "pig", "reactions": [
  { "name": "jump", "selectors": " , " }
] } ] }
"#;
    let err = PageData::from_json_str(json).expect_err("empty selectors");
    assert!(matches!(err, Error::JsonEmptySelectors { .. }));
}

#[test]
fn json_decreasing_scroll_bands_are_rejected() {
    let json = r#"
{ "name": "p", "mascots": [ { "name": "pig", "scrollBands": [
  { "min": 0.8, "max": 0.5, "class": "pig-trotting" }
] } ] }
"#;
    let err = PageData::from_json_str(json).expect_err("decreasing band");
    assert!(matches!(err, Error::JsonInvalidScrollBand { .. }));
}
