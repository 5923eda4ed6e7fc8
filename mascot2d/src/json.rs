//! JSON page configuration, so host integrations can ship mascot setups as
//! data instead of code.

use crate::{
    DEFAULT_BLUR_GRACE, DEFAULT_ENTRANCE_DELAY, DEFAULT_GREETING_DELAY, Error, MascotData,
    MascotEntry, PageData, ReactionData, ReactionTrigger, RetriggerPolicy, ScrollBandData,
};
use serde::Deserialize;
use std::sync::Arc;

fn default_entrance_delay() -> f32 {
    DEFAULT_ENTRANCE_DELAY
}

fn default_greeting_delay() -> f32 {
    DEFAULT_GREETING_DELAY
}

fn default_blur_grace() -> f32 {
    DEFAULT_BLUR_GRACE
}

fn default_reaction_duration() -> f32 {
    2.0
}

#[derive(Debug, Deserialize)]
struct Root {
    name: String,
    #[serde(default)]
    mascots: Vec<MascotDef>,
}

#[derive(Debug, Deserialize)]
struct MascotDef {
    name: String,
    #[serde(default, rename = "baseClass")]
    base_class: Option<String>,
    #[serde(default, rename = "visibleClass")]
    visible_class: Option<String>,
    #[serde(default, rename = "ambientClass")]
    ambient_class: Option<String>,
    #[serde(default = "default_entrance_delay", rename = "entranceDelay")]
    entrance_delay: f32,
    #[serde(default)]
    greeting: Option<String>,
    #[serde(default = "default_greeting_delay", rename = "greetingDelay")]
    greeting_delay: f32,
    #[serde(default)]
    retrigger: Option<String>,
    #[serde(default = "default_blur_grace", rename = "blurGrace")]
    blur_grace: f32,
    #[serde(default, rename = "autoReveal")]
    auto_reveal: bool,
    #[serde(default, rename = "entranceStagger")]
    entrance_stagger: f32,
    #[serde(default, rename = "navigateTo")]
    navigate_to: Option<String>,
    #[serde(default)]
    reactions: Vec<ReactionDef>,
    #[serde(default, rename = "scrollBands")]
    scroll_bands: Vec<ScrollBandDef>,
}

#[derive(Debug, Deserialize)]
struct ReactionDef {
    name: String,
    #[serde(default)]
    class: Option<String>,
    #[serde(default = "default_reaction_duration")]
    duration: f32,
    #[serde(default)]
    trigger: Option<String>,
    selectors: String,
}

#[derive(Debug, Deserialize)]
struct ScrollBandDef {
    min: f32,
    max: f32,
    class: String,
}

impl PageData {
    pub fn from_json_str(input: &str) -> Result<Self, Error> {
        let root: Root = serde_json::from_str(input).map_err(|e| Error::JsonParse {
            message: e.to_string(),
        })?;

        let mut mascots = Vec::with_capacity(root.mascots.len());
        for def in root.mascots {
            let entry = convert_mascot(def)?;
            mascots.push(entry);
        }

        Ok(PageData {
            name: root.name,
            mascots,
        })
    }
}

fn convert_mascot(def: MascotDef) -> Result<MascotEntry, Error> {
    let mut data = MascotData::new(&def.name);
    if let Some(base_class) = def.base_class {
        data.base_class = base_class;
    }
    if let Some(visible_class) = def.visible_class {
        data.visible_class = visible_class;
    }
    if let Some(ambient_class) = def.ambient_class {
        data.ambient_class = ambient_class;
    }

    check_duration(def.entrance_delay, || {
        format!("entrance delay of mascot '{}'", def.name)
    })?;
    check_duration(def.greeting_delay, || {
        format!("greeting delay of mascot '{}'", def.name)
    })?;
    check_duration(def.blur_grace, || {
        format!("blur grace of mascot '{}'", def.name)
    })?;
    check_duration(def.entrance_stagger, || {
        format!("entrance stagger of mascot '{}'", def.name)
    })?;
    data.entrance_delay = def.entrance_delay;
    data.greeting_delay = def.greeting_delay;
    data.blur_grace = def.blur_grace;
    data.auto_reveal = def.auto_reveal;

    data.retrigger = match def.retrigger.as_deref() {
        None | Some("restart") => RetriggerPolicy::Restart,
        Some("ignore") => RetriggerPolicy::Ignore,
        Some(other) => {
            return Err(Error::JsonUnsupportedRetrigger {
                mascot: def.name.clone(),
                value: other.to_string(),
            });
        }
    };

    for reaction in def.reactions {
        check_duration(reaction.duration, || {
            format!("reaction '{}' of mascot '{}'", reaction.name, def.name)
        })?;
        if reaction.selectors.split(',').all(|s| s.trim().is_empty()) {
            return Err(Error::JsonEmptySelectors {
                mascot: def.name.clone(),
                reaction: reaction.name.clone(),
            });
        }
        let trigger = match reaction.trigger.as_deref() {
            None | Some("hover") => ReactionTrigger::Hover,
            Some("click") => ReactionTrigger::Click,
            Some("focus") => ReactionTrigger::Focus,
            Some(other) => {
                return Err(Error::JsonUnsupportedTrigger {
                    reaction: reaction.name.clone(),
                    value: other.to_string(),
                });
            }
        };
        let class = reaction
            .class
            .unwrap_or_else(|| format!("{}-{}", def.name, reaction.name));
        data.reactions.push(ReactionData {
            name: reaction.name,
            class,
            duration: reaction.duration,
            trigger,
            selectors: reaction.selectors,
        });
    }

    if let Some(greeting) = &def.greeting {
        if data.reaction(greeting).is_none() {
            return Err(Error::JsonUnknownGreeting {
                mascot: def.name.clone(),
                reaction: greeting.clone(),
            });
        }
    }
    data.greeting = def.greeting;

    for band in def.scroll_bands {
        if !(band.min.is_finite() && band.max.is_finite() && band.min < band.max) {
            return Err(Error::JsonInvalidScrollBand {
                mascot: def.name.clone(),
                message: format!("{}..{} is not an increasing finite range", band.min, band.max),
            });
        }
        data.scroll_bands.push(ScrollBandData {
            min_fraction: band.min,
            max_fraction: band.max,
            class: band.class,
        });
    }

    Ok(MascotEntry {
        mascot: Arc::new(data),
        entrance_stagger: def.entrance_stagger,
        navigate_to: def.navigate_to,
    })
}

fn check_duration(value: f32, context: impl Fn() -> String) -> Result<(), Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::JsonInvalidDuration {
            context: context(),
            message: format!("{value} must be finite and >= 0"),
        })
    }
}
