use crate::Error;

/// Delay between the threshold crossing and the visual reveal, in seconds.
pub const DEFAULT_ENTRANCE_DELAY: f32 = 0.8;

/// Delay between the visual reveal and the optional greeting, in seconds.
pub const DEFAULT_GREETING_DELAY: f32 = 2.0;

/// Grace period after a blur before a focus-held reaction ends, in seconds.
pub const DEFAULT_BLUR_GRACE: f32 = 0.5;

/// Which host event kind a reaction listens for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum ReactionTrigger {
    #[default]
    Hover,
    Click,
    /// Held while an element matching the selectors has focus; ends a blur
    /// grace period after focus leaves.
    Focus,
}

/// What happens when a reaction is triggered while it is already active.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum RetriggerPolicy {
    /// Reset the single reversion timer; the later deadline wins.
    #[default]
    Restart,
    /// Ignore re-triggers until the current reaction ends.
    Ignore,
}

/// A short transient animation triggered by a user interaction.
#[derive(Clone, Debug)]
pub struct ReactionData {
    pub name: String,
    /// Presentation class toggled while the reaction is active.
    pub class: String,
    /// Seconds before the reaction auto-reverts to the ambient state.
    /// Ignored for `Focus` reactions, which are held until blur.
    pub duration: f32,
    pub trigger: ReactionTrigger,
    /// Comma-separated selector list matched against the gesture target and
    /// its ancestors (`closest` semantics). Supplied by the host integration.
    pub selectors: String,
}

impl ReactionData {
    pub fn new(name: &str, class: &str, duration: f32, trigger: ReactionTrigger, selectors: &str) -> Self {
        Self {
            name: name.to_string(),
            class: class.to_string(),
            duration,
            trigger,
            selectors: selectors.to_string(),
        }
    }
}

/// Ambient class override applied while the page scroll fraction sits inside
/// `min_fraction..max_fraction` and the actor is idle.
#[derive(Clone, Debug)]
pub struct ScrollBandData {
    pub min_fraction: f32,
    pub max_fraction: f32,
    pub class: String,
}

/// Immutable configuration for one mascot. One of these replaces each of the
/// near-duplicate per-animal controllers of the source site.
#[derive(Clone, Debug)]
pub struct MascotData {
    pub name: String,
    /// Class carried by the mounted overlay element at all times.
    pub base_class: String,
    /// Class toggled on while the actor is revealed.
    pub visible_class: String,
    /// Default ambient class while idle (e.g. a walking loop).
    pub ambient_class: String,
    /// Seconds between the threshold crossing and the visual reveal.
    pub entrance_delay: f32,
    /// Reaction played once, `greeting_delay` seconds after the reveal.
    pub greeting: Option<String>,
    pub greeting_delay: f32,
    pub retrigger: RetriggerPolicy,
    pub blur_grace: f32,
    /// Reveal on setup instead of on a threshold crossing, and never hide on
    /// scroll. Used by the homepage choreography where mascots swoop in at
    /// page-ready time.
    pub auto_reveal: bool,
    pub reactions: Vec<ReactionData>,
    pub scroll_bands: Vec<ScrollBandData>,
}

impl MascotData {
    /// Configuration with the conventional `{name}-animation` /
    /// `{name}-visible` / `{name}-walking` class scheme and default timings.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            base_class: format!("{name}-animation"),
            visible_class: format!("{name}-visible"),
            ambient_class: format!("{name}-walking"),
            entrance_delay: DEFAULT_ENTRANCE_DELAY,
            greeting: None,
            greeting_delay: DEFAULT_GREETING_DELAY,
            retrigger: RetriggerPolicy::default(),
            blur_grace: DEFAULT_BLUR_GRACE,
            auto_reveal: false,
            reactions: Vec::new(),
            scroll_bands: Vec::new(),
        }
    }

    pub fn reaction(&self, name: &str) -> Option<(usize, &ReactionData)> {
        self.reactions
            .iter()
            .enumerate()
            .find(|(_, r)| r.name == name)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.entrance_delay.is_finite() || self.entrance_delay < 0.0 {
            return Err(Error::InvalidValue {
                message: format!("entrance delay for '{}' must be finite and >= 0", self.name),
            });
        }
        if !self.greeting_delay.is_finite() || self.greeting_delay < 0.0 {
            return Err(Error::InvalidValue {
                message: format!("greeting delay for '{}' must be finite and >= 0", self.name),
            });
        }
        if !self.blur_grace.is_finite() || self.blur_grace < 0.0 {
            return Err(Error::InvalidValue {
                message: format!("blur grace for '{}' must be finite and >= 0", self.name),
            });
        }
        for reaction in &self.reactions {
            if !reaction.duration.is_finite() || reaction.duration < 0.0 {
                return Err(Error::InvalidValue {
                    message: format!(
                        "duration for reaction '{}' of '{}' must be finite and >= 0",
                        reaction.name, self.name
                    ),
                });
            }
        }
        if let Some(greeting) = &self.greeting {
            if self.reaction(greeting).is_none() {
                return Err(Error::UnknownReaction {
                    name: greeting.clone(),
                });
            }
        }
        for band in &self.scroll_bands {
            if !(band.min_fraction.is_finite()
                && band.max_fraction.is_finite()
                && band.min_fraction < band.max_fraction)
            {
                return Err(Error::InvalidValue {
                    message: format!(
                        "scroll band {}..{} for '{}' is not an increasing finite range",
                        band.min_fraction, band.max_fraction, self.name
                    ),
                });
            }
        }
        Ok(())
    }
}

/// One mascot's placement on a page.
#[derive(Clone, Debug)]
pub struct MascotEntry {
    pub mascot: std::sync::Arc<MascotData>,
    /// Extra seconds added before this mascot's entrance, for staggered
    /// multi-mascot choreography.
    pub entrance_stagger: f32,
    /// Click on the mascot surfaces a navigation intent with this target.
    pub navigate_to: Option<String>,
}

impl MascotEntry {
    pub fn new(mascot: MascotData) -> Self {
        Self {
            mascot: std::sync::Arc::new(mascot),
            entrance_stagger: 0.0,
            navigate_to: None,
        }
    }

    pub fn with_stagger(mut self, stagger: f32) -> Self {
        self.entrance_stagger = stagger;
        self
    }

    pub fn with_navigation(mut self, target: &str) -> Self {
        self.navigate_to = Some(target.to_string());
        self
    }
}

/// Everything a host page registers: the page's mascots plus their
/// choreography. The host passes this to `Stage::new` explicitly instead of
/// the runtime sniffing location or title.
#[derive(Clone, Debug)]
pub struct PageData {
    pub name: String,
    pub mascots: Vec<MascotEntry>,
}

impl PageData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mascots: Vec::new(),
        }
    }

    pub fn mascot(&self, name: &str) -> Option<&MascotEntry> {
        self.mascots.iter().find(|e| e.mascot.name == name)
    }
}
