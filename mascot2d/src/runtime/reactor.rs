use crate::{MascotData, ReactionTrigger};

/// Host gesture kinds the reactor understands. `FocusIn`/`FocusOut` drive
/// focus-held reactions; everything else is a discrete trigger.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GestureKind {
    Hover,
    Click,
    FocusIn,
    FocusOut,
}

/// Descriptor of one element on a gesture's target path.
#[derive(Clone, Debug, Default)]
pub struct GestureTarget {
    /// Lowercase tag name, e.g. `section`, `input`.
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Attributes the host chose to expose (e.g. `type`), for
    /// `[attr="value"]` selectors.
    pub attrs: Vec<(String, String)>,
}

impl GestureTarget {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_classes(mut self, classes: &[&str]) -> Self {
        self.classes = classes.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    fn class_attr(&self) -> String {
        self.classes.join(" ")
    }
}

/// A document-level interaction event: the target element first, then its
/// ancestors, mirroring DOM `closest()` lookups.
#[derive(Clone, Debug)]
pub struct Gesture {
    pub kind: GestureKind,
    pub path: Vec<GestureTarget>,
}

impl Gesture {
    pub fn new(kind: GestureKind, path: Vec<GestureTarget>) -> Self {
        Self { kind, path }
    }
}

/// What a gesture resolved to for one mascot.
#[derive(Clone, Debug, PartialEq)]
pub enum MatchedReaction<'a> {
    /// Start (or re-trigger) the named reaction now.
    Start(&'a str),
    /// The focus holding the named reaction left; end it after the blur
    /// grace delay.
    EndAfterGrace(&'a str),
}

/// Maps interaction events to named transient reactions using each
/// reaction's selector list. The selectors come from the host integration
/// and are matched, not validated; unknown syntax simply matches nothing.
#[derive(Debug)]
pub struct GestureReactor {
    bindings: Vec<Binding>,
}

#[derive(Debug)]
struct Binding {
    reaction: String,
    trigger: ReactionTrigger,
    selectors: String,
}

impl GestureReactor {
    pub fn new(data: &MascotData) -> Self {
        let bindings = data
            .reactions
            .iter()
            .map(|r| Binding {
                reaction: r.name.clone(),
                trigger: r.trigger,
                selectors: r.selectors.clone(),
            })
            .collect();
        Self { bindings }
    }

    /// Resolves a gesture to a reaction, first matching binding wins
    /// (declaration order, like the source site's listener order).
    pub fn match_gesture(&self, gesture: &Gesture) -> Option<MatchedReaction<'_>> {
        let wanted = match gesture.kind {
            GestureKind::Hover => ReactionTrigger::Hover,
            GestureKind::Click => ReactionTrigger::Click,
            GestureKind::FocusIn | GestureKind::FocusOut => ReactionTrigger::Focus,
        };
        let binding = self.bindings.iter().find(|b| {
            b.trigger == wanted && path_matches_selector_list(&gesture.path, &b.selectors)
        })?;
        match gesture.kind {
            GestureKind::FocusOut => Some(MatchedReaction::EndAfterGrace(&binding.reaction)),
            _ => Some(MatchedReaction::Start(&binding.reaction)),
        }
    }
}

/// True when any element on the path matches any selector in the
/// comma-separated list (`closest()` over the whole list).
pub fn path_matches_selector_list(path: &[GestureTarget], selectors: &str) -> bool {
    selectors.split(',').map(str::trim).any(|selector| {
        !selector.is_empty() && path.iter().any(|t| matches_compound(selector, t))
    })
}

/// Matches one compound selector against one element. Supported subset:
/// `tag`, `.class`, `#id`, `[class*="sub"]`, `[attr="value"]` and
/// conjunctions thereof (e.g. `input[type="search"]`). Anything else
/// matches nothing.
fn matches_compound(selector: &str, target: &GestureTarget) -> bool {
    let mut rest = selector;

    // Optional leading tag.
    let tag_len = rest
        .find(['.', '#', '['])
        .unwrap_or(rest.len());
    if tag_len > 0 {
        let tag = &rest[..tag_len];
        if !tag.eq_ignore_ascii_case(&target.tag) {
            return false;
        }
        rest = &rest[tag_len..];
    }

    while !rest.is_empty() {
        match rest.as_bytes()[0] {
            b'.' => {
                let end = rest[1..].find(['.', '#', '[']).map(|i| i + 1).unwrap_or(rest.len());
                let class = &rest[1..end];
                if class.is_empty() || !target.classes.iter().any(|c| c == class) {
                    return false;
                }
                rest = &rest[end..];
            }
            b'#' => {
                let end = rest[1..].find(['.', '#', '[']).map(|i| i + 1).unwrap_or(rest.len());
                let id = &rest[1..end];
                if id.is_empty() || target.id.as_deref() != Some(id) {
                    return false;
                }
                rest = &rest[end..];
            }
            b'[' => {
                let Some(close) = rest.find(']') else {
                    return false;
                };
                if !matches_attribute(&rest[1..close], target) {
                    return false;
                }
                rest = &rest[close + 1..];
            }
            _ => return false,
        }
    }
    true
}

/// Matches the inside of one `[...]` attribute selector.
fn matches_attribute(body: &str, target: &GestureTarget) -> bool {
    let (name, op, value) = if let Some((name, value)) = body.split_once("*=") {
        (name, Op::Contains, value)
    } else if let Some((name, value)) = body.split_once('=') {
        (name, Op::Equals, value)
    } else {
        // Bare existence check, e.g. `[disabled]`.
        return target.attrs.iter().any(|(n, _)| n == body);
    };

    let value = value.trim_matches(|c| c == '"' || c == '\'');
    let actual = match name {
        "class" => Some(target.class_attr()),
        "id" => target.id.clone(),
        _ => target
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone()),
    };
    let Some(actual) = actual else {
        return false;
    };
    match op {
        Op::Contains => actual.contains(value),
        Op::Equals => actual == value,
    }
}

#[derive(Copy, Clone)]
enum Op {
    Contains,
    Equals,
}
