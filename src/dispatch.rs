//! Command dispatch: the named operations and one `apply` over them.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::goto::{self, Navigation};
use crate::highlight;
use crate::listing::Listing;
use crate::resolver;
use crate::slice;
use crate::types::{ElementId, FactKind, NavKind, TagPair};
use crate::view::{Transition, ViewState};

/// How a highlight command chooses and shows facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Every fact of the kind, no selection needed.
    All,
    /// Facts related to the selection, every row visible.
    Selected,
    /// Facts related to the selection, only their rows visible.
    Slice,
}

impl Mode {
    /// Every highlight mode, in menu order.
    pub const ALL: [Self; 3] = [Self::All, Self::Selected, Self::Slice];

    /// Context-menu group label.
    const fn label(self) -> &'static str {
        return match self {
            Self::All => "All Effects",
            Self::Selected => "Selected Effects",
            Self::Slice => "Sliced Effects",
        };
    }

    /// Prefix used in command names.
    const fn prefix(self) -> &'static str {
        return match self {
            Self::All => "all",
            Self::Selected => "sel",
            Self::Slice => "sli",
        };
    }
}

/// A named command, before it is bound to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Clear every mark, leave rows as they are.
    Erase,
    /// Go to the definition of the selected navigable fact.
    Goto(NavKind),
    /// Highlight facts of one kind in one mode.
    Highlight {
        /// Fact kind to highlight.
        kind: FactKind,
        /// How facts are chosen and shown.
        mode: Mode,
    },
    /// Highlight the `DEF-tag`/`USE-tag` elements linked to the selection.
    Link,
    /// Show every row again.
    Unslice,
}

impl Command {
    /// Every command, in context-menu order, then the click-driven link.
    pub fn all() -> Vec<Self> {
        let mut commands = Vec::with_capacity(17);
        for mode in Mode::ALL {
            for kind in FactKind::ALL {
                commands.push(Self::Highlight { kind, mode });
            }
        }
        for kind in NavKind::ALL {
            commands.push(Self::Goto(kind));
        }
        commands.push(Self::Erase);
        commands.push(Self::Unslice);
        commands.push(Self::Link);
        return commands;
    }

    /// Attach the selection this command acts on.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingOrigin` if the command needs a selection and
    /// none was given, or `Error::UnknownElement` if the selection is not part
    /// of the listing.
    pub fn bind(self, listing: &Listing, origin: Option<&str>) -> Result<Op, Error> {
        let origin = match (self.needs_origin(), origin) {
            (false, _) => None,
            (true, None) => return Err(Error::MissingOrigin { command: self.to_string() }),
            (true, Some(raw)) => {
                let id = ElementId::from(raw);
                if listing.element(&id).is_none() {
                    return Err(Error::UnknownElement { id: raw.to_string() });
                }
                Some(id)
            },
        };
        return Ok(Op { command: self, origin });
    }

    /// Context-menu group this command appears under, if any.
    pub const fn group(self) -> Option<&'static str> {
        return match self {
            Self::Erase | Self::Link | Self::Unslice => None,
            Self::Goto(_) => Some("Goto Def"),
            Self::Highlight { mode, .. } => Some(mode.label()),
        };
    }

    /// Context-menu item label.
    pub const fn label(self) -> &'static str {
        return match self {
            Self::Erase => "Remove Highlighting",
            Self::Goto(kind) => kind.label(),
            Self::Highlight { kind, .. } => kind.label(),
            Self::Link => "Linked Defs/Uses",
            Self::Unslice => "Undo Slice",
        };
    }

    /// True if the command acts on a selected element.
    pub const fn needs_origin(self) -> bool {
        return match self {
            Self::Erase | Self::Unslice | Self::Highlight { mode: Mode::All, .. } => false,
            Self::Goto(_) | Self::Highlight { .. } | Self::Link => true,
        };
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Erase => f.write_str("erase"),
            Self::Goto(kind) => write!(f, "goto-{}", kind.fact_kind().short()),
            Self::Highlight { kind, mode } => write!(f, "{}-{}", mode.prefix(), kind.short()),
            Self::Link => f.write_str("link"),
            Self::Unslice => f.write_str("unslice"),
        };
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let commands = Self::all();
        if let Some(command) = commands.iter().find(|c| return c.to_string() == s) {
            return Ok(*command);
        }
        let names: Vec<String> = commands.iter().map(ToString::to_string).collect();
        return Err(Error::UnknownCommand {
            name: s.to_string(),
            suggestion: crate::diagnostics::find_closest_suggestion(s, &names),
        });
    }
}

/// A command bound to its selection, ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    /// The command to run.
    pub command: Command,
    /// The selected element, for commands that need one.
    pub origin: Option<ElementId>,
}

/// Applies operations over one listing.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    /// The listing every operation reads.
    listing: &'a Listing,
    /// Upper bound on goto scroll animations.
    scroll_duration_ms: u64,
}

impl<'a> Engine<'a> {
    /// Apply one operation to `view` and return the next state.
    ///
    /// Never fails: a selection that resolves to nothing degrades to the
    /// command's no-op behaviour.
    pub fn apply(&self, view: &ViewState, op: &Op) -> Transition {
        tracing::debug!(command = %op.command, origin = ?op.origin, "applying");
        let origin = op.origin.as_ref();
        return match op.command {
            Command::Erase => Transition::to(highlight::clear_all(view)),
            Command::Unslice => Transition::to(slice::show_all_rows(view)),
            Command::Highlight { kind, mode: Mode::All } => {
                Transition::to(highlight::show_all(self.listing, kind))
            },
            Command::Highlight { kind, mode: Mode::Selected } => {
                let resolved = origin.and_then(|id| return resolver::resolve(self.listing, id, TagPair::fact(kind)));
                match resolved {
                    Some(resolved) => {
                        Transition::to(highlight::show_related(self.listing, kind, &resolved.addresses))
                    },
                    None => Transition::to(ViewState::initial()),
                }
            },
            Command::Highlight { kind, mode: Mode::Slice } => {
                let resolved = origin.and_then(|id| return resolver::resolve(self.listing, id, TagPair::fact(kind)));
                let addresses = resolved.as_ref().map(|r| return &r.addresses);
                Transition::to(slice::slice_to_related(self.listing, view, kind, addresses))
            },
            Command::Goto(kind) => match origin {
                Some(id) => self.goto(view, kind, id).0,
                None => Transition::to(highlight::clear_all(view)),
            },
            Command::Link => match origin {
                Some(id) => Transition::to(highlight::show_linked(self.listing, view, id)),
                None => Transition::to(view.clone()),
            },
        };
    }

    /// Go to a definition and also report how the navigation ended.
    pub fn goto(&self, view: &ViewState, kind: NavKind, origin: &ElementId) -> (Transition, Navigation) {
        return goto::goto_definition(self.listing, view, kind, origin, self.scroll_duration_ms);
    }

    /// The listing this engine reads.
    pub const fn listing(&self) -> &'a Listing {
        return self.listing;
    }

    /// Engine with the default scroll duration.
    pub const fn new(listing: &'a Listing) -> Self {
        return Self { listing, scroll_duration_ms: goto::DEFAULT_SCROLL_MS };
    }

    /// Override the scroll duration used by goto.
    #[must_use]
    pub const fn with_scroll_duration(mut self, scroll_duration_ms: u64) -> Self {
        self.scroll_duration_ms = scroll_duration_ms;
        return self;
    }
}
