/// Core domain types for defnav: fact kinds, tags, marks, and identifiers.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One opaque address identifier shared by a definition and its uses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(
    /// The identifier exactly as it appeared in the listing.
    pub String,
);

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

/// Addresses produced by the resolver. Kept in listing order; membership
/// is what matters for intersection tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    /// The resolved identifiers, duplicates removed.
    addresses: Vec<Address>,
}

impl AddressSet {
    /// Borrow the identifiers in resolution order.
    pub fn as_slice(&self) -> &[Address] {
        return &self.addresses;
    }

    /// Build a set from a sequence, dropping repeated identifiers.
    pub fn from_addresses(addresses: &[Address]) -> Self {
        let mut unique: Vec<Address> = Vec::with_capacity(addresses.len());
        for address in addresses {
            if !unique.contains(address) {
                unique.push(address.clone());
            }
        }
        return Self { addresses: unique };
    }

    /// True if at least one identifier of `other` is in this set.
    pub fn intersects(&self, other: &[Address]) -> bool {
        return other.iter().any(|a| return self.addresses.contains(a));
    }

    /// True if the set holds no identifiers.
    pub fn is_empty(&self) -> bool {
        return self.addresses.is_empty();
    }

    /// Number of distinct identifiers.
    pub fn len(&self) -> usize {
        return self.addresses.len();
    }
}

/// Stable element identifier assigned by the rendering step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(
    /// The identifier string, never empty.
    pub String,
);

impl ElementId {
    /// Borrow the identifier string.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        return Self(value.to_string());
    }
}

/// The four kinds of def/use fact annotated by the upstream analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FactKind {
    /// Call sites and the functions they reach.
    CallSite,
    /// Branch conditions and the facts they depend on.
    Condition,
    /// Values flowing between expressions.
    Value,
    /// Variables bound in an environment.
    Variable,
}

impl FactKind {
    /// Every fact kind, in menu order.
    pub const ALL: [Self; 4] = [Self::Variable, Self::Value, Self::CallSite, Self::Condition];

    /// Menu label used by the context menu.
    pub const fn label(self) -> &'static str {
        return match self {
            Self::CallSite => "Callsites",
            Self::Condition => "Conditions",
            Self::Value => "Values",
            Self::Variable => "Variables",
        };
    }

    /// Short suffix used in command names (`sel-var`, `sli-call`, ...).
    pub const fn short(self) -> &'static str {
        return match self {
            Self::CallSite => "call",
            Self::Condition => "con",
            Self::Value => "val",
            Self::Variable => "var",
        };
    }

    /// Class-token prefix in the listing (`ENV`, `VAL`, `CALL`, `CON`).
    const fn token_prefix(self) -> &'static str {
        return match self {
            Self::CallSite => "CALL",
            Self::Condition => "CON",
            Self::Value => "VAL",
            Self::Variable => "ENV",
        };
    }
}

impl fmt::Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(self.label());
    }
}

/// Visual mark carried by at most one element at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    /// A definition related to the current selection.
    Def,
    /// A goto target.
    Goto,
    /// A use related to the current selection.
    Use,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(match self {
            Self::Def => "def",
            Self::Goto => "goto",
            Self::Use => "use",
        });
    }
}

/// Fact kinds that also carry navigable (goto) tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavKind {
    /// Navigable value definitions and uses.
    Value,
    /// Navigable variable definitions and uses.
    Variable,
}

impl NavKind {
    /// Every navigable kind, in menu order.
    pub const ALL: [Self; 2] = [Self::Variable, Self::Value];

    /// The plain fact kind this navigable kind belongs to.
    pub const fn fact_kind(self) -> FactKind {
        return match self {
            Self::Value => FactKind::Value,
            Self::Variable => FactKind::Variable,
        };
    }

    /// Menu label used by the "Goto Def" submenu.
    pub const fn label(self) -> &'static str {
        return match self {
            Self::Value => "Value Def",
            Self::Variable => "Variable Def",
        };
    }
}

/// Definition or use side of a fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The defining occurrence.
    Def,
    /// A using occurrence.
    Use,
}

impl Role {
    /// Class-token suffix (`DEF` or `USE`).
    const fn token_suffix(self) -> &'static str {
        return match self {
            Self::Def => "DEF",
            Self::Use => "USE",
        };
    }
}

/// A category tag on an annotated element.
///
/// Parsed once from the listing's class tokens; everything after loading
/// works on this type, never on the token strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    /// A highlightable fact (`ENV-DEF`, `CALL-USE`, ...).
    Fact {
        /// Which fact kind.
        kind: FactKind,
        /// Definition or use.
        role: Role,
    },
    /// A def/use link matched on its exact address list (`DEF-tag`, `USE-tag`).
    Linked {
        /// Definition or use.
        role: Role,
    },
    /// A navigable fact used only by goto (`DENV-DEF`, `DVAL-USE`, ...).
    Navigable {
        /// Which navigable kind.
        kind: NavKind,
        /// Definition or use.
        role: Role,
    },
}

impl Tag {
    /// Every tag in the vocabulary.
    pub fn all() -> Vec<Self> {
        let mut tags = Vec::with_capacity(14);
        for kind in FactKind::ALL {
            tags.push(Self::Fact { kind, role: Role::Def });
            tags.push(Self::Fact { kind, role: Role::Use });
        }
        for kind in NavKind::ALL {
            tags.push(Self::Navigable { kind, role: Role::Def });
            tags.push(Self::Navigable { kind, role: Role::Use });
        }
        tags.push(Self::Linked { role: Role::Def });
        tags.push(Self::Linked { role: Role::Use });
        return tags;
    }

    /// Definition or use side of this tag.
    pub const fn role(self) -> Role {
        return match self {
            Self::Fact { role, .. } | Self::Linked { role } | Self::Navigable { role, .. } => role,
        };
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Fact { kind, role } => {
                write!(f, "{}-{}", kind.token_prefix(), role.token_suffix())
            },
            Self::Linked { role } => write!(f, "{}-tag", role.token_suffix()),
            Self::Navigable { kind, role } => {
                write!(f, "D{}-{}", kind.fact_kind().token_prefix(), role.token_suffix())
            },
        };
    }
}

/// Returned when a class token is not part of the tag vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(
    /// The token that failed to parse.
    pub String,
);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEF-tag" => return Ok(Self::Linked { role: Role::Def }),
            "USE-tag" => return Ok(Self::Linked { role: Role::Use }),
            _ => {},
        }
        let (head, tail) = s.split_once('-').ok_or_else(|| return UnknownTag(s.to_string()))?;
        let role = match tail {
            "DEF" => Role::Def,
            "USE" => Role::Use,
            _ => return Err(UnknownTag(s.to_string())),
        };
        return match head {
            "CALL" => Ok(Self::Fact { kind: FactKind::CallSite, role }),
            "CON" => Ok(Self::Fact { kind: FactKind::Condition, role }),
            "DENV" => Ok(Self::Navigable { kind: NavKind::Variable, role }),
            "DVAL" => Ok(Self::Navigable { kind: NavKind::Value, role }),
            "ENV" => Ok(Self::Fact { kind: FactKind::Variable, role }),
            "VAL" => Ok(Self::Fact { kind: FactKind::Value, role }),
            _ => Err(UnknownTag(s.to_string())),
        };
    }
}

/// The def/use tag pair an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPair {
    /// Tag identifying definitions.
    pub def: Tag,
    /// Tag identifying uses.
    pub usage: Tag,
}

impl TagPair {
    /// Highlightable pair for a fact kind.
    pub const fn fact(kind: FactKind) -> Self {
        return Self {
            def: Tag::Fact { kind, role: Role::Def },
            usage: Tag::Fact { kind, role: Role::Use },
        };
    }

    /// The `DEF-tag`/`USE-tag` pair.
    pub const fn linked() -> Self {
        return Self {
            def: Tag::Linked { role: Role::Def },
            usage: Tag::Linked { role: Role::Use },
        };
    }

    /// Navigable pair for a goto kind.
    pub const fn navigable(kind: NavKind) -> Self {
        return Self {
            def: Tag::Navigable { kind, role: Role::Def },
            usage: Tag::Navigable { kind, role: Role::Use },
        };
    }
}

/// Position of a row in the listing, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(
    /// Zero-based row index.
    pub usize,
);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "row {}", self.0);
    }
}
