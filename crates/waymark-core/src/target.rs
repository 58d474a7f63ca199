use serde::{Deserialize, Serialize};

/// Level used when metadata is present but does not name one.
pub const UNSET_LEVEL: i32 = -1;

/// Structured metadata that narrows which icon applies to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(default = "unset_level")]
    pub level: i32,
}

fn unset_level() -> i32 {
    UNSET_LEVEL
}

impl MetaData {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Default for MetaData {
    fn default() -> Self {
        Self { level: UNSET_LEVEL }
    }
}

/// The thing a pin is being created for, e.g. `$piece_deposit_copper`.
///
/// `name` is either an internal-form translation key or a display string.
/// An absent `metadata` means "no constraint" on catalog entries and
/// "unknown" on lookup targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinningTarget {
    pub name: String,
    #[serde(default)]
    pub metadata: Option<MetaData>,
}

impl PinningTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metadata: None,
        }
    }

    pub fn with_level(name: impl Into<String>, level: i32) -> Self {
        Self {
            name: name.into(),
            metadata: Some(MetaData::new(level)),
        }
    }
}

/// Parses `name` or `name:level`, as typed on a command line.
///
/// A suffix that is not an integer is kept as part of the name.
impl std::str::FromStr for PinningTarget {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.rsplit_once(':') {
            Some((name, level)) => match level.trim().parse() {
                Ok(level) => PinningTarget::with_level(name, level),
                Err(_) => PinningTarget::new(s),
            },
            None => PinningTarget::new(s),
        })
    }
}

/// Display options attached to a resolved icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconOptions {
    #[serde(default)]
    pub hide_name_tag: bool,
}
