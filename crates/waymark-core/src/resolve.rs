//! Icon selection for pinning targets.
//!
//! Structured entries are tried first. A structured entry matches when
//! its name matches the target and its metadata constraint is either
//! absent or equal (on `level`) to the target's metadata. Among matches,
//! constrained entries beat unconstrained ones, lower levels beat higher
//! ones, and catalog order breaks the remaining ties.
//!
//! If no structured entry matches, the first legacy entry whose name
//! matches wins, with default options. Otherwise the default icon is used.
//!
//! Names match in one of two ways, decided by the entry's name:
//! - internal-form (`$enemy_troll`): exact, case-sensitive equality with
//!   the target's internal name
//! - display-form (`Troll`): case-insensitive substring of the target's
//!   translated display name

use crate::icon::{IconDefinition, IconType, StructuredIcon};
use crate::l10n::Localizer;
use crate::registry::RegisteredIcon;
use crate::target::{IconOptions, MetaData, PinningTarget};

/// Outcome of a lookup: which icon to draw and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedIcon {
    pub icon: IconType,
    pub options: IconOptions,
}

impl ResolvedIcon {
    pub const DEFAULT: ResolvedIcon = ResolvedIcon {
        icon: IconType::DEFAULT,
        options: IconOptions {
            hide_name_tag: false,
        },
    };
}

impl Default for ResolvedIcon {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Stateless view over the registered icons.
pub struct Resolver<'a> {
    icons: &'a [RegisteredIcon],
    l10n: &'a dyn Localizer,
}

impl<'a> Resolver<'a> {
    pub fn new(icons: &'a [RegisteredIcon], l10n: &'a dyn Localizer) -> Self {
        Self { icons, l10n }
    }

    pub fn resolve(&self, target: &PinningTarget) -> ResolvedIcon {
        let names = TargetNames::new(target, self.l10n);

        self.resolve_structured(target, &names)
            .or_else(|| self.resolve_legacy(&names))
            .unwrap_or(ResolvedIcon::DEFAULT)
    }

    fn resolve_structured(
        &self,
        target: &PinningTarget,
        names: &TargetNames,
    ) -> Option<ResolvedIcon> {
        self.structured()
            .filter(|(_, entry)| {
                self.name_matches(
                    &entry.target.name,
                    self.l10n.is_internal_name(&entry.target.name),
                    names,
                ) && metadata_matches(entry.target.metadata, target.metadata)
            })
            .min_by_key(|(_, entry)| {
                let constraint = entry.target.metadata;
                (constraint.is_none(), constraint)
            })
            .map(|(icon, entry)| ResolvedIcon {
                icon,
                options: entry.options,
            })
    }

    fn resolve_legacy(&self, names: &TargetNames) -> Option<ResolvedIcon> {
        self.icons
            .iter()
            .find(|registered| match &registered.definition {
                IconDefinition::Legacy(entry) => {
                    self.name_matches(&entry.name, entry.is_internal_name, names)
                }
                IconDefinition::Structured(_) => false,
            })
            .map(|registered| ResolvedIcon {
                icon: registered.icon,
                options: IconOptions::default(),
            })
    }

    fn structured(&self) -> impl Iterator<Item = (IconType, &'a StructuredIcon)> + 'a {
        self.icons
            .iter()
            .filter_map(|registered| match &registered.definition {
                IconDefinition::Structured(entry) => Some((registered.icon, entry)),
                IconDefinition::Legacy(_) => None,
            })
    }

    fn name_matches(&self, entry_name: &str, entry_is_internal: bool, names: &TargetNames) -> bool {
        if entry_is_internal {
            names.internal == entry_name
        } else {
            names.display_lower.contains(&entry_name.to_lowercase())
        }
    }
}

/// The two spellings of a target name used for matching.
struct TargetNames<'t> {
    internal: &'t str,
    display_lower: String,
}

impl<'t> TargetNames<'t> {
    fn new(target: &'t PinningTarget, l10n: &dyn Localizer) -> Self {
        Self {
            internal: &target.name,
            display_lower: l10n
                .translate_internal_name_only(&target.name)
                .to_lowercase(),
        }
    }
}

fn metadata_matches(constraint: Option<MetaData>, actual: Option<MetaData>) -> bool {
    match (constraint, actual) {
        (None, _) => true,
        (Some(expected), Some(actual)) => expected.level == actual.level,
        (Some(_), None) => false,
    }
}
