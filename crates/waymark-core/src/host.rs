use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HostError;
use crate::icon::{IconType, Sprite};

/// Identity of a pin inside the host's pin store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinId(pub Uuid);

impl PinId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PinId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pin-{}", self.0)
    }
}

/// A marker on the map overlay. Owned by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: PinId,
    pub pos: Vec3,
    pub icon: IconType,
    pub name: String,
    /// Persisted with the player's map, as opposed to a transient marker.
    pub save: bool,
    pub checked: bool,
}

/// Narrow view of the host's minimap internals.
///
/// Everything the catalog, registry and pin facade need from the host goes
/// through this trait; nothing else touches host state.
pub trait MinimapHost: Send + Sync {
    /// All live pins, in the host's iteration order.
    fn pins(&self) -> Result<Vec<Pin>, HostError>;

    /// Create a pin and return it as stored.
    fn add_pin(
        &self,
        pos: Vec3,
        icon: IconType,
        name: &str,
        save: bool,
        checked: bool,
    ) -> Result<Pin, HostError>;

    /// Remove a pin by identity.
    /// Returns Ok(true) if it was removed, Ok(false) if it was not present.
    fn remove_pin(&self, pin: &Pin) -> Result<bool, HostError>;

    /// Per-icon visibility flags, indexed by [`IconType`].
    fn visibility_table(&self) -> Result<Vec<bool>, HostError>;

    fn set_visibility_table(&self, table: Vec<bool>) -> Result<(), HostError>;

    /// Map an icon identifier to a sprite for rendering.
    fn register_sprite(&self, icon: IconType, sprite: &Sprite) -> Result<(), HostError>;
}

/// In-memory host, used by tests and by the headless binary.
pub mod memory {
    use super::*;
    use std::sync::RwLock;

    /// Number of built-in icon types of a stock host.
    pub const BUILTIN_ICON_COUNT: usize = 14;

    pub struct InMemoryMinimap {
        available: bool,
        pins: RwLock<Vec<Pin>>,
        visibility: RwLock<Vec<bool>>,
        sprites: RwLock<Vec<(IconType, Sprite)>>,
    }

    impl Default for InMemoryMinimap {
        fn default() -> Self {
            Self::with_builtin_icons(BUILTIN_ICON_COUNT)
        }
    }

    impl InMemoryMinimap {
        pub fn new() -> Self {
            Self::default()
        }

        /// A host whose visibility table holds `count` visible built-in icons.
        pub fn with_builtin_icons(count: usize) -> Self {
            Self::with_visibility(vec![true; count])
        }

        pub fn with_visibility(table: Vec<bool>) -> Self {
            Self {
                available: true,
                pins: RwLock::new(Vec::new()),
                visibility: RwLock::new(table),
                sprites: RwLock::new(Vec::new()),
            }
        }

        /// A host whose minimap instance does not exist. Every call fails.
        pub fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::default()
            }
        }

        /// Sprites registered so far, in registration order.
        pub fn sprites(&self) -> Vec<(IconType, Sprite)> {
            self.sprites.read().unwrap().clone()
        }

        fn check(&self) -> Result<(), HostError> {
            if self.available {
                Ok(())
            } else {
                Err(HostError::Unavailable)
            }
        }
    }

    impl MinimapHost for InMemoryMinimap {
        fn pins(&self) -> Result<Vec<Pin>, HostError> {
            self.check()?;
            Ok(self.pins.read().unwrap().clone())
        }

        fn add_pin(
            &self,
            pos: Vec3,
            icon: IconType,
            name: &str,
            save: bool,
            checked: bool,
        ) -> Result<Pin, HostError> {
            self.check()?;
            let pin = Pin {
                id: PinId::new(),
                pos,
                icon,
                name: name.to_string(),
                save,
                checked,
            };
            self.pins.write().unwrap().push(pin.clone());
            Ok(pin)
        }

        fn remove_pin(&self, pin: &Pin) -> Result<bool, HostError> {
            self.check()?;
            let mut pins = self.pins.write().unwrap();
            let before = pins.len();
            pins.retain(|p| p.id != pin.id);
            Ok(pins.len() != before)
        }

        fn visibility_table(&self) -> Result<Vec<bool>, HostError> {
            self.check()?;
            Ok(self.visibility.read().unwrap().clone())
        }

        fn set_visibility_table(&self, table: Vec<bool>) -> Result<(), HostError> {
            self.check()?;
            *self.visibility.write().unwrap() = table;
            Ok(())
        }

        fn register_sprite(&self, icon: IconType, sprite: &Sprite) -> Result<(), HostError> {
            self.check()?;
            self.sprites.write().unwrap().push((icon, sprite.clone()));
            Ok(())
        }
    }

}
