//! Waymark Core - custom map icons and pin management.
//!
//! Loads icon definitions from data files, registers them with the host
//! minimap, picks the icon for a pinning target, and adds/removes/finds
//! pins. All access to host state goes through [`MinimapHost`].

pub mod catalog;
pub mod error;
pub mod host;
pub mod icon;
pub mod l10n;
pub mod loader;
pub mod pins;
pub mod registry;
pub mod resolve;
pub mod target;

// Re-exports for convenience
pub use catalog::{IconCatalog, TEXTURES_DIR};
pub use error::{CoreError, HostError, LoadError, RegistrationError};
pub use host::memory::InMemoryMinimap;
pub use host::{MinimapHost, Pin, PinId};
pub use icon::{IconDefinition, IconType, LegacyIcon, Sprite, SpriteInfo, StructuredIcon};
pub use l10n::{KeyTable, Localizer};
pub use loader::{FileSpriteLoader, SpriteLoader};
pub use pins::{distance_xz, PinFacade};
pub use registry::{IconRegistry, RegisteredIcon};
pub use resolve::{ResolvedIcon, Resolver};
pub use target::{IconOptions, MetaData, PinningTarget};
