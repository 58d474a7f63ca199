use std::sync::Arc;

use glam::Vec3;
use waymark_core::{
    CoreError, HostError, IconCatalog, IconRegistry, IconType, Localizer, MinimapHost, Pin,
    PinFacade, PinningTarget, ResolvedIcon, Resolver, SpriteLoader,
};

use crate::config::Config;

/// Custom icon state for one running host.
///
/// Built once at startup by [`MapState::initialize`]; after that the
/// catalog is fixed and every call is a read of it plus host pin access.
pub struct MapState {
    host: Arc<dyn MinimapHost>,
    l10n: Arc<dyn Localizer>,
    registry: IconRegistry,
}

impl MapState {
    /// Load every icon source named by `config` and register the result.
    ///
    /// Broken sources are logged and skipped. A registration failure is
    /// returned and leaves no usable state.
    pub fn initialize(
        config: &Config,
        host: Arc<dyn MinimapHost>,
        l10n: Arc<dyn Localizer>,
        sprites: Arc<dyn SpriteLoader>,
    ) -> Result<Self, CoreError> {
        let mut catalog = IconCatalog::new(sprites, l10n.clone());

        catalog.load_defaults(&config.default_textures);
        if let Some(plugin_dir) = &config.plugin_dir {
            catalog.load_extensions(plugin_dir);
        }
        if let Some(injected) = &config.injected_textures {
            catalog.load_overrides(injected);
        }

        tracing::info!("Loaded {} custom icons", catalog.len());

        Self::from_catalog(catalog, host, l10n, config.new_icons_visible)
    }

    /// Register an already-loaded catalog.
    pub fn from_catalog(
        catalog: IconCatalog,
        host: Arc<dyn MinimapHost>,
        l10n: Arc<dyn Localizer>,
        new_icons_visible: bool,
    ) -> Result<Self, CoreError> {
        let mut registry = IconRegistry::new().with_new_icon_visibility(new_icons_visible);
        registry.register_all(host.as_ref(), catalog.into_entries())?;

        Ok(Self {
            host,
            l10n,
            registry,
        })
    }

    pub fn registry(&self) -> &IconRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self.registry.icons(), self.l10n.as_ref())
    }

    pub fn pins(&self) -> PinFacade<'_> {
        PinFacade::new(self.host.as_ref(), self.resolver())
    }

    pub fn resolve(&self, target: &PinningTarget) -> ResolvedIcon {
        self.resolver().resolve(target)
    }

    pub fn resolve_icon(&self, target: &PinningTarget) -> IconType {
        self.resolve(target).icon
    }

    pub fn add_pin(
        &self,
        pos: Vec3,
        icon: IconType,
        name: &str,
        save: bool,
    ) -> Result<Pin, HostError> {
        self.pins().add_pin(pos, icon, name, save)
    }

    pub fn add_pin_for(
        &self,
        pos: Vec3,
        target: &PinningTarget,
        name: &str,
        save: bool,
    ) -> Result<Pin, HostError> {
        self.pins().add_pin_for(pos, target, name, save)
    }

    pub fn remove_pin(&self, pin: &Pin) -> Result<bool, HostError> {
        self.pins().remove_pin(pin)
    }

    pub fn remove_pin_at(&self, pos: Vec3, save: bool) -> Result<Option<Pin>, HostError> {
        self.pins().remove_pin_at(pos, save)
    }

    pub fn find_pin<P>(&self, predicate: P) -> Result<Option<Pin>, HostError>
    where
        P: Fn(&Pin) -> bool,
    {
        self.pins().find_pin(predicate)
    }

    pub fn find_pin_in_range(&self, pos: Vec3, radius: f32) -> Result<Option<Pin>, HostError> {
        self.pins().find_pin_in_range(pos, radius)
    }

    pub fn have_pin_in_range(&self, pos: Vec3, radius: f32) -> Result<bool, HostError> {
        self.pins().have_pin_in_range(pos, radius)
    }
}
