use glam::{Vec2, Vec3};

use crate::error::HostError;
use crate::host::{MinimapHost, Pin};
use crate::icon::IconType;
use crate::resolve::Resolver;
use crate::target::PinningTarget;

/// Distance between two positions on the ground plane, ignoring height.
pub fn distance_xz(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

/// Add, remove and look up pins without knowing about custom icons.
pub struct PinFacade<'a> {
    host: &'a dyn MinimapHost,
    resolver: Resolver<'a>,
}

impl<'a> PinFacade<'a> {
    pub fn new(host: &'a dyn MinimapHost, resolver: Resolver<'a>) -> Self {
        Self { host, resolver }
    }

    pub fn add_pin(
        &self,
        pos: Vec3,
        icon: IconType,
        name: &str,
        save: bool,
    ) -> Result<Pin, HostError> {
        let pin = self.host.add_pin(pos, icon, name, save, false)?;
        tracing::debug!(
            "Add pin: [name: {}, pos: {}, icon: {}]",
            pin.name,
            pin.pos,
            pin.icon.0
        );
        Ok(pin)
    }

    /// Add a pin whose icon is chosen for `target`.
    ///
    /// If the chosen icon hides its name tag, the pin is stored without a name.
    pub fn add_pin_for(
        &self,
        pos: Vec3,
        target: &PinningTarget,
        name: &str,
        save: bool,
    ) -> Result<Pin, HostError> {
        let resolved = self.resolver.resolve(target);
        let name = if resolved.options.hide_name_tag {
            ""
        } else {
            name
        };
        self.add_pin(pos, resolved.icon, name, save)
    }

    pub fn remove_pin(&self, pin: &Pin) -> Result<bool, HostError> {
        let removed = self.host.remove_pin(pin)?;
        tracing::debug!(
            "Remove pin: [name: {}, pos: {}, icon: {}]",
            pin.name,
            pin.pos,
            pin.icon.0
        );
        Ok(removed)
    }

    /// Remove the first pin at exactly `pos` whose save flag equals `save`.
    /// Returns the removed pin, or None when nothing was there.
    pub fn remove_pin_at(&self, pos: Vec3, save: bool) -> Result<Option<Pin>, HostError> {
        match self.find_pin(|pin| pin.save == save && pin.pos == pos)? {
            Some(pin) => {
                self.remove_pin(&pin)?;
                Ok(Some(pin))
            }
            None => Ok(None),
        }
    }

    pub fn find_pin<P>(&self, predicate: P) -> Result<Option<Pin>, HostError>
    where
        P: Fn(&Pin) -> bool,
    {
        Ok(self.host.pins()?.into_iter().find(|pin| predicate(pin)))
    }

    /// First pin within `radius` of `pos` on the ground plane, inclusive.
    pub fn find_pin_in_range(&self, pos: Vec3, radius: f32) -> Result<Option<Pin>, HostError> {
        self.find_pin(|pin| distance_xz(pin.pos, pos) <= radius)
    }

    pub fn have_pin_in_range(&self, pos: Vec3, radius: f32) -> Result<bool, HostError> {
        Ok(self
            .host
            .pins()?
            .iter()
            .any(|pin| distance_xz(pin.pos, pos) <= radius))
    }
}
