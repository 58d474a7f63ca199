use crate::error::RegistrationError;
use crate::host::MinimapHost;
use crate::icon::{IconDefinition, IconType};

/// Visibility given to the table slots appended for custom icons.
pub const DEFAULT_NEW_ICON_VISIBILITY: bool = true;

/// A catalog entry together with the identifier the host knows it by.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredIcon {
    pub icon: IconType,
    pub definition: IconDefinition,
}

/// Assigns host icon identifiers to catalog entries.
///
/// Custom icons are numbered contiguously from the host's current table
/// length, in catalog order. Numbers are only stable for one process run.
#[derive(Debug)]
pub struct IconRegistry {
    icons: Vec<RegisteredIcon>,
    new_icon_visibility: bool,
    registered: bool,
}

impl Default for IconRegistry {
    fn default() -> Self {
        Self {
            icons: Vec::new(),
            new_icon_visibility: DEFAULT_NEW_ICON_VISIBILITY,
            registered: false,
        }
    }
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_new_icon_visibility(mut self, visible: bool) -> Self {
        self.new_icon_visibility = visible;
        self
    }

    /// Register one sprite per entry, then grow the host's visibility table.
    ///
    /// An empty `entries` leaves the host untouched. Any host failure aborts
    /// the whole registration and the caller must treat it as a failed
    /// startup. The table is only grown once every sprite is registered, so
    /// after a failure the host still shows only its original icons.
    pub fn register_all(
        &mut self,
        host: &dyn MinimapHost,
        entries: Vec<IconDefinition>,
    ) -> Result<(), RegistrationError> {
        if self.registered {
            return Err(RegistrationError::AlreadyRegistered);
        }
        if entries.is_empty() {
            return Ok(());
        }

        let mut table = host.visibility_table()?;
        let original_len = table.len();

        let mut icons = Vec::with_capacity(entries.len());
        for (offset, definition) in entries.into_iter().enumerate() {
            let icon = IconType((original_len + offset) as u32);
            host.register_sprite(icon, definition.sprite())?;

            tracing::info!(
                "Register new sprite data: ({}, {})",
                icon,
                definition.sprite().file_name()
            );
            icons.push(RegisteredIcon { icon, definition });
        }

        table.resize(original_len + icons.len(), self.new_icon_visibility);
        let expanded_len = table.len();
        host.set_visibility_table(table)?;

        tracing::info!(
            "Visible icon types expanded: {} -> {}",
            original_len,
            expanded_len
        );

        self.icons = icons;
        self.registered = true;
        Ok(())
    }

    pub fn icons(&self) -> &[RegisteredIcon] {
        &self.icons
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
