pub mod config;
pub mod state;

pub use config::Config;
pub use state::MapState;
pub use waymark_core::{
    IconOptions, IconType, MetaData, Pin, PinningTarget, ResolvedIcon, TEXTURES_DIR,
};
