use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use waymark::{Config, MapState, PinningTarget};
use waymark_core::{FileSpriteLoader, InMemoryMinimap, KeyTable};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Optional: WAYMARK_DEFAULT_TEXTURES (default: ./Textures)");
            eprintln!("Optional: WAYMARK_PLUGIN_DIR, WAYMARK_INJECTED_TEXTURES");
            eprintln!("Optional: WAYMARK_NEW_ICONS_VISIBLE, WAYMARK_TRANSLATIONS");
            std::process::exit(1);
        }
    };

    tracing::info!("Starting Waymark");
    tracing::info!("Default textures: {}", config.default_textures.display());

    let l10n = match &config.translations {
        Some(path) => match KeyTable::from_json_file(path) {
            Ok(table) => {
                tracing::info!("Loaded {} translations", table.len());
                table
            }
            Err(e) => {
                tracing::warn!("Failed to load translations: {}", e);
                KeyTable::new()
            }
        },
        None => KeyTable::new(),
    };

    let state = match MapState::initialize(
        &config,
        Arc::new(InMemoryMinimap::new()),
        Arc::new(l10n),
        Arc::new(FileSpriteLoader),
    ) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Initialization error: {}", e);
            std::process::exit(1);
        }
    };

    for arg in std::env::args().skip(1) {
        let target: PinningTarget = match arg.parse() {
            Ok(target) => target,
            Err(never) => match never {},
        };
        let resolved = state.resolve(&target);
        println!(
            "{} -> {} (hide name tag: {})",
            arg, resolved.icon, resolved.options.hide_name_tag
        );
    }
}
