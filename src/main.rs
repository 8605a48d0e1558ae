//=========================================================================
// Cultivation Shell — Binary
//=========================================================================
//
// Installs the log backend and runs the game. Filter with RUST_LOG, e.g.
// `RUST_LOG=cultivation_shell=debug,platform=info`.
//
//=========================================================================

use log::info;
use tracing_subscriber::EnvFilter;

use cultivation_shell::GameBuilder;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .compact()
        .init();

    GameBuilder::new()
        .on_scene_changed(|id| info!("Entered {:?}", id))
        .build()
        .run();
}
