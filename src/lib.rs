//=========================================================================
// Cultivation Shell — Library Root
//
// A tick-driven game shell: exclusive full-screen scenes swapped through
// a deferred transition protocol, and a turn-based battle engine.
//
// Responsibilities:
// - Expose the composition root (`GameBuilder` → `Game`)
// - Expose the core systems (scheduler, signals, scenes, battle, input)
// - Keep the winit platform layer private
//
// Typical usage:
// ```no_run
// use cultivation_shell::GameBuilder;
//
// fn main() {
//     GameBuilder::new().build().run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every logic-thread system. `scenes` holds the three game
// scenes and the factory that registers them.
//
pub mod core;
pub mod prelude;
pub mod scenes;

//--- Internal Modules ----------------------------------------------------
//
// `platform` owns the window and the winit event loop.
// `engine` defines the builder and runtime entry point.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use engine::{Game, GameBuilder};
