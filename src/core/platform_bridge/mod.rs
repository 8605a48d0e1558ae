//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with core systems.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Logic-side polling of the platform channel
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, FramePoll};
pub use interface::PlatformError;
pub(crate) use interface::PlatformEvent;
