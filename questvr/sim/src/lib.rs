//! Stand-in engine host for the questvr bridge: loads the bridge library,
//! feeds it tracking data and polls it once per frame.

pub mod bridge;
pub mod frame;
pub mod sources;
