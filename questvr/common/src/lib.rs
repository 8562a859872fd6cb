pub use api::{
    ControllerState, Eye, Hand, HeadPose, Matrix4, PosePacket, TrackingSource, DEFAULT_EYE_HEIGHT,
};

mod config;
mod projection;
mod smoothing;
mod state;

pub use config::{load_config, PoseSourceKind, SimConfig};
pub use projection::{EyeParameters, FieldOfView, Frustum, NASAL_NARROWING};
pub use smoothing::{EuroFilter, PoseFilter};
pub use state::VrState;
