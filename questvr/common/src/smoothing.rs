use glam::Vec3;

use crate::HeadPose;

/// One Euro low-pass filter over a single scalar channel.
#[derive(Debug, Clone, Copy)]
pub struct EuroFilter {
    min_cutoff: f32,
    beta: f32,
    d_cutoff: f32,
    value: Option<f32>,
    raw_prev: f32,
    derivative: f32,
}

impl Default for EuroFilter {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}

impl EuroFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        Self {
            min_cutoff,
            beta,
            d_cutoff: 1.0,
            value: None,
            raw_prev: 0.0,
            derivative: 0.0,
        }
    }

    fn smoothing_factor(dt: f32, cutoff: f32) -> f32 {
        let r = 2.0 * std::f32::consts::PI * cutoff * dt;
        r / (r + 1.0)
    }

    /// Feeds one sample taken `dt` seconds after the previous one.
    ///
    /// NaN samples yield 0 and leave the filter untouched. The first sample
    /// passes through unchanged.
    pub fn filter(&mut self, x: f32, dt: f32) -> f32 {
        if x.is_nan() {
            return 0.0;
        }

        let Some(prev) = self.value else {
            self.value = Some(x);
            self.raw_prev = x;
            self.derivative = 0.0;
            return x;
        };

        if dt <= 0.0 {
            return prev;
        }

        let dx = (x - self.raw_prev) / dt;
        self.raw_prev = x;

        let a_d = Self::smoothing_factor(dt, self.d_cutoff);
        self.derivative = a_d * dx + (1.0 - a_d) * self.derivative;

        let cutoff = self.min_cutoff + self.beta * self.derivative.abs();
        let a = Self::smoothing_factor(dt, cutoff);
        let hat = a * x + (1.0 - a) * prev;
        self.value = Some(hat);
        hat
    }

    pub fn reset(&mut self) {
        self.value = None;
        self.derivative = 0.0;
    }
}

/// Smooths incoming head poses channel by channel.
///
/// Rotation channels are filtered as plain numbers, so a yaw that wraps
/// around ±π is smeared across the wrap.
#[derive(Debug, Clone)]
pub struct PoseFilter {
    position: [EuroFilter; 3],
    rotation: [EuroFilter; 3],
}

impl PoseFilter {
    pub fn new(min_cutoff: f32, beta: f32) -> Self {
        let f = EuroFilter::new(min_cutoff, beta);
        Self {
            position: [f; 3],
            rotation: [f; 3],
        }
    }

    pub fn apply(&mut self, pose: HeadPose, dt: f32) -> HeadPose {
        HeadPose {
            position: Self::filter_vec(&mut self.position, pose.position, dt),
            rotation: Self::filter_vec(&mut self.rotation, pose.rotation, dt),
        }
    }

    fn filter_vec(filters: &mut [EuroFilter; 3], v: Vec3, dt: f32) -> Vec3 {
        Vec3::new(
            filters[0].filter(v.x, dt),
            filters[1].filter(v.y, dt),
            filters[2].filter(v.z, dt),
        )
    }
}

impl Default for PoseFilter {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}
