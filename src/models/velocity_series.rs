use rand::Rng;

use crate::config::CHART;
use crate::domain::TokenId;

/// One hourly point of the velocity chart.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityPoint {
    pub hours_ago: usize,
    /// `"23h"` .. `"0h"`.
    pub label: String,
    pub velocity: f64,
    pub volume: f64,
}

/// Base velocity for the chart: the token's own, or the default when it has
/// none (or exactly zero).
pub fn base_velocity(current: Option<f64>) -> f64 {
    match current {
        Some(v) if v != 0.0 => v,
        _ => CHART.default_base_velocity,
    }
}

/// Illustrative 24h history around `base`. The service has no velocity
/// history endpoint, so the shape is jitter, not data.
pub fn generate_velocity_series<R: Rng + ?Sized>(base: f64, rng: &mut R) -> Vec<VelocityPoint> {
    (0..CHART.point_count)
        .rev()
        .map(|hours_ago| {
            let jitter = (rng.random::<f64>() - 0.5) * CHART.velocity_jitter;
            let volume = rng.random::<f64>() * CHART.volume_span + CHART.volume_min;
            VelocityPoint {
                hours_ago,
                label: format!("{}h", hours_ago),
                velocity: (base + jitter).max(0.0),
                volume,
            }
        })
        .collect()
}

/// Series for the selected token, regenerated only when the token or its
/// base velocity changes so the chart does not flicker every frame.
#[derive(Debug, Default)]
pub struct VelocitySeries {
    key: Option<(TokenId, u64)>,
    points: Vec<VelocityPoint>,
}

impl VelocitySeries {
    pub fn points_for(&mut self, token_id: TokenId, velocity: Option<f64>) -> &[VelocityPoint] {
        self.points_for_with_rng(token_id, velocity, &mut rand::rng())
    }

    pub fn points_for_with_rng<R: Rng + ?Sized>(
        &mut self,
        token_id: TokenId,
        velocity: Option<f64>,
        rng: &mut R,
    ) -> &[VelocityPoint] {
        let base = base_velocity(velocity);
        let key = (token_id, base.to_bits());
        if self.key != Some(key) {
            self.points = generate_velocity_series(base, rng);
            self.key = Some(key);
        }
        &self.points
    }
}
