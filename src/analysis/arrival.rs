/// Seismic wave arrival estimates.
///
/// Uses fixed crustal propagation speeds: P-waves travel at roughly 6–8 km/s
/// and S-waves at 3–4 km/s; we take 7.0 and 3.5. The gap between the two
/// arrivals is the window an early-warning display has before strong shaking.

use serde::Serialize;

pub const P_WAVE_SPEED_KM_S: f64 = 7.0;
pub const S_WAVE_SPEED_KM_S: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveArrival {
    pub p_wave_seconds: f64,
    pub s_wave_seconds: f64,
}

impl WaveArrival {
    /// Seconds between the P-wave and S-wave arrivals.
    pub fn lead_time_seconds(&self) -> f64 {
        self.s_wave_seconds - self.p_wave_seconds
    }
}

/// Travel times from an epicentre `distance_km` away.
pub fn estimate(distance_km: f64) -> WaveArrival {
    WaveArrival {
        p_wave_seconds: distance_km / P_WAVE_SPEED_KM_S,
        s_wave_seconds: distance_km / S_WAVE_SPEED_KM_S,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seventy_km() {
        let a = estimate(70.0);
        assert_eq!(a.p_wave_seconds, 10.0);
        assert_eq!(a.s_wave_seconds, 20.0);
        assert_eq!(a.lead_time_seconds(), 10.0);
    }

    #[test]
    fn test_p_wave_arrives_first_for_positive_distance() {
        for d in [0.001, 1.0, 42.0, 300.0, 1000.0] {
            let a = estimate(d);
            assert!(a.p_wave_seconds < a.s_wave_seconds, "p >= s at {} km", d);
        }
    }

    #[test]
    fn test_zero_distance_gives_zero_times() {
        let a = estimate(0.0);
        assert_eq!(a.p_wave_seconds, 0.0);
        assert_eq!(a.s_wave_seconds, 0.0);
    }
}
