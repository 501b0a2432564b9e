//! Age-based background fade.
//!
//! A "last modified" cell is coloured by how long ago it was stamped. Age is
//! square-root damped so the colour changes quickly at first and then slows:
//!
//! ```text
//! elapsed = sqrt(now - timestamp in ms) / 1000
//! raw[c]  = round(elapsed * |target[c] - start[c]| * rate)
//! ```
//!
//! Each channel is then clamped to `[0, ceiling[c]]`. The ceiling defaults to
//! the fade target, which for a white-to-black fade pins every channel at 0.
//! [`ClampCeiling::Start`] selects the fade start as the ceiling instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::color::{Channel, Rgb};

/// Which endpoint bounds a channel from above.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClampCeiling {
    #[default]
    Target,
    Start,
}

fn default_rate() -> f64 {
    0.15
}

fn default_start() -> Rgb {
    Rgb::WHITE
}

fn default_target() -> Rgb {
    Rgb::BLACK
}

/// Fade parameters. Immutable once the configuration is loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FadeConfig {
    /// Darkening speed scalar.
    #[serde(default = "default_rate")]
    pub rate: f64,
    #[serde(default = "default_start")]
    pub start: Rgb,
    #[serde(default = "default_target")]
    pub target: Rgb,
    #[serde(default)]
    pub ceiling: ClampCeiling,
}

impl Default for FadeConfig {
    fn default() -> Self {
        FadeConfig {
            rate: default_rate(),
            start: default_start(),
            target: default_target(),
            ceiling: ClampCeiling::default(),
        }
    }
}

impl FadeConfig {
    /// Upper bound for one channel.
    pub fn ceiling_for(&self, channel: Channel) -> u8 {
        match self.ceiling {
            ClampCeiling::Target => self.target.channel(channel),
            ClampCeiling::Start => self.start.channel(channel),
        }
    }

    fn clamp_channel(&self, channel: Channel, raw: f64) -> u8 {
        let ceiling = self.ceiling_for(channel);
        if raw > f64::from(ceiling) {
            ceiling
        } else if raw < 0.0 {
            0
        } else {
            // NaN falls through here and saturates to 0.
            raw as u8
        }
    }
}

/// Square-root damped age. Timestamps in the future count as zero elapsed time.
pub fn elapsed_metric(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - timestamp).num_milliseconds().max(0) as f64;
    millis.sqrt() / 1000.0
}

/// Background colour for a cell last modified at `timestamp`.
pub fn color_for_age(timestamp: DateTime<Utc>, now: DateTime<Utc>, fade: &FadeConfig) -> Rgb {
    let elapsed = elapsed_metric(timestamp, now);
    let mut rgb = Rgb::BLACK;
    for channel in Channel::ALL {
        let start = f64::from(fade.start.channel(channel));
        let span = (f64::from(fade.target.channel(channel)) - start).abs();
        let raw = (elapsed * span * fade.rate).round();
        rgb.set_channel(channel, fade.clamp_channel(channel, raw));
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn start_ceiling() -> FadeConfig {
        FadeConfig {
            ceiling: ClampCeiling::Start,
            ..FadeConfig::default()
        }
    }

    #[test]
    fn test_elapsed_metric_is_square_root_damped() {
        let ts = now() - Duration::milliseconds(100_000_000);
        assert!((elapsed_metric(ts, now()) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_day_old_timestamp_clamps_to_black() {
        let ts = now() - Duration::milliseconds(100_000_000);
        assert_eq!(color_for_age(ts, now(), &FadeConfig::default()), Rgb::BLACK);
    }

    #[test]
    fn test_fresh_timestamp_is_black() {
        assert_eq!(color_for_age(now(), now(), &FadeConfig::default()), Rgb::BLACK);
        assert_eq!(color_for_age(now(), now(), &start_ceiling()), Rgb::BLACK);
    }

    #[test]
    fn test_start_ceiling_scales_with_age() {
        // sqrt(1_000_000) / 1000 = 1.0; 1.0 * 255 * 0.15 = 38.25
        let ts = now() - Duration::milliseconds(1_000_000);
        assert_eq!(color_for_age(ts, now(), &start_ceiling()), Rgb::new(38, 38, 38));
    }

    #[test]
    fn test_start_ceiling_saturates() {
        let ts = now() - Duration::milliseconds(100_000_000);
        assert_eq!(color_for_age(ts, now(), &start_ceiling()), Rgb::WHITE);
    }

    #[test]
    fn test_future_timestamp_counts_as_fresh() {
        let ts = now() + Duration::hours(3);
        assert_eq!(elapsed_metric(ts, now()), 0.0);
        assert_eq!(color_for_age(ts, now(), &start_ceiling()), Rgb::BLACK);
    }

    #[test]
    fn test_channels_use_their_own_span() {
        let fade = FadeConfig {
            start: Rgb::new(255, 0, 255),
            target: Rgb::new(0, 0, 0),
            ceiling: ClampCeiling::Start,
            ..FadeConfig::default()
        };
        let ts = now() - Duration::milliseconds(1_000_000);
        assert_eq!(color_for_age(ts, now(), &fade), Rgb::new(38, 0, 38));
    }

    proptest! {
        #[test]
        fn prop_channels_stay_within_ceiling(
            age_ms in 0i64..10_000_000_000,
            use_start in any::<bool>(),
        ) {
            let fade = if use_start { start_ceiling() } else { FadeConfig::default() };
            let rgb = color_for_age(now() - Duration::milliseconds(age_ms), now(), &fade);
            for c in Channel::ALL {
                prop_assert!(rgb.channel(c) <= fade.ceiling_for(c));
            }
        }

        #[test]
        fn prop_later_now_never_reverses(
            age_ms in 0i64..10_000_000_000,
            extra_ms in 0i64..10_000_000_000,
            use_start in any::<bool>(),
        ) {
            let fade = if use_start { start_ceiling() } else { FadeConfig::default() };
            let ts = now() - Duration::milliseconds(age_ms);
            let earlier = color_for_age(ts, now(), &fade);
            let later = color_for_age(ts, now() + Duration::milliseconds(extra_ms), &fade);
            prop_assert!(earlier.is_at_least_as_dark_as(&later));
        }
    }
}
