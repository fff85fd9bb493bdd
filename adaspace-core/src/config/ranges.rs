//! Optional field-range pass
//!
//! A matching magic only proves the layout is right; the values inside can
//! still be anything flash corruption or a hand-edited image left behind.
//! Nothing in the load path calls this. Consumers that want to harden
//! against such images run it themselves.

use core::ops::RangeInclusive;

use super::defaults::*;
use super::model::{Axis, SpaceMouseConfig};

pub const SMOOTHING_RANGE: RangeInclusive<f32> = 0.0..=0.95;
pub const GAMMA_RANGE: RangeInclusive<f32> = 1.0..=3.0;
pub const DEADZONE_RANGE: RangeInclusive<f32> = 0.5..=5.0;

/// Float fields the range pass knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    Smoothing,
    Gamma,
    Deadzone,
    Gain(Axis),
    EncoderGain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViolationKind {
    /// NaN or infinity
    NonFinite,
    /// Finite but outside the documented domain
    OutOfRange,
}

/// First field found outside its domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RangeViolation {
    pub field: ConfigField,
    pub kind: ViolationKind,
}

fn check(
    field: ConfigField,
    value: f32,
    range: Option<&RangeInclusive<f32>>,
) -> Result<(), RangeViolation> {
    if !value.is_finite() {
        return Err(RangeViolation {
            field,
            kind: ViolationKind::NonFinite,
        });
    }
    let in_range = match range {
        Some(range) => range.contains(&value),
        None => value >= 0.0,
    };
    if in_range {
        Ok(())
    } else {
        Err(RangeViolation {
            field,
            kind: ViolationKind::OutOfRange,
        })
    }
}

fn clamp_or(value: f32, range: &RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(*range.start(), *range.end())
    } else {
        fallback
    }
}

fn default_gain(axis: Axis) -> f32 {
    SpaceMouseConfig::defaults().gain(axis)
}

impl SpaceMouseConfig {
    /// Check every float field against its domain
    ///
    /// Gains have no upper bound but must not be negative; direction is
    /// the job of the invert flags. `enc_gain` is only checked for
    /// finiteness.
    pub fn check_ranges(&self) -> Result<(), RangeViolation> {
        check(ConfigField::Smoothing, self.smoothing, Some(&SMOOTHING_RANGE))?;
        check(ConfigField::Gamma, self.gamma, Some(&GAMMA_RANGE))?;
        check(ConfigField::Deadzone, self.deadzone, Some(&DEADZONE_RANGE))?;
        for axis in Axis::ALL {
            check(ConfigField::Gain(axis), self.gain(axis), None)?;
        }
        if !self.enc_gain.is_finite() {
            return Err(RangeViolation {
                field: ConfigField::EncoderGain,
                kind: ViolationKind::NonFinite,
            });
        }
        Ok(())
    }

    /// Copy with every float forced into its domain
    ///
    /// Non-finite values fall back to their factory default. `led_mode` is
    /// left alone.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        out.smoothing = clamp_or(self.smoothing, &SMOOTHING_RANGE, DEFAULT_SMOOTHING);
        out.gamma = clamp_or(self.gamma, &GAMMA_RANGE, DEFAULT_GAMMA);
        out.deadzone = clamp_or(self.deadzone, &DEADZONE_RANGE, DEFAULT_DEADZONE);
        for axis in Axis::ALL {
            let gain = self.gain(axis);
            *out.gain_mut(axis) = if gain.is_finite() {
                gain.max(0.0)
            } else {
                default_gain(axis)
            };
        }
        if !self.enc_gain.is_finite() {
            out.enc_gain = DEFAULT_ENC_GAIN;
        }
        out
    }
}
