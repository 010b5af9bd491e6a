//! Device capability detection and the animation presets derived from it.
//!
//! The presets are fixed lookup tables keyed by the coarse profile; nothing
//! here adapts over time.

use serde::{Deserialize, Serialize};

use crate::observer::InputModality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Raw signals the profile is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceSignals {
    pub viewport: Viewport,
    pub modality: InputModality,
    pub max_touch_points: u32,
    pub hardware_threads: usize,
    pub device_memory_gb: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl ScreenSize {
    pub fn from_width(width: u32) -> Self {
        match width {
            0..640 => ScreenSize::Small,
            640..1024 => ScreenSize::Medium,
            1024..1440 => ScreenSize::Large,
            _ => ScreenSize::ExtraLarge,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Low,
    Medium,
    High,
}

impl PerformanceTier {
    /// Heuristic tier from CPU threads and memory. Unknown memory does not
    /// hold a device back.
    pub fn estimate(hardware_threads: usize, device_memory_gb: Option<f32>) -> Self {
        let memory = device_memory_gb.unwrap_or(f32::INFINITY);
        if hardware_threads <= 2 || memory < 2.0 {
            PerformanceTier::Low
        } else if hardware_threads >= 8 && memory >= 8.0 {
            PerformanceTier::High
        } else {
            PerformanceTier::Medium
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceCapabilityProfile {
    pub screen_size: ScreenSize,
    pub tier: PerformanceTier,
    pub is_touch_device: bool,
    pub is_mobile: bool,
}

impl DeviceCapabilityProfile {
    pub fn detect(signals: &DeviceSignals) -> Self {
        let screen_size = ScreenSize::from_width(signals.viewport.width);
        let is_touch_device =
            signals.modality == InputModality::Touch || signals.max_touch_points > 0;
        Self {
            screen_size,
            tier: PerformanceTier::estimate(signals.hardware_threads, signals.device_memory_gb),
            is_touch_device,
            is_mobile: is_touch_device && screen_size == ScreenSize::Small,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationPreset {
    pub scale: f32,
    pub duration_ms: u32,
    pub stagger_ms: u32,
}

impl AnimationPreset {
    /// No movement at all, used when reduced motion is requested.
    pub const STATIC: AnimationPreset = AnimationPreset {
        scale: 1.0,
        duration_ms: 0,
        stagger_ms: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoverPreset {
    pub enabled: bool,
    pub scale: f32,
    pub lift_px: u32,
}

impl HoverPreset {
    pub const DISABLED: HoverPreset = HoverPreset {
        enabled: false,
        scale: 1.0,
        lift_px: 0,
    };
}

pub fn animation_preset(profile: &DeviceCapabilityProfile, reduced_motion: bool) -> AnimationPreset {
    if reduced_motion {
        return AnimationPreset::STATIC;
    }
    let (scale, duration_ms, stagger_ms) = match (profile.tier, profile.is_mobile) {
        (PerformanceTier::Low, _) => (1.02, 150, 0),
        (PerformanceTier::Medium, true) => (1.03, 200, 30),
        (PerformanceTier::Medium, false) => (1.05, 250, 40),
        (PerformanceTier::High, true) => (1.04, 250, 40),
        (PerformanceTier::High, false) => (1.08, 300, 50),
    };
    AnimationPreset {
        scale,
        duration_ms,
        stagger_ms,
    }
}

/// Touch devices have no hover, so hover effects are disabled there.
pub fn hover_preset(profile: &DeviceCapabilityProfile, reduced_motion: bool) -> HoverPreset {
    if reduced_motion || profile.is_touch_device {
        return HoverPreset::DISABLED;
    }
    let (scale, lift_px) = match profile.tier {
        PerformanceTier::Low => (1.02, 0),
        PerformanceTier::Medium => (1.04, 2),
        PerformanceTier::High => (1.06, 4),
    };
    HoverPreset {
        enabled: true,
        scale,
        lift_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(width: u32, modality: InputModality, threads: usize, memory: Option<f32>) -> DeviceSignals {
        DeviceSignals {
            viewport: Viewport { width, height: 800 },
            modality,
            max_touch_points: 0,
            hardware_threads: threads,
            device_memory_gb: memory,
        }
    }

    #[test]
    fn test_screen_size_breakpoints() {
        assert_eq!(ScreenSize::from_width(0), ScreenSize::Small);
        assert_eq!(ScreenSize::from_width(639), ScreenSize::Small);
        assert_eq!(ScreenSize::from_width(640), ScreenSize::Medium);
        assert_eq!(ScreenSize::from_width(1024), ScreenSize::Large);
        assert_eq!(ScreenSize::from_width(1920), ScreenSize::ExtraLarge);
    }

    #[test]
    fn test_tier_estimate() {
        assert_eq!(PerformanceTier::estimate(2, Some(8.0)), PerformanceTier::Low);
        assert_eq!(PerformanceTier::estimate(8, Some(1.0)), PerformanceTier::Low);
        assert_eq!(PerformanceTier::estimate(4, None), PerformanceTier::Medium);
        assert_eq!(PerformanceTier::estimate(12, None), PerformanceTier::High);
        assert_eq!(PerformanceTier::estimate(12, Some(4.0)), PerformanceTier::Medium);
    }

    #[test]
    fn test_phone_profile() {
        let profile = DeviceCapabilityProfile::detect(&signals(390, InputModality::Touch, 6, Some(4.0)));
        assert!(profile.is_touch_device);
        assert!(profile.is_mobile);
        assert_eq!(profile.tier, PerformanceTier::Medium);
        assert_eq!(hover_preset(&profile, false), HoverPreset::DISABLED);
        assert_eq!(animation_preset(&profile, false).duration_ms, 200);
    }

    #[test]
    fn test_touch_points_mark_touch_device() {
        let mut raw = signals(1280, InputModality::Pointer, 8, Some(16.0));
        raw.max_touch_points = 10;
        let profile = DeviceCapabilityProfile::detect(&raw);
        assert!(profile.is_touch_device);
        assert!(!profile.is_mobile);
    }

    #[test]
    fn test_desktop_profile() {
        let profile = DeviceCapabilityProfile::detect(&signals(1920, InputModality::Pointer, 16, Some(32.0)));
        assert!(!profile.is_mobile);
        assert_eq!(profile.tier, PerformanceTier::High);
        let hover = hover_preset(&profile, false);
        assert!(hover.enabled);
        assert_eq!(hover.lift_px, 4);
    }

    #[test]
    fn test_reduced_motion_is_static() {
        let profile = DeviceCapabilityProfile::detect(&signals(1920, InputModality::Pointer, 16, None));
        assert_eq!(animation_preset(&profile, true), AnimationPreset::STATIC);
        assert_eq!(hover_preset(&profile, true), HoverPreset::DISABLED);
    }
}
