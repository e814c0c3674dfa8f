#![forbid(unsafe_code)]

//! Core: device traits, accessibility settings, and platform collaborators.
//!
//! # Role in stylekit
//! `stylekit-core` is the input layer. It owns the snapshot types the style
//! pipeline reads (accessibility settings, device traits), the traits hosts
//! implement to supply them, and the live settings hub that replaces native
//! change listeners.
//!
//! # Primary responsibilities
//! - **AccessibilitySettings**: 18 nullable flags; `None` means unknown.
//! - **DeviceTraits**: color scheme, screen geometry, font scale, platform.
//! - **ColorResolver**: the platform's color string resolution.
//! - **SettingsHub**: per-setting subscriptions with cancellable handles.
//!
//! # How it fits in the system
//! `stylekit-style` consumes these collaborators once per `create` call and
//! never subscribes to them directly, so a single transform pass always sees
//! one consistent snapshot.

pub mod accessibility;
pub mod color_resolver;
pub mod device;
pub mod logging;
pub mod subscription;

pub use accessibility::{AccessibilityInfo, AccessibilityKind, AccessibilitySettings};
pub use color_resolver::{ColorResolver, CssColorResolver};
pub use device::{
    ColorScheme, DeviceInfo, DeviceTraits, Platform, ScreenDimensions, ScreenInsets,
    ScreenOrientation, StaticDevice,
};
pub use subscription::{SettingsHub, Subscription};
