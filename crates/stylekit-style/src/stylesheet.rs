//! The style pipeline: theme selection, scaling, accessibility overrides.
//!
//! # Lifecycle
//!
//! 1. Build a [`StyleSystem`] around the host's device and accessibility
//!    collaborators.
//! 2. Optionally call [`StyleSystem::init`] with the app's themes.
//! 3. Call [`StyleSystem::create`] for each stylesheet. Every call reads the
//!    color scheme, insets, font scale, and accessibility settings afresh.
//!
//! The active [`ThemeSet`] sits behind an [`ArcSwap`]: `init` swaps it
//! atomically and `create` works from whichever snapshot it loaded, so
//! concurrent readers never see half of a theme set.

use std::sync::Arc;

use arc_swap::ArcSwap;
use stylekit_core::{
    AccessibilityInfo, ColorResolver, CssColorResolver, DeviceInfo, ScreenInsets,
};

use crate::a11y::apply_a11y_overrides;
use crate::grayscale::{GrayscaleConverter, GrayscaleOptions};
use crate::properties::PropertyContext;
use crate::scale::{ScaleConfig, ScaleProperties, Scaler, live_font_scale};
use crate::theme::{Theme, ThemeConfig, ThemeSet};
use crate::tree::StyleTree;

/// Receives each finished stylesheet, e.g. to register it with the host's
/// native stylesheet cache.
pub trait StyleRegistry: Send + Sync {
    fn register(&self, styles: StyleTree) -> StyleTree;
}

/// Returns styles unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRegistry;

impl StyleRegistry for IdentityRegistry {
    fn register(&self, styles: StyleTree) -> StyleTree {
        styles
    }
}

type ThemedFn<'a> = Box<dyn FnOnce(&Theme, ScreenInsets) -> StyleTree + 'a>;

/// Input to [`StyleSystem::create`].
pub enum StyleSource<'a> {
    Tree(StyleTree),
    /// Built from the active theme and the screen insets.
    Themed(ThemedFn<'a>),
}

impl<'a> StyleSource<'a> {
    pub fn themed<F>(f: F) -> Self
    where
        F: FnOnce(&Theme, ScreenInsets) -> StyleTree + 'a,
    {
        Self::Themed(Box::new(f))
    }
}

impl From<StyleTree> for StyleSource<'_> {
    fn from(tree: StyleTree) -> Self {
        Self::Tree(tree)
    }
}

impl std::fmt::Debug for StyleSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tree(tree) => f.debug_tuple("Tree").field(tree).finish(),
            Self::Themed(_) => f.write_str("Themed(..)"),
        }
    }
}

/// Theme store plus the collaborators the pipeline reads from.
pub struct StyleSystem {
    themes: ArcSwap<ThemeSet>,
    device: Arc<dyn DeviceInfo + Send + Sync>,
    accessibility: Arc<dyn AccessibilityInfo + Send + Sync>,
    resolver: Arc<dyn ColorResolver + Send + Sync>,
    registry: Arc<dyn StyleRegistry>,
    scale_properties: ScaleProperties,
    scale_config: ScaleConfig,
    grayscale: GrayscaleOptions,
}

impl StyleSystem {
    /// Default themes, CSS color resolution, identity registry.
    pub fn new(
        device: Arc<dyn DeviceInfo + Send + Sync>,
        accessibility: Arc<dyn AccessibilityInfo + Send + Sync>,
    ) -> Self {
        Self {
            themes: ArcSwap::from_pointee(ThemeSet::default()),
            device,
            accessibility,
            resolver: Arc::new(CssColorResolver),
            registry: Arc::new(IdentityRegistry),
            scale_properties: ScaleProperties::default(),
            scale_config: ScaleConfig::default(),
            grayscale: GrayscaleOptions::default(),
        }
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn ColorResolver + Send + Sync>) -> Self {
        self.resolver = resolver;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn StyleRegistry>) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_scale_properties(mut self, properties: ScaleProperties) -> Self {
        self.scale_properties = properties;
        self
    }

    #[must_use]
    pub fn with_scale_config(mut self, config: ScaleConfig) -> Self {
        self.scale_config = config;
        self
    }

    #[must_use]
    pub fn with_grayscale_options(mut self, options: GrayscaleOptions) -> Self {
        self.grayscale = options;
        self
    }

    #[must_use]
    pub fn with_themes(self, themes: ThemeSet) -> Self {
        self.themes.store(Arc::new(themes));
        self
    }

    /// Replace the active themes.
    ///
    /// `None` restores the defaults. A multi-theme config missing `light` or
    /// `dark` is logged and also restores the defaults.
    pub fn init(&self, config: Option<ThemeConfig>) {
        let themes = match config.map(ThemeConfig::into_theme_set) {
            None => ThemeSet::default(),
            Some(Ok(themes)) => themes,
            Some(Err(err)) => {
                tracing::warn!(%err, "invalid theme config, using default themes");
                ThemeSet::default()
            }
        };
        self.themes.store(Arc::new(themes));
        tracing::debug!("themes replaced");
    }

    /// Snapshot of the active themes.
    pub fn themes(&self) -> Arc<ThemeSet> {
        self.themes.load_full()
    }

    /// Theme for the device's current color scheme.
    pub fn current_theme(&self) -> Theme {
        self.themes
            .load()
            .for_scheme(self.device.color_scheme())
            .clone()
    }

    /// Scaler for the device's current screen and font scale.
    pub fn scaler(&self) -> Scaler<'_> {
        Scaler::from_device(&*self.device, &self.scale_properties).with_config(self.scale_config)
    }

    /// Build a finished stylesheet: resolve, scale, override, register.
    ///
    /// The device snapshot is taken once, so the theme, the insets, and the
    /// scaling all describe the same screen state.
    pub fn create<'a>(&self, source: impl Into<StyleSource<'a>>) -> StyleTree {
        let traits = self.device.device_traits();
        let scheme = traits.color_scheme.resolved();
        let themes = self.themes.load();
        let theme = themes.for_scheme(scheme);

        let raw = match source.into() {
            StyleSource::Tree(tree) => tree,
            StyleSource::Themed(build) => build(theme, traits.screen_insets),
        };

        let scaled = Scaler::from_traits(
            &traits,
            live_font_scale(&*self.device),
            &self.scale_properties,
        )
        .with_config(self.scale_config)
        .scale_style(&raw);

        let settings = self.accessibility.all_settings();
        let mut converter =
            GrayscaleConverter::new(scheme, theme, traits.platform, &*self.resolver)
                .with_options(self.grayscale);
        let styled = apply_a11y_overrides(&scaled, &settings, &mut converter);

        tracing::debug!(
            scheme = scheme.as_str(),
            entries = styled.len(),
            "stylesheet created"
        );
        self.registry.register(styled)
    }

    /// Convert one color against the current scheme and theme background.
    pub fn convert_to_grayscale(
        &self,
        color: &str,
        context: PropertyContext,
        font_size: Option<f64>,
    ) -> String {
        let traits = self.device.device_traits();
        let scheme = traits.color_scheme.resolved();
        let themes = self.themes.load();
        GrayscaleConverter::new(
            scheme,
            themes.for_scheme(scheme),
            traits.platform,
            &*self.resolver,
        )
        .with_options(self.grayscale)
        .convert(color, context, font_size)
    }
}

impl std::fmt::Debug for StyleSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleSystem")
            .field("scale_config", &self.scale_config)
            .field("grayscale", &self.grayscale)
            .finish_non_exhaustive()
    }
}
