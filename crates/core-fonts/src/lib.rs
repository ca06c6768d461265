//! Font-metrics fitter.
//!
//! A `FontFitter` owns a measurement context bound to a fixed virtual canvas
//! (270x270 by default) and a 30px baseline font stack. The context is built
//! lazily on first use behind a `OnceLock`: concurrent first callers block
//! until one of them has registered the fonts, and every caller observes the
//! same fully built context. After that the context is read-only.
//!
//! Font registration failures are logged and ignored; measurement proceeds
//! with whatever fonts did register.
//!
//! `fit_font_size` is a single-shot proportional fit, not a search:
//! `min(floor(28 * 230 / width_at_30px), 30)`. There is no lower bound; very
//! wide text yields a very small size and truncation is the layout engine's job.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use core_config::{CanvasConfig, FontsConfig};
use tracing::{debug, warn};

pub mod measure;
pub mod registry;

pub use measure::{AdvanceMeasurer, FixedAdvanceMeasurer, TextMeasurer};
pub use registry::{FontError, FontFormat, FontRegistry, RegisteredFont};

/// Width (canvas units) the fitted text should approximately occupy.
pub const TARGET_WIDTH: f64 = 230.0;
/// Numerator of the proportional fit.
pub const FIT_SCALE: f64 = 28.0;
/// Upper bound of any fitted size; also the reference size.
pub const MAX_FONT_SIZE: i32 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub size_px: u32,
    pub weight: String,
    pub families: Vec<String>,
}

impl FontSpec {
    pub fn from_config(fonts: &FontsConfig) -> Self {
        Self {
            size_px: fonts.baseline_size,
            weight: fonts.weight.clone(),
            families: fonts.families(),
        }
    }

    /// CSS-style shorthand, e.g. `30px Satoshi Variable, Noto Color Emoji, sans-serif`.
    pub fn css(&self) -> String {
        format!("{}px {}", self.size_px, self.families.join(", "))
    }
}

/// Fully initialized measurement state.
pub struct MetricsContext {
    pub canvas: CanvasConfig,
    pub font: FontSpec,
    pub registered: Vec<RegisteredFont>,
    measurer: Arc<dyn TextMeasurer>,
}

impl MetricsContext {
    pub fn measure(&self, text: &str) -> f64 {
        self.measurer.measure_width(text, &self.font)
    }
}

impl std::fmt::Debug for MetricsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsContext")
            .field("canvas", &self.canvas)
            .field("font", &self.font)
            .field("registered", &self.registered)
            .finish_non_exhaustive()
    }
}

pub struct FontFitter {
    fonts: FontsConfig,
    canvas: CanvasConfig,
    measurer: Arc<dyn TextMeasurer>,
    context: OnceLock<MetricsContext>,
    initializations: AtomicU64,
}

impl FontFitter {
    pub fn new(fonts: FontsConfig, canvas: CanvasConfig, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            fonts,
            canvas,
            measurer,
            context: OnceLock::new(),
            initializations: AtomicU64::new(0),
        }
    }

    /// Default fonts and canvas with the advance-table measurer.
    pub fn with_defaults() -> Self {
        Self::new(
            FontsConfig::default(),
            CanvasConfig::default(),
            Arc::new(AdvanceMeasurer),
        )
    }

    /// Default fonts and canvas with a caller-supplied measurer.
    pub fn with_measurer(measurer: Arc<dyn TextMeasurer>) -> Self {
        Self::new(FontsConfig::default(), CanvasConfig::default(), measurer)
    }

    /// Shared context, initializing it on first call.
    pub fn context(&self) -> &MetricsContext {
        self.context.get_or_init(|| self.initialize())
    }

    pub fn is_initialized(&self) -> bool {
        self.context.get().is_some()
    }

    /// Number of times the context was built (0 or 1).
    pub fn initializations(&self) -> u64 {
        self.initializations.load(Ordering::Relaxed)
    }

    fn initialize(&self) -> MetricsContext {
        self.initializations.fetch_add(1, Ordering::Relaxed);
        let mut registry = FontRegistry::new();
        let assets = [
            (&self.fonts.primary_path, &self.fonts.primary_family),
            (&self.fonts.emoji_path, &self.fonts.emoji_family),
        ];
        for (path, family) in assets {
            if let Err(err) = registry.register(path, family, &self.fonts.weight, "normal") {
                warn!(target: "fonts", family = family.as_str(), %err, "font_registration_failed");
            }
        }
        let font = FontSpec::from_config(&self.fonts);
        debug!(
            target: "fonts",
            font = font.css().as_str(),
            registered = registry.fonts().len(),
            canvas_width = self.canvas.width,
            canvas_height = self.canvas.height,
            "metrics_context_ready"
        );
        MetricsContext {
            canvas: self.canvas,
            font,
            registered: registry.fonts().to_vec(),
            measurer: Arc::clone(&self.measurer),
        }
    }

    /// Font size that makes `text` approximately span the target width.
    pub fn fit_font_size(&self, text: &str) -> i32 {
        let width = self.context().measure(text);
        let candidate = (FIT_SCALE * (TARGET_WIDTH / width)).floor();
        // NaN (0/0) and +inf (empty text) both land on the cap.
        if candidate.is_nan() || candidate >= f64::from(MAX_FONT_SIZE) {
            MAX_FONT_SIZE
        } else {
            candidate as i32
        }
    }
}

impl std::fmt::Debug for FontFitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFitter")
            .field("fonts", &self.fonts)
            .field("canvas", &self.canvas)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

static SHARED: OnceLock<FontFitter> = OnceLock::new();

/// Install the process-wide fitter. Returns the rejected fitter if one is
/// already installed (explicitly or by a prior `shared()` call).
pub fn install_shared(fitter: FontFitter) -> Result<(), FontFitter> {
    SHARED.set(fitter)
}

/// Process-wide fitter; falls back to defaults when none was installed.
pub fn shared() -> &'static FontFitter {
    SHARED.get_or_init(FontFitter::with_defaults)
}
