// Re-export parry and rapier for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;
#[cfg(feature = "f64")]
pub use rapier3d_f64 as rapier3d;

#[cfg(feature = "f32")]
pub use parry3d;
#[cfg(feature = "f32")]
pub use rapier3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Default classification tolerance for `f32` builds.
#[cfg(feature = "f32")]
pub const EPSILON: Real = 1e-4;
/// Default classification tolerance for `f64` builds.
#[cfg(feature = "f64")]
pub const EPSILON: Real = 1e-5;

/// Lazily-initialized tolerance used by the plane classifier.
/// Defaults to [`EPSILON`], but can be overridden:
///  1) **Build-time**: set env var `POLYFRAG_TOLERANCE` (e.g. `POLYFRAG_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Returns the current tolerance.
/// If not set yet, it tries `POLYFRAG_TOLERANCE` (parsed as the active `Real`) and
/// falls back to [`EPSILON`].
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        if let Some(environment_variable) = option_env!("POLYFRAG_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        EPSILON
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `polyfrag::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
