//! IPC-7351 land pattern calculations for quad flat packages.
//!
//! The package geometry is implied by its IPC name (pitch, toe-to-toe span
//! and pin count); only the lead length and width have to be given
//! separately.
//!
//! # Density Levels
//!
//! IPC-7351 defines three density levels:
//!
//! - **Most (M)**: Maximum land protrusion, best solder fillet, for high reliability
//! - **Nominal (N)**: Standard density, recommended for most applications
//! - **Least (L)**: Minimum land protrusion, for high-density boards
//!
//! # Limitations
//!
//! - Only square packages (JEDEC MS-026 also has rectangular ones)
//! - No IPC-7351A/B revision specifics
//!
//! # Example
//!
//! ```
//! use qfp_land_pattern::ipc7351::{
//!     packages::{qfp::QfpCalculator, ParameterOverrides, QfpParameters},
//! };
//!
//! // STM32 LQFP-48, 0.5mm pitch, 7x7mm body
//! let params = QfpParameters::resolve("QFP50P900X900-48", &ParameterOverrides::default())?;
//! let pattern = QfpCalculator::new().calculate("QFP50P900X900-48", &params)?;
//!
//! assert_eq!(pattern.pad_count(), 48);
//! println!("Pad 1: {:?}", pattern.pad(1));
//! # Ok::<(), qfp_land_pattern::error::FootprintError>(())
//! ```

pub mod density;
pub mod naming;
pub mod packages;
pub mod primitives;

pub use density::{DensityLevel, LandMargins};
pub use naming::{parse_qfp_name, QfpName};
pub use packages::{DrawOptions, LandPattern, PackageCalculator, ParameterOverrides, QfpParameters};
pub use primitives::{Circle, Layer, Line, Pad, Point, Primitive};
