//! Night-sky background animation.
//!
//! A [`SkySession`] owns two particle collections, twinkling [`Star`]s and
//! transient [`ShootingStar`]s, advances them once per frame and paints
//! them onto any [`skyfolio_core::Surface`]. [`PixelCanvas`] is the surface
//! used in the terminal: it rasterises into half-block cells.

mod canvas;
mod random;
mod session;
mod shooting;
mod star;

pub use canvas::PixelCanvas;
pub use random::RandomSource;
pub use session::{SkyParams, SkySession};
pub use shooting::{MAX_SHOOTING_STARS, ShootingStar, ShootingStars};
pub use star::{Star, star_count};
