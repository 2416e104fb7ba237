mod geo;
pub use geo::*;

mod length;
pub use length::*;

mod scale;
pub use scale::*;

mod units;
pub use units::*;
