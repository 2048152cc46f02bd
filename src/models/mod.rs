mod geo;
mod inspiration;
mod search;
mod venue;
mod wishlist;

pub use geo::*;
pub use inspiration::*;
pub use search::*;
pub use venue::*;
pub use wishlist::*;
