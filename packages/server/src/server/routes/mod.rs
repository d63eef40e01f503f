// HTTP routes
pub mod evaluate;
pub mod health;
pub mod visualize;

pub use evaluate::*;
pub use health::*;
pub use visualize::*;
