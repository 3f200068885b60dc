pub use declaration::*;
pub use rule::*;
pub use stylesheet::*;

pub mod declaration;
pub mod rule;
pub mod stylesheet;
