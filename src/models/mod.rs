pub mod issue;
pub mod analysis;
pub mod lenient;

pub use issue::*;
pub use analysis::*;
