pub mod dataset;
pub mod flows;
pub mod heatmap;
pub mod inputs;
pub mod report;
pub mod risk;
pub mod summary;
pub mod util;

pub use dataset::*;
pub use flows::*;
pub use heatmap::*;
pub use inputs::*;
pub use report::*;
pub use risk::*;
pub use summary::*;
pub use util::*;
