pub mod agencies;
pub mod columns;
pub mod driver;
pub mod normalize;

pub use agencies::AgencyResolver;
pub use driver::{Importer, RunSummary, SheetReport};
