pub mod boot;
mod error;
pub mod extractor;
pub mod fields;
pub mod geometry;
pub mod scanner;
pub mod signatures;
mod traits;

pub use boot::{
    DescriptorPolicy, Fat32Heuristic, LocatedDescriptor, LocatorConfig, VolumeDescriptor,
    VolumeDescriptorLocator,
};
pub use error::{CoreError, Result};
pub use extractor::{ExtractionReport, RunExtractor};
pub use geometry::Geometry;
pub use scanner::HeadScanner;
pub use signatures::{SignatureSet, TextSignature};
pub use traits::{BlockSource, OutputSink};
