pub mod assembler;
pub mod source;
pub mod sources;
pub mod types;

pub use assembler::{
    AssembleError, BorderResolutionError, DetailRequest, Stage, assemble, resolve_borders,
    resolve_primary,
};
pub use source::{CountrySource, SourceError};
pub use sources::RestCountriesSource;
pub use types::{CountryDetail, RawCountryRecord};
