//! Catalogue browsing: facet selection and sidebar counts

mod facets;
mod filter;

pub use facets::{FacetCount, FacetCounts};
pub use filter::{ClassKey, Facet, FacetQuery, ProductFacets};
