//! # TUI Components
//!
//! All UI components for the terminal interface. Each one is stateless:
//! it receives everything it draws as props (struct fields) and renders
//! into the `Rect` it is given.
//!
//! - `Header`: title and theme toggle hint
//! - `CountryList`: search box, region filter and the country list
//! - `CountryDetailView`: loading / not found / assembled detail
//!
//! Each component file holds its rendering logic and its tests.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── header.rs          (top bar)
//! ├── country_list.rs    (home view)
//! └── country_detail.rs  (detail view)
//! ```

mod country_detail;
mod country_list;
mod header;

pub use country_detail::CountryDetailView;
pub use country_list::CountryList;
pub use header::Header;
