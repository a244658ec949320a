//! # dtmpl-core
//!
//! Render a template against structured data read from JSON, YAML or TOML.
//!
//! Data is decoded into a format-independent [`Value`] tree, handed to a
//! [MiniJinja](https://docs.rs/minijinja) template together with a fixed
//! table of helper functions, and rendered to any writer. The sorting helpers
//! (`sliceSort`, `sliceSortKey`) are type-checked: comparing an integer with a
//! string is an error, never a coercion.
//!
//! ## Numbers and YAML scalars
//!
//! Integers and floats are separate categories in every format, JSON
//! included: `[3, 1.5, 2]` cannot be sorted, while `[3.0, 1.5, 2.0]` can.
//! Write whole numbers with a fractional part when a list must sort as
//! floats.
//!
//! YAML is read with the YAML 1.2 core schema. `yes`, `no`, `on` and `off`
//! are plain strings, not booleans, and numbers with a leading zero are not
//! read as octal.
//!
//! ## Quick start
//!
//! ```rust
//! use dtmpl_core::{render_str, Format};
//!
//! let data = Format::Json
//!     .decode(br#"{"items":[{"n":1},{"n":3},{"n":2}]}"#)
//!     .unwrap();
//! let template = "{% set sorted = sliceSortKey(items, 'n') %}\
//!     {% for item in sorted %}{{ item.n }}{% if notLast(sorted, loop.index0) %},{% endif %}{% endfor %}";
//! assert_eq!(render_str(template, &data).unwrap(), "1,2,3");
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the decoded data tree
//! - [`format`]: format selection and decoding
//! - [`compare`]: the generic comparator
//! - [`order`]: whole-element and field-keyed orderers, reversal
//! - [`helpers`]: the helper function table exposed to templates
//! - [`time`]: time values returned by `timeParse` / `timeNow`
//! - [`render`]: template parsing and evaluation
//! - [`error`]: error types

pub mod compare;
pub mod error;
pub mod format;
pub mod helpers;
pub mod order;
pub mod render;
pub mod time;
pub mod value;

pub use compare::{compare, less, Category, Scalar, Sortable};
pub use error::{DtmplError, OrderError, Result};
pub use format::{decode, read_source, Format, Source};
pub use helpers::HelperTable;
pub use order::{reverse_values, sort_values, sort_values_by_field};
pub use render::Renderer;
pub use value::{Kind, Value};

/// Render `template` against `value` with the standard helper table.
pub fn render_str(template: &str, value: &Value) -> Result<String> {
    let helpers = HelperTable::new();
    Renderer::new(&helpers).render_str(template, value)
}
