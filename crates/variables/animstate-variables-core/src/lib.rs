//! animstate variables core (engine-agnostic)
//!
//! Resolves named animation variables to numbers. The engine never inspects world
//! state directly: everything it needs flows through [`VariableResolver`].
//!
//! Layers, consulted in order by [`EntityVariables`]:
//! - entity-specific variables supplied by the host,
//! - world built-ins (`tick`, `rain_sin`, `light_total`, ...) via [`WorldState`],
//! - `<off>_<on>_<extra>_cycle` pattern variables,
//! - boolean flags set on the entity ([`FlagSet`]).

pub mod builtin;
pub mod cycle;
pub mod entity;
pub mod error;
pub mod flags;
pub mod index;
pub mod resolver;
pub mod unknown;

pub use builtin::{resolve_builtin, WorldState, BUILTIN_NAMES};
pub use cycle::CycleSpec;
pub use entity::EntityVariables;
pub use error::VariableError;
pub use flags::FlagSet;
pub use index::variable_index;
pub use resolver::{validate_variable_name, MapResolver, VariableResolver};
pub use unknown::UnknownVariables;
