//! Python bindings for dd-character.
//!
//! Lets a Python host engine keep its scripts unchanged while attribute
//! storage and tag resolution run in Rust.
//!
//! # Quick Start
//!
//! ```python
//! import dd_character as dd
//!
//! store = dd.AttributeStore()
//! eileen = dd.DDCharacter(
//!     "Eileen",
//!     store,
//!     attributes="pose=standing mood=happy",
//!     img_tag_map=[
//!         (dd.Comparator.equivalence("pose", "sitting"),
//!          dd.Comparator.equivalence("mood", "sad"), "eileen_sad_sit"),
//!         "mood==happy, eileen_happy",
//!     ],
//!     image="eileen",
//! )
//!
//! eileen["mood"] = "neutral"
//! eileen.show(renpy_host, ("Eileen",), at_list=[left])
//! ```

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::error::{CharacterError, EvalError, RuleError};

mod py_attributes;
mod py_character;
mod py_comparators;

pub use py_attributes::*;
pub use py_character::*;
pub use py_comparators::*;

impl From<RuleError> for PyErr {
    fn from(err: RuleError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

impl From<EvalError> for PyErr {
    fn from(err: EvalError) -> Self {
        PyTypeError::new_err(err.to_string())
    }
}

impl From<CharacterError> for PyErr {
    fn from(err: CharacterError) -> Self {
        match err {
            CharacterError::Eval(err) => err.into(),
            other => PyValueError::new_err(other.to_string()),
        }
    }
}

/// dd_character: attribute-driven image tags for visual novel characters.
#[pymodule]
fn dd_character(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAttributeStore>()?;
    m.add_class::<PyComparator>()?;
    m.add_class::<PyCharacterKind>()?;
    m.add_class::<PyDDCharacter>()?;

    Ok(())
}
