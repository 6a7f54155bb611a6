//! Comparator and rule bindings for Python.

use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyList, PyString, PyTuple};

use crate::comparators::Comparator;
use crate::rules::Rule;

use super::py_attributes::value_from_py;
use super::py_character::PyDDCharacter;

/// Python wrapper for Comparator.
#[pyclass(name = "Comparator")]
#[derive(Clone, Debug)]
pub struct PyComparator(pub Comparator);

#[pymethods]
impl PyComparator {
    #[staticmethod]
    fn equivalence(attribute: String, value: &Bound<'_, PyAny>) -> PyResult<Self> {
        Ok(Self(Comparator::equals(attribute, value_from_py(value)?)))
    }

    #[staticmethod]
    fn less_than(attribute: String, value: &Bound<'_, PyAny>) -> PyResult<Self> {
        Ok(Self(Comparator::less_than(attribute, value_from_py(value)?)))
    }

    #[staticmethod]
    fn greater_than(attribute: String, value: &Bound<'_, PyAny>) -> PyResult<Self> {
        Ok(Self(Comparator::greater_than(attribute, value_from_py(value)?)))
    }

    #[staticmethod]
    fn range(
        attribute: String,
        min: &Bound<'_, PyAny>,
        max: &Bound<'_, PyAny>,
    ) -> PyResult<Self> {
        Ok(Self(Comparator::range(
            attribute,
            value_from_py(min)?,
            value_from_py(max)?,
        )))
    }

    /// Parse the textual form, e.g. `"energy in 1..5"`.
    #[staticmethod]
    fn parse(text: &str) -> PyResult<Self> {
        Ok(Self(Comparator::parse(text)?))
    }

    #[getter]
    fn attribute(&self) -> String {
        self.0.attribute().to_string()
    }

    /// Evaluate against a DDCharacter.
    fn eval(&self, character: &Bound<'_, PyAny>) -> PyResult<bool> {
        let character = character.downcast::<PyDDCharacter>().map_err(|_| {
            PyTypeError::new_err("Comparator can only be used on a DDCharacter object")
        })?;
        Ok(self.0.eval(&character.borrow().0)?)
    }

    fn __repr__(&self) -> String {
        format!("Comparator({})", self.0)
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

/// Build one rule from a `(comparator, ..., tag)` tuple or its string form.
pub fn rule_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Rule> {
    if let Ok(text) = obj.downcast::<PyString>() {
        return Ok(Rule::parse(text.to_str()?)?);
    }

    let tuple = obj
        .downcast::<PyTuple>()
        .map_err(|_| PyTypeError::new_err("a rule must be a tuple or a string"))?;

    let Some(last) = tuple.len().checked_sub(1) else {
        return Err(PyValueError::new_err("rule specification is empty"));
    };

    let tag: String = tuple
        .get_item(last)?
        .extract()
        .map_err(|_| PyTypeError::new_err("the last element of a rule must be a string tag"))?;

    let mut comparators = Vec::with_capacity(last);
    for index in 0..last {
        let comparator: PyRef<'_, PyComparator> = tuple.get_item(index)?.extract()?;
        comparators.push(comparator.0.clone());
    }

    Ok(Rule::new(comparators, tag)?)
}

/// Build a rule list from a single rule or a sequence of rules.
///
/// A tuple whose first element is itself a tuple is read as several rules.
pub fn rules_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Vec<Rule>> {
    if let Ok(list) = obj.downcast::<PyList>() {
        return list.iter().map(|item| rule_from_py(&item)).collect();
    }

    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        let nested = tuple
            .iter()
            .next()
            .is_some_and(|first| first.is_instance_of::<PyTuple>());
        if nested {
            return tuple.iter().map(|item| rule_from_py(&item)).collect();
        }
    }

    Ok(vec![rule_from_py(obj)?])
}
