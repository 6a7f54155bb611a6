//! Attribute value conversion and store bindings for Python.

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::PyBool;

use crate::attributes::{AttributeStore, AttributeValue};

/// Convert a Python object into an attribute value.
///
/// Accepts `None`, `bool`, `int`, `float` and `str`.
pub fn value_from_py(obj: &Bound<'_, PyAny>) -> PyResult<AttributeValue> {
    if obj.is_none() {
        return Ok(AttributeValue::Null);
    }
    // bool before int: Python bools are ints
    if let Ok(flag) = obj.downcast::<PyBool>() {
        return Ok(AttributeValue::Bool(flag.is_true()));
    }
    if let Ok(v) = obj.extract::<i64>() {
        return Ok(AttributeValue::Int(v));
    }
    if let Ok(v) = obj.extract::<f64>() {
        return Ok(AttributeValue::Float(v));
    }
    if let Ok(v) = obj.extract::<String>() {
        return Ok(AttributeValue::Text(v));
    }

    Err(PyTypeError::new_err(format!(
        "unsupported attribute value: {}",
        obj.repr()?
    )))
}

/// Convert an attribute value into a Python object.
pub fn value_to_py(py: Python<'_>, value: &AttributeValue) -> PyObject {
    match value {
        AttributeValue::Null => py.None(),
        AttributeValue::Bool(v) => (*v).into_py(py),
        AttributeValue::Int(v) => (*v).into_py(py),
        AttributeValue::Float(v) => (*v).into_py(py),
        AttributeValue::Text(s) => s.as_str().into_py(py),
    }
}

/// Python wrapper for AttributeStore.
#[pyclass(name = "AttributeStore")]
#[derive(Clone, Default)]
pub struct PyAttributeStore(pub AttributeStore);

#[pymethods]
impl PyAttributeStore {
    /// Create a new empty store.
    #[new]
    fn new() -> Self {
        Self::default()
    }

    /// Set an attribute. Returns whether anything changed.
    fn set(&self, character: &str, attribute: String, value: &Bound<'_, PyAny>) -> PyResult<bool> {
        Ok(self.0.set(character, attribute, value_from_py(value)?))
    }

    /// Get an attribute, `None` if unset.
    fn get(&self, py: Python<'_>, character: &str, attribute: &str) -> PyObject {
        self.0
            .get(character, attribute)
            .map_or_else(|| py.None(), |value| value_to_py(py, &value))
    }

    fn contains(&self, character: &str, attribute: &str) -> bool {
        self.0.contains(character, attribute)
    }

    /// Remove an attribute. Returns whether it was set.
    fn delete(&self, character: &str, attribute: &str) -> bool {
        self.0.delete(character, attribute).is_some()
    }

    fn count(&self, character: &str) -> usize {
        self.0.count(character)
    }

    fn clear(&self, character: &str) -> usize {
        self.0.clear(character)
    }

    fn characters(&self) -> Vec<String> {
        self.0.characters()
    }

    fn __repr__(&self) -> String {
        format!("AttributeStore(characters={})", self.0.characters().len())
    }
}
