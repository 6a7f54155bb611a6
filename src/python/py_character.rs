//! Character bindings for Python.

use pyo3::prelude::*;
use pyo3::types::{PyList, PyTuple};

use crate::character::{CharacterConfig, CharacterKind, DDCharacter, ImageName};

use super::py_attributes::{value_from_py, value_to_py, PyAttributeStore};
use super::py_comparators::{rule_from_py, rules_from_py};

/// Python wrapper for CharacterKind.
#[pyclass(name = "CharacterKind")]
#[derive(Clone)]
pub struct PyCharacterKind(pub CharacterKind);

#[pymethods]
impl PyCharacterKind {
    #[new]
    #[pyo3(signature = (name = "dd".to_string(), img_tag_map = None, image = None))]
    fn new(
        name: String,
        img_tag_map: Option<&Bound<'_, PyAny>>,
        image: Option<String>,
    ) -> PyResult<Self> {
        let mut kind = CharacterKind::new(name);
        if let Some(map) = img_tag_map {
            for rule in rules_from_py(map)? {
                kind = kind.with_rule(rule);
            }
        }
        kind.image = image;
        Ok(Self(kind))
    }

    #[getter]
    fn name(&self) -> String {
        self.0.name.clone()
    }

    fn __repr__(&self) -> String {
        format!(
            "CharacterKind(name={:?}, rules={})",
            self.0.name,
            self.0.image_tag_map.len()
        )
    }
}

/// Python wrapper for DDCharacter.
///
/// Behaves like a dict of the character's attributes.
#[pyclass(name = "DDCharacter")]
pub struct PyDDCharacter(pub DDCharacter);

#[pymethods]
impl PyDDCharacter {
    #[new]
    #[pyo3(signature = (name, store, kind = None, attributes = None, img_tag_map = None, image = None))]
    fn new(
        name: String,
        store: &PyAttributeStore,
        kind: Option<PyRef<'_, PyCharacterKind>>,
        attributes: Option<String>,
        img_tag_map: Option<&Bound<'_, PyAny>>,
        image: Option<String>,
    ) -> PyResult<Self> {
        let mut config = CharacterConfig::new(name);
        config.attributes = attributes;
        config.image = image;
        if let Some(map) = img_tag_map {
            config = config.with_rules(rules_from_py(map)?);
        }

        let character = match kind {
            Some(kind) => DDCharacter::with_kind(config, &kind.0, store.0.clone())?,
            None => DDCharacter::new(config, store.0.clone())?,
        };
        Ok(Self(character))
    }

    #[getter]
    fn name(&self) -> String {
        self.0.name().to_string()
    }

    fn __setitem__(&mut self, attribute: String, value: &Bound<'_, PyAny>) -> PyResult<()> {
        self.0.set(attribute, value_from_py(value)?)?;
        Ok(())
    }

    /// Missing attributes read as `None`.
    fn __getitem__(&self, py: Python<'_>, attribute: &str) -> PyObject {
        self.0
            .get(attribute)
            .map_or_else(|| py.None(), |value| value_to_py(py, &value))
    }

    fn __contains__(&self, attribute: &str) -> bool {
        self.0.contains(attribute)
    }

    fn __delitem__(&mut self, attribute: &str) -> PyResult<()> {
        self.0.delete(attribute)?;
        Ok(())
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// A character is always truthy, even with no attributes.
    fn __bool__(&self) -> bool {
        true
    }

    /// Append a rule: a `(comparator, ..., tag)` tuple or its string form.
    fn register_comparator(&mut self, rule: &Bound<'_, PyAny>) -> PyResult<()> {
        self.0.register_rule(rule_from_py(rule)?)?;
        Ok(())
    }

    /// The resolved image tag.
    fn image_tag(&mut self) -> PyResult<String> {
        Ok(self.0.image_tag()?.to_string())
    }

    /// Rewrite an image name tuple so its first element is the resolved tag.
    fn display_name<'py>(
        &mut self,
        py: Python<'py>,
        name: Vec<String>,
    ) -> PyResult<Bound<'py, PyTuple>> {
        let name = self.0.display_name(&ImageName::new(name))?;
        Ok(PyTuple::new_bound(py, name.tokens()))
    }

    /// Forward to `host.show` with the rewritten name. Other arguments pass
    /// through untouched.
    #[pyo3(signature = (
        host, name, at_list = None, layer = None, what = None, zorder = None,
        tag = None, behind = None, atl = None, transient = false, munge_name = true
    ))]
    #[allow(clippy::too_many_arguments)]
    fn show<'py>(
        &mut self,
        py: Python<'py>,
        host: &Bound<'py, PyAny>,
        name: Vec<String>,
        at_list: Option<Bound<'py, PyAny>>,
        layer: Option<Bound<'py, PyAny>>,
        what: Option<Bound<'py, PyAny>>,
        zorder: Option<Bound<'py, PyAny>>,
        tag: Option<Bound<'py, PyAny>>,
        behind: Option<Bound<'py, PyAny>>,
        atl: Option<Bound<'py, PyAny>>,
        transient: bool,
        munge_name: bool,
    ) -> PyResult<()> {
        let name = self.display_name(py, name)?;
        let at_list = at_list.unwrap_or_else(|| PyList::empty_bound(py).into_any());
        let behind = behind.unwrap_or_else(|| PyList::empty_bound(py).into_any());

        host.call_method1(
            "show",
            (
                name, at_list, layer, what, zorder, tag, behind, atl, transient, munge_name,
            ),
        )?;
        Ok(())
    }

    /// Forward to `host.hide` with the rewritten name.
    #[pyo3(signature = (host, name, layer = None))]
    fn hide<'py>(
        &mut self,
        py: Python<'py>,
        host: &Bound<'py, PyAny>,
        name: Vec<String>,
        layer: Option<Bound<'py, PyAny>>,
    ) -> PyResult<()> {
        let name = self.display_name(py, name)?;
        host.call_method1("hide", (name, layer))?;
        Ok(())
    }

    fn __repr__(&self) -> String {
        format!(
            "DDCharacter(name={:?}, tag={:?})",
            self.0.name(),
            self.0.cached_tag()
        )
    }
}
