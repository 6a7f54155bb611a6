//! Host engine boundary.
//!
//! The crate never renders anything. Showing and hiding images is delegated
//! to the host engine through [`DisplayHost`]; a character only rewrites the
//! image name before handing it over.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Token storage for image names. Names rarely exceed a few tokens.
pub type ImageTokens = SmallVec<[String; 4]>;

/// A space-separated image name, e.g. `eileen happy`.
///
/// The first token is the identity (usually the character's image tag);
/// the rest are attributes the host uses to pick a variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageName(ImageTokens);

impl ImageName {
    /// Create a name from tokens.
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    /// Split a name on whitespace.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        Self::new(name.split_whitespace())
    }

    /// All tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    /// The leading identity token.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Every token after the identity.
    #[must_use]
    pub fn rest(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the name has no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Replace the identity token with the tokens of `tag`.
    ///
    /// An empty name becomes just the tag's tokens.
    #[must_use]
    pub fn with_identity(&self, tag: &str) -> Self {
        let mut tokens: ImageTokens = tag.split_whitespace().map(str::to_string).collect();
        tokens.extend(self.rest().iter().cloned());
        Self(tokens)
    }
}

impl From<&str> for ImageName {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Display parameters forwarded untouched to the host's show call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowParams {
    /// Transforms applied to the image.
    pub at_list: Vec<String>,

    /// Layer to show on. `None` uses the host's default.
    pub layer: Option<String>,

    /// Displayable to show instead of the named image.
    pub what: Option<String>,

    /// Stacking order within the layer.
    pub zorder: Option<i32>,

    /// Tag to show the image under, if it differs from the name.
    pub tag: Option<String>,

    /// Tags this image should be placed behind.
    pub behind: Vec<String>,

    /// ATL block applied to the image.
    pub atl: Option<String>,

    /// Remove the image at the end of the interaction.
    pub transient: bool,

    /// Let the host prefix the name with the current namespace.
    pub munge_name: bool,
}

impl Default for ShowParams {
    fn default() -> Self {
        Self {
            at_list: Vec::new(),
            layer: None,
            what: None,
            zorder: None,
            tag: None,
            behind: Vec::new(),
            atl: None,
            transient: false,
            munge_name: true,
        }
    }
}

impl ShowParams {
    /// Create default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform.
    #[must_use]
    pub fn at(mut self, transform: impl Into<String>) -> Self {
        self.at_list.push(transform.into());
        self
    }

    /// Set the layer.
    #[must_use]
    pub fn on_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = Some(layer.into());
        self
    }

    /// Set the displayable to show.
    #[must_use]
    pub fn with_what(mut self, what: impl Into<String>) -> Self {
        self.what = Some(what.into());
        self
    }

    /// Set the zorder.
    #[must_use]
    pub fn with_zorder(mut self, zorder: i32) -> Self {
        self.zorder = Some(zorder);
        self
    }

    /// Set the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Place behind another tag.
    #[must_use]
    pub fn behind(mut self, tag: impl Into<String>) -> Self {
        self.behind.push(tag.into());
        self
    }

    /// Set the ATL block.
    #[must_use]
    pub fn with_atl(mut self, atl: impl Into<String>) -> Self {
        self.atl = Some(atl.into());
        self
    }

    /// Mark as transient.
    #[must_use]
    pub fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Disable name munging.
    #[must_use]
    pub fn without_munging(mut self) -> Self {
        self.munge_name = false;
        self
    }
}

/// The host engine's show/hide primitives.
pub trait DisplayHost {
    /// Show an image.
    fn show(&mut self, name: &ImageName, params: &ShowParams);

    /// Hide an image.
    fn hide(&mut self, name: &ImageName, layer: Option<&str>);
}
