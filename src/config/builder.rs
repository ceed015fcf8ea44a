//! Type-safe builder for `EnumerationOptions` using the typestate pattern
//!
//! `build()` only exists once at least one source has been added, so an
//! enumeration that can never produce anything is a compile error rather
//! than a silently empty stream.

use std::marker::PhantomData;
use std::sync::Arc;

use super::types::EnumerationOptions;
use crate::enumeration::{SharedSource, Source};

// Type states for the builder
pub struct WithSources;

pub struct EnumerationOptionsBuilder<State = ()> {
    pub(crate) sources: Vec<SharedSource>,
    pub(crate) recursive: bool,
    pub(crate) uniq: bool,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for EnumerationOptionsBuilder<()> {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            recursive: false,
            uniq: false,
            _phantom: PhantomData,
        }
    }
}

impl EnumerationOptions {
    #[must_use]
    pub fn builder() -> EnumerationOptionsBuilder<()> {
        EnumerationOptionsBuilder::default()
    }
}

impl<State> EnumerationOptionsBuilder<State> {
    fn into_state<Next>(self) -> EnumerationOptionsBuilder<Next> {
        EnumerationOptionsBuilder {
            sources: self.sources,
            recursive: self.recursive,
            uniq: self.uniq,
            _phantom: PhantomData,
        }
    }

    /// Add one source
    #[must_use]
    pub fn source<S: Source + 'static>(mut self, source: S) -> EnumerationOptionsBuilder<WithSources> {
        self.sources.push(Arc::new(source));
        self.into_state()
    }

    /// Add an already shared source
    #[must_use]
    pub fn shared_source(mut self, source: SharedSource) -> EnumerationOptionsBuilder<WithSources> {
        self.sources.push(source);
        self.into_state()
    }

    /// Add several shared sources
    ///
    /// An empty iterator still moves the builder to the buildable state;
    /// the caller decided the source list.
    #[must_use]
    pub fn sources(
        mut self,
        sources: impl IntoIterator<Item = SharedSource>,
    ) -> EnumerationOptionsBuilder<WithSources> {
        self.sources.extend(sources);
        self.into_state()
    }

    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn uniq(mut self, uniq: bool) -> Self {
        self.uniq = uniq;
        self
    }
}

impl EnumerationOptionsBuilder<WithSources> {
    #[must_use]
    pub fn build(self) -> EnumerationOptions {
        EnumerationOptions {
            sources: self.sources,
            recursive: self.recursive,
            uniq: self.uniq,
        }
    }
}
