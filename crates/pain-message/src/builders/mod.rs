//! Variant tree builders.
//!
//! Each supported `pain.001` version has one [`MessageBuilder`]. Builders
//! share the fragments in `common` and differ only in block grouping,
//! element tags and the optional blocks their version carries.

mod common;
mod v03;
mod v04;
mod v05;
mod v06;
mod v07;
mod v08;
mod v09;
mod v10;

pub use v03::Pain001V03;
pub use v04::Pain001V04;
pub use v05::Pain001V05;
pub use v06::Pain001V06;
pub use v07::Pain001V07;
pub use v08::Pain001V08;
pub use v09::Pain001V09;
pub use v10::Pain001V10;

use crate::context::BuildContext;
use crate::{Error, Result};
use pain_ir::{Element, Record};
use pain_schema::MessageVariant;
use std::collections::HashMap;
use tracing::debug;

/// Builds the `CstmrCdtTrfInitn` subtree for one variant
pub trait MessageBuilder: Send + Sync {
    /// Variant this builder produces
    fn variant(&self) -> MessageVariant;

    /// Build the message body from validated records.
    ///
    /// # Errors
    ///
    /// Fails when `records` is empty, when a record lacks a field the
    /// builder reads, or when a value cannot be rendered.
    fn build(&self, ctx: &BuildContext, records: &[Record]) -> Result<Element>;
}

/// Builders keyed by variant
pub struct BuilderRegistry {
    builders: HashMap<MessageVariant, Box<dyn MessageBuilder>>,
}

impl BuilderRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Registry holding a builder for every supported variant
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Pain001V03));
        registry.register(Box::new(Pain001V04));
        registry.register(Box::new(Pain001V05));
        registry.register(Box::new(Pain001V06));
        registry.register(Box::new(Pain001V07));
        registry.register(Box::new(Pain001V08));
        registry.register(Box::new(Pain001V09));
        registry.register(Box::new(Pain001V10));
        registry
    }

    /// Register a builder, replacing any previous one for its variant
    pub fn register(&mut self, builder: Box<dyn MessageBuilder>) {
        let variant = builder.variant();
        if self.builders.insert(variant, builder).is_some() {
            debug!("Replaced builder for {}", variant);
        }
    }

    /// Builder for `variant`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoBuilder`] when nothing is registered for it.
    pub fn get(&self, variant: MessageVariant) -> Result<&dyn MessageBuilder> {
        self.builders
            .get(&variant)
            .map(|builder| &**builder)
            .ok_or(Error::NoBuilder { variant })
    }

    /// Registered variants in version order
    #[must_use]
    pub fn variants(&self) -> Vec<MessageVariant> {
        let mut variants: Vec<_> = self.builders.keys().copied().collect();
        variants.sort();
        variants
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
