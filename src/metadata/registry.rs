//! The metadata registry: immutable schema storage with one-shot linking.
//!
//! Message descriptions may reference each other before all of them exist
//! (a field of message `A` can point at message `B` that the generation
//! stage emits later), so nested field metadata is resolved by a linking
//! pass over the finished registry instead of at construction time. The
//! pass is guarded by a one-shot gate: it runs exactly once no matter how
//! many threads trigger it, and every nested-field slot is itself
//! write-once, so repeated linking is harmless.
//!
//! Registration happens once at process start through [`RegistryBuilder`];
//! the built [`MetadataRegistry`] is an immutable handle that can be shared
//! freely across threads.

use std::collections::HashMap;
use std::sync::{Arc, Once};

use super::enums::EnumDescription;
use super::message::MessageDescription;

/// Immutable registry of message and enum descriptions.
///
/// Obtained from [`RegistryBuilder::build`]. All lookups trigger the
/// one-shot nested-field linking pass on first use.
#[derive(Debug)]
pub struct MetadataRegistry {
    messages: HashMap<String, Arc<MessageDescription>>,
    enums: HashMap<String, Arc<EnumDescription>>,
    link: Once,
}

impl MetadataRegistry {
    /// Looks up a message description by fully qualified name.
    #[must_use]
    pub fn message(&self, full_name: &str) -> Option<Arc<MessageDescription>> {
        self.link();
        self.messages.get(full_name).cloned()
    }

    /// Looks up an enum description by fully qualified name.
    #[must_use]
    pub fn enumeration(&self, full_name: &str) -> Option<Arc<EnumDescription>> {
        self.enums.get(full_name).cloned()
    }

    /// Iterates over all registered message descriptions.
    pub fn messages(&self) -> impl Iterator<Item = &Arc<MessageDescription>> {
        self.link();
        self.messages.values()
    }

    /// Number of registered message descriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the registry holds no message descriptions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Resolves nested field metadata across message descriptions.
    ///
    /// Idempotent and safe under concurrent first use: the pass body runs
    /// exactly once. Callers normally never need this directly, since
    /// every lookup triggers it, but it can be invoked eagerly at startup to
    /// front-load the work.
    pub fn link(&self) {
        self.link.call_once(|| {
            for md in self.messages.values() {
                for field in &md.fields {
                    if !field.references_message()
                        || field.is_linked()
                        || field.struct_name.is_empty()
                    {
                        continue;
                    }
                    if let Some(target) = self.messages.get(&field.struct_name) {
                        field.link_nested(target.fields.clone());
                    }
                }
            }
        });
    }
}

/// Builder collecting descriptions during startup registration.
///
/// Registration is not safe to interleave with reads; finish the builder
/// before handing the registry to concurrent callers.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    messages: Vec<MessageDescription>,
    enums: Vec<Arc<EnumDescription>>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// Registers a message description, keyed by its fully qualified name.
    #[must_use]
    pub fn message(mut self, md: MessageDescription) -> Self {
        self.messages.push(md);
        self
    }

    /// Registers an enum description, keyed by its fully qualified name.
    #[must_use]
    pub fn enumeration(mut self, descr: Arc<EnumDescription>) -> Self {
        self.enums.push(descr);
        self
    }

    /// Finishes registration and returns the immutable registry handle.
    #[must_use]
    pub fn build(self) -> Arc<MetadataRegistry> {
        let mut messages = HashMap::with_capacity(self.messages.len());
        for md in self.messages {
            messages.insert(md.full_name.clone(), Arc::new(md));
        }
        let mut enums = HashMap::with_capacity(self.enums.len());
        for descr in self.enums {
            enums.insert(descr.full_name.clone(), descr);
        }
        Arc::new(MetadataRegistry {
            messages,
            enums,
            link: Once::new(),
        })
    }
}
