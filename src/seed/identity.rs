use crate::model::{Id, Named};
use std::collections::HashMap;
use std::marker::PhantomData;

/// Name to store-assigned id lookup for one entity kind, built during a single run
#[derive(Debug, Clone)]
pub struct IdentityMap<T: Named> {
    ids: HashMap<String, Id>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: Named> Default for IdentityMap<T> {
    fn default() -> Self {
        Self {
            ids: HashMap::new(),
            _kind: PhantomData,
        }
    }
}

impl<T: Named> IdentityMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the id assigned to `name`. Returns the id it replaced, if any.
    pub fn record(&mut self, name: &str, id: Id) -> Option<Id> {
        let previous = self.ids.insert(name.to_string(), id);
        if let Some(previous) = &previous {
            log::warn!(
                "Duplicate {} name '{}': id {} replaced by a later record",
                T::KIND,
                name,
                previous
            );
        }
        previous
    }

    pub fn resolve(&self, name: &str) -> Option<&Id> {
        self.ids.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
