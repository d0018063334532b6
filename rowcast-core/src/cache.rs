use crate::{
    ColumnBinding, ColumnSchema, Config, Cursor, Error, GenericTypeMap, Loader, Result,
    ShapeSignature, Target, TypeMap, reflect, synthesize,
};
use dashmap::DashMap;
use std::{
    any::{self, Any},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

struct CacheEntry {
    /// Column names and type names the entry was built for.
    shape: Box<[(String, String)]>,
    bindings: Arc<[ColumnBinding]>,
    loader: Arc<dyn Any + Send + Sync>,
}

impl CacheEntry {
    fn matches(&self, columns: &[ColumnSchema]) -> bool {
        self.shape.len() == columns.len()
            && self
                .shape
                .iter()
                .zip(columns)
                .all(|((name, ty), c)| *name == c.name && *ty == c.data_type_name)
    }
}

fn fingerprint(columns: &[ColumnSchema]) -> Box<[(String, String)]> {
    columns
        .iter()
        .map(|c| (c.name.clone(), c.data_type_name.clone()))
        .collect()
}

/// Loaders indexed by result shape and target type.
///
/// Entries are created on the first load of a shape and never modified,
/// lookups and inserts are safe from multiple threads.
pub struct ShapeCache {
    entries: DashMap<ShapeSignature, Arc<CacheEntry>>,
    types: Arc<dyn TypeMap>,
    caching: bool,
    reflections: AtomicUsize,
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::new(Arc::new(GenericTypeMap))
    }
}

impl ShapeCache {
    pub fn new(types: Arc<dyn TypeMap>) -> Self {
        Self::with_config(types, &Config::default())
    }

    pub fn with_config(types: Arc<dyn TypeMap>, config: &Config) -> Self {
        Self {
            entries: DashMap::new(),
            types,
            caching: config.caching,
            reflections: AtomicUsize::new(0),
        }
    }

    /// Loader for the result set the cursor currently exposes.
    pub fn provide_loader<T: Target, C: Cursor + ?Sized>(&self, cursor: &C) -> Result<Loader<T>> {
        let columns = cursor.columns();
        let signature = ShapeSignature::new::<T>(columns);
        if self.caching {
            let cached = self.entries.get(&signature).map(|v| v.value().clone());
            if let Some(entry) = cached {
                if entry.matches(columns) {
                    return downcast::<T>(&entry);
                }
                log::warn!(
                    "Shape signature collision for {}, the loader will not be cached",
                    any::type_name::<T>()
                );
                return self.build::<T>(columns).map(|(_, loader)| loader);
            }
        }
        log::debug!(
            "Building the loader of {} for {} columns",
            any::type_name::<T>(),
            columns.len()
        );
        let (bindings, loader) = self.build::<T>(columns)?;
        if self.caching {
            let entry = Arc::new(CacheEntry {
                shape: fingerprint(columns),
                bindings,
                loader: Arc::new(loader.clone()),
            });
            self.entries.entry(signature).or_insert(entry);
        }
        Ok(loader)
    }

    /// Bindings cached for this shape, `None` when it was never loaded.
    pub fn bindings<T: Target>(&self, columns: &[ColumnSchema]) -> Option<Arc<[ColumnBinding]>> {
        let signature = ShapeSignature::new::<T>(columns);
        self.entries
            .get(&signature)
            .filter(|v| v.matches(columns))
            .map(|v| v.bindings.clone())
    }

    fn build<T: Target>(
        &self,
        columns: &[ColumnSchema],
    ) -> Result<(Arc<[ColumnBinding]>, Loader<T>)> {
        self.reflections.fetch_add(1, Ordering::Relaxed);
        let shape = T::shape();
        let bindings: Arc<[ColumnBinding]> = reflect(columns, &shape, self.types.as_ref())?.into();
        let loader = synthesize(bindings.clone(), shape)?;
        Ok((bindings, loader))
    }

    /// Number of reflections performed so far.
    pub fn reflections(&self) -> usize {
        self.reflections.load(Ordering::Relaxed)
    }
    pub fn types(&self) -> &Arc<dyn TypeMap> {
        &self.types
    }
    pub fn is_caching(&self) -> bool {
        self.caching
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn clear(&self) {
        self.entries.clear();
    }
}

fn downcast<T: Target>(entry: &CacheEntry) -> Result<Loader<T>> {
    entry
        .loader
        .downcast_ref::<Loader<T>>()
        .cloned()
        .ok_or_else(|| {
            let error = Error::msg(format!(
                "Cached loader is not a loader of {}",
                any::type_name::<T>()
            ));
            log::error!("{:#}", error);
            error
        })
}
