//! Entity selection and chained property operations
//!
//! Provides [`EntitySelector`], a cursor over a caller-owned [`Manifest`].
//! A chain starts with [`EntitySelector::locate`], continues with property
//! operations, and ends by reading [`EntitySelector::error`].
//!
//! The first failure in a chain is kept and every later call becomes a
//! no-op. Mutations made before the failure are not rolled back.

use jobprops_manifest::{Job, Manifest, Variable};
use jobprops_value::DynamicValue;

use crate::access::{self, PropertyType};
use crate::error::EngineError;
use crate::options::SelectorOptions;
use crate::path::PropertyPath;
use crate::resolve::resolve;

/// Position of a job within a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobIndex {
    /// Index into `instance_groups`
    pub group: usize,
    /// Index into the group's `jobs`
    pub job: usize,
}

/// Stateful cursor over a manifest's jobs
///
/// Holds the manifest by mutable reference for its whole lifetime; every
/// mutation is visible to the caller as soon as the selector is dropped.
/// Matches are recorded by position, so structural edits made through
/// [`for_each_group`](Self::for_each_group) can leave stale positions, which
/// later calls skip.
///
/// # Example
///
/// ```
/// use jobprops_engine::EntitySelector;
/// use jobprops_manifest::{InstanceGroup, Job, Manifest};
///
/// let mut manifest = Manifest::new("cloudcache")
///     .with_group(InstanceGroup::new("locator").with_job(Job::new("gemfire-locator", "gemfire")));
///
/// let error = EntitySelector::new(&mut manifest)
///     .locate("gemfire-locator")
///     .add_property("gemfire/tls/enabled", true)
///     .into_result();
/// assert!(error.is_ok());
/// ```
#[derive(Debug)]
pub struct EntitySelector<'m> {
    manifest: &'m mut Manifest,
    matches: Vec<JobIndex>,
    error: Option<EngineError>,
    options: SelectorOptions,
}

impl<'m> EntitySelector<'m> {
    /// Create a selector with nothing selected
    #[inline]
    #[must_use]
    pub fn new(manifest: &'m mut Manifest) -> Self {
        Self::with_options(manifest, SelectorOptions::default())
    }

    /// Create a selector with explicit options
    #[inline]
    #[must_use]
    pub fn with_options(manifest: &'m mut Manifest, options: SelectorOptions) -> Self {
        Self {
            manifest,
            matches: Vec::new(),
            error: None,
            options,
        }
    }

    /// Select every job named `name`, across all instance groups
    ///
    /// Replaces the previous selection. Selecting nothing records
    /// [`EngineError::EntityNotFound`].
    #[must_use]
    pub fn locate(mut self, name: &str) -> Self {
        if self.skipped("locate") {
            return self;
        }
        self.matches = find_jobs(self.manifest, None, name);
        self.after_locate(name);
        self
    }

    /// Select every job named `name` within the instance group `group`
    ///
    /// Replaces the previous selection. Selecting nothing, including when the
    /// group does not exist, records [`EngineError::EntityNotFound`].
    #[must_use]
    pub fn locate_in_group(mut self, group: &str, name: &str) -> Self {
        if self.skipped("locate_in_group") {
            return self;
        }
        self.matches = find_jobs(self.manifest, Some(group), name);
        self.after_locate(name);
        self
    }

    /// Set `value` at `path` in every selected job's properties
    ///
    /// Missing intermediate mappings are created. Jobs are patched in
    /// selection order; a failure stops the fan-out and earlier jobs keep
    /// their change.
    #[must_use]
    pub fn add_property(mut self, path: &str, value: impl Into<DynamicValue>) -> Self {
        if self.skipped("add_property") {
            return self;
        }
        let value = value.into();
        let result = self.fan_out(path, true, |container, last, path| {
            access::set(container, last, value.clone(), path)
        });
        self.record(result);
        self
    }

    /// Remove the key at `path` from every selected job's properties
    ///
    /// A missing terminal key is not an error. Intermediate structure is
    /// never created.
    #[must_use]
    pub fn remove_property(mut self, path: &str) -> Self {
        if self.skipped("remove_property") {
            return self;
        }
        let result = self.fan_out(path, false, |container, last, path| {
            access::remove(container, last, path).map(drop)
        });
        self.record(result);
        self
    }

    /// Declare a manifest variable
    ///
    /// Records [`EngineError::DuplicateInsertion`] if the name is taken.
    #[must_use]
    pub fn add_variable(mut self, variable: Variable) -> Self {
        if self.skipped("add_variable") {
            return self;
        }
        let name = variable.name.clone();
        let result = self
            .manifest
            .add_variable(variable)
            .map_err(|_| EngineError::DuplicateInsertion { name });
        self.record(result);
        self
    }

    /// Read an integer at `path` of the single selected job
    ///
    /// # Errors
    /// Returns the sticky error if one is set, otherwise any selection, path
    /// or type error; a new error also becomes sticky.
    pub fn get_int(&mut self, path: &str) -> Result<i64, EngineError> {
        self.get_typed("get_int", path)
    }

    /// Read a string at `path` of the single selected job
    ///
    /// # Errors
    /// Same as [`get_int`](Self::get_int).
    pub fn get_string(&mut self, path: &str) -> Result<String, EngineError> {
        self.get_typed("get_string", path)
    }

    /// Read a boolean at `path` of the single selected job
    ///
    /// # Errors
    /// Same as [`get_int`](Self::get_int).
    pub fn get_bool(&mut self, path: &str) -> Result<bool, EngineError> {
        self.get_typed("get_bool", path)
    }

    /// Clone the raw node at `path` of the single selected job
    ///
    /// A missing mapping key yields the absent value.
    ///
    /// # Errors
    /// Same as [`get_int`](Self::get_int), minus the type check.
    pub fn get_value(&mut self, path: &str) -> Result<DynamicValue, EngineError> {
        self.read("get_value", path, |container, last, path| {
            access::lookup(container, last, path).cloned()
        })
    }

    /// Read a `T` at `path` of the single selected job
    ///
    /// # Errors
    /// Same as [`get_int`](Self::get_int).
    pub fn get<T: PropertyType>(&mut self, path: &str) -> Result<T, EngineError> {
        self.get_typed("get", path)
    }

    /// Sticky error, if any call in the chain failed
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&EngineError> {
        self.error.as_ref()
    }

    /// Finish the chain, surfacing the sticky error
    ///
    /// # Errors
    /// Returns the first error recorded by the chain.
    #[inline]
    pub fn into_result(self) -> Result<(), EngineError> {
        self.error.map_or(Ok(()), Err)
    }

    /// Number of selected jobs
    #[inline]
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Positions of the selected jobs, in manifest order
    #[inline]
    #[must_use]
    pub fn matches(&self) -> &[JobIndex] {
        &self.matches
    }

    /// Selected jobs, in manifest order
    pub fn matched(&self) -> impl Iterator<Item = &Job> {
        self.matches.iter().filter_map(move |index| {
            self.manifest
                .instance_groups
                .get(index.group)
                .and_then(|group| group.jobs.get(index.job))
        })
    }

    /// The manifest under edit
    #[inline]
    #[must_use]
    pub fn manifest(&self) -> &Manifest {
        &*self.manifest
    }

    pub(crate) fn manifest_mut(&mut self) -> &mut Manifest {
        &mut *self.manifest
    }

    pub(crate) fn selected(&self) -> &[JobIndex] {
        &self.matches
    }

    /// Check for a sticky error, logging the skip if configured
    pub(crate) fn skipped(&self, operation: &str) -> bool {
        match &self.error {
            Some(error) => {
                if self.options.log_skipped_calls {
                    tracing::trace!("Skipping {} after earlier failure: {}", operation, error);
                }
                true
            }
            None => false,
        }
    }

    fn record<T>(&mut self, result: Result<T, EngineError>) {
        if let Err(error) = result {
            self.fail(error);
        }
    }

    fn fail(&mut self, error: EngineError) {
        if self.error.is_none() {
            tracing::debug!("Selector chain failed: {}", error);
            self.error = Some(error);
        }
    }

    fn after_locate(&mut self, name: &str) {
        if self.matches.is_empty() {
            self.fail(EngineError::EntityNotFound {
                name: name.to_string(),
            });
            return;
        }
        tracing::debug!("Located {} job(s) named '{}'", self.matches.len(), name);
        if self.options.log_matches {
            tracing::debug!("Matches for '{}': {:?}", name, self.matches);
        }
    }

    fn fan_out(
        &mut self,
        path: &str,
        auto_vivify: bool,
        mut apply: impl FnMut(&mut DynamicValue, &str, &str) -> Result<(), EngineError>,
    ) -> Result<(), EngineError> {
        let path: PropertyPath = path.parse()?;
        if self.matches.is_empty() {
            return Err(EngineError::NothingSelected);
        }
        let (last, _) = path.split_last();
        for index in &self.matches {
            let Some(job) = job_mut(self.manifest, *index) else {
                continue;
            };
            let container = resolve(&mut job.properties, &path, auto_vivify)?;
            apply(container, last, path.as_str())?;
        }
        Ok(())
    }

    fn get_typed<T: PropertyType>(
        &mut self,
        operation: &'static str,
        path: &str,
    ) -> Result<T, EngineError> {
        self.read(operation, path, access::get_typed::<T>)
    }

    fn read<R>(
        &mut self,
        operation: &'static str,
        path: &str,
        extract: impl FnOnce(&DynamicValue, &str, &str) -> Result<R, EngineError>,
    ) -> Result<R, EngineError> {
        if let Some(error) = &self.error {
            if self.options.log_skipped_calls {
                tracing::trace!("Skipping {} after earlier failure: {}", operation, error);
            }
            return Err(error.clone());
        }
        let result = self.read_single(operation, path, extract);
        if let Err(error) = &result {
            self.fail(error.clone());
        }
        result
    }

    fn read_single<R>(
        &mut self,
        operation: &'static str,
        path: &str,
        extract: impl FnOnce(&DynamicValue, &str, &str) -> Result<R, EngineError>,
    ) -> Result<R, EngineError> {
        let index = match self.matches.as_slice() {
            [] => return Err(EngineError::NothingSelected),
            [index] => *index,
            many => {
                return Err(EngineError::MultipleMatchesUnsupported {
                    operation,
                    count: many.len(),
                })
            }
        };
        let path: PropertyPath = path.parse()?;
        let job = job_mut(self.manifest, index).ok_or(EngineError::NothingSelected)?;
        let container = resolve(&mut job.properties, &path, false)?;
        let (last, _) = path.split_last();
        extract(container, last, path.as_str())
    }
}

pub(crate) fn job_mut(manifest: &mut Manifest, index: JobIndex) -> Option<&mut Job> {
    manifest
        .instance_groups
        .get_mut(index.group)?
        .jobs
        .get_mut(index.job)
}

fn find_jobs(manifest: &Manifest, group: Option<&str>, name: &str) -> Vec<JobIndex> {
    manifest
        .instance_groups
        .iter()
        .enumerate()
        .filter(|(_, g)| group.map_or(true, |wanted| g.name == wanted))
        .flat_map(|(group_index, g)| {
            g.jobs
                .iter()
                .enumerate()
                .filter(|(_, job)| job.name == name)
                .map(move |(job_index, _)| JobIndex {
                    group: group_index,
                    job: job_index,
                })
        })
        .collect()
}
