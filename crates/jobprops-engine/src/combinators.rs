//! Fan-out helpers for edits the typed accessors do not cover

use jobprops_manifest::{InstanceGroup, Job};

use crate::selector::{job_mut, EntitySelector};

impl<'m> EntitySelector<'m> {
    /// Run `mutate` on every selected job, in selection order
    ///
    /// No-op after a sticky error.
    #[must_use]
    pub fn for_each_selected(mut self, mut mutate: impl FnMut(&mut Job)) -> Self {
        if self.skipped("for_each_selected") {
            return self;
        }
        let selected = self.selected().to_vec();
        let manifest = self.manifest_mut();
        for index in selected {
            if let Some(job) = job_mut(manifest, index) {
                mutate(job);
            }
        }
        self
    }

    /// Run `mutate` on every instance group, regardless of the selection
    ///
    /// No-op after a sticky error.
    #[must_use]
    pub fn for_each_group(mut self, mutate: impl FnMut(&mut InstanceGroup)) -> Self {
        if self.skipped("for_each_group") {
            return self;
        }
        self.manifest_mut().instance_groups.iter_mut().for_each(mutate);
        self
    }
}
