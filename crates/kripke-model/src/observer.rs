//! Change notification for model collaborators.

use std::fmt;
use std::rc::Rc;

use crate::model::PointedModel;

/// Receives a notification after every committed model mutation.
///
/// The notification carries no diff; observers re-read whatever state they
/// need from the model reference.
pub trait ModelObserver {
    fn model_changed(&self, model: &PointedModel);
}

/// Handle returned by [`PointedModel::attach_observer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(ObserverId, Rc<dyn ModelObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn attach(&mut self, observer: Rc<dyn ModelObserver>) -> ObserverId {
        if let Some((id, _)) = self
            .entries
            .iter()
            .find(|(_, existing)| Rc::ptr_eq(existing, &observer))
        {
            return *id;
        }
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn snapshot(&self) -> Vec<Rc<dyn ModelObserver>> {
        self.entries
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}
