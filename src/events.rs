//! Change notification.
//!
//! Renderers own an [`Observers`] registry and report every property change through it,
//! synchronously and in registration order. Listeners subscribe to a single [`Topic`] or to
//! all of them.

use core::fmt;

use log::trace;

use crate::bitmap::Bitmap;
use crate::dimension::{Dimension, TriState};

/// The observable properties of a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    RequestedDimension,
    ActualDimension,
    ModuleSize,
    Result,
    ExceedsRequestedDimension,
}

impl Topic {
    pub const ALL: [Topic; 5] = [
        Topic::RequestedDimension,
        Topic::ActualDimension,
        Topic::ModuleSize,
        Topic::Result,
        Topic::ExceedsRequestedDimension,
    ];

    /// String key of the topic.
    pub fn name(self) -> &'static str {
        match self {
            Topic::RequestedDimension => "requestedDimension",
            Topic::ActualDimension => "actualDimension",
            Topic::ModuleSize => "moduleSize",
            Topic::Result => "result",
            Topic::ExceedsRequestedDimension => "exceedsRequestedDimension",
        }
    }

    pub fn from_name(name: &str) -> Option<Topic> {
        Topic::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An old/new value pair for one property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyChange<'a> {
    RequestedDimension {
        old: Dimension,
        new: Dimension,
    },
    ActualDimension {
        old: Option<Dimension>,
        new: Option<Dimension>,
    },
    /// Module size is absent until a size-fitting renderer derives one.
    ModuleSize {
        old: Option<u32>,
        new: Option<u32>,
    },
    Result {
        old: Option<&'a Bitmap>,
        new: Option<&'a Bitmap>,
    },
    ExceedsRequestedDimension {
        old: TriState,
        new: TriState,
    },
}

impl PropertyChange<'_> {
    pub fn topic(&self) -> Topic {
        match self {
            PropertyChange::RequestedDimension { .. } => Topic::RequestedDimension,
            PropertyChange::ActualDimension { .. } => Topic::ActualDimension,
            PropertyChange::ModuleSize { .. } => Topic::ModuleSize,
            PropertyChange::Result { .. } => Topic::Result,
            PropertyChange::ExceedsRequestedDimension { .. } => Topic::ExceedsRequestedDimension,
        }
    }

    /// `false` when old and new are equal; bitmaps compare by pixels.
    pub fn is_change(&self) -> bool {
        match self {
            PropertyChange::RequestedDimension { old, new } => old != new,
            PropertyChange::ActualDimension { old, new } => old != new,
            PropertyChange::ModuleSize { old, new } => old != new,
            PropertyChange::Result { old, new } => old != new,
            PropertyChange::ExceedsRequestedDimension { old, new } => old != new,
        }
    }
}

/// Callback invoked with each change.
///
/// Listeners are `Send` so a renderer can be moved to an owning thread or shared behind a
/// `Mutex`.
pub type Listener = Box<dyn FnMut(&PropertyChange<'_>) + Send>;

/// Handle returned on registration, used to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
    id: ListenerId,
    topic: Option<Topic>,
    listener: Listener,
}

/// Ordered listener registry.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener for `topic`, or for every topic when `None`.
    pub fn add(&mut self, topic: Option<Topic>, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            topic,
            listener,
        });
        id
    }

    /// Removes a listener. Returns `false` if the id was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Delivers `change` to every matching listener. Does nothing if old equals new.
    pub fn fire(&mut self, change: &PropertyChange<'_>) {
        if !change.is_change() {
            return;
        }
        let topic = change.topic();
        for entry in self.entries.iter_mut() {
            if entry.topic.map_or(true, |t| t == topic) {
                trace!("notify {:?} of {}", entry.id, topic);
                (entry.listener)(change);
            }
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.entries.len())
            .finish()
    }
}
