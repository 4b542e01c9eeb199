use std::{cell::RefCell, rc::Rc};

use super::{InputControl, PanelLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Rendering collaborator. A browser host turns controls into DOM nodes; the
/// terminal host keeps them for ratatui.
pub trait Surface: std::fmt::Debug {
    /// Creates the widget's container and returns a handle to its input region.
    fn mount(&mut self, layout: PanelLayout) -> SlotId;

    /// Replaces the control inside the slot's input region.
    fn paint(&mut self, slot: SlotId, control: &InputControl);
}

pub type SharedSurface = Rc<RefCell<dyn Surface>>;

pub fn shared<S: Surface + 'static>(surface: S) -> Rc<RefCell<S>> {
    Rc::new(RefCell::new(surface))
}

#[derive(Debug, Clone)]
pub struct Slot {
    pub layout: PanelLayout,
    pub control: Option<InputControl>,
    pub paints: usize,
}

/// Keeps the latest control per slot in memory.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    slots: Vec<Slot>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id.0)
    }

    pub fn control(&self, id: SlotId) -> Option<&InputControl> {
        self.slot(id).and_then(|slot| slot.control.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn mount(&mut self, layout: PanelLayout) -> SlotId {
        self.slots.push(Slot {
            layout,
            control: None,
            paints: 0,
        });
        SlotId(self.slots.len() - 1)
    }

    fn paint(&mut self, slot: SlotId, control: &InputControl) {
        if let Some(entry) = self.slots.get_mut(slot.0) {
            entry.control = Some(control.clone());
            entry.paints += 1;
        }
    }
}
