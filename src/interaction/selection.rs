use crate::backend::SceneBackend;
use crate::config::InteractionConfig;
use crate::interaction::object::{ObjectHandle, PlacedObject};
use crate::interaction::registry::ObjectRegistry;
use crate::ui::SelectionPanel;

/// Holds the one object the user is working with. At most one object is in
/// the selected state at a time, and it is always the one held here.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<ObjectHandle>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<ObjectHandle> {
        self.selected
    }

    /// Re-selecting the held object toggles it; anything else releases the
    /// held object and selects the candidate. Objects being removed are
    /// treated as no candidate at all.
    pub fn select_object<B: SceneBackend>(
        &mut self,
        candidate: Option<ObjectHandle>,
        registry: &mut ObjectRegistry,
        backend: &mut B,
        config: &InteractionConfig,
    ) {
        let candidate = candidate.filter(|handle| {
            registry
                .get(*handle)
                .is_some_and(PlacedObject::is_interactive)
        });

        if candidate == self.selected {
            if let Some(object) = candidate.and_then(|handle| registry.get_mut(handle)) {
                if object.is_selected() {
                    object.cancel(backend, config);
                } else {
                    object.select(backend, config);
                }
            }
            return;
        }

        if let Some(previous) = self.selected.and_then(|handle| registry.get_mut(handle)) {
            previous.cancel(backend, config);
        }
        if let Some(next) = candidate.and_then(|handle| registry.get_mut(handle)) {
            next.select(backend, config);
        }
        self.selected = candidate;
    }

    /// Drops the held reference without touching the object.
    pub fn forget(&mut self, handle: ObjectHandle) {
        if self.selected == Some(handle) {
            self.selected = None;
        }
    }

    pub fn panel(&self, registry: &ObjectRegistry) -> SelectionPanel {
        match self.selected.and_then(|handle| registry.get(handle)) {
            Some(object) => SelectionPanel::for_object(object.name(), object.is_selected()),
            None => SelectionPanel::hidden(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Stage;
    use crate::interaction::object::SelectionState;
    use crate::interaction::object_type::ObjectType;
    use crate::interaction::testing::{place, stage};
    use glam::Vec3;

    fn setup(count: usize) -> (Stage, ObjectRegistry, Vec<ObjectHandle>) {
        let mut stage = stage();
        let mut registry = ObjectRegistry::new();
        let handles = (0..count)
            .map(|i| {
                let object = place(&mut stage, ObjectType::ALL[i % 4], Vec3::X * i as f32);
                registry.insert(object)
            })
            .collect();
        (stage, registry, handles)
    }

    fn state(registry: &ObjectRegistry, handle: ObjectHandle) -> SelectionState {
        registry.get(handle).unwrap().state()
    }

    #[test]
    fn selecting_another_object_releases_the_previous_one() {
        let config = InteractionConfig::grounded();
        let (mut stage, mut registry, handles) = setup(2);
        let mut selection = SelectionController::new();

        selection.select_object(Some(handles[0]), &mut registry, &mut stage, &config);
        selection.select_object(Some(handles[1]), &mut registry, &mut stage, &config);

        assert_eq!(selection.selected(), Some(handles[1]));
        assert_eq!(state(&registry, handles[0]), SelectionState::Idle);
        assert_eq!(state(&registry, handles[1]), SelectionState::Selected);
    }

    #[test]
    fn reselecting_toggles() {
        let config = InteractionConfig::grounded();
        let (mut stage, mut registry, handles) = setup(1);
        let mut selection = SelectionController::new();

        selection.select_object(Some(handles[0]), &mut registry, &mut stage, &config);
        selection.select_object(Some(handles[0]), &mut registry, &mut stage, &config);
        assert_eq!(state(&registry, handles[0]), SelectionState::Idle);
        assert_eq!(selection.selected(), Some(handles[0]));
        assert_eq!(selection.panel(&registry).toggle_label, Some("select"));

        selection.select_object(Some(handles[0]), &mut registry, &mut stage, &config);
        assert_eq!(state(&registry, handles[0]), SelectionState::Selected);
        assert_eq!(selection.panel(&registry).toggle_label, Some("deselect"));
    }

    #[test]
    fn selecting_nothing_clears_and_hides_panel() {
        let config = InteractionConfig::grounded();
        let (mut stage, mut registry, handles) = setup(1);
        let mut selection = SelectionController::new();

        selection.select_object(Some(handles[0]), &mut registry, &mut stage, &config);
        selection.select_object(None, &mut registry, &mut stage, &config);

        assert_eq!(selection.selected(), None);
        assert_eq!(registry.selected_count(), 0);
        assert_eq!(selection.panel(&registry), SelectionPanel::hidden());
    }

    #[test]
    fn at_most_one_object_is_ever_selected() {
        for config in [InteractionConfig::grounded(), InteractionConfig::default()] {
            let (mut stage, mut registry, handles) = setup(4);
            let mut selection = SelectionController::new();

            let script = [0, 1, 1, 3, 2, 2, 2, 0, 3, 1, 0, 0];
            for (step, &index) in script.iter().enumerate() {
                let candidate = (step % 5 != 4).then_some(handles[index]);
                selection.select_object(candidate, &mut registry, &mut stage, &config);

                assert!(registry.selected_count() <= 1);
                for object in registry.iter().filter(|object| object.is_selected()) {
                    assert_eq!(selection.selected(), Some(object.handle()));
                }
            }
        }
    }

    #[test]
    fn objects_being_removed_cannot_be_selected() {
        let config = InteractionConfig::grounded();
        let (mut stage, mut registry, handles) = setup(1);
        let mut scheduler = crate::interaction::object::ObjectScheduler::new();
        registry
            .get_mut(handles[0])
            .unwrap()
            .remove_object(&mut stage, &mut scheduler, &config);

        let mut selection = SelectionController::new();
        selection.select_object(Some(handles[0]), &mut registry, &mut stage, &config);
        assert_eq!(selection.selected(), None);
    }
}
