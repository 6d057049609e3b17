//! Application State: zentrale Datenhaltung.

mod app_state;
mod editor;
mod selection;
mod view;

pub use app_state::AppState;
pub use editor::{ActiveDrag, EditorState};
pub use selection::SelectionState;
pub use view::ViewState;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::HostEvent;

    #[test]
    fn test_diagram_changed_wird_zusammengefasst() {
        let mut state = AppState::new();
        state.mark_changed();
        state.mark_changed();
        state.push_host_event(HostEvent::BackgroundClicked {
            world_pos: glam::Vec2::ZERO,
        });
        state.mark_changed();
        assert_eq!(
            state.drain_host_events(),
            vec![
                HostEvent::DiagramChanged { revision: 2 },
                HostEvent::BackgroundClicked {
                    world_pos: glam::Vec2::ZERO
                },
                HostEvent::DiagramChanged { revision: 3 },
            ]
        );
        assert!(state.pending_host_events().is_empty());
    }
}
