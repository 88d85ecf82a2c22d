use crate::ui::Renderer;

/// Tracks the single "Thinking..." marker shown while a reply is outstanding.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    live: bool,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self { live: false }
    }

    #[cfg(test)]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Shows the marker, replacing a stale one if present.
    pub fn show(&mut self, renderer: &dyn Renderer) {
        self.clear(renderer);
        renderer.show_pending();
        self.live = true;
    }

    pub fn clear(&mut self, renderer: &dyn Renderer) {
        if self.live {
            renderer.remove_pending();
            self.live = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{Event, RecordingRenderer};

    #[test]
    fn test_show_replaces_stale_marker() {
        let renderer = RecordingRenderer::default();
        let mut indicator = StatusIndicator::new();

        indicator.show(&renderer);
        indicator.show(&renderer);

        assert_eq!(
            renderer.events(),
            vec![Event::PendingShown, Event::PendingRemoved, Event::PendingShown]
        );
        assert!(indicator.is_live());
    }

    #[test]
    fn test_clear_without_marker_is_silent() {
        let renderer = RecordingRenderer::default();
        let mut indicator = StatusIndicator::new();
        indicator.clear(&renderer);
        assert!(renderer.events().is_empty());
    }
}
