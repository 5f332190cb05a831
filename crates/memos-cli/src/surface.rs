use std::fmt::Write;

use memos_core::ApplicationState;
use memos_core::NavigationComponent;
use memos_core::OverlayState;
use memos_core::ScreenState;
use memos_core::SurfaceError;
use memos_core::SurfaceEvent;
use memos_core::SurfaceFactory;
use memos_core::TYPE_ID_SCREEN_CONFIGURE_SERVER;
use memos_core::TYPE_ID_SCREEN_ONBOARDING;
use memos_core::TYPE_ID_SCREEN_PRIVACY_POLICY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSurface {
    pub type_id: &'static str,
    pub title: String,
}

/// Builds terminal "surfaces": a title line per screen or dialog.
#[derive(Debug, Default)]
pub struct TextSurfaceFactory {
    live: usize,
}

impl TextSurfaceFactory {
    pub fn live(&self) -> usize {
        self.live
    }
}

fn screen_title(type_id: &str) -> Result<&'static str, SurfaceError> {
    match type_id {
        TYPE_ID_SCREEN_ONBOARDING => Ok("Welcome to Memos"),
        TYPE_ID_SCREEN_PRIVACY_POLICY => Ok("Privacy Policy"),
        TYPE_ID_SCREEN_CONFIGURE_SERVER => Ok("Connect to your server"),
        other => Err(SurfaceError::UnknownScreen(other.to_string())),
    }
}

impl SurfaceFactory<ScreenState, OverlayState> for TextSurfaceFactory {
    type Surface = TextSurface;

    fn create_screen(&mut self, screen: &ScreenState) -> Result<TextSurface, SurfaceError> {
        let type_id = screen.type_id();
        let title = screen_title(type_id)?.to_string();
        self.live += 1;
        Ok(TextSurface { type_id, title })
    }

    fn create_overlay(&mut self, overlay: &OverlayState) -> Result<TextSurface, SurfaceError> {
        let OverlayState::Dialog { title, .. } = overlay;
        self.live += 1;
        Ok(TextSurface {
            type_id: overlay.type_id(),
            title: title.clone(),
        })
    }

    fn type_id_of(&self, surface: &TextSurface) -> Result<&'static str, SurfaceError> {
        Ok(surface.type_id)
    }

    fn destroy(&mut self, _surface: TextSurface) {
        self.live = self.live.saturating_sub(1);
    }
}

pub fn describe_event(event: &SurfaceEvent) -> String {
    match event {
        SurfaceEvent::Created {
            type_id,
            transition,
        } => format!("+ {type_id} ({})", transition.label()),
        SurfaceEvent::Destroyed {
            type_id,
            transition,
        } => format!("- {type_id} ({})", transition.label()),
        SurfaceEvent::Revealed {
            type_id,
            transition,
        } => format!("> {type_id} ({})", transition.label()),
        SurfaceEvent::OverlayShown { type_id, .. } => format!("+ [{type_id}]"),
        SurfaceEvent::OverlayDismissed { type_id, .. } => format!("- [{type_id}]"),
    }
}

pub fn render(state: &ApplicationState, top: Option<&TextSurface>) -> String {
    let mut out = String::new();
    let title = top.map(|surface| surface.title.as_str()).unwrap_or("");
    let _ = writeln!(out, "== {title} ==");
    match state.screen() {
        ScreenState::Onboarding => {
            let _ = writeln!(out, "type `get-started` to begin");
        }
        ScreenState::PrivacyPolicy => {
            let _ = writeln!(out, "type `accept` to accept the privacy policy");
        }
        ScreenState::ConfigureServer(screen) => {
            let _ = writeln!(out, "server url: {}", screen.server_url);
            if let Some(code) = screen.server_url_error {
                let _ = writeln!(out, "error: {}", code.label());
            }
            if screen.is_loading_visible {
                let _ = writeln!(out, "connecting...");
            }
        }
    }
    if let Some(OverlayState::Dialog { title, message }) = state.overlay() {
        let _ = writeln!(out, "[{title}] {message}");
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use memos_core::initial_state;
    use memos_core::TransitionType;

    use super::*;

    #[test]
    fn screens_get_titles() {
        let mut factory = TextSurfaceFactory::default();
        let surface = factory
            .create_screen(&ScreenState::configure_server())
            .expect("surface");
        assert_eq!(surface.title, "Connect to your server");
        assert_eq!(factory.type_id_of(&surface), Ok(TYPE_ID_SCREEN_CONFIGURE_SERVER));
        factory.destroy(surface);
        assert_eq!(factory.live(), 0);
    }

    #[test]
    fn dialog_surface_uses_its_title() {
        let mut factory = TextSurfaceFactory::default();
        let surface = factory
            .create_overlay(&OverlayState::Dialog {
                title: "Offline".to_string(),
                message: "retry later".to_string(),
            })
            .expect("surface");
        assert_eq!(surface.title, "Offline");
    }

    #[test]
    fn render_shows_prompt_for_root_screen() {
        let text = render(&initial_state(), None);
        assert_eq!(text, "==  ==\ntype `get-started` to begin\n");
    }

    #[test]
    fn events_render_with_direction() {
        let event = SurfaceEvent::Created {
            type_id: TYPE_ID_SCREEN_PRIVACY_POLICY,
            transition: TransitionType::Forward,
        };
        assert_eq!(describe_event(&event), "+ Privacy Policy (forward)");
    }
}
