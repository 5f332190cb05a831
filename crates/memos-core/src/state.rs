use serde::Serialize;

use super::navigation::NavigationComponent;
use super::navigation::NavigationState;

pub const TYPE_ID_SCREEN_ONBOARDING: &str = "Onboarding";
pub const TYPE_ID_SCREEN_PRIVACY_POLICY: &str = "Privacy Policy";
pub const TYPE_ID_SCREEN_CONFIGURE_SERVER: &str = "Configure Server";
pub const TYPE_ID_OVERLAY_DIALOG: &str = "Dialog";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InsecureScheme,
    InvalidFormat,
}

impl ErrorCode {
    pub fn label(self) -> &'static str {
        match self {
            Self::InsecureScheme => "Only HTTPS schema is allowed",
            Self::InvalidFormat => "Invalid URL format",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConfigureServerScreen {
    pub server_url: String,
    pub server_url_error: Option<ErrorCode>,
    pub is_loading_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScreenState {
    Onboarding,
    PrivacyPolicy,
    ConfigureServer(ConfigureServerScreen),
}

impl ScreenState {
    pub fn configure_server() -> Self {
        Self::ConfigureServer(ConfigureServerScreen::default())
    }
}

impl NavigationComponent for ScreenState {
    fn type_id(&self) -> &'static str {
        match self {
            Self::Onboarding => TYPE_ID_SCREEN_ONBOARDING,
            Self::PrivacyPolicy => TYPE_ID_SCREEN_PRIVACY_POLICY,
            Self::ConfigureServer(_) => TYPE_ID_SCREEN_CONFIGURE_SERVER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayState {
    Dialog { title: String, message: String },
}

impl NavigationComponent for OverlayState {
    fn type_id(&self) -> &'static str {
        match self {
            Self::Dialog { .. } => TYPE_ID_OVERLAY_DIALOG,
        }
    }
}

pub type AppNavigationState = NavigationState<ScreenState, OverlayState>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationState {
    pub navigation: AppNavigationState,
}

impl ApplicationState {
    pub fn screen(&self) -> &ScreenState {
        &self.navigation.screen
    }

    pub fn overlay(&self) -> Option<&OverlayState> {
        self.navigation.overlay.as_ref()
    }

    pub fn configure_server(&self) -> Option<&ConfigureServerScreen> {
        match &self.navigation.screen {
            ScreenState::ConfigureServer(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn server_url(&self) -> Option<&str> {
        self.configure_server()
            .map(|screen| screen.server_url.as_str())
    }

    pub fn server_url_error(&self) -> Option<ErrorCode> {
        self.configure_server()
            .and_then(|screen| screen.server_url_error)
    }
}

pub fn initial_state() -> ApplicationState {
    ApplicationState {
        navigation: NavigationState::new(ScreenState::Onboarding),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::navigation::TransitionType;

    #[test]
    fn initial_state_starts_on_onboarding_with_no_history() {
        let state = initial_state();
        assert_eq!(state.screen(), &ScreenState::Onboarding);
        assert!(state.navigation.back_stack.is_empty());
        assert_eq!(state.overlay(), None);
        assert_eq!(state.navigation.transition_type(), TransitionType::None);
        assert_eq!(state, initial_state());
    }

    #[test]
    fn type_ids_are_stable_per_variant() {
        let mut screen = ConfigureServerScreen::default();
        assert_eq!(
            ScreenState::ConfigureServer(screen.clone()).type_id(),
            TYPE_ID_SCREEN_CONFIGURE_SERVER
        );
        screen.server_url = "memos.example.com".to_string();
        assert_eq!(
            ScreenState::ConfigureServer(screen).type_id(),
            TYPE_ID_SCREEN_CONFIGURE_SERVER
        );
        assert_eq!(ScreenState::PrivacyPolicy.type_id(), TYPE_ID_SCREEN_PRIVACY_POLICY);
    }

    #[test]
    fn configure_server_lenses_are_empty_on_other_screens() {
        let state = initial_state();
        assert_eq!(state.server_url(), None);
        assert_eq!(state.server_url_error(), None);
    }
}
