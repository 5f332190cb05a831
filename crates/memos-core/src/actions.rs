use super::navigation::NavigationAction;
use super::state::ErrorCode;
use super::state::OverlayState;
use super::state::ScreenState;

pub type AppNavigationAction = NavigationAction<ScreenState, OverlayState>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigation(AppNavigationAction),
    Lifecycle(LifecycleAction),
    ConfigureServer(ConfigureServerAction),
    Onboarding(OnboardingAction),
    PrivacyPolicy(PrivacyPolicyAction),
}

impl Action {
    pub fn go_back() -> Self {
        Self::Navigation(NavigationAction::GoBack)
    }

    pub fn navigate_to(screen: ScreenState) -> Self {
        Self::Navigation(NavigationAction::navigate_to(screen))
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Navigation(NavigationAction::NavigateTo { .. }) => "navigation/navigate_to",
            Self::Navigation(NavigationAction::GoBack) => "navigation/go_back",
            Self::Navigation(NavigationAction::ShowOverlay(_)) => "navigation/show_overlay",
            Self::Navigation(NavigationAction::DismissOverlay) => "navigation/dismiss_overlay",
            Self::Lifecycle(LifecycleAction::OnDestroy { .. }) => "lifecycle/on_destroy",
            Self::ConfigureServer(action) => action.tag(),
            Self::Onboarding(OnboardingAction::GetStarted) => "onboarding/get_started",
            Self::PrivacyPolicy(PrivacyPolicyAction::Accepted) => "privacy_policy/accepted",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    OnDestroy { is_finishing: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureServerAction {
    ServerUrlChanged(String),
    Next,
    SetServerUrlError(ErrorCode),
    ClearServerUrlError,
    SetLoadingProgressVisibility(bool),
}

impl ConfigureServerAction {
    fn tag(&self) -> &'static str {
        match self {
            Self::ServerUrlChanged(_) => "configure_server/server_url_changed",
            Self::Next => "configure_server/next",
            Self::SetServerUrlError(_) => "configure_server/set_server_url_error",
            Self::ClearServerUrlError => "configure_server/clear_server_url_error",
            Self::SetLoadingProgressVisibility(_) => {
                "configure_server/set_loading_progress_visibility"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingAction {
    GetStarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivacyPolicyAction {
    Accepted,
}

impl From<AppNavigationAction> for Action {
    fn from(action: AppNavigationAction) -> Self {
        Self::Navigation(action)
    }
}

impl From<LifecycleAction> for Action {
    fn from(action: LifecycleAction) -> Self {
        Self::Lifecycle(action)
    }
}

impl From<ConfigureServerAction> for Action {
    fn from(action: ConfigureServerAction) -> Self {
        Self::ConfigureServer(action)
    }
}

impl From<OnboardingAction> for Action {
    fn from(action: OnboardingAction) -> Self {
        Self::Onboarding(action)
    }
}

impl From<PrivacyPolicyAction> for Action {
    fn from(action: PrivacyPolicyAction) -> Self {
        Self::PrivacyPolicy(action)
    }
}
