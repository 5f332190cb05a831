use std::rc::Rc;

pub(super) use super::reduce;
pub(super) use super::reduce_configure_server;
pub(super) use crate::actions::Action;
pub(super) use crate::actions::ConfigureServerAction;
pub(super) use crate::actions::LifecycleAction;
pub(super) use crate::actions::OnboardingAction;
pub(super) use crate::actions::PrivacyPolicyAction;
pub(super) use crate::navigation::BackStack;
pub(super) use crate::navigation::NavigationAction;
pub(super) use crate::navigation::NavigationState;
pub(super) use crate::navigation::TransitionType;
pub(super) use crate::state::initial_state;
pub(super) use crate::state::ApplicationState;
pub(super) use crate::state::ConfigureServerScreen;
pub(super) use crate::state::ErrorCode;
pub(super) use crate::state::OverlayState;
pub(super) use crate::state::ScreenState;

mod configure_server;
mod lifecycle;
mod navigation;

fn state_with(
    screen: ScreenState,
    back_stack: Vec<ScreenState>,
    overlay: Option<OverlayState>,
) -> Rc<ApplicationState> {
    Rc::new(ApplicationState {
        navigation: NavigationState::with_history(
            screen,
            back_stack.into_iter().collect::<BackStack<_>>(),
            overlay,
        ),
    })
}

fn configure_server_state(
    server_url: &str,
    server_url_error: Option<ErrorCode>,
) -> Rc<ApplicationState> {
    state_with(
        ScreenState::ConfigureServer(ConfigureServerScreen {
            server_url: server_url.to_string(),
            server_url_error,
            is_loading_visible: false,
        }),
        vec![ScreenState::Onboarding],
        None,
    )
}

fn dialog() -> OverlayState {
    OverlayState::Dialog {
        title: "Heads up".to_string(),
        message: "Server unreachable".to_string(),
    }
}

fn run_all(state: &Rc<ApplicationState>, actions: Vec<Action>) -> Rc<ApplicationState> {
    actions
        .iter()
        .fold(Rc::clone(state), |state, action| reduce(action, &state))
}
