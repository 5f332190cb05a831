use std::rc::Rc;

use super::actions::Action;
use super::actions::ConfigureServerAction;
use super::actions::LifecycleAction;
use super::navigation::reduce_navigation;
use super::navigation::NavigationComponent;
use super::state::initial_state;
use super::state::ApplicationState;
use super::state::ConfigureServerScreen;
use super::state::ScreenState;

// Hands back the same `Rc` when the feature reducer left its slice untouched.
pub fn reduce(action: &Action, state: &Rc<ApplicationState>) -> Rc<ApplicationState> {
    match action {
        Action::Lifecycle(lifecycle) => reduce_lifecycle(*lifecycle, state),
        Action::Navigation(navigation) => {
            let navigation = reduce_navigation(navigation, &state.navigation);
            if navigation == state.navigation {
                return Rc::clone(state);
            }
            let mut next = ApplicationState::clone(state);
            next.navigation = navigation;
            Rc::new(next)
        }
        Action::ConfigureServer(configure) => {
            let ScreenState::ConfigureServer(screen) = &state.navigation.screen else {
                panic!(
                    "configure-server action reduced while {:?} screen is active",
                    state.navigation.screen.type_id()
                );
            };
            let reduced = reduce_configure_server(configure, screen);
            if reduced == *screen {
                return Rc::clone(state);
            }
            let mut next = ApplicationState::clone(state);
            next.navigation.screen = ScreenState::ConfigureServer(reduced);
            Rc::new(next)
        }
        Action::Onboarding(_) | Action::PrivacyPolicy(_) => Rc::clone(state),
    }
}

pub fn reduce_lifecycle(
    action: LifecycleAction,
    state: &Rc<ApplicationState>,
) -> Rc<ApplicationState> {
    match action {
        LifecycleAction::OnDestroy { is_finishing: true } => Rc::new(initial_state()),
        LifecycleAction::OnDestroy {
            is_finishing: false,
        } => Rc::clone(state),
    }
}

pub fn reduce_configure_server(
    action: &ConfigureServerAction,
    state: &ConfigureServerScreen,
) -> ConfigureServerScreen {
    match action {
        ConfigureServerAction::ServerUrlChanged(url) => ConfigureServerScreen {
            server_url: url.clone(),
            ..state.clone()
        },
        ConfigureServerAction::SetServerUrlError(code) => ConfigureServerScreen {
            server_url_error: Some(*code),
            ..state.clone()
        },
        ConfigureServerAction::ClearServerUrlError => ConfigureServerScreen {
            server_url_error: None,
            ..state.clone()
        },
        ConfigureServerAction::SetLoadingProgressVisibility(visible) => ConfigureServerScreen {
            is_loading_visible: *visible,
            ..state.clone()
        },
        ConfigureServerAction::Next => state.clone(),
    }
}

#[cfg(test)]
mod tests;
