use std::fmt;
use std::rc::Rc;

use tracing::debug;
use tracing::info;

use super::actions::Action;
use super::actions::ConfigureServerAction;
use super::actions::OnboardingAction;
use super::actions::PrivacyPolicyAction;
use super::error::Result;
use super::navigation::NavigationAction;
use super::persistence::PrivacyPolicyStorage;
use super::state::ApplicationState;
use super::state::ScreenState;
use super::validator::UrlValidator;

/// Not calling `chain.next` suppresses the action.
pub trait Middleware<S, A> {
    fn handle(&self, action: A, state: &S, chain: &mut Chain<'_, A>) -> Result<()>;
}

pub struct Chain<'a, A> {
    next: &'a mut dyn FnMut(A) -> Result<()>,
    dispatch: &'a mut dyn FnMut(A) -> Result<()>,
}

impl<'a, A> Chain<'a, A> {
    pub fn new(
        next: &'a mut dyn FnMut(A) -> Result<()>,
        dispatch: &'a mut dyn FnMut(A) -> Result<()>,
    ) -> Self {
        Self { next, dispatch }
    }

    pub fn next(&mut self, action: A) -> Result<()> {
        (self.next)(action)
    }

    pub fn dispatch(&mut self, action: A) -> Result<()> {
        (self.dispatch)(action)
    }
}

impl<A> fmt::Debug for Chain<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Chain")
    }
}

pub struct ConfigureServerMiddleware {
    validator: Rc<dyn UrlValidator>,
}

impl ConfigureServerMiddleware {
    pub fn new(validator: Rc<dyn UrlValidator>) -> Self {
        Self { validator }
    }
}

impl Middleware<ApplicationState, Action> for ConfigureServerMiddleware {
    fn handle(
        &self,
        action: Action,
        state: &ApplicationState,
        chain: &mut Chain<'_, Action>,
    ) -> Result<()> {
        let Some(screen) = state.configure_server() else {
            return chain.next(action);
        };
        match action {
            Action::ConfigureServer(ConfigureServerAction::Next) => {
                match self.validator.validate(&screen.server_url) {
                    Ok(url) => {
                        debug!(%url, "server url accepted");
                        chain.next(ConfigureServerAction::SetLoadingProgressVisibility(true).into())
                    }
                    Err(code) => {
                        debug!(code = code.label(), "server url rejected");
                        chain.next(ConfigureServerAction::SetServerUrlError(code).into())
                    }
                }
            }
            Action::ConfigureServer(ConfigureServerAction::ServerUrlChanged(url)) => {
                if screen.server_url_error.is_some() && screen.server_url != url {
                    // Queued: the reducer sees this change first, then the clear.
            chain.dispatch(ConfigureServerAction::ClearServerUrlError.into())?;
                }
                chain.next(ConfigureServerAction::ServerUrlChanged(url).into())
            }
            other => chain.next(other),
        }
    }
}

/// Routes "get started" past the privacy policy once it has been accepted.
pub struct OnboardingMiddleware {
    storage: PrivacyPolicyStorage,
}

impl OnboardingMiddleware {
    pub fn new(storage: PrivacyPolicyStorage) -> Self {
        Self { storage }
    }
}

impl Middleware<ApplicationState, Action> for OnboardingMiddleware {
    fn handle(
        &self,
        action: Action,
        _state: &ApplicationState,
        chain: &mut Chain<'_, Action>,
    ) -> Result<()> {
        match action {
            Action::Onboarding(OnboardingAction::GetStarted) => {
                let screen = if self.storage.is_accepted() {
                    ScreenState::configure_server()
                } else {
                    ScreenState::PrivacyPolicy
                };
                chain.next(Action::navigate_to(screen))
            }
            other => chain.next(other),
        }
    }
}

pub struct PrivacyPolicyMiddleware {
    storage: PrivacyPolicyStorage,
}

impl PrivacyPolicyMiddleware {
    pub fn new(storage: PrivacyPolicyStorage) -> Self {
        Self { storage }
    }
}

impl Middleware<ApplicationState, Action> for PrivacyPolicyMiddleware {
    fn handle(
        &self,
        action: Action,
        _state: &ApplicationState,
        chain: &mut Chain<'_, Action>,
    ) -> Result<()> {
        match action {
            Action::PrivacyPolicy(PrivacyPolicyAction::Accepted) => {
                self.storage.set_accepted(true)?;
                info!("privacy policy accepted");
                // The policy screen must not be reachable with back once accepted.
                chain.next(Action::Navigation(NavigationAction::replace_with(
                    ScreenState::configure_server(),
                )))
            }
            other => chain.next(other),
        }
    }
}

pub struct NavigationMiddleware {
    exit: Rc<dyn Fn()>,
}

impl NavigationMiddleware {
    pub fn new(exit: impl Fn() + 'static) -> Self {
        Self {
            exit: Rc::new(exit),
        }
    }
}

impl Middleware<ApplicationState, Action> for NavigationMiddleware {
    fn handle(
        &self,
        action: Action,
        state: &ApplicationState,
        chain: &mut Chain<'_, Action>,
    ) -> Result<()> {
        if matches!(action, Action::Navigation(NavigationAction::GoBack))
            && !state.navigation.can_go_back()
        {
            info!("back pressed on root screen, exiting");
            (self.exit)();
        }
        chain.next(action)
    }
}
