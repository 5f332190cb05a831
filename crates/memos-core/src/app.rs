use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::actions::Action;
use super::controller::ScreenMiddlewareHost;
use super::middleware::ConfigureServerMiddleware;
use super::middleware::Middleware;
use super::middleware::NavigationMiddleware;
use super::middleware::OnboardingMiddleware;
use super::middleware::PrivacyPolicyMiddleware;
use super::navigation::NavigationComponent;
use super::persistence::PrivacyPolicyStorage;
use super::reducer::reduce;
use super::state::initial_state;
use super::state::ApplicationState;
use super::state::ScreenState;
use super::store::MiddlewareId;
use super::store::Store;
use super::store::StoreConfig;
use super::validator::UrlValidator;

pub type AppStore = Store<ApplicationState, Action>;

/// `exit` runs when back is pressed on the root screen.
pub fn create_store(config: &StoreConfig, exit: impl Fn() + 'static) -> AppStore {
    let store = Store::with_config(initial_state(), reduce, config.clone());
    store.add_middleware(Rc::new(NavigationMiddleware::new(exit)));
    store
}

#[derive(Clone)]
pub struct AppScreenMiddlewares {
    store: AppStore,
    privacy_policy: PrivacyPolicyStorage,
    validator: Rc<dyn UrlValidator>,
}

impl AppScreenMiddlewares {
    pub fn new(
        store: AppStore,
        privacy_policy: PrivacyPolicyStorage,
        validator: Rc<dyn UrlValidator>,
    ) -> Self {
        Self {
            store,
            privacy_policy,
            validator,
        }
    }

    fn middleware_for(&self, screen: &ScreenState) -> Rc<dyn Middleware<ApplicationState, Action>> {
        match screen {
            ScreenState::Onboarding => {
                Rc::new(OnboardingMiddleware::new(self.privacy_policy.clone()))
            }
            ScreenState::PrivacyPolicy => {
                Rc::new(PrivacyPolicyMiddleware::new(self.privacy_policy.clone()))
            }
            ScreenState::ConfigureServer(_) => {
                Rc::new(ConfigureServerMiddleware::new(Rc::clone(&self.validator)))
            }
        }
    }
}

impl ScreenMiddlewareHost<ScreenState> for AppScreenMiddlewares {
    fn attach(&self, screen: &ScreenState) -> Vec<MiddlewareId> {
        let id = self.store.add_middleware(self.middleware_for(screen));
        debug!(screen = screen.type_id(), ?id, "screen middleware attached");
        vec![id]
    }

    fn detach(&self, ids: Vec<MiddlewareId>) {
        for id in ids {
            self.store.remove_middleware(id);
        }
    }
}

impl fmt::Debug for AppScreenMiddlewares {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppScreenMiddlewares")
            .field("store", &self.store)
            .field("privacy_policy", &self.privacy_policy)
            .finish_non_exhaustive()
    }
}
