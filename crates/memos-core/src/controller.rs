use std::iter;
use std::marker::PhantomData;

use tracing::debug;

use super::error::SurfaceError;
use super::navigation::NavigationComponent;
use super::navigation::NavigationState;
use super::navigation::TransitionType;
use super::store::MiddlewareId;

pub trait SurfaceFactory<S, O> {
    type Surface;

    fn create_screen(&mut self, screen: &S) -> Result<Self::Surface, SurfaceError>;

    fn create_overlay(&mut self, overlay: &O) -> Result<Self::Surface, SurfaceError>;

    fn type_id_of(&self, surface: &Self::Surface) -> Result<&'static str, SurfaceError>;

    fn destroy(&mut self, surface: Self::Surface) {
        drop(surface);
    }
}

pub trait ScreenMiddlewareHost<S> {
    fn attach(&self, screen: &S) -> Vec<MiddlewareId>;

    fn detach(&self, ids: Vec<MiddlewareId>);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoScreenMiddlewares;

impl<S> ScreenMiddlewareHost<S> for NoScreenMiddlewares {
    fn attach(&self, _screen: &S) -> Vec<MiddlewareId> {
        Vec::new()
    }

    fn detach(&self, _ids: Vec<MiddlewareId>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    Created {
        type_id: &'static str,
        transition: TransitionType,
    },
    Destroyed {
        type_id: &'static str,
        transition: TransitionType,
    },
    Revealed {
        type_id: &'static str,
        transition: TransitionType,
    },
    OverlayShown {
        type_id: &'static str,
        transition: TransitionType,
    },
    OverlayDismissed {
        type_id: &'static str,
        transition: TransitionType,
    },
}

struct ScreenEntry<T> {
    surface: T,
    middleware: Vec<MiddlewareId>,
}

pub struct NavigationController<S, O, F, H>
where
    F: SurfaceFactory<S, O>,
{
    factory: F,
    host: H,
    screens: Vec<ScreenEntry<F::Surface>>,
    overlay: Option<(O, F::Surface)>,
    last_transition: TransitionType,
    _screen: PhantomData<fn(&S)>,
}

impl<S, O, F, H> NavigationController<S, O, F, H>
where
    S: NavigationComponent,
    O: NavigationComponent + Clone + PartialEq,
    F: SurfaceFactory<S, O>,
    H: ScreenMiddlewareHost<S>,
{
    pub fn new(factory: F, host: H) -> Self {
        Self {
            factory,
            host,
            screens: Vec::new(),
            overlay: None,
            last_transition: TransitionType::None,
            _screen: PhantomData,
        }
    }

    pub fn last_transition(&self) -> TransitionType {
        self.last_transition
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn top_surface(&self) -> Option<&F::Surface> {
        self.screens.last().map(|entry| &entry.surface)
    }

    pub fn overlay_surface(&self) -> Option<&F::Surface> {
        self.overlay.as_ref().map(|(_, surface)| surface)
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn sync(&mut self, state: &NavigationState<S, O>) -> Result<Vec<SurfaceEvent>, SurfaceError> {
        let transition = state.transition_type();
        let mut events = Vec::new();

        let overlay_changed = match (&self.overlay, &state.overlay) {
            (Some((shown, _)), Some(wanted)) => shown != wanted,
            (None, None) => false,
            _ => true,
        };
        if overlay_changed {
            self.dismiss_overlay(transition, &mut events)?;
        }

        let wanted: Vec<&S> = state
            .back_stack
            .iter()
            .chain(iter::once(&state.screen))
            .collect();
        let mut common = 0;
        while let (Some(entry), Some(screen)) = (self.screens.get(common), wanted.get(common)) {
            if self.factory.type_id_of(&entry.surface)? != screen.type_id() {
                break;
            }
            common += 1;
        }

        let mut destroyed = false;
        while self.screens.len() > common {
            self.destroy_top(transition, &mut events)?;
            destroyed = true;
        }

        let mut created = false;
        for screen in &wanted[common..] {
            let surface = self.factory.create_screen(screen)?;
            let middleware = self.host.attach(screen);
            events.push(SurfaceEvent::Created {
                type_id: screen.type_id(),
                transition,
            });
            self.screens.push(ScreenEntry {
                surface,
                middleware,
            });
            created = true;
        }

        if destroyed && !created {
            if let Some(top) = self.screens.last() {
                events.push(SurfaceEvent::Revealed {
                    type_id: self.factory.type_id_of(&top.surface)?,
                    transition,
                });
            }
        }

        if overlay_changed {
            if let Some(overlay) = &state.overlay {
                let surface = self.factory.create_overlay(overlay)?;
                events.push(SurfaceEvent::OverlayShown {
                    type_id: overlay.type_id(),
                    transition,
                });
                self.overlay = Some((overlay.clone(), surface));
            }
        }

        self.last_transition = transition;
        for event in &events {
            debug!(?event, "surface event");
        }
        Ok(events)
    }

    pub fn teardown(&mut self) -> Result<Vec<SurfaceEvent>, SurfaceError> {
        let mut events = Vec::new();
        self.dismiss_overlay(TransitionType::None, &mut events)?;
        while !self.screens.is_empty() {
            self.destroy_top(TransitionType::None, &mut events)?;
        }
        debug!(events = events.len(), "navigation controller torn down");
        Ok(events)
    }

    fn dismiss_overlay(
        &mut self,
        transition: TransitionType,
        events: &mut Vec<SurfaceEvent>,
    ) -> Result<(), SurfaceError> {
        let Some((_, surface)) = &self.overlay else {
            return Ok(());
        };
        let type_id = self.factory.type_id_of(surface)?;
        if let Some((_, surface)) = self.overlay.take() {
            self.factory.destroy(surface);
            events.push(SurfaceEvent::OverlayDismissed {
                type_id,
                transition,
            });
        }
        Ok(())
    }

    fn destroy_top(
        &mut self,
        transition: TransitionType,
        events: &mut Vec<SurfaceEvent>,
    ) -> Result<(), SurfaceError> {
        let Some(entry) = self.screens.last() else {
            return Ok(());
        };
        // Resolve before popping so a failure leaves the entry owned here.
        let type_id = self.factory.type_id_of(&entry.surface)?;
        let Some(entry) = self.screens.pop() else {
            return Ok(());
        };
        self.host.detach(entry.middleware);
        self.factory.destroy(entry.surface);
        events.push(SurfaceEvent::Destroyed {
            type_id,
            transition,
        });
        Ok(())
    }
}
