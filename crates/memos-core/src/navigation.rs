use serde::Serialize;

pub trait NavigationComponent {
    fn type_id(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    Forward,
    Backward,
    #[default]
    None,
}

impl TransitionType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BackStack<S> {
    entries: Vec<S>,
}

impl<S> BackStack<S> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn peek(&self) -> Option<&S> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.entries.iter()
    }

    pub fn push(&mut self, screen: S) {
        self.entries.push(screen);
    }

    pub fn pop(&mut self) -> Option<S> {
        self.entries.pop()
    }
}

impl<S> Default for BackStack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> FromIterator<S> for BackStack<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationState<S, O> {
    pub screen: S,
    pub back_stack: BackStack<S>,
    pub overlay: Option<O>,
    transition_type: TransitionType,
}

impl<S, O> NavigationState<S, O> {
    pub fn new(screen: S) -> Self {
        Self {
            screen,
            back_stack: BackStack::new(),
            overlay: None,
            transition_type: TransitionType::None,
        }
    }

    // Transition starts at `None`; only the reducer assigns it.
    pub fn with_history(screen: S, back_stack: BackStack<S>, overlay: Option<O>) -> Self {
        Self {
            screen,
            back_stack,
            overlay,
            transition_type: TransitionType::None,
        }
    }

    pub fn transition_type(&self) -> TransitionType {
        self.transition_type
    }

    pub fn can_go_back(&self) -> bool {
        self.overlay.is_some() || !self.back_stack.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction<S, O> {
    NavigateTo {
        screen: S,
        add_current_to_back_stack: bool,
    },
    GoBack,
    ShowOverlay(O),
    DismissOverlay,
}

impl<S, O> NavigationAction<S, O> {
    pub fn navigate_to(screen: S) -> Self {
        Self::NavigateTo {
            screen,
            add_current_to_back_stack: true,
        }
    }

    pub fn replace_with(screen: S) -> Self {
        Self::NavigateTo {
            screen,
            add_current_to_back_stack: false,
        }
    }
}

pub fn reduce_navigation<S, O>(
    action: &NavigationAction<S, O>,
    state: &NavigationState<S, O>,
) -> NavigationState<S, O>
where
    S: Clone + PartialEq,
    O: Clone,
{
    let mut next = state.clone();
    match action {
        NavigationAction::NavigateTo {
            screen,
            add_current_to_back_stack,
        } => {
            // Pushing a screen onto itself would leave the current value on
            // top of the history; that case replaces instead.
            if *add_current_to_back_stack && *screen != state.screen {
                next.back_stack.push(state.screen.clone());
                next.transition_type = TransitionType::Forward;
            } else {
                next.transition_type = TransitionType::None;
            }
            next.screen = screen.clone();
        }
        NavigationAction::GoBack => {
            if next.overlay.take().is_some() {
                next.transition_type = TransitionType::None;
            } else if let Some(previous) = next.back_stack.pop() {
                next.screen = previous;
                next.transition_type = TransitionType::Backward;
            }
        }
        NavigationAction::ShowOverlay(overlay) => {
            next.overlay = Some(overlay.clone());
        }
        NavigationAction::DismissOverlay => {
            next.overlay = None;
        }
    }
    next
}
