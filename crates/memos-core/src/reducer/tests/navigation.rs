use super::*;
use pretty_assertions::assert_eq;

#[test]
fn navigate_to_pushes_current_screen_and_marks_forward() {
    let state = Rc::new(initial_state());

    let next = reduce(&Action::navigate_to(ScreenState::PrivacyPolicy), &state);

    assert_eq!(next.navigation.screen, ScreenState::PrivacyPolicy);
    assert_eq!(
        next.navigation.back_stack.iter().collect::<Vec<_>>(),
        vec![&ScreenState::Onboarding]
    );
    assert_eq!(next.navigation.overlay, None);
    assert_eq!(next.navigation.transition_type(), TransitionType::Forward);
}

#[test]
fn navigate_then_go_back_restores_origin_with_backward_transition() {
    let origin = Rc::new(initial_state());

    let back = run_all(
        &origin,
        vec![
            Action::navigate_to(ScreenState::PrivacyPolicy),
            Action::go_back(),
        ],
    );

    assert_eq!(back.navigation.screen, ScreenState::Onboarding);
    assert!(back.navigation.back_stack.is_empty());
    assert_eq!(back.navigation.overlay, None);
    assert_eq!(back.navigation.transition_type(), TransitionType::Backward);
}

#[test]
fn navigate_without_history_is_not_recoverable_via_back() {
    let state = Rc::new(initial_state());

    let next = reduce(
        &Action::Navigation(NavigationAction::replace_with(
            ScreenState::configure_server(),
        )),
        &state,
    );

    assert_eq!(next.navigation.screen, ScreenState::configure_server());
    assert!(next.navigation.back_stack.is_empty());
    assert_eq!(next.navigation.transition_type(), TransitionType::None);

    let back = reduce(&Action::go_back(), &next);
    assert!(Rc::ptr_eq(&back, &next));
}

#[test]
fn go_back_with_overlay_only_clears_overlay() {
    let state = state_with(
        ScreenState::PrivacyPolicy,
        vec![ScreenState::Onboarding],
        Some(dialog()),
    );

    let next = reduce(&Action::go_back(), &state);

    assert_eq!(next.navigation.overlay, None);
    assert_eq!(next.navigation.screen, ScreenState::PrivacyPolicy);
    assert_eq!(next.navigation.back_stack.len(), 1);
    assert_eq!(next.navigation.transition_type(), TransitionType::None);
}

#[test]
fn go_back_on_terminal_state_returns_same_state() {
    let state = Rc::new(initial_state());

    let next = reduce(&Action::go_back(), &state);

    assert!(Rc::ptr_eq(&next, &state));
}

#[test]
fn show_and_dismiss_overlay() {
    let state = Rc::new(initial_state());

    let shown = reduce(
        &Action::Navigation(NavigationAction::ShowOverlay(dialog())),
        &state,
    );
    assert_eq!(shown.navigation.overlay, Some(dialog()));
    assert!(shown.navigation.back_stack.is_empty());

    let dismissed = reduce(&Action::Navigation(NavigationAction::DismissOverlay), &shown);
    assert_eq!(dismissed.navigation.overlay, None);
    assert_eq!(*dismissed, *state);
}

#[test]
fn navigation_keeps_configure_server_payload_in_history() {
    let state = configure_server_state("memos.example.com", Some(ErrorCode::InvalidFormat));

    let next = reduce(&Action::navigate_to(ScreenState::PrivacyPolicy), &state);

    assert_eq!(
        next.navigation.back_stack.peek(),
        Some(&ScreenState::ConfigureServer(ConfigureServerScreen {
            server_url: "memos.example.com".to_string(),
            server_url_error: Some(ErrorCode::InvalidFormat),
            is_loading_visible: false,
        }))
    );
}
