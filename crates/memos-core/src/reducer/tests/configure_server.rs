use super::*;
use pretty_assertions::assert_eq;

#[test]
fn server_url_changed_updates_url_only() {
    let state = configure_server_state("a", Some(ErrorCode::InvalidFormat));

    let next = reduce(
        &Action::ConfigureServer(ConfigureServerAction::ServerUrlChanged("b".to_string())),
        &state,
    );

    assert_eq!(next.server_url(), Some("b"));
    assert_eq!(next.server_url_error(), Some(ErrorCode::InvalidFormat));
    assert_eq!(next.navigation.back_stack, state.navigation.back_stack);
}

#[test]
fn error_set_and_clear() {
    let state = configure_server_state("http://memos.example.com", None);

    let errored = reduce(
        &Action::ConfigureServer(ConfigureServerAction::SetServerUrlError(
            ErrorCode::InsecureScheme,
        )),
        &state,
    );
    assert_eq!(errored.server_url_error(), Some(ErrorCode::InsecureScheme));

    let cleared = reduce(
        &Action::ConfigureServer(ConfigureServerAction::ClearServerUrlError),
        &errored,
    );
    assert_eq!(cleared.server_url_error(), None);
    assert_eq!(*cleared, *state);
}

#[test]
fn loading_visibility_toggles() {
    let state = configure_server_state("memos.example.com", None);

    let loading = reduce(
        &Action::ConfigureServer(ConfigureServerAction::SetLoadingProgressVisibility(true)),
        &state,
    );
    assert_eq!(loading.configure_server().map(|s| s.is_loading_visible), Some(true));

    let idle = reduce(
        &Action::ConfigureServer(ConfigureServerAction::SetLoadingProgressVisibility(false)),
        &loading,
    );
    assert_eq!(idle.configure_server().map(|s| s.is_loading_visible), Some(false));
}

#[test]
fn next_leaves_state_untouched() {
    let state = configure_server_state("memos.example.com", None);

    let next = reduce(&Action::ConfigureServer(ConfigureServerAction::Next), &state);

    assert!(Rc::ptr_eq(&next, &state));
}

#[test]
fn feature_reducer_is_deterministic() {
    let screen = ConfigureServerScreen::default();
    let action = ConfigureServerAction::ServerUrlChanged("memos.example.com".to_string());

    assert_eq!(
        reduce_configure_server(&action, &screen),
        reduce_configure_server(&action, &screen)
    );
}

#[test]
#[should_panic(expected = "configure-server action reduced while")]
fn configure_server_action_on_other_screen_is_a_programmer_error() {
    let state = Rc::new(initial_state());
    reduce(
        &Action::ConfigureServer(ConfigureServerAction::ClearServerUrlError),
        &state,
    );
}
