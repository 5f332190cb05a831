use super::*;
use pretty_assertions::assert_eq;

#[test]
fn finishing_destroy_resets_to_initial_state() {
    let state = state_with(
        ScreenState::PrivacyPolicy,
        vec![ScreenState::Onboarding],
        Some(dialog()),
    );

    let next = reduce(
        &Action::Lifecycle(LifecycleAction::OnDestroy { is_finishing: true }),
        &state,
    );

    assert_eq!(*next, initial_state());
}

#[test]
fn finishing_destroy_resets_feature_sub_state_too() {
    let state = configure_server_state("memos.example.com", Some(ErrorCode::InvalidFormat));

    let next = reduce(
        &Action::Lifecycle(LifecycleAction::OnDestroy { is_finishing: true }),
        &state,
    );

    assert_eq!(next.configure_server(), None);
    assert_eq!(*next, initial_state());
}

#[test]
fn non_finishing_destroy_preserves_identity() {
    let state = configure_server_state("memos.example.com", None);

    let next = reduce(
        &Action::Lifecycle(LifecycleAction::OnDestroy {
            is_finishing: false,
        }),
        &state,
    );

    assert!(Rc::ptr_eq(&next, &state));
}
