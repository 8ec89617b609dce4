#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;
use std::time::Duration;

use insta::assert_json_snapshot;
use toasts::config::Config;
use toasts::{SequentialIds, Toast, ToastId, ToastInput, ToastKind, ToastManager};

fn manager() -> ToastManager {
    ToastManager::with_ids(SequentialIds::default())
}

#[test]
fn save_then_fail_then_dismiss_then_clear() {
    let manager = manager();

    let saved = manager.success("Saved", None, None);
    let toasts = manager.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].kind(), ToastKind::Success);
    assert_eq!(toasts[0].title(), "Saved");
    assert_eq!(toasts[0].message(), None);

    let failed = manager.error(
        "Failed",
        Some("Network error"),
        Some(Duration::from_millis(5000)),
    );
    let toasts = manager.toasts();
    assert_eq!(toasts.len(), 2);
    assert_eq!(toasts[1].kind(), ToastKind::Error);
    assert_eq!(toasts[1].duration(), Some(Duration::from_millis(5000)));

    assert!(manager.remove(&saved));
    let toasts = manager.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].id(), &failed);

    manager.clear_all();
    assert!(manager.toasts().is_empty());
}

#[test]
fn serialized_list_hides_dismiss_handle() {
    let manager = manager();
    manager.success("Saved", None, None);
    manager.error(
        "Failed",
        Some("Network error"),
        Some(Duration::from_millis(5000)),
    );

    let toasts = manager.toasts();
    let list: &[Toast] = &toasts;
    assert_json_snapshot!(list, @r#"
    [
      {
        "id": "toast-1",
        "kind": "success",
        "title": "Saved",
        "message": null,
        "duration_ms": null
      },
      {
        "id": "toast-2",
        "kind": "error",
        "title": "Failed",
        "message": "Network error",
        "duration_ms": 5000
      }
    ]
    "#);
}

#[test]
fn length_and_order_track_adds_and_removes() {
    let manager = ToastManager::new();
    let mut expected: Vec<ToastId> = Vec::new();

    for round in 0..20_u32 {
        let kind = ToastKind::ALL[(round % 4) as usize];
        let id = manager.add(ToastInput::new(kind, format!("toast {round}")));
        expected.push(id);

        if round % 3 == 2 {
            let victim = expected.remove((round as usize) % expected.len());
            assert!(manager.remove(&victim));
            assert!(!manager.remove(&victim));
        }

        let actual: Vec<ToastId> = manager.toasts().iter().map(|t| t.id().clone()).collect();
        assert_eq!(actual, expected);
    }
}

#[test]
fn ids_are_unique_among_active_toasts() {
    let manager = ToastManager::new();
    for n in 0..200 {
        let id = manager.info(format!("n{n}"), None, None);
        let toasts = manager.toasts();
        let distinct: HashSet<&ToastId> = toasts.iter().map(Toast::id).collect();
        assert_eq!(distinct.len(), toasts.len());
        assert!(manager.contains(&id));
    }
}

#[test]
fn display_collaborator_can_dismiss_through_record() {
    let manager = manager();
    manager.warning("Low disk", Some("92% used"), None);

    let toasts = manager.toasts();
    let handle = toasts[0].on_dismiss().clone();
    drop(toasts);

    assert!(handle.dismiss());
    assert!(!handle.dismiss());
    assert!(manager.is_empty());
}

#[test]
fn managers_built_from_config_are_independent() {
    let config = Config::from_toml_str(
        r#"
        [ids]
        scheme = "sequential"
        prefix = "note"

        [durations]
        info = "1500ms"
        "#,
    )
    .expect("valid config");

    let first = ToastManager::from_config(&config);
    let second = ToastManager::from_config(&config);

    let a = first.info("hello", None, None);
    let b = second.info("hello", None, None);
    assert_eq!(a, "note-1");
    assert_eq!(b, "note-1");
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(
        first.get(&a).and_then(|t| t.duration()),
        Some(Duration::from_millis(1500))
    );

    first.clear_all();
    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}
