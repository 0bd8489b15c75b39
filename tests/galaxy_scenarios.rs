use chrono::{Duration, TimeZone, Utc};

use mood_galaxy::config::FilterChangePolicy;
use mood_galaxy::galaxy::encoder::Role;
use mood_galaxy::galaxy::ViewMode;
use mood_galaxy::{Entry, GalaxyConfig, GalaxyScene, InteractionEvent};

fn journal(moods: &[&str]) -> Vec<Entry> {
    let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    moods
        .iter()
        .enumerate()
        .map(|(i, m)| Entry::new(format!("e{i}"), *m, t0 - Duration::hours(i as i64)))
        .collect()
}

fn run(scene: &mut GalaxyScene, frames: usize) {
    for _ in 0..frames {
        scene.tick(1.0 / 60.0);
    }
}

#[test]
fn filtered_selection_dims_the_rest() {
    let mut scene = GalaxyScene::new(
        GalaxyConfig::default(),
        journal(&["Joy", "Calm", "Joy", "Tired", "Joy"]),
    );
    scene.set_filter(Some("Joy"));

    let ids: Vec<_> = scene.filtered().iter().map(|e| e.id.clone()).collect();
    assert_eq!(ids, vec!["e0", "e2", "e4"]);
    assert_eq!(scene.layout().len(), 3);
    for p in scene.layout() {
        assert!((p.target_position.length() - 8.0).abs() < 1e-4);
    }

    scene.pointer_click("e2");
    assert_eq!(scene.role_of("e2"), Some(Role::Selected));
    assert_eq!(scene.role_of("e0"), Some(Role::Dimmed));
    assert_eq!(scene.role_of("e4"), Some(Role::Dimmed));
    assert_eq!(scene.role_of("e1"), None);

    run(&mut scene, 240);
    let frame = scene.snapshot();
    assert_eq!(frame.len(), 3);
    assert_eq!(frame.view_mode, ViewMode::Focused);
    assert_eq!(frame.get("e2").unwrap().brightness, 3.0);
    assert_eq!(frame.get("e0").unwrap().brightness, 0.2);
    assert_eq!(scene.selected_entry().map(|e| e.id.as_str()), Some("e2"));
}

#[test]
fn empty_journal_renders_nothing() {
    let mut scene = GalaxyScene::new(GalaxyConfig::default(), Vec::new());
    assert!(scene.layout().is_empty());
    assert!(scene.scheduler().is_empty());
    run(&mut scene, 10);
    assert!(scene.snapshot().is_empty());
    assert!(!scene.is_animating());

    scene.pointer_click("anything");
    scene.pointer_enter("anything");
    assert_eq!(scene.view_mode(), ViewMode::Overview);
}

#[test]
fn selection_survives_filter_that_hides_it() {
    let mut scene = GalaxyScene::new(GalaxyConfig::default(), journal(&["Joy", "Calm", "Joy"]));
    scene.pointer_click("e1");
    run(&mut scene, 30);

    scene.set_filter(Some("Joy"));
    assert_eq!(scene.focus().selected(), Some("e1"));
    assert!(scene.live("e1").is_none());
    assert!(scene.snapshot().get("e1").is_none());
    // The detail panel still resolves the entry
    assert_eq!(scene.selected_entry().map(|e| e.mood.as_str()), Some("Calm"));
    run(&mut scene, 30);
    assert_eq!(scene.snapshot().len(), 2);
}

#[test]
fn deselect_policy_clears_hidden_selection() {
    let cfg = GalaxyConfig::default().with_policy(FilterChangePolicy::Deselect);
    let mut scene = GalaxyScene::new(cfg, journal(&["Joy", "Calm", "Joy"]));
    scene.pointer_click("e1");
    scene.set_filter(Some("Joy"));
    assert_eq!(scene.focus().selected(), None);
    assert_eq!(scene.view_mode(), ViewMode::Filtered);
    assert_eq!(scene.role_of("e0"), Some(Role::Neutral));

    // A visible selection is kept under either policy
    scene.pointer_click("e2");
    scene.set_filter(None);
    assert_eq!(scene.focus().selected(), Some("e2"));
}

#[test]
fn returning_entries_resume_from_last_state() {
    let mut scene = GalaxyScene::new(GalaxyConfig::default(), journal(&["Joy", "Calm", "Joy"]));
    run(&mut scene, 240);
    let before = scene.live("e1").unwrap().clone();
    assert_eq!(before.opacity, 1.0);

    scene.set_filter(Some("Joy"));
    run(&mut scene, 5);
    scene.set_filter(None);
    let back = scene.live("e1").unwrap();
    assert_eq!(back.opacity, before.opacity);
    assert_eq!(back.scale, before.scale);
    assert_eq!(back.position, before.position);
}

#[test]
fn events_queue_until_the_next_tick() {
    let mut scene = GalaxyScene::new(GalaxyConfig::default(), journal(&["Joy", "Calm"]));
    scene.enqueue(InteractionEvent::PointerEnter("e0".into()));
    scene.enqueue(InteractionEvent::PointerClick("e1".into()));
    assert_eq!(scene.role_of("e0"), Some(Role::Neutral));

    scene.tick(1.0 / 60.0);
    assert_eq!(scene.role_of("e1"), Some(Role::Selected));
    // Selection outranks hover for everyone else
    assert_eq!(scene.role_of("e0"), Some(Role::Dimmed));

    scene.enqueue(InteractionEvent::PointerClickBackground);
    scene.tick(1.0 / 60.0);
    assert_eq!(scene.role_of("e0"), Some(Role::Hovered));
}
