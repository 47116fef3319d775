mod common;

use common::{Fixture, SHARED_KEYS};
use stickup_overlay::data::{ButtonState, ElementData, WheelDirection};
use stickup_overlay::element::ElementKind;
use stickup_overlay::gfx::{Effect, RecordingBackend};
use stickup_overlay::keycode;
use stickup_overlay::producer::{ActiveSource, Producers};
use stickup_overlay::settings::DEFAULT_SIZE;
use stickup_overlay::{InputKind, Overlay, OverlaySettings};

fn released_button() -> ElementData {
    ElementData::Button {
        state: ButtonState::Released,
    }
}

#[test]
fn loads_texture_and_layout() {
    let fx = Fixture::new(SHARED_KEYS);
    let overlay = fx.overlay(&Producers::new());

    assert!(overlay.is_loaded());
    assert_eq!(overlay.elements().len(), 3);
    assert_eq!(overlay.backend().live.len(), 1);
    assert_eq!(overlay.backend().unbracketed, 0);
    // No declared size: the atlas size wins.
    assert_eq!(
        (overlay.settings().width, overlay.settings().height),
        (128, 96)
    );
}

#[test]
fn declared_size_overrides_texture_size() {
    let fx = Fixture::new(&format!("overlay_width = 640\noverlay_height = 200\n{SHARED_KEYS}"));
    let overlay = fx.overlay(&Producers::new());
    assert!(overlay.is_loaded());
    assert_eq!(
        (overlay.settings().width, overlay.settings().height),
        (640, 200)
    );
}

#[test]
fn reload_is_idempotent() {
    let fx = Fixture::new(SHARED_KEYS);
    let mut overlay = fx.overlay(&Producers::new());
    let ids = |o: &Overlay<RecordingBackend>| -> Vec<String> {
        o.elements().iter().map(|e| e.id().to_string()).collect()
    };
    let first = (overlay.is_loaded(), ids(&overlay), overlay.snapshot());

    assert!(overlay.load());
    assert!(overlay.load());
    let again = (overlay.is_loaded(), ids(&overlay), overlay.snapshot());

    assert_eq!(first, again);
    // The previous texture was released each time.
    assert_eq!(overlay.backend().live.len(), 1);
}

#[test]
fn every_element_has_a_record() {
    let layout = format!(
        "{SHARED_KEYS}wheel_next = \"bg\"\n\
         bg_type = 0\nbg_u = 0\nbg_v = 0\nbg_w = 128\nbg_h = 96\nbg_next = \"pad\"\n\
         pad_type = 7\npad_u = 0\npad_v = 0\npad_w = 8\npad_h = 8\npad_next = \"oops\"\n\
         oops_type = 1\noops_u = 0\n"
    );
    let fx = Fixture::new(&layout);
    let overlay = fx.overlay(&Producers::new());

    // `oops` is missing its code and most of its geometry: non-fatal.
    assert!(overlay.is_loaded());
    assert_eq!(overlay.elements().len(), 6);
    for element in overlay.elements() {
        assert!(
            overlay.data(element.keycode()).is_some(),
            "no record for {}",
            element.id()
        );
    }
}

#[test]
fn fatal_layout_keeps_nothing() {
    let fx = Fixture::new(&format!("{SHARED_KEYS}\nthis is = = not toml\n"));
    let producers = Producers::new();
    let mut settings = fx.settings();
    settings.gamepad = 3;
    let overlay = Overlay::new(settings, RecordingBackend::new(), producers);

    assert!(!overlay.is_loaded());
    assert!(overlay.elements().is_empty());
    assert_eq!(overlay.data_len(), 0);
    assert_eq!(overlay.settings().gamepad, 0);
    assert_eq!(
        (overlay.settings().width, overlay.settings().height),
        (DEFAULT_SIZE, DEFAULT_SIZE)
    );
    assert!(overlay.backend().live.is_empty());
}

#[test]
fn chain_cycle_fails_the_load() {
    let fx = Fixture::new(&format!("{SHARED_KEYS}wheel_next = \"a_small\"\n"));
    let overlay = fx.overlay(&Producers::new());
    assert!(!overlay.is_loaded());
    assert!(overlay.elements().is_empty());
}

#[test]
fn missing_texture_fails_the_load() {
    let fx = Fixture::new(SHARED_KEYS);
    let mut settings = fx.settings();
    settings.image_file = fx.dir.path().join("missing.png");
    let overlay = Overlay::new(settings, RecordingBackend::new(), Producers::new());

    assert!(!overlay.is_loaded());
    assert!(overlay.elements().is_empty());
    assert_eq!(overlay.settings().width, DEFAULT_SIZE);
}

#[test]
fn empty_paths_fail_without_panicking() {
    let mut overlay = Overlay::new(
        OverlaySettings::default(),
        RecordingBackend::new(),
        Producers::new(),
    );
    assert!(!overlay.is_loaded());
    overlay.refresh_data();
    overlay.draw(Effect::default());
    assert!(overlay.backend().draws.is_empty());
}

#[test]
fn draw_without_load_is_a_no_op() {
    let fx = Fixture::new(SHARED_KEYS);
    let mut overlay = fx.overlay(&Producers::new());
    overlay.unload();
    overlay.draw(Effect(9));
    assert!(overlay.backend().draws.is_empty());
}

#[test]
fn shared_keycode_scenario() {
    let fx = Fixture::new(SHARED_KEYS);
    let producers = Producers::new();
    let mut overlay = fx.overlay(&producers);

    assert_eq!(overlay.data_len(), 2);
    assert_eq!(overlay.data(0x41), Some(&released_button()));
    assert_eq!(
        overlay.data(0x01),
        Some(&ElementData::idle(ElementKind::Wheel))
    );

    producers.with_hook(|hook| hook.apply(&InputKind::KeyPressed { code: 0x41 }));
    assert_eq!(overlay.refresh_data(), Some(ActiveSource::Local));
    assert!(overlay.data(0x41).is_some_and(ElementData::is_pressed));
    assert_eq!(
        overlay.data(0x01),
        Some(&ElementData::Wheel {
            state: ButtonState::Released,
            direction: WheelDirection::None,
        })
    );

    overlay.draw(Effect(5));
    let draws = overlay.backend_mut().take_draws();
    let rows: Vec<u32> = draws.iter().map(|d| d.sprite.v).collect();
    // Both buttons show their pressed row, the wheel its idle column.
    assert_eq!(rows, vec![32 + 3, 70 + 16 + 3, 0]);
    assert_eq!(draws[2].sprite.u, 64);
    assert!(draws.iter().all(|d| d.effect == Effect(5)));
}

#[test]
fn refresh_skips_until_a_producer_has_data() {
    let fx = Fixture::new(SHARED_KEYS);
    let producers = Producers::new();
    let mut overlay = fx.overlay(&producers);

    // Stale state set directly on the hook without marking it initialized.
    producers.with_hook(|hook| {
        hook.data
            .set(0x41, ElementData::Button { state: ButtonState::Pressed })
    });
    assert_eq!(overlay.refresh_data(), None);
    assert_eq!(overlay.data(0x41), Some(&released_button()));
}

#[test]
fn release_resets_the_shared_record() {
    let fx = Fixture::new(SHARED_KEYS);
    let producers = Producers::new();
    let mut overlay = fx.overlay(&producers);

    producers.with_hook(|hook| hook.apply(&InputKind::KeyPressed { code: 0x41 }));
    overlay.refresh_data();
    producers.with_hook(|hook| hook.apply(&InputKind::KeyReleased { code: 0x41 }));
    overlay.refresh_data();
    assert_eq!(overlay.data(0x41), Some(&released_button()));
}

#[test]
fn remote_source_is_exclusive() {
    let fx = Fixture::new(SHARED_KEYS);
    let producers = Producers::new();
    let mut settings = fx.settings();
    settings.selected_source = 2;
    let mut overlay = Overlay::new(settings, RecordingBackend::new(), producers.clone());

    producers.with_hook(|hook| hook.apply(&InputKind::KeyPressed { code: 0x41 }));
    producers.with_network(|net| {
        net.active = true;
        net.connect("first");
        net.connect("second");
    });

    // Client 1 (setting 2) has nothing pressed; the local 0x41 must not leak in.
    assert_eq!(overlay.refresh_data(), Some(ActiveSource::Remote(1)));
    assert_eq!(overlay.data(0x41), Some(&released_button()));

    producers.with_network(|net| {
        if let Some(client) = net.client_mut(1) {
            client.apply(&InputKind::KeyPressed { code: 0x41 });
        }
    });
    overlay.refresh_data();
    assert!(overlay.data(0x41).is_some_and(ElementData::is_pressed));

    // Selecting the local source again reads the hook.
    overlay.settings_mut().selected_source = 0;
    producers.with_hook(|hook| hook.apply(&InputKind::KeyReleased { code: 0x41 }));
    assert_eq!(overlay.refresh_data(), Some(ActiveSource::Local));
    assert_eq!(overlay.data(0x41), Some(&released_button()));
}

#[test]
fn vanished_client_skips_the_cycle() {
    let fx = Fixture::new(SHARED_KEYS);
    let producers = Producers::new();
    let mut settings = fx.settings();
    settings.selected_source = 4;
    let mut overlay = Overlay::new(settings, RecordingBackend::new(), producers.clone());

    producers.with_hook(|hook| hook.apply(&InputKind::KeyPressed { code: 0x41 }));
    producers.with_network(|net| net.active = true);
    assert_eq!(overlay.refresh_data(), None);
    assert_eq!(overlay.data(0x41), Some(&released_button()));
}

#[test]
fn gamepad_elements_read_the_selected_pad() {
    let layout = r#"
first_element = "a"
a_type = 1
a_code = 0xEC00
a_u = 0
a_v = 0
a_w = 10
a_h = 10
"#;
    let fx = Fixture::new(layout);
    let producers = Producers::new();
    let mut settings = fx.settings();
    settings.gamepad = 1;
    let mut overlay = Overlay::new(settings, RecordingBackend::new(), producers.clone());
    assert_eq!(overlay.settings().gamepad, 1);

    producers.with_hook(|hook| {
        hook.apply(&InputKind::ButtonPressed {
            pad: 0,
            code: keycode::PAD_A,
        })
    });
    overlay.refresh_data();
    assert_eq!(overlay.data(keycode::PAD_A), Some(&released_button()));

    producers.with_hook(|hook| {
        hook.apply(&InputKind::ButtonPressed {
            pad: 1,
            code: keycode::PAD_A,
        })
    });
    overlay.refresh_data();
    assert!(overlay.data(keycode::PAD_A).is_some_and(ElementData::is_pressed));
}

#[test]
fn snapshot_is_detached_from_later_refreshes() {
    let fx = Fixture::new(SHARED_KEYS);
    let producers = Producers::new();
    let mut overlay = fx.overlay(&producers);

    let before = overlay.snapshot();
    producers.with_hook(|hook| hook.apply(&InputKind::KeyPressed { code: 0x41 }));
    overlay.refresh_data();

    assert_eq!(before.get(0x41), Some(&released_button()));
    assert!(overlay.snapshot().get(0x41).is_some_and(ElementData::is_pressed));
    assert!(before.to_json().is_ok());
}

#[test]
fn settings_file_drives_the_overlay() {
    let fx = Fixture::new(SHARED_KEYS);
    let path = fx.dir.path().join("overlay.toml");
    fx.settings().save(&path).expect("save settings");

    let settings = OverlaySettings::load(&path).expect("load settings");
    let overlay = Overlay::new(settings, RecordingBackend::new(), Producers::new());
    assert!(overlay.is_loaded());
}

#[test]
fn static_element_on_a_shared_code_keeps_the_press() {
    let layout = r#"
first_element = "a"
a_type = 1
a_code = 0x41
a_u = 0
a_v = 0
a_w = 10
a_h = 10
a_next = "bg"
bg_type = 0
bg_code = 0x41
bg_u = 0
bg_v = 40
bg_w = 64
bg_h = 32
"#;
    let fx = Fixture::new(layout);
    let producers = Producers::new();
    let mut overlay = fx.overlay(&producers);
    assert!(overlay.is_loaded());

    producers.with_hook(|hook| hook.apply(&InputKind::KeyPressed { code: 0x41 }));
    overlay.refresh_data();
    assert!(overlay.data(0x41).is_some_and(ElementData::is_pressed));
}

#[test]
fn oversized_region_draws_without_panicking() {
    let layout = r#"
first_element = "w"
w_type = 4
w_u = 10
w_v = 0
w_w = 4294967295
w_h = 30
"#;
    let fx = Fixture::new(layout);
    let producers = Producers::new();
    let mut overlay = fx.overlay(&producers);
    assert!(overlay.is_loaded());

    producers.with_hook(|hook| {
        hook.apply(&InputKind::KeyPressed {
            code: keycode::MOUSE_MIDDLE,
        });
        hook.apply(&InputKind::WheelScrolled { delta: -120 });
    });
    overlay.refresh_data();
    overlay.draw(Effect(1));
    let draws = overlay.backend_mut().take_draws();
    let columns: Vec<u32> = draws.iter().map(|d| d.sprite.u).collect();
    assert_eq!(columns, vec![u32::MAX, u32::MAX]);
}
