#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use marquee_core::geometry::Size;
use marquee_core::testing::{ManualClock, RecordingSurface};
use marquee_core::{Marquee, MarqueeConfig};

#[derive(Debug, Arbitrary)]
enum Command {
    Run,
    Pause,
    Stop,
    Attach,
    Detach,
    Tick(u16),
    Resize(u16),
    SetTexts(Vec<String>),
    SetSpacing(u8),
    SetSpeed(u16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    spacing: u8,
    speed: u16,
    width: u16,
    texts: Vec<String>,
    commands: Vec<Command>,
}

fuzz_target!(|input: Input| {
    let config = MarqueeConfig::default()
        .with_text_spacing(f64::from(input.spacing))
        .with_scroll_speed(f64::from(input.speed));
    let surface = RecordingSurface::new();
    let clock = ManualClock::new();
    let Ok(mut marquee) = Marquee::with_config(surface.clone(), clock.clone(), config) else {
        return;
    };
    marquee.set_viewport(Size::new(f64::from(input.width % 2048), 20.0));
    marquee.set_text_list(input.texts);

    for command in input.commands.into_iter().take(256) {
        match command {
            Command::Run => marquee.run(),
            Command::Pause => marquee.pause(),
            Command::Stop => marquee.stop(),
            Command::Attach => marquee.attach_to_display(),
            Command::Detach => marquee.detach_from_display(),
            Command::Tick(ms) => {
                marquee.on_tick(Duration::from_millis(u64::from(ms % 5000)));
            }
            Command::Resize(w) => marquee.set_viewport(Size::new(f64::from(w % 2048), 20.0)),
            Command::SetTexts(texts) => marquee.set_text_list(texts),
            Command::SetSpacing(s) => {
                let _ = marquee.try_set_text_spacing(f64::from(s));
            }
            Command::SetSpeed(s) => {
                let _ = marquee.try_set_scroll_speed(f64::from(s));
            }
        }

        // Post-conditions that must always hold:
        let engine = marquee.engine();
        assert!(
            engine.queue().is_well_spaced(marquee.text_spacing(), 1e-6),
            "visible queue lost its spacing"
        );
        assert_eq!(
            engine.queue().len() + engine.pool().len(),
            engine.pool().created(),
            "element leaked"
        );
        assert_eq!(surface.attached_count(), engine.queue().len());
        if marquee.is_stopped() {
            assert!(engine.queue().is_empty(), "stopped with visible elements");
        }
        let n = marquee.text_list().len();
        for pair in engine.visible_indices().windows(2) {
            assert_eq!(pair[1], (pair[0] + 1) % n, "text indices out of order");
        }
    }

    let id = marquee.tick_id();
    drop(marquee);
    assert_eq!(surface.live_count(), 0, "drop left elements alive");
    if let Some(id) = id {
        assert_eq!(clock.cancelled(), vec![id]);
    }
});
