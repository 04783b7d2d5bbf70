#![no_main]

use libfuzzer_sys::fuzz_target;
use marquee_core::TextSurface;
use marquee_core::style::TextStyle;
use marquee_tty::CellCanvas;
use unicode_width::UnicodeWidthChar;

fuzz_target!(|data: &[u8]| {
    // First two bytes: row width and starting column.
    if data.len() < 2 {
        return;
    }
    let width = u16::from(data[0]);
    let start = f64::from(data[1] as i8);
    let Ok(text) = std::str::from_utf8(&data[2..]) else {
        return;
    };

    let mut canvas = CellCanvas::new();
    let style = TextStyle::default();
    let mut x = start;
    for word in text.split(' ') {
        let id = canvas.create_element(&style);
        let size = canvas.size_to_fit(id, word, &style);
        canvas.set_position(id, x, 0.0);
        canvas.attach(id);
        x += size.width + 1.0;
    }

    let row = canvas.render_row(width);
    let cells: usize = row.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    assert_eq!(cells, usize::from(width), "row width drifted: {row:?}");
});
