//! `osc_dispatch` — Operating System Command sequences.

use rterm_surface::{Rgb, Screen};

use crate::output::OutputSink;

pub fn dispatch<O: OutputSink>(screen: &mut Screen, sink: &mut O, fields: &[&[u8]]) {
    let Some(command) = fields.first() else {
        return;
    };

    match *command {
        b"0" => set_title_and_icon(sink, fields),
        b"1" | b"2L" => set_icon(sink, fields),
        b"2" | b"21" => set_title(sink, fields),
        b"4" => set_palette(screen, fields),
        other => log::debug!("unknown OSC command {:?}", String::from_utf8_lossy(other)),
    }
}

fn field_str(field: &[u8]) -> &str {
    std::str::from_utf8(field).unwrap_or_default()
}

fn set_title_and_icon<O: OutputSink>(sink: &mut O, fields: &[&[u8]]) {
    if let Some(data) = fields.get(1) {
        let text = field_str(data);
        sink.set_title(text);
        sink.set_icon_name(text);
    }
}

fn set_icon<O: OutputSink>(sink: &mut O, fields: &[&[u8]]) {
    if let Some(data) = fields.get(1) {
        sink.set_icon_name(field_str(data));
    }
}

fn set_title<O: OutputSink>(sink: &mut O, fields: &[&[u8]]) {
    if let Some(data) = fields.get(1) {
        sink.set_title(field_str(data));
    }
}

/// `4;N;colorspec[;N;colorspec...]` — redefine palette entries.
fn set_palette(screen: &mut Screen, fields: &[&[u8]]) {
    let mut rest = &fields[1..];
    while rest.len() >= 2 {
        let index = field_str(rest[0]).parse::<u8>().ok();
        let color = parse_color(field_str(rest[1]));
        match (index, color) {
            (Some(index), Some(rgb)) => screen.palette.set(index, rgb),
            _ => log::debug!(
                "unrecognized OSC 4 colorspec index={:?} spec={:?}",
                field_str(rest[0]),
                field_str(rest[1])
            ),
        }
        rest = &rest[2..];
    }
}

/// Parses an X11-style color spec: `#RGB`/`#RRGGBB`/`#RRRGGGBBB`/
/// `#RRRRGGGGBBBB`, `rgb:R/G/B`, or `rgbi:fR/fG/fB`.
fn parse_color(spec: &str) -> Option<Rgb> {
    if let Some(hex) = spec.strip_prefix('#') {
        return parse_hash_hex(hex);
    }
    if let Some(tail) = spec.strip_prefix("rgbi:") {
        return parse_rgbi(tail);
    }
    if let Some(tail) = spec.strip_prefix("rgb:") {
        return parse_rgb_components(tail);
    }
    None
}

fn parse_hash_hex(hex: &str) -> Option<Rgb> {
    let digits_per_channel = hex.len() / 3;
    if digits_per_channel == 0 || hex.len() % 3 != 0 || digits_per_channel > 4 {
        return None;
    }
    let max = (16u32.pow(digits_per_channel as u32)) - 1;
    let channel = |s: &str| -> Option<u8> {
        let v = u32::from_str_radix(s, 16).ok()?;
        Some(((v * 255) / max) as u8)
    };
    let r = channel(&hex[0..digits_per_channel])?;
    let g = channel(&hex[digits_per_channel..2 * digits_per_channel])?;
    let b = channel(&hex[2 * digits_per_channel..3 * digits_per_channel])?;
    Some(Rgb::new(r, g, b))
}

fn parse_rgb_components(tail: &str) -> Option<Rgb> {
    let mut parts = tail.split('/');
    let r = parts.next()?;
    let g = parts.next()?;
    let b = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let digits = s.len();
        if digits == 0 || digits > 4 {
            return None;
        }
        let v = u32::from_str_radix(s, 16).ok()?;
        let max = 16u32.pow(digits as u32) - 1;
        Some(((v * 255) / max) as u8)
    };
    Some(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}

fn parse_rgbi(tail: &str) -> Option<Rgb> {
    let mut parts = tail.split('/');
    let r = parts.next()?;
    let g = parts.next()?;
    let b = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let channel = |s: &str| -> Option<u8> {
        let v: f64 = s.parse().ok()?;
        Some((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    };
    Some(Rgb::new(channel(r)?, channel(g)?, channel(b)?))
}
