//! Decoding of property maps into highlight and mode records.
//!
//! Unknown keys and malformed values are logged and skipped; the rest of
//! the map still applies.

use super::events::Properties;
use super::value::Value;
use crate::cursor::{CursorShape, ModeInfo};
use crate::highlight::{Highlight, Rgba, Style, Underline};
use tracing::{trace, warn};

/// Build a highlight record from `hl_attr_define` attributes. The result
/// replaces any previous record; nothing is merged.
pub fn decode_highlight(attrs: &Properties) -> Highlight {
    let mut hl = Highlight::default();
    for (key, value) in attrs {
        match key.as_str() {
            "foreground" => hl.foreground = color(key, value),
            "background" => hl.background = color(key, value),
            "special" => hl.special = color(key, value),
            "reverse" => hl.style.set(Style::REVERSE, flag(value)),
            "italic" => hl.style.set(Style::ITALIC, flag(value)),
            "bold" => hl.style.set(Style::BOLD, flag(value)),
            "strikethrough" => hl.style.set(Style::STRIKETHROUGH, flag(value)),
            "underline" => underline(&mut hl, Underline::Underline, value),
            "undercurl" => underline(&mut hl, Underline::Undercurl, value),
            "underdouble" => underline(&mut hl, Underline::Underdouble, value),
            "underdotted" => underline(&mut hl, Underline::Underdotted, value),
            "underdashed" => underline(&mut hl, Underline::Underdashed, value),
            "blend" => {
                hl.blend = value
                    .as_u64()
                    .map_or(0, |b| u8::try_from(b.min(100)).unwrap_or(100));
            }
            _ => warn!(key = key.as_str(), "unknown highlight attribute"),
        }
    }
    hl
}

/// Build one mode record from a `mode_info_set` entry.
pub fn decode_mode_info(props: &Properties) -> ModeInfo {
    let mut mode = ModeInfo::default();
    for (key, value) in props {
        match key.as_str() {
            "name" => mode.name = value.as_str().unwrap_or_default().to_owned(),
            "short_name" => mode.short_name = value.as_str().unwrap_or_default().to_owned(),
            "cursor_shape" => {
                let name = value.as_str().unwrap_or_default();
                match CursorShape::from_name(name) {
                    Some(shape) => mode.cursor_shape = shape,
                    None => warn!(shape = name, "unknown cursor shape"),
                }
            }
            "cell_percentage" => {
                mode.cell_percentage = value.as_u64().map(|p| p.min(100) as u8);
            }
            "blinkwait" => mode.blinkwait = value.as_u64().unwrap_or(0),
            "blinkon" => mode.blinkon = value.as_u64().unwrap_or(0),
            "blinkoff" => mode.blinkoff = value.as_u64().unwrap_or(0),
            "attr_id" => mode.attr_id = value.as_u64().and_then(|id| u32::try_from(id).ok()),
            "attr_id_lm" | "mouse_shape" => trace!(key = key.as_str(), "mode property unused"),
            _ => warn!(key = key.as_str(), "unknown mode property"),
        }
    }
    mode
}

/// Decode a packed color. Out-of-range bits are masked off.
fn color(key: &str, value: &Value) -> Option<Rgba> {
    match *value {
        Value::Int(packed) => Some(Rgba::from_packed(packed)),
        #[allow(clippy::cast_possible_wrap)]
        Value::UInt(packed) => Some(Rgba::from_packed(packed as i64)),
        _ => {
            warn!(key, ?value, "malformed color");
            None
        }
    }
}

/// A false flag only clears the style it names.
fn underline(hl: &mut Highlight, style: Underline, value: &Value) {
    if flag(value) {
        hl.underline = style;
    } else if hl.underline == style {
        hl.underline = Underline::None;
    }
}

fn flag(value: &Value) -> bool {
    value.as_bool().unwrap_or(true)
}
