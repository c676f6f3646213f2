// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! HTML escaping of interpolated values.

use crate::error::SinkError;
use crate::sink::Sink;
use serde::Deserialize;

/// How interpolated text is written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escape {
    /// Replace HTML-significant characters with entities.
    #[default]
    Html,
    /// Write text unchanged.
    None,
}

fn entity(byte: u8) -> Option<&'static str> {
    match byte {
        b'&' => Some("&amp;"),
        b'<' => Some("&lt;"),
        b'>' => Some("&gt;"),
        b'"' => Some("&quot;"),
        b'\'' => Some("&#39;"),
        _ => None,
    }
}

/// Writes `text` to `sink`, applying `escape`.
pub fn write_escaped(sink: &mut dyn Sink, text: &str, escape: Escape) -> Result<(), SinkError> {
    if escape == Escape::None {
        return sink.write_str(text);
    }

    let mut last = 0;
    for (index, byte) in text.bytes().enumerate() {
        if let Some(entity) = entity(byte) {
            if last < index {
                sink.write_str(&text[last..index])?;
            }
            sink.write_str(entity)?;
            last = index + 1;
        }
    }
    if last < text.len() {
        sink.write_str(&text[last..])?;
    }
    Ok(())
}
