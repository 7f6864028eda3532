#![no_main]

use libfuzzer_sys::fuzz_target;
use propmap_core::attributes::property_encoding;
use propmap_core::encoding;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Normalization must never panic, whatever the encoding looks like
        let _ = encoding::normalize(s);
        // Same for attribute strings routed through the `T` attribute
        let _ = encoding::normalize(property_encoding(s));
    }

    // Repeat a one-byte opener to reach nesting depths the raw input size never would
    if let [opener, count_hi, count_lo, tail @ ..] = data {
        let opener = match opener % 5 {
            0 => "^",
            1 => "{",
            2 => "[",
            3 => "(",
            _ => "^r",
        };
        let depth = usize::from(u16::from_be_bytes([*count_hi, *count_lo]));
        let deep = format!("{}{}", opener.repeat(depth), String::from_utf8_lossy(tail));
        let _ = encoding::normalize(&deep);
    }
});
