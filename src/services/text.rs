use encoding_rs::Encoding;

/// Decodes byte output from native tools into the crate's UTF-8 text.
#[derive(Debug, Clone, Copy)]
pub struct NativeText {
    encoding: &'static Encoding,
}

impl NativeText {
    /// Look up a decoder by WHATWG label (`utf-8`, `windows-1252`, `shift_jis`, ...).
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(|encoding| Self { encoding })
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode bytes, honouring a BOM if present. Malformed sequences become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (text, actual, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            tracing::debug!("Malformed {} sequences replaced while decoding", actual.name());
        }
        text.into_owned()
    }
}

impl Default for NativeText {
    fn default() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Fold multi-line diagnostic text into one log line.
///
/// Lines are trimmed, blank lines dropped, and the rest joined with `"; "`.
pub fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_default() {
        let text = NativeText::default();
        assert_eq!(text.decode("bad header".as_bytes()), "bad header");
        assert_eq!(text.encoding_name(), "UTF-8");
    }

    #[test]
    fn test_windows_1252() {
        let text = NativeText::for_label("windows-1252").unwrap();
        // 0xE9 is 'é' in windows-1252
        assert_eq!(text.decode(b"caf\xe9"), "café");
    }

    #[test]
    fn test_label_is_trimmed() {
        assert!(NativeText::for_label("  latin1 ").is_some());
    }

    #[test]
    fn test_unknown_label() {
        assert!(NativeText::for_label("no-such-encoding").is_none());
    }

    #[test]
    fn test_bom_overrides_label() {
        let text = NativeText::for_label("windows-1252").unwrap();
        assert_eq!(text.decode(b"\xef\xbb\xbfok"), "ok");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("  bad header \r\n\r\nat offset 0x40\n"), "bad header; at offset 0x40");
        assert_eq!(single_line("bad header"), "bad header");
        assert_eq!(single_line("\n \n"), "");
    }
}
