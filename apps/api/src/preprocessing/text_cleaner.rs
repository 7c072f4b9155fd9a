//! Text cleaning for the two consumers of extracted text: the matcher and the PDF writer.

/// Typographic characters that the base-14 PDF fonts cannot show, with ASCII stand-ins.
const PDF_REPLACEMENTS: [(char, char); 7] = [
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2022}', '*'),
];

/// Collapses every whitespace run (newlines included) to a single space and trims.
pub fn clean_text_for_analysis(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Prepares text for the report writer.
///
/// Smart quotes, dashes and bullets become ASCII; anything else outside Latin-1
/// (emoji, CJK, ...) and the C1 control block become `?`. The output is safe for
/// [`to_latin1_bytes`].
pub fn clean_text_for_pdf(text: &str) -> String {
    text.chars()
        .map(|c| {
            if let Some((_, replacement)) = PDF_REPLACEMENTS.iter().find(|(from, _)| *from == c) {
                return *replacement;
            }
            match c as u32 {
                0x80..=0x9F => '?',
                0x00..=0xFF => c,
                _ => '?',
            }
        })
        .collect()
}

/// Encodes a string produced by [`clean_text_for_pdf`] one byte per character.
pub fn to_latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(c as u32).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_collapses_whitespace() {
        let raw = "  Senior   Engineer\n\n\tPython\r\nDocker  ";
        assert_eq!(clean_text_for_analysis(raw), "Senior Engineer Python Docker");
    }

    #[test]
    fn test_analysis_empty_input() {
        assert_eq!(clean_text_for_analysis(""), "");
        assert_eq!(clean_text_for_analysis(" \n\t "), "");
    }

    #[test]
    fn test_pdf_replaces_typographic_characters() {
        let raw = "\u{201C}Lead\u{201D} \u{2018}ops\u{2019} \u{2013} 5 yrs \u{2014} \u{2022} AWS";
        assert_eq!(clean_text_for_pdf(raw), "\"Lead\" 'ops' - 5 yrs - * AWS");
    }

    #[test]
    fn test_pdf_keeps_latin1_and_replaces_the_rest() {
        assert_eq!(clean_text_for_pdf("café 🚀 ok"), "café ? ok");
        assert_eq!(clean_text_for_pdf("日本"), "??");
    }

    #[test]
    fn test_pdf_replaces_c1_controls() {
        assert_eq!(clean_text_for_pdf("a\u{0085}b"), "a?b");
    }

    #[test]
    fn test_pdf_empty_input() {
        assert_eq!(clean_text_for_pdf(""), "");
    }

    #[test]
    fn test_latin1_bytes_one_per_char() {
        let cleaned = clean_text_for_pdf("née");
        assert_eq!(to_latin1_bytes(&cleaned), vec![b'n', 0xE9, b'e']);
    }
}
