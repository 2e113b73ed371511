/// Strips everything but printable ASCII and the whitespace diffs rely on.
///
/// Absent input yields an empty string.
pub fn sanitize_text(text: Option<&str>) -> String {
    match text {
        Some(text) => text.chars().filter(|&c| is_kept(c)).collect(),
        None => String::new(),
    }
}

fn is_kept(c: char) -> bool {
    matches!(c, '\x20'..='\x7e' | '\n' | '\r' | '\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(sanitize_text(None), "");
    }

    #[test]
    fn test_keeps_structural_whitespace() {
        let diff = "@@ -1,2 +1,2 @@\r\n-\tfoo\n+\tbar\n";
        assert_eq!(sanitize_text(Some(diff)), diff);
    }

    #[test]
    fn test_strips_control_and_non_ascii() {
        let dirty = "caf\u{e9}\x00 \x1b[31mred\x7f \u{1f600}ok\x0b";
        assert_eq!(sanitize_text(Some(dirty)), "caf [31mred ok");
    }

    #[test]
    fn test_output_alphabet_and_idempotence() {
        let inputs = [
            "",
            "plain",
            "\u{feff}bom",
            "tabs\tand\nnewlines\r",
            "mixed \u{2014} dash \u{00a0}nbsp",
            "\x01\x02\x03",
        ];
        for input in inputs {
            let once = sanitize_text(Some(input));
            assert!(once
                .chars()
                .all(|c| ('\x20'..='\x7e').contains(&c) || matches!(c, '\n' | '\r' | '\t')));
            assert_eq!(sanitize_text(Some(&once)), once);
        }
    }
}
