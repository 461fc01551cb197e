/// Compile-time check that a template is valid Telegram MarkdownV2.
///
/// Used by `markdown_string!` and `markdown_format!` inside a `const` block, so
/// a bad template fails the build instead of being rejected by Telegram.
/// Links and spoilers are not supported: `[]()|` must always be escaped.
pub const fn validate_markdownv2_format(format_str: &str) {
    let bytes = format_str.as_bytes();
    let mut i = 0;

    let mut asterisk_count = 0usize;
    let mut underscore_count = 0usize;
    let mut tilde_count = 0usize;
    let mut in_code = false;
    let mut in_pre = false;

    while i < bytes.len() {
        let current = bytes[i];

        if current == b'\\' {
            assert!(
                i + 1 < bytes.len(),
                "Dangling backslash at the end of MarkdownV2 format string"
            );
            i += 2;
            continue;
        }

        if current == b'`' {
            let is_triple = i + 2 < bytes.len() && bytes[i + 1] == b'`' && bytes[i + 2] == b'`';
            if is_triple && !in_code {
                in_pre = !in_pre;
                i += 3;
            } else {
                assert!(!in_pre, "Single backtick inside a pre block must be escaped");
                in_code = !in_code;
                i += 1;
            }
            continue;
        }

        if in_code || in_pre {
            i += 1;
            continue;
        }

        match current {
            b'*' => asterisk_count += 1,
            b'_' => underscore_count += 1,
            b'~' => tilde_count += 1,
            b'{' => {
                assert!(
                    i + 1 < bytes.len() && bytes[i + 1] == b'}',
                    "Unescaped '{{' in MarkdownV2 format string. Use \\{{ or {{}} for a placeholder."
                );
                i += 2;
                continue;
            }
            b'!' | b'.' | b'-' | b'+' | b'=' | b'>' | b'#' | b'|' | b'}' | b'(' | b')' | b'['
            | b']' => {
                panic!("Unescaped reserved character in MarkdownV2 format string");
            }
            _ => {}
        }
        i += 1;
    }

    assert!(
        asterisk_count % 2 == 0,
        "Unmatched asterisks (*) in MarkdownV2 format string"
    );
    assert!(
        underscore_count % 2 == 0,
        "Unmatched underscores (_) in MarkdownV2 format string"
    );
    assert!(
        tilde_count % 2 == 0,
        "Unmatched tildes (~) in MarkdownV2 format string"
    );
    assert!(!in_code, "Unclosed code span in MarkdownV2 format string");
    assert!(!in_pre, "Unclosed pre block in MarkdownV2 format string");
}
