/// Creates a MarkdownString from a literal with compile-time validation.
///
/// The literal must already be MarkdownV2-safe: reserved characters outside of
/// code spans have to be escaped with a backslash.
///
/// ```rust
/// use secretary_kit::markdown_string;
///
/// let done = markdown_string!("*Done*\\!");
/// assert_eq!(done.as_str(), "*Done*\\!");
/// ```
#[macro_export]
macro_rules! markdown_string {
    ($format_str:literal) => {{
        const _: () = $crate::markdown::validate_markdownv2_format($format_str);
        $crate::markdown::MarkdownString::from_validated_string($format_str)
    }};
}

/// Formats a MarkdownString from a validated literal template.
///
/// Every `{}` placeholder is replaced, left to right, by the next argument
/// converted with `Into<MarkdownString>`. Plain strings and numbers are escaped
/// on conversion, MarkdownString arguments are inserted as they are.
///
/// ```rust
/// use secretary_kit::markdown_format;
///
/// let msg = markdown_format!("Added *{}* for {}", "Rent (flat)", 500);
/// assert_eq!(msg.as_str(), "Added *Rent \\(flat\\)* for 500");
/// ```
#[macro_export]
macro_rules! markdown_format {
    ($format_str:literal $(, $arg:expr)* $(,)?) => {{
        const _: () = $crate::markdown::validate_markdownv2_format($format_str);

        let arguments: ::std::vec::Vec<$crate::markdown::MarkdownString> = vec![$({
            let argument: $crate::markdown::MarkdownString = $arg.into();
            argument
        }),*];

        $crate::markdown::MarkdownString::fill_placeholders($format_str, arguments)
    }};
}
