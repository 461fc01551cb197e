/// Split command arguments on whitespace.
///
/// Only the first line is considered. A backslash escapes the following space
/// (`My\ Lunch` is one argument) and a double backslash produces a single one.
pub fn split_arguments(arg: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut chars = arg.lines().next().unwrap_or("").chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek() {
                Some('\\') => {
                    current.push('\\');
                    chars.next();
                }
                Some(' ') => {
                    current.push(' ');
                    chars.next();
                }
                _ => current.push('\\'),
            },
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// Escape backslashes and spaces so that `split_arguments` yields `s` back as one argument
pub fn escape_spaces(s: &str) -> String {
    s.replace('\\', "\\\\").replace(' ', "\\ ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_arguments("rent 500 5"), vec!["rent", "500", "5"]);
    }

    #[test]
    fn test_split_collapses_repeated_whitespace() {
        assert_eq!(split_arguments("  rent \t 500   5 "), vec!["rent", "500", "5"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_arguments("").is_empty());
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn test_split_escaped_space() {
        assert_eq!(
            split_arguments("Phone\\ bill 30 12"),
            vec!["Phone bill", "30", "12"]
        );
    }

    #[test]
    fn test_split_escaped_backslash() {
        assert_eq!(split_arguments("a\\\\b c"), vec!["a\\b", "c"]);
        assert_eq!(split_arguments("trailing\\"), vec!["trailing\\"]);
    }

    #[test]
    fn test_split_uses_first_line_only() {
        assert_eq!(split_arguments("rent 500 5\nignored line"), vec!["rent", "500", "5"]);
    }

    #[test]
    fn test_escape_spaces_is_split_back() {
        let name = "Car loan \\ bank";
        assert_eq!(split_arguments(&escape_spaces(name)), vec![name]);
    }
}
