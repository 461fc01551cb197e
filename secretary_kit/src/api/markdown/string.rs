use std::{fmt, ops::Add};

use teloxide::{
    Bot,
    payloads::{SendMessage, SendMessageSetters},
    prelude::Requester,
    requests::JsonRequest,
    types::{ParseMode, Recipient},
    utils::markdown,
};

use crate::markdown_string;

/// Maximum message length allowed by Telegram Bot API
/// See: https://core.telegram.org/bots/api#sendmessage
pub const TELEGRAM_MAX_MESSAGE_LENGTH: usize = 4096;

const PRE_FENCE: &str = "```";

/// A wrapper around String that is always safe to send with MarkdownV2 parse mode.
///
/// It can only be constructed through safe paths:
/// 1. `markdown_string!` / `markdown_format!` macros - template validated at compile time
/// 2. `escape` constructor - escapes every reserved character of the input
/// 3. `code_block` constructor - wraps raw text into a pre block
/// 4. `From`/`Into` conversions - escape the input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkdownString(String);

impl MarkdownString {
    /// Creates a MarkdownString by escaping all MarkdownV2 reserved characters.
    pub fn escape<T: Into<String>>(input: T) -> Self {
        MarkdownString(markdown::escape(&input.into()))
    }

    /// Creates an empty MarkdownString.
    pub fn new() -> Self {
        MarkdownString(String::new())
    }

    /// Wraps raw text into a pre-formatted (monospace) block.
    ///
    /// Only backticks and backslashes need escaping inside a pre block, so the
    /// column alignment of the text is preserved.
    pub fn code_block(text: &str) -> Self {
        MarkdownString(format!(
            "{PRE_FENCE}\n{}\n{PRE_FENCE}",
            markdown::escape_code(text)
        ))
    }

    /// Constructor used by the macros after compile-time validation.
    #[doc(hidden)]
    pub fn from_validated_string(s: impl Into<String>) -> Self {
        MarkdownString(s.into())
    }

    /// Replaces `{}` placeholders of a validated template left to right.
    /// Missing arguments leave the placeholder untouched, extra ones are dropped.
    #[doc(hidden)]
    pub fn fill_placeholders(template: &str, arguments: Vec<MarkdownString>) -> Self {
        let mut result = String::with_capacity(template.len());
        let mut arguments = arguments.into_iter();
        let mut rest = template;

        while let Some(pos) = rest.find("{}") {
            result.push_str(&rest[..pos]);
            match arguments.next() {
                Some(argument) => result.push_str(argument.as_str()),
                None => result.push_str("{}"),
            }
            rest = &rest[pos + 2..];
        }
        result.push_str(rest);

        MarkdownString(result)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MarkdownString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MarkdownString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<MarkdownString> for String {
    fn from(markdown: MarkdownString) -> String {
        markdown.0
    }
}

impl From<String> for MarkdownString {
    fn from(s: String) -> Self {
        MarkdownString::escape(s)
    }
}

impl From<&String> for MarkdownString {
    fn from(s: &String) -> Self {
        MarkdownString::escape(s.as_str())
    }
}

impl From<&str> for MarkdownString {
    fn from(s: &str) -> Self {
        MarkdownString::escape(s)
    }
}

impl From<&MarkdownString> for MarkdownString {
    fn from(s: &MarkdownString) -> Self {
        s.clone()
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for MarkdownString {
                fn from(n: $t) -> Self {
                    MarkdownString::escape(n.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i32, i64, u32, u64, usize);

impl Add for MarkdownString {
    type Output = MarkdownString;

    fn add(self, other: MarkdownString) -> MarkdownString {
        MarkdownString(self.0 + &other.0)
    }
}

impl Add<&MarkdownString> for MarkdownString {
    type Output = MarkdownString;

    fn add(self, other: &MarkdownString) -> MarkdownString {
        MarkdownString(self.0 + &other.0)
    }
}

/// Truncates a message at a line boundary if it exceeds Telegram's limit.
/// A pre block left open by the cut is closed before the "..." marker.
fn truncate_if_needed(text: MarkdownString) -> MarkdownString {
    if text.as_str().len() <= TELEGRAM_MAX_MESSAGE_LENGTH {
        return text;
    }

    let marker = markdown_string!("\\.\\.\\.");
    // room for the marker, a closing fence and two newlines
    let budget = TELEGRAM_MAX_MESSAGE_LENGTH - marker.as_str().len() - PRE_FENCE.len() - 2;

    let mut kept = String::new();
    for line in text.as_str().lines() {
        if kept.len() + line.len() + 1 > budget {
            break;
        }
        kept.push_str(line);
        kept.push('\n');
    }
    if kept.is_empty() {
        // a single oversized line: cut on a char boundary
        let mut end = budget;
        while !text.as_str().is_char_boundary(end) {
            end -= 1;
        }
        kept.push_str(&text.as_str()[..end]);
        kept.push('\n');
    }

    if kept.matches(PRE_FENCE).count() % 2 == 1 {
        kept.push_str(PRE_FENCE);
        kept.push('\n');
    }

    MarkdownString(kept) + marker
}

/// Extension trait for sending MarkdownString messages with a teloxide Bot.
///
/// The parse mode is always set to MarkdownV2 and the text is truncated to
/// Telegram's 4096 character limit.
pub trait MarkdownStringMessage: Requester {
    fn send_markdown_message<C>(&self, chat_id: C, text: MarkdownString) -> JsonRequest<SendMessage>
    where
        C: Into<Recipient>;
}

impl MarkdownStringMessage for Bot {
    fn send_markdown_message<C>(&self, chat_id: C, text: MarkdownString) -> JsonRequest<SendMessage>
    where
        C: Into<Recipient>,
    {
        self.send_message(chat_id, truncate_if_needed(text))
            .parse_mode(ParseMode::MarkdownV2)
    }
}
