use secretary_kit::{
    args::{escape_spaces, split_arguments},
    markdown::MarkdownString,
};
use teloxide::utils::command::ParseError;

use crate::{context::AppContext, error::CommandError};

/// A bot command with a declared argument shape.
///
/// Parsing never fails: arguments are kept as split tokens and validated by
/// `run`, so that the user gets a precise message about what is wrong.
#[allow(async_fn_in_trait)]
pub trait CommandTrait: Sized {
    const NAME: &'static str;
    const PLACEHOLDERS: &'static [&'static str];

    fn from_arguments(args: Vec<String>) -> Self;

    /// Arguments as they were given, used to rebuild the command string
    fn arguments(&self) -> &[String] {
        &[]
    }

    /// Parser for the `parse_with` attribute of the `BotCommands` derive
    fn parse_arguments(args: String) -> Result<(Self,), ParseError> {
        Ok((Self::from_arguments(split_arguments(&args)),))
    }

    async fn run(&self, context: &AppContext) -> Result<MarkdownString, CommandError>;

    fn to_command_string(&self, with_placeholders: bool) -> String {
        let mut parts = vec![format!("/{}", Self::NAME)];
        let args = self.arguments();
        if with_placeholders && args.is_empty() {
            parts.extend(Self::PLACEHOLDERS.iter().map(|p| p.to_string()));
        } else {
            parts.extend(args.iter().map(|arg| escape_spaces(arg)));
        }
        parts.join(" ")
    }
}
