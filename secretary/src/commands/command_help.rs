use secretary_kit::{markdown::MarkdownString, markdown_format};
use teloxide::utils::command::BotCommands;

use super::Command;
use crate::{commands::command_trait::CommandTrait, context::AppContext, error::CommandError};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct CommandHelp;

impl CommandTrait for CommandHelp {
    const NAME: &'static str = "help";
    const PLACEHOLDERS: &'static [&'static str] = &[];

    fn from_arguments(_: Vec<String>) -> Self {
        CommandHelp
    }

    async fn run(&self, _context: &AppContext) -> Result<MarkdownString, CommandError> {
        Ok(markdown_format!(
            "{}\n\n\
            Expenses are grouped by salary periods: a report shows what is due \
            from the last salary day up to the next one\\.\n\
            Use `\\\\ ` to put a space into a product name, e\\.g\\. `/add Phone\\\\ bill 30 12`",
            Command::descriptions().to_string()
        ))
    }
}
