use secretary_kit::{markdown::MarkdownString, markdown_format};

use crate::{
    commands::{command_help::CommandHelp, command_trait::CommandTrait},
    context::AppContext,
    error::CommandError,
};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct CommandStart;

impl CommandTrait for CommandStart {
    const NAME: &'static str = "start";
    const PLACEHOLDERS: &'static [&'static str] = &[];

    fn from_arguments(_: Vec<String>) -> Self {
        CommandStart
    }

    async fn run(&self, _context: &AppContext) -> Result<MarkdownString, CommandError> {
        Ok(markdown_format!(
            "🤖 *Secretary v{}*\nApplication started\\! Try {}",
            env!("CARGO_PKG_VERSION"),
            CommandHelp.to_command_string(false)
        ))
    }
}
