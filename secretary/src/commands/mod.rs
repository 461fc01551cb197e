pub mod command_add;
pub mod command_help;
pub mod command_report;
pub mod command_start;
pub mod command_trait;

use secretary_kit::markdown::MarkdownString;
use teloxide::utils::command::BotCommands;

use crate::{
    commands::{
        command_add::CommandAdd, command_help::CommandHelp, command_report::CommandReport,
        command_start::CommandStart, command_trait::CommandTrait,
    },
    context::AppContext,
    error::CommandError,
};

/// Bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(
        description = "start the bot",
        parse_with = CommandStart::parse_arguments
    )]
    Start(CommandStart),
    #[command(
        description = "display this help",
        parse_with = CommandHelp::parse_arguments
    )]
    Help(CommandHelp),
    #[command(
        description = "add a product: /add <name> <sum> <payment day>",
        parse_with = CommandAdd::parse_arguments
    )]
    Add(CommandAdd),
    #[command(
        description = "show expenses of the current pay period",
        parse_with = CommandReport::parse_arguments
    )]
    Report(CommandReport),
}

impl Command {
    /// Command with placeholders in place of missing arguments, for usage hints
    pub fn usage(&self) -> String {
        match self {
            Command::Start(start) => start.to_command_string(true),
            Command::Help(help) => help.to_command_string(true),
            Command::Add(_) => CommandAdd::default().to_command_string(true),
            Command::Report(report) => report.to_command_string(true),
        }
    }
}

impl From<Command> for String {
    fn from(val: Command) -> Self {
        match val {
            Command::Start(start) => start.to_command_string(false),
            Command::Help(help) => help.to_command_string(false),
            Command::Add(add) => add.to_command_string(false),
            Command::Report(report) => report.to_command_string(false),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from(self.clone()))
    }
}

/// Execute a single command and produce the reply text
pub async fn execute_command(
    context: &AppContext,
    cmd: Command,
) -> Result<MarkdownString, CommandError> {
    match cmd {
        Command::Start(start) => start.run(context).await,
        Command::Help(help) => help.run(context).await,
        Command::Add(add) => add.run(context).await,
        Command::Report(report) => report.run(context).await,
    }
}
