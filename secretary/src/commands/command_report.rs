use secretary_kit::{markdown::MarkdownString, markdown_format};

use crate::{
    commands::command_trait::CommandTrait, context::AppContext, error::CommandError,
    period::PayPeriod, report::ExpenseReport,
};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct CommandReport;

impl CommandTrait for CommandReport {
    const NAME: &'static str = "report";
    const PLACEHOLDERS: &'static [&'static str] = &[];

    fn from_arguments(_: Vec<String>) -> Self {
        CommandReport
    }

    async fn run(&self, context: &AppContext) -> Result<MarkdownString, CommandError> {
        let payment_days = context
            .storage
            .clone()
            .as_salary_storage()
            .list_salary_payment_days()
            .await?;
        let period = PayPeriod::current(context.clock.today(), &payment_days)?;

        let products = context
            .storage
            .clone()
            .as_product_storage()
            .list_products()
            .await?;
        let report = ExpenseReport::build(&period, &products);

        Ok(markdown_format!(
            "📊 *Expenses {}*\n{}",
            period.to_string(),
            MarkdownString::code_block(&report.render())
        ))
    }
}
