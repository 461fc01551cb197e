use secretary_kit::{markdown::MarkdownString, markdown_format};

use crate::{
    commands::command_trait::CommandTrait, context::AppContext, error::CommandError,
    product::Product,
};

/// `/add <name> <sum> <payment day>`
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CommandAdd {
    pub args: Vec<String>,
}

impl CommandTrait for CommandAdd {
    const NAME: &'static str = "add";
    const PLACEHOLDERS: &'static [&'static str] = &["<name>", "<sum>", "<payment day>"];

    fn from_arguments(args: Vec<String>) -> Self {
        CommandAdd { args }
    }

    fn arguments(&self) -> &[String] {
        &self.args
    }

    async fn run(&self, context: &AppContext) -> Result<MarkdownString, CommandError> {
        let product = Product::from_arguments(&self.args)?;
        let products = context.storage.clone().as_product_storage();

        if products.product_exists(&product.name).await? {
            return Err(CommandError::DuplicateProduct(product.name));
        }
        // The UNIQUE constraint still catches a concurrent add of the same name
        let id = products.insert_product(&product).await?;
        log::info!("Added product #{}: {:?}", id, product);

        Ok(markdown_format!(
            "✅ Successfully added new product:\n\n{}",
            product.to_string()
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::context::test_support::context_with_salaries;

    fn add(args: &[&str]) -> CommandAdd {
        CommandAdd::from_arguments(args.iter().map(|s| s.to_string()).collect())
    }

    async fn context() -> AppContext {
        context_with_salaries(NaiveDate::from_ymd_opt(2026, 10, 10).unwrap(), &[5]).await
    }

    async fn stored(context: &AppContext) -> Vec<Product> {
        context
            .storage
            .clone()
            .as_product_storage()
            .list_products()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_product() {
        let context = context().await;
        let reply = add(&["rent", "500", "5"]).run(&context).await.unwrap();

        assert_eq!(
            reply.as_str(),
            "✅ Successfully added new product:\n\nName: rent\nSum: 500\nPayment day: 5"
        );
        assert_eq!(stored(&context).await, vec![Product::new("rent", 500, 5)]);
    }

    #[tokio::test]
    async fn test_duplicate_is_not_inserted() {
        let context = context().await;
        add(&["rent", "500", "5"]).run(&context).await.unwrap();

        let result = add(&["rent", "700", "6"]).run(&context).await;
        assert!(matches!(result, Err(CommandError::DuplicateProduct(ref name)) if name == "rent"));
        assert_eq!(stored(&context).await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_arguments_do_not_mutate() {
        let context = context().await;

        for args in [
            vec!["rent", "500"],
            vec!["rent", "500", "5", "extra"],
            vec!["x", "abc", "5"],
            vec!["x", "10", "day"],
            vec!["x", "10", "32"],
        ] {
            let result = add(&args).run(&context).await;
            assert!(matches!(result, Err(CommandError::Argument(_))), "{args:?}");
        }
        assert!(stored(&context).await.is_empty());
    }

    #[test]
    fn test_command_string() {
        assert_eq!(
            CommandAdd::default().to_command_string(true),
            "/add <name> <sum> <payment day>"
        );
        assert_eq!(
            add(&["Phone bill", "30", "12"]).to_command_string(false),
            "/add Phone\\ bill 30 12"
        );
    }

    #[test]
    fn test_parse_arguments_keeps_escaped_spaces() {
        let (cmd,) = CommandAdd::parse_arguments("Phone\\ bill 30 12".to_string()).unwrap();
        assert_eq!(cmd.args, vec!["Phone bill", "30", "12"]);
    }
}
