//! Handler tests against the in-memory repositories

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Days, NaiveDate};
    use rust_decimal_macros::dec;

    use crate::domain::{CreditStatus, DomainError};
    use crate::error::AppError;
    use crate::handlers::{
        CreateCreditCommand, CreateCreditHandler, CustomerHandler, FindCreditHandler,
        ListCreditsHandler, RegisterCustomerCommand, UpdateCustomerCommand,
    };
    use crate::repository::{
        CreditRepository, CustomerRepository, InMemoryCreditRepository,
        InMemoryCustomerRepository, InMemoryStore,
    };

    struct Fixture {
        customers: Arc<dyn CustomerRepository>,
        credits: Arc<dyn CreditRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            let store = InMemoryStore::new();
            Self {
                customers: Arc::new(InMemoryCustomerRepository::new(store.clone())),
                credits: Arc::new(InMemoryCreditRepository::new(store)),
            }
        }

        fn customer_handler(&self) -> CustomerHandler {
            CustomerHandler::new(self.customers.clone())
        }

        fn create_handler(&self) -> CreateCreditHandler {
            CreateCreditHandler::new(self.customers.clone(), self.credits.clone())
        }

        fn find_handler(&self) -> FindCreditHandler {
            FindCreditHandler::new(self.customers.clone(), self.credits.clone())
        }

        async fn register(&self, email: &str, tax_id: &str) -> i64 {
            self.customer_handler()
                .register(register_command(email, tax_id))
                .await
                .unwrap()
                .id
        }
    }

    fn register_command(email: &str, tax_id: &str) -> RegisterCustomerCommand {
        RegisterCustomerCommand {
            first_name: "Cami".to_string(),
            last_name: "Cavalcante".to_string(),
            tax_id: tax_id.to_string(),
            income: dec!(1000.0),
            email: email.to_string(),
            password: "1234".to_string(),
            zip_code: "000000".to_string(),
            street: "Rua da Cami, 123".to_string(),
        }
    }

    fn submission_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 20).unwrap()
    }

    fn days_after_submission(days: u64) -> NaiveDate {
        submission_day().checked_add_days(Days::new(days)).unwrap()
    }

    fn assert_domain_error(result: Result<impl std::fmt::Debug, AppError>, expected: DomainError) {
        match result {
            Err(AppError::Domain(err)) => assert_eq!(err, expected),
            other => panic!("Expected {:?}, got: {:?}", expected, other),
        }
    }

    // =========================================================================
    // Credit creation
    // =========================================================================

    #[tokio::test]
    async fn test_create_credit_returns_code_and_email() {
        let fx = Fixture::new();
        let customer_id = fx.register("camila@email.com", "28475934625").await;

        let command =
            CreateCreditCommand::new(dec!(500000), days_after_submission(15), 25, customer_id);
        let result = fx
            .create_handler()
            .execute_on(command, submission_day())
            .await
            .unwrap();

        assert_eq!(result.customer_email, "camila@email.com");
        assert_eq!(result.credit.status, CreditStatus::Pending);

        let stored = fx.credits.find_all_by_customer_id(customer_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].credit_code, result.credit.credit_code);
    }

    #[tokio::test]
    async fn test_create_credit_date_window_boundary() {
        let fx = Fixture::new();
        let customer_id = fx.register("camila@email.com", "28475934625").await;
        let handler = fx.create_handler();

        let at_limit =
            CreateCreditCommand::new(dec!(1000), days_after_submission(90), 10, customer_id);
        assert!(handler.execute_on(at_limit, submission_day()).await.is_ok());

        let past_limit =
            CreateCreditCommand::new(dec!(1000), days_after_submission(91), 10, customer_id);
        assert_domain_error(
            handler.execute_on(past_limit, submission_day()).await,
            DomainError::BusinessRule("Invalid Date".to_string()),
        );
    }

    #[tokio::test]
    async fn test_create_credit_unknown_customer() {
        let fx = Fixture::new();
        let command = CreateCreditCommand::new(dec!(500000), days_after_submission(15), 25, 330);

        assert_domain_error(
            fx.create_handler().execute_on(command, submission_day()).await,
            DomainError::NotFound("Id 330 not found".to_string()),
        );
    }

    #[tokio::test]
    async fn test_create_credit_field_errors_before_lookup() {
        let fx = Fixture::new();
        // Unknown customer, but the installment violation is reported first
        let command = CreateCreditCommand::new(dec!(500000), days_after_submission(15), 49, 330);

        let result = fx.create_handler().execute_on(command, submission_day()).await;
        match result {
            Err(AppError::Domain(DomainError::Validation(violations))) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].message, "must be less than or equal to 48");
            }
            other => panic!("Expected validation error, got: {:?}", other),
        }
        assert!(fx.credits.find_all_by_customer_id(330).await.unwrap().is_empty());
    }

    // =========================================================================
    // Credit lookup
    // =========================================================================

    #[tokio::test]
    async fn test_find_credit_by_owner() {
        let fx = Fixture::new();
        let customer_id = fx.register("camila@email.com", "28475934625").await;
        let created = fx
            .create_handler()
            .execute_on(
                CreateCreditCommand::new(dec!(50000.0), days_after_submission(45), 12, customer_id),
                submission_day(),
            )
            .await
            .unwrap();

        let details = fx
            .find_handler()
            .execute(&created.credit.credit_code.to_string(), customer_id)
            .await
            .unwrap();

        assert_eq!(details.credit, created.credit);
        assert_eq!(details.customer.email, "camila@email.com");
    }

    #[tokio::test]
    async fn test_find_credit_by_non_owner() {
        let fx = Fixture::new();
        let owner = fx.register("camila@email.com", "28475934625").await;
        let created = fx
            .create_handler()
            .execute_on(
                CreateCreditCommand::new(dec!(50000.0), days_after_submission(45), 12, owner),
                submission_day(),
            )
            .await
            .unwrap();

        assert_domain_error(
            fx.find_handler()
                .execute(&created.credit.credit_code.to_string(), 10201)
                .await,
            DomainError::BusinessRule("Contact admin".to_string()),
        );
    }

    #[tokio::test]
    async fn test_find_credit_malformed_code() {
        let fx = Fixture::new();
        assert_domain_error(
            fx.find_handler().execute("-15", 1).await,
            DomainError::MalformedIdentifier("Invalid UUID string: -15".to_string()),
        );
    }

    #[tokio::test]
    async fn test_find_credit_unknown_code() {
        let fx = Fixture::new();
        let code = uuid::Uuid::new_v4();
        assert_domain_error(
            fx.find_handler().execute(&code.to_string(), 1).await,
            DomainError::NotFound(format!("Creditcode {} not found", code)),
        );
    }

    #[tokio::test]
    async fn test_list_credits_only_returns_own() {
        let fx = Fixture::new();
        let a = fx.register("a@email.com", "28475934625").await;
        let b = fx.register("b@email.com", "52998224725").await;
        let handler = fx.create_handler();

        for customer_id in [a, a, b] {
            handler
                .execute_on(
                    CreateCreditCommand::new(dec!(100), days_after_submission(10), 2, customer_id),
                    submission_day(),
                )
                .await
                .unwrap();
        }

        let list = ListCreditsHandler::new(fx.credits.clone());
        assert_eq!(list.execute(a).await.unwrap().len(), 2);
        assert_eq!(list.execute(b).await.unwrap().len(), 1);
        assert!(list.execute(999).await.unwrap().is_empty());
    }

    // =========================================================================
    // Customers
    // =========================================================================

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let fx = Fixture::new();
        fx.register("camila@email.com", "28475934625").await;

        let result = fx
            .customer_handler()
            .register(register_command("camila@email.com", "52998224725"))
            .await;
        match result {
            Err(AppError::Domain(err)) => assert!(err.is_conflict_error()),
            other => panic!("Expected conflict, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_customer() {
        let fx = Fixture::new();
        let id = fx.register("camila@email.com", "28475934625").await;

        let updated = fx
            .customer_handler()
            .update(UpdateCustomerCommand {
                customer_id: id,
                first_name: "Camila".to_string(),
                last_name: "Cavalcante".to_string(),
                income: dec!(5000.0),
                zip_code: "45656".to_string(),
                street: "Rua Updated".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Camila");
        assert_eq!(fx.customer_handler().find(id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete_customer_cascades() {
        let fx = Fixture::new();
        let id = fx.register("camila@email.com", "28475934625").await;
        fx.create_handler()
            .execute_on(
                CreateCreditCommand::new(dec!(100), days_after_submission(10), 2, id),
                submission_day(),
            )
            .await
            .unwrap();

        fx.customer_handler().delete(id).await.unwrap();

        assert!(fx.credits.find_all_by_customer_id(id).await.unwrap().is_empty());
        assert_domain_error(
            fx.customer_handler().delete(id).await,
            DomainError::NotFound(format!("Id {} not found", id)),
        );
    }
}
