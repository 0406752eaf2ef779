mod bank_statement;
mod controller;
mod repository;
mod service;

pub use bank_statement::{BankStatement, StatementStatus};
pub use controller::BankStatementController;
pub use repository::{BankStatementRepository, JsonBankStatementRepository};
pub use service::{BankStatementService, DefaultBankStatementService};
