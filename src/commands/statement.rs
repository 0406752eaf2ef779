//! erpkit statement コマンド
//!
//! 銀行取引明細書の登録、一覧、取り込み、印刷。
//! 取り込みと印刷はアクションコントローラ経由で実行する。

use crate::action::{ActionRequest, ActionResponse};
use crate::bank_payment::{
    BankStatement, BankStatementController, BankStatementRepository, DefaultBankStatementService,
    JsonBankStatementRepository,
};
use crate::commands::AppContext;
use crate::error::Result as ErpResult;
use crate::output::CommandSummary;
use crate::settings::BANK_STATEMENT_REPORT_DIR;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Table};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List bank statements
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Register a bank statement
    Add {
        /// Statement name
        name: String,

        /// File format (afb120, camt053)
        #[arg(long)]
        format: Option<String>,
    },

    /// Import a bank statement
    Import {
        /// Statement id
        id: u64,
    },

    /// Print a bank statement to an HTML file
    Print {
        /// Statement id
        id: u64,
    },
}

/// コマンドで使う依存関係
struct Components {
    repository: Arc<JsonBankStatementRepository>,
    controller: BankStatementController,
}

fn build(ctx: &AppContext) -> ErpResult<Components> {
    let data_dir = ctx.settings.data_dir()?;
    let report_dir = ctx
        .settings
        .get(BANK_STATEMENT_REPORT_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("reports"));

    let repository = Arc::new(JsonBankStatementRepository::in_dir(&data_dir));
    let service = Arc::new(DefaultBankStatementService::new(
        repository.clone(),
        report_dir,
        ctx.i18n,
    ));
    let controller = BankStatementController::new(service, repository.clone());

    Ok(Components {
        repository,
        controller,
    })
}

pub async fn run(ctx: &AppContext, args: Args) -> Result<(), String> {
    let components = build(ctx).map_err(|e| ctx.report(&e))?;

    match args.command {
        Command::List { json } => run_list(ctx, &components, json),
        Command::Add { name, format } => run_add(ctx, &components, name, format),
        Command::Import { id } => {
            let response =
                dispatch_action(id, |req, res| components.controller.run_import(req, res));
            print_response(&response, "Bank statement imported")
        }
        Command::Print { id } => {
            let response = dispatch_action(id, |req, res| components.controller.print(req, res));
            print_response(&response, "Bank statement printed")
        }
    }
}

fn run_list(ctx: &AppContext, components: &Components, json: bool) -> Result<(), String> {
    let statements = components.repository.all().map_err(|e| ctx.report(&e))?;

    if json {
        let output = serde_json::to_string_pretty(&statements).map_err(|e| e.to_string())?;
        println!("{}", output);
        return Ok(());
    }

    if statements.is_empty() {
        println!("No bank statements registered.");
        println!("Use 'erpkit statement add <name>' to register one.");
        return Ok(());
    }

    println!("{}", statement_table(&statements));
    Ok(())
}

fn statement_table(statements: &[BankStatement]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["ID", "NAME", "FORMAT", "STATUS", "IMPORTED AT"]);

    for statement in statements {
        table.add_row(vec![
            statement.id.to_string(),
            statement.name.clone(),
            statement.file_format.clone().unwrap_or_else(|| "-".to_string()),
            statement.status.as_str().to_string(),
            statement
                .imported_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table
}

fn run_add(
    ctx: &AppContext,
    components: &Components,
    name: String,
    format: Option<String>,
) -> Result<(), String> {
    let statement = components
        .repository
        .create(&name, format.as_deref())
        .map_err(|e| ctx.report(&e))?;

    let summary = CommandSummary::success(format!(
        "Bank statement #{} '{}' registered",
        statement.id, statement.name
    ));
    println!("{} {}", summary.prefix, summary.message);
    Ok(())
}

/// ID だけを持つコンテキストでアクションを実行
fn dispatch_action(
    id: u64,
    action: impl FnOnce(&ActionRequest, &mut ActionResponse),
) -> ActionResponse {
    let request = ActionRequest::new(serde_json::json!({ "id": id }));
    let mut response = ActionResponse::new();
    action(&request, &mut response);
    response
}

fn print_response(response: &ActionResponse, success_message: &str) -> Result<(), String> {
    if let Some(error) = response.error() {
        let summary = CommandSummary::failure(format!("[{}] {}", error.code, error.message));
        return Err(format!("{} {}", summary.prefix, summary.message));
    }

    let summary = CommandSummary::success(success_message);
    println!("{} {}", summary.prefix, summary.message);
    if let Some(view) = response.view() {
        if let Some(link) = view.param("html") {
            println!("  {}: {}", view.title, link);
        }
    }
    Ok(())
}
