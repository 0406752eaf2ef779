//! erpkit module コマンド
//!
//! モジュールのzipアーカイブを検証し、`studio.source.dir` 配下に展開する。

use crate::commands::AppContext;
use crate::meta_files::MetaFile;
use crate::output::CommandSummary;
use crate::settings::FILE_UPLOAD_DIR;
use crate::studio::{ModuleBuilder, ModuleImportService};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a module archive without extracting it
    #[command(
        long_about = "Check that the archive is a .zip file whose every entry belongs to the module layout (build.gradle, src/main/java, src/test/java, src/main/resources)."
    )]
    Validate {
        /// Path to the module archive
        archive: PathBuf,
    },

    /// Import a module archive into the source directory
    #[command(
        long_about = "Validate the archive and extract it into <studio.source.dir>/modules/<name>. Existing files are overwritten."
    )]
    Import {
        /// Path to the module archive (relative paths resolve under file.upload.dir when set)
        archive: PathBuf,

        /// Module name, e.g. axelor-sales-crm
        #[arg(long)]
        name: String,
    },
}

pub async fn run(ctx: &AppContext, args: Args) -> Result<(), String> {
    let service = ModuleImportService::new(&ctx.settings, ctx.i18n);

    match args.command {
        Command::Validate { archive } => run_validate(ctx, &service, archive),
        Command::Import { archive, name } => run_import(ctx, &service, archive, name),
    }
}

fn run_validate(
    ctx: &AppContext,
    service: &ModuleImportService,
    archive: PathBuf,
) -> Result<(), String> {
    service.validate_file(&archive).map_err(|e| ctx.report(&e))?;

    let summary =
        CommandSummary::success(format!("{} is a valid module archive", archive.display()));
    println!("{} {}", summary.prefix, summary.message);
    Ok(())
}

fn run_import(
    ctx: &AppContext,
    service: &ModuleImportService,
    archive: PathBuf,
    name: String,
) -> Result<(), String> {
    let meta_file = if archive.is_relative() && ctx.settings.get(FILE_UPLOAD_DIR).is_none() {
        let cwd = std::env::current_dir().map_err(|e| ctx.report(&e.into()))?;
        MetaFile::from_path(&cwd.join(&archive))
    } else {
        MetaFile::from_path(&archive)
    };
    let builder = ModuleBuilder::new(name).with_import_file(meta_file);

    let imported = service
        .import_module(&builder)
        .map_err(|e| ctx.report(&e))?;

    if let Some(module) = imported {
        let summary = CommandSummary::success(format!(
            "{} imported into {} ({} file(s))",
            module.name,
            module.module_dir.display(),
            module.files.len()
        ));
        println!("{} {}", summary.prefix, summary.message);
    }
    Ok(())
}
