mod module_builder;
mod module_import;

pub use module_builder::ModuleBuilder;
pub use module_import::ModuleImportService;
