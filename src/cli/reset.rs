//! Reset command implementation.

use std::path::Path;

use crate::error::Result;
use crate::output::Printer;

use super::show::print_summary;
use super::Project;

pub fn run(dir: &Path, printer: &Printer) -> Result<()> {
    let mut project = Project::open(dir)?;
    project.store.reset();

    printer.status("Reset", "configuration restored to defaults");
    print_summary(project.store.snapshot(), printer);
    Ok(())
}
