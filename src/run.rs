mod cli;
mod shell;
mod util;

use anyhow::Result;
use std::io;

use crate::db::Database;

pub(crate) fn as_shell(db: &Database) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    shell::Shell::new(db, stdin.lock(), stdout.lock(), now).run()
}

pub(crate) fn as_cli(args: &[String], db: &Database) -> Result<()> {
    let stdout = io::stdout();
    cli::as_cli(args, db, &mut stdout.lock(), now())
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
