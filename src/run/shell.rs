use anyhow::Result;
use chrono::NaiveDateTime;
use std::io::{BufRead, Write};

use super::util::{format_amount, parse_amount, write_budget_status, write_history, write_report};
use crate::db::Database;
use crate::error::LedgerError;
use crate::models::{month_key, parse_month, Session, TransactionKind};
use crate::{auth, budget, ledger, reports};

enum Next {
    Continue,
    Quit,
}

/// Menu-driven session over any line reader and writer.
///
/// `clock` supplies the reference instant for every operation, so the
/// month and year windows follow whatever it returns.
pub(crate) struct Shell<'a, R, W, C> {
    db: &'a Database,
    input: R,
    out: W,
    clock: C,
}

impl<'a, R, W, C> Shell<'a, R, W, C>
where
    R: BufRead,
    W: Write,
    C: Fn() -> NaiveDateTime,
{
    pub(crate) fn new(db: &'a Database, input: R, out: W, clock: C) -> Self {
        Self {
            db,
            input,
            out,
            clock,
        }
    }

    /// Runs until the user exits or input ends.
    pub(crate) fn run(&mut self) -> Result<()> {
        writeln!(self.out, "Welcome to the Personal Finance Management App!")?;
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "1. Register")?;
            writeln!(self.out, "2. Login")?;
            writeln!(self.out, "3. Exit")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };
            let next = match choice.trim() {
                "1" => self.register()?,
                "2" => self.login()?,
                "3" => {
                    writeln!(self.out, "Exiting...")?;
                    Next::Quit
                }
                _ => {
                    writeln!(self.out, "Invalid option. Please choose again.")?;
                    Next::Continue
                }
            };
            if let Next::Quit = next {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// One line of input without its line ending; `None` once input ends.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    // ── Main menu ─────────────────────────────────────────────

    fn register(&mut self) -> Result<Next> {
        let Some(username) = self.prompt("Enter a username: ")? else {
            return Ok(Next::Quit);
        };
        let Some(password) = self.prompt("Enter a password: ")? else {
            return Ok(Next::Quit);
        };
        if username.trim().is_empty() {
            writeln!(self.out, "Username cannot be empty.")?;
            return Ok(Next::Continue);
        }

        match auth::register(self.db, &username, &password) {
            Ok(_) => writeln!(self.out, "User registered successfully!")?,
            Err(e) if matches!(e.downcast_ref::<LedgerError>(), Some(LedgerError::UsernameTaken(_))) => {
                writeln!(self.out, "Username already taken. Please try again.")?
            }
            Err(e) => return Err(e),
        }
        Ok(Next::Continue)
    }

    fn login(&mut self) -> Result<Next> {
        let Some(username) = self.prompt("Enter your username: ")? else {
            return Ok(Next::Quit);
        };
        let Some(password) = self.prompt("Enter your password: ")? else {
            return Ok(Next::Quit);
        };

        match auth::login(self.db, &username, &password)? {
            Some(session) => {
                writeln!(self.out, "Login successful! Welcome, {}", session.username)?;
                self.user_menu(&session)
            }
            None => {
                writeln!(self.out, "Invalid credentials. Please try again.")?;
                Ok(Next::Continue)
            }
        }
    }

    // ── User menu ─────────────────────────────────────────────

    fn user_menu(&mut self, session: &Session) -> Result<Next> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "1. Add transaction")?;
            writeln!(self.out, "2. View transactions")?;
            writeln!(self.out, "3. Reports")?;
            writeln!(self.out, "4. Set budget")?;
            writeln!(self.out, "5. Budget status")?;
            writeln!(self.out, "6. Logout")?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(Next::Quit);
            };
            let next = match choice.trim() {
                "1" => self.add_transaction(session)?,
                "2" => self.view_transactions(session)?,
                "3" => self.show_reports(session)?,
                "4" => self.set_budget(session)?,
                "5" => self.show_budget_status(session)?,
                "6" => {
                    writeln!(self.out, "Logged out.")?;
                    return Ok(Next::Continue);
                }
                _ => {
                    writeln!(self.out, "Invalid option. Please choose again.")?;
                    Next::Continue
                }
            };
            if let Next::Quit = next {
                return Ok(Next::Quit);
            }
        }
    }

    fn add_transaction(&mut self, session: &Session) -> Result<Next> {
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(Next::Quit);
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Next::Quit);
        };
        let kinds: Vec<&str> = TransactionKind::all().iter().map(|k| k.as_str()).collect();
        let Some(kind) = self.prompt(&format!("Enter type ({}): ", kinds.join("/")))? else {
            return Ok(Next::Quit);
        };

        let category = category.trim();
        if category.is_empty() {
            writeln!(self.out, "Category cannot be empty.")?;
            return Ok(Next::Continue);
        }
        let parsed = parse_amount(&amount)
            .and_then(|amount| kind.parse::<TransactionKind>().map(|kind| (amount, kind)));
        let (amount, kind) = match parsed {
            Ok(v) => v,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(Next::Continue);
            }
        };

        let alert = ledger::add_transaction(self.db, session, amount, category, kind, (self.clock)())?;
        writeln!(self.out, "Transaction added successfully!")?;
        if let Some(alert) = alert {
            writeln!(self.out, "Alert: {alert}")?;
        }
        Ok(Next::Continue)
    }

    fn view_transactions(&mut self, session: &Session) -> Result<Next> {
        let Some(month) = self.prompt("Month (YYYY-MM, blank for all): ")? else {
            return Ok(Next::Quit);
        };
        let month = if month.trim().is_empty() {
            None
        } else {
            match parse_month(&month) {
                Ok(m) => Some(m),
                Err(e) => {
                    writeln!(self.out, "{e}")?;
                    return Ok(Next::Continue);
                }
            }
        };

        let txns = ledger::history(self.db, session, month.as_deref())?;
        write_history(&mut self.out, &txns)?;
        Ok(Next::Continue)
    }

    fn show_reports(&mut self, session: &Session) -> Result<Next> {
        let report = reports::generate_reports(self.db, session, (self.clock)())?;
        write_report(&mut self.out, &report)?;
        Ok(Next::Continue)
    }

    fn set_budget(&mut self, session: &Session) -> Result<Next> {
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(Next::Quit);
        };
        let Some(limit) = self.prompt("Enter monthly limit: ")? else {
            return Ok(Next::Quit);
        };

        let category = category.trim();
        if category.is_empty() {
            writeln!(self.out, "Category cannot be empty.")?;
            return Ok(Next::Continue);
        }
        let limit = match parse_amount(&limit) {
            Ok(l) => l,
            Err(e) => {
                writeln!(self.out, "{e}")?;
                return Ok(Next::Continue);
            }
        };

        let now = (self.clock)();
        let outcome = budget::set_budget(self.db, session, category, limit, now)?;
        writeln!(
            self.out,
            "Budget {outcome} for {category} ({}): {}",
            month_key(now),
            format_amount(limit)
        )?;
        Ok(Next::Continue)
    }

    fn show_budget_status(&mut self, session: &Session) -> Result<Next> {
        let rows = budget::budget_status(self.db, session, (self.clock)())?;
        write_budget_status(&mut self.out, &rows)?;
        Ok(Next::Continue)
    }
}
