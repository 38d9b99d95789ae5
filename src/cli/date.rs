use clap::Parser;
use exhibit_validator::HistoricalDate;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Interpret historical date expressions")]
pub struct Date {
    /// Date expressions, e.g. "500 p.n.e. - 400 p.n.e.", "1350-1370", "200 n.e."
    #[arg(required = true)]
    expressions: Vec<String>,
}

impl Date {
    /// Prints each expression's reading, and exits with status 2 if any was
    /// rejected.
    #[instrument(skip(self))]
    pub fn run(self) {
        let mut rejected = 0;

        for expression in &self.expressions {
            match HistoricalDate::parse(expression) {
                Ok(date) => println!("{} {expression}: {date}", "✓".success()),
                Err(e) => {
                    rejected += 1;
                    println!("{}", format!("✗ {expression}: {e}").warning());
                }
            }
        }

        if rejected > 0 {
            std::process::exit(2);
        }
    }
}
