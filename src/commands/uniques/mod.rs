mod execute;
mod output;

use clap::Args;

pub use execute::UniquesResult;

/// List a table's unique constraints with columns in key order
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  secured_jdbc uniques -t users                     # Table on the search path
  secured_jdbc uniques -t users -s sales            # Table in an explicit schema
  secured_jdbc uniques -t users --catalog postgres://reader@localhost/app")]
pub struct UniquesCmd {
    /// Table name
    #[arg(short, long)]
    pub table: String,

    /// Schema name (defaults to the connection's search path)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Catalog connection string (overrides config file and environment)
    #[arg(long)]
    pub catalog: Option<String>,
}
