use anyhow::{bail, Result};
use lembrademim_lib::Client;

use crate::output::{print_report, OutputFormat};

pub async fn run(client: &Client, format: &OutputFormat) -> Result<()> {
    let count = client.endpoints().len();
    eprintln!("Probing {} endpoint(s)...", count);

    let report = client.check_connectivity().await;
    print_report(&report, format)?;

    match report.working {
        Some(ref base) => {
            eprintln!("Connected via {}", base);
            Ok(())
        }
        None => bail!("No backend endpoint is reachable"),
    }
}
