use std::time::{Duration, Instant};

use tracing::{info, instrument};

use crate::domain::CVError;
use crate::record::Customer;

/// Fetches the full customer list from the data service in one request.
/// The client timeout is disabled; a request either completes or fails.
#[instrument(level = "info")]
pub fn fetch_customers(url: &str) -> Result<Vec<Customer>, CVError> {
    let start_time = Instant::now();
    let client = reqwest::blocking::Client::builder().timeout(None::<Duration>).build()?;
    let customers = client
        .get(url)
        .send()?
        .error_for_status()?
        .json::<Vec<Customer>>()?;
    info!(
        "Fetched {} customers in {}ms",
        customers.len(),
        start_time.elapsed().as_millis()
    );
    Ok(customers)
}
