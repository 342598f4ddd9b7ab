//! Live login validation against a running availability service.
//!
//! Run with: cargo run --example live_check -- <login>
//!
//! Reads FORMGUARD_CHECK_URL and FORMGUARD_CHECK_TIMEOUT from the
//! environment (defaults to http://localhost:5000).

use std::env;

use formdom::Document;
use formguard_lib::signup::{self, FORM_ID, LOGIN};
use formguard_lib::validation::{attach_events, error_label};
use formguard_lib::{AvailabilityClient, CheckConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), formguard_lib::Error> {
    let login = env::args().nth(1).unwrap_or_else(|| "alice".to_string());

    let config = CheckConfig::from_env();
    println!("Checking {login:?} against {}\n", config.base_url);

    let client = AvailabilityClient::new(&config)?;
    let document = Document::new(signup::form(FORM_ID));
    attach_events(&signup::rules(client), &document, FORM_ID, false)?;

    document.input(LOGIN, login.as_str()).settled().await;

    match document.control(LOGIN).as_ref().and_then(error_label) {
        Some(message) => println!("Rejected: {message}"),
        None => println!("No error"),
    }

    Ok(())
}
