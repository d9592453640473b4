//! Endpoints command implementation.

use dsefeed_lib::prelude::*;

/// List every exchange page with its path, row selector and failure policy.
///
/// `policy` overrides each page's default, as `--strict` and `--lenient` do.
pub(crate) fn list_endpoints(policy: Option<FailurePolicy>) {
    println!(
        "{:<12} {:<34} {:<24} {:<6} {:<10}",
        "NAME", "PATH", "ROW SELECTOR", "SKIP", "ON ERROR"
    );
    println!("{}", "-".repeat(90));

    for endpoint in Endpoint::all() {
        let descriptor = endpoint.descriptor();
        println!(
            "{:<12} {:<34} {:<24} {:<6} {:<10}",
            endpoint.as_str(),
            descriptor.path,
            descriptor.row_selector,
            if descriptor.skip_first_row { "yes" } else { "no" },
            policy.unwrap_or(descriptor.failure_policy).as_str(),
        );
    }

    println!("\nTotal: {} endpoints", Endpoint::all().len());
}
