//! services/api/src/bin/openapi.rs
//!
//! Writes the schedule API's OpenAPI 3.0 document to `openapi.json`, so the
//! web client and catalog tooling can regenerate their typed bindings
//! without a running server.

use api_lib::web::rest::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = "openapi.json";
    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(path, spec_json)?;
    println!("Wrote schedule API spec to {}", path);
    Ok(())
}
