// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/api/openapi.json

use qabas_api::openapi::ApiDoc;

fn main() {
    println!("{}", ApiDoc::to_json());
}
