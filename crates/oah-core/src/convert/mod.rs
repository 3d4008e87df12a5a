pub mod v2;
pub mod v3;

use crate::har::HarRequest;
use crate::parse::ApiDocument;

/// Convert a parsed API document into HAR request templates, one per
/// declared operation. Unrecognized document versions yield an empty list
/// rather than an error.
pub fn convert(document: &ApiDocument) -> Vec<HarRequest> {
    match document {
        ApiDocument::V2(spec) if spec.swagger == "2.0" => v2::convert(spec),
        ApiDocument::V3(spec) if spec.openapi.starts_with('3') => v3::convert(spec),
        _ => Vec::new(),
    }
}
